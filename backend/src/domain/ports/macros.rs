//! Helper macro for generating domain port error enums.
//!
//! Port errors carry a human-readable message per variant; adapters construct
//! them through the generated snake_case constructors so call sites stay
//! terse (`UserRepositoryError::connection("pool exhausted")`).

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Adapter-supplied failure description.
                    message: String,
                },
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    /// Construct this variant from any string-like message.
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        /// Example error for macro coverage.
        pub enum ExamplePortError {
            /// Connection-level failure.
            Connection => "connection failed: {message}",
            /// Query-level failure.
            Query => "query failed: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_message() {
        let err = ExamplePortError::connection("pool exhausted");
        assert_eq!(err.to_string(), "connection failed: pool exhausted");
    }

    #[test]
    fn variants_compare_by_message() {
        assert_eq!(
            ExamplePortError::query("boom"),
            ExamplePortError::Query {
                message: "boom".to_owned()
            }
        );
    }
}
