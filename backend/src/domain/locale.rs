//! Localisation primitives shared by catalogue and application domain types.
//!
//! The portal serves an Arabic-first audience with English as the secondary
//! locale, so localised copy is a fixed two-locale pair rather than an open
//! map.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Supported presentation locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// Arabic (the portal default).
    #[default]
    Ar,
    /// English.
    En,
}

impl Locale {
    /// Lowercase locale code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors returned by [`LocalizedText::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalizedTextValidationError {
    /// A required locale value was empty once trimmed.
    EmptyValue {
        /// The locale whose value was empty.
        locale: Locale,
    },
}

impl fmt::Display for LocalizedTextValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { locale } => {
                write!(f, "localized text for locale '{locale}' must not be empty")
            }
        }
    }
}

impl std::error::Error for LocalizedTextValidationError {}

/// A required string carried in both supported locales.
///
/// ## Invariants
/// - Both values are non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    ar: String,
    en: String,
}

impl LocalizedText {
    /// Validate and construct a localized pair.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Locale, LocalizedText};
    ///
    /// let name = LocalizedText::new("تأشيرة سياحية", "Tourist visa").expect("valid pair");
    /// assert_eq!(name.get(Locale::En), "Tourist visa");
    /// ```
    pub fn new(
        ar: impl Into<String>,
        en: impl Into<String>,
    ) -> Result<Self, LocalizedTextValidationError> {
        let ar = ar.into();
        let en = en.into();
        if ar.trim().is_empty() {
            return Err(LocalizedTextValidationError::EmptyValue { locale: Locale::Ar });
        }
        if en.trim().is_empty() {
            return Err(LocalizedTextValidationError::EmptyValue { locale: Locale::En });
        }
        Ok(Self { ar, en })
    }

    /// Value for the requested locale.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => self.ar.as_str(),
            Locale::En => self.en.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn localized_text_resolves_both_locales() {
        let text = LocalizedText::new("سياحية", "Tourist").expect("valid pair");
        assert_eq!(text.get(Locale::Ar), "سياحية");
        assert_eq!(text.get(Locale::En), "Tourist");
    }

    #[rstest]
    #[case("", "Tourist", Locale::Ar)]
    #[case("سياحية", "  ", Locale::En)]
    fn localized_text_rejects_blank_locale(
        #[case] ar: &str,
        #[case] en: &str,
        #[case] blank: Locale,
    ) {
        let err = LocalizedText::new(ar, en).expect_err("blank locale must fail");
        assert_eq!(err, LocalizedTextValidationError::EmptyValue { locale: blank });
    }
}
