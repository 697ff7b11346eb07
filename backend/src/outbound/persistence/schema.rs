//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate with
//! `diesel print-schema` or update by hand.

diesel::table! {
    /// User accounts created by the external sign-in flow.
    users (id) {
        /// Primary key, serial.
        id -> Int4,
        /// External-provider identifier (unique, max 64 characters).
        #[max_length = 64]
        open_id -> Varchar,
        /// Display name reported by the provider.
        name -> Nullable<Text>,
        /// Email reported by the provider.
        #[max_length = 320]
        email -> Nullable<Varchar>,
        /// Sign-in method reported by the provider.
        #[max_length = 64]
        login_method -> Nullable<Varchar>,
        /// Account role (`user` or `admin`).
        #[max_length = 16]
        role -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
        /// Timestamp of the most recent sign-in.
        last_signed_in -> Timestamptz,
    }
}

diesel::table! {
    /// Visa product catalogue, administered out of band.
    visa_types (id) {
        /// Primary key, serial.
        id -> Int4,
        /// Arabic product name.
        #[max_length = 255]
        name_ar -> Varchar,
        /// English product name.
        #[max_length = 255]
        name_en -> Varchar,
        /// Arabic description.
        description_ar -> Nullable<Text>,
        /// English description.
        description_en -> Nullable<Text>,
        /// Minor-unit-free SAR amount.
        price -> Int4,
        /// Advertised processing duration in days.
        processing_days -> Int4,
        /// JSON-encoded list of requirement strings.
        requirements -> Nullable<Text>,
        /// Whether the entry is currently offered.
        active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submitted visa applications, read-scoped to the owning user.
    visa_applications (id) {
        /// Primary key, serial.
        id -> Int4,
        /// Owning user (foreign key to `users.id`).
        user_id -> Int4,
        /// Referenced catalogue entry (foreign key to `visa_types.id`).
        visa_type_id -> Int4,
        /// Lifecycle state, one of the four declared statuses.
        #[max_length = 16]
        status -> Varchar,
        /// Applicant's full name, captured at submission time.
        #[max_length = 255]
        full_name -> Varchar,
        /// Contact email, captured at submission time.
        #[max_length = 320]
        email -> Varchar,
        /// Contact phone, captured at submission time.
        #[max_length = 20]
        phone -> Varchar,
        /// Passport number, captured at submission time.
        #[max_length = 50]
        passport_number -> Varchar,
        /// Nationality, captured at submission time.
        #[max_length = 100]
        nationality -> Varchar,
        /// Intended travel date.
        travel_date -> Nullable<Timestamptz>,
        /// JSON-encoded list of document references.
        documents -> Nullable<Text>,
        /// Free-text notes.
        notes -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (maintained by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(visa_applications -> users (user_id));
diesel::joinable!(visa_applications -> visa_types (visa_type_id));

diesel::allow_tables_to_appear_in_same_query!(users, visa_types, visa_applications);
