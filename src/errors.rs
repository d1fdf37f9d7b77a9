//! Crate-wide error type.
//!
//! Variants are generated by a macro so every error carries a stable code,
//! a type name and a message.

use std::fmt;

/// Generates the error enum together with:
/// - `code()`: stable error code
/// - `error_type()`: human readable type name
/// - `message()`: error details
/// - one snake_case constructor per variant
macro_rules! define_coop_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum CoopError {
            $($variant(String),)*
        }

        impl CoopError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(CoopError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(CoopError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(CoopError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl CoopError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        CoopError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_coop_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Conflict("E013", "Conflict"),
    CapacityExceeded("E014", "Capacity Exceeded"),
    PeriodFinalized("E015", "Financial Period Finalized"),
    DocumentRender("E016", "Document Render Error"),
    Import("E017", "Import Error"),
    Notification("E018", "Notification Delivery Error"),
}

impl CoopError {
    /// Colored output for the development console.
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// Whether the error is the caller's fault rather than an infrastructure failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoopError::Validation(_)
                | CoopError::NotFound(_)
                | CoopError::Conflict(_)
                | CoopError::CapacityExceeded(_)
                | CoopError::PeriodFinalized(_)
                | CoopError::DateParse(_)
                | CoopError::Import(_)
                | CoopError::Authentication(_)
                | CoopError::Authorization(_)
        )
    }
}

impl fmt::Display for CoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CoopError {}

impl From<sea_orm::DbErr> for CoopError {
    fn from(err: sea_orm::DbErr) -> Self {
        CoopError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for CoopError {
    fn from(err: std::io::Error) -> Self {
        CoopError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CoopError {
    fn from(err: serde_json::Error) -> Self {
        CoopError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for CoopError {
    fn from(err: chrono::ParseError) -> Self {
        CoopError::DateParse(err.to_string())
    }
}

impl From<csv::Error> for CoopError {
    fn from(err: csv::Error) -> Self {
        CoopError::Import(err.to_string())
    }
}

impl From<rust_decimal::Error> for CoopError {
    fn from(err: rust_decimal::Error) -> Self {
        CoopError::Validation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CoopError::cache_connection("test").code(), "E001");
        assert_eq!(CoopError::database_config("test").code(), "E003");
        assert_eq!(CoopError::validation("test").code(), "E007");
        assert_eq!(CoopError::authentication("test").code(), "E011");
        assert_eq!(CoopError::period_finalized("test").code(), "E015");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            CoopError::capacity_exceeded("full").error_type(),
            "Capacity Exceeded"
        );
        assert_eq!(CoopError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_error_message() {
        let err = CoopError::conflict("Student already enrolled");
        assert_eq!(err.message(), "Student already enrolled");
    }

    #[test]
    fn test_format_simple() {
        let err = CoopError::validation("Invalid period");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid period"));
    }

    #[test]
    fn test_client_error_classification() {
        assert!(CoopError::not_found("x").is_client_error());
        assert!(CoopError::period_finalized("x").is_client_error());
        assert!(!CoopError::database_operation("x").is_client_error());
    }

    #[test]
    fn test_from_decimal_error() {
        let err: CoopError = "abc".parse::<rust_decimal::Decimal>().unwrap_err().into();
        assert_eq!(err.code(), "E007");
    }
}
