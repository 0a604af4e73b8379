/*!
 * Error types shared by the adapter
 *
 * Every fallible operation in the library returns [`AdapterError`]; the
 * host decides how to present it.
 */

use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors surfaced to the host
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AdapterError {
    /// Opening a session failed, or the connection arguments were unusable
    #[error("{title}: {message}")]
    Connection { title: String, message: String },

    /// A metadata or function-list query failed
    #[error("Query failed: {0}")]
    Query(String),

    /// The packaged keyword resource could not be loaded
    #[error("Invalid adapter configuration: {0}")]
    Configuration(String),
}

impl AdapterError {
    pub const CONNECTION_TITLE: &'static str = "could not connect to databend";

    /// Connection error carrying the standard title
    pub fn connection(message: impl Into<String>) -> Self {
        AdapterError::Connection {
            title: Self::CONNECTION_TITLE.to_string(),
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        AdapterError::Query(message.into())
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, AdapterError::Connection { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_error_display() {
        let err = AdapterError::connection("Connection refused");
        assert!(err.is_connection());
        assert_eq!(
            err.to_string(),
            "could not connect to databend: Connection refused"
        );
    }

    #[test]
    fn test_query_error_display() {
        let err = AdapterError::query("unknown table");
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Query failed: unknown table");
    }
}
