//! Bookmark store and key-value storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Node not found: {0}")]
    NotFound(String),

    #[error("Parent is not a folder: {0}")]
    InvalidParent(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = StoreError::NotFound("42".to_string());
        let display = err.to_string();
        assert!(display.contains("not found"));
        assert!(display.contains("42"));
    }

    #[test]
    fn test_invalid_parent_error() {
        let err = StoreError::InvalidParent("7".to_string());
        assert!(err.to_string().contains("not a folder"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::from(io_err);
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoreError::from(json_err);
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
