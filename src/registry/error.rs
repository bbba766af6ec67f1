//! Registry error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading, updating or writing `versions.json`
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("IO error when reading `{0}`")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("`{0}` is not a valid version registry")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("failed to serialize version registry")]
    Serialize(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_registry_error_display() {
        let err = RegistryError::Write(
            PathBuf::from("site/versions.json"),
            Error::new(ErrorKind::PermissionDenied, "read-only"),
        );
        assert!(format!("{err}").contains("site/versions.json"));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = RegistryError::Parse(PathBuf::from("versions.json"), json_err);
        let display = format!("{err}");
        assert!(display.contains("versions.json"));
        assert!(display.contains("not a valid version registry"));
    }
}
