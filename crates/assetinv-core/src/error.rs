//! Error types for the asset inventory pipeline

use thiserror::Error;

/// Result type alias using the asset inventory Error
pub type Result<T> = std::result::Result<T, Error>;

/// Asset inventory error types
#[derive(Error, Debug)]
pub enum Error {
    // === Source Errors ===
    #[error("Asset source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV header: {0}")]
    InvalidHeader(String),

    // === Row Errors ===
    #[error("Malformed row {line}: {message}")]
    MalformedRow { line: u64, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a `SourceUnavailable` error for a path
    pub fn source_unavailable(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::SourceUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Check if the report boundary should degrade this error to an empty report
    pub fn is_degradable(&self) -> bool {
        matches!(
            self,
            Error::SourceUnavailable { .. }
                | Error::InvalidHeader(_)
                | Error::MalformedRow { .. }
                | Error::Io(_)
        )
    }

    /// Get an error code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Error::InvalidHeader(_) => "INVALID_HEADER",
            Error::MalformedRow { .. } => "MALFORMED_ROW",
            Error::Configuration(_) => "CONFIG_ERROR",
            Error::Io(_) => "IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_unavailable_is_degradable() {
        let err = Error::source_unavailable(
            "/tmp/missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.is_degradable());
        assert_eq!(err.code(), "SOURCE_UNAVAILABLE");
        assert!(err.to_string().contains("/tmp/missing.csv"));
    }

    #[test]
    fn test_io_error_converts() {
        fn read() -> Result<()> {
            let mut buf = [0u8; 4];
            std::io::Read::read_exact(&mut &b"ab"[..], &mut buf)?;
            Ok(())
        }
        let err = read().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_degradable());
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_configuration_is_not_degradable() {
        let err = Error::Configuration(String::from("bad toml"));
        assert!(!err.is_degradable());
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
