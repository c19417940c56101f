//! Error types for the musicstore daemon.
//!
//! Generation itself is total: seeds always parse and numeric parameters are
//! clamped. Errors only arise from locale data and from writing output.

use std::fmt;

/// Error codes returned by the daemon in error responses.
///
/// These codes are used in JSON-RPC error responses and allow clients
/// to programmatically handle specific error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Locale JSON file missing or unreadable.
    /// Trigger: No `<code>.json` in the locales directory, or a malformed code.
    LocaleNotFound,

    /// Locale JSON file exists but does not satisfy the data contract.
    /// Trigger: Invalid JSON, empty genre or review lists, empty title words.
    LocaleInvalid,

    /// An audio reference could not be turned back into (seed, page, index).
    /// Trigger: Missing or non-numeric `page`/`index` query values.
    InvalidAudioRef,

    /// Writing generated output failed.
    /// Trigger: Unwritable output directory, disk full.
    OutputFailed,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::LocaleNotFound => "LOCALE_NOT_FOUND",
            ErrorCode::LocaleInvalid => "LOCALE_INVALID",
            ErrorCode::InvalidAudioRef => "INVALID_AUDIO_REF",
            ErrorCode::OutputFailed => "OUTPUT_FAILED",
        }
    }

    /// Returns a human-readable description of the error.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::LocaleNotFound => "Locale data file not found or unreadable",
            ErrorCode::LocaleInvalid => "Locale data file is malformed or incomplete",
            ErrorCode::InvalidAudioRef => "Audio reference does not name a seed, page and index",
            ErrorCode::OutputFailed => "Failed to write generated output",
        }
    }

    /// Returns a recovery hint suggesting how to resolve this error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCode::LocaleNotFound => {
                "Check the locale code (e.g. 'en-US') and that MUSICSTORE_LOCALES_PATH \
                 points at a directory containing '<code>.json'"
            }
            ErrorCode::LocaleInvalid => {
                "Locale files need title_words.adjectives/nouns/suffixes and non-empty \
                 genres and review_phrases arrays"
            }
            ErrorCode::InvalidAudioRef => {
                "Use the audioUrl exactly as returned by get_songs, \
                 e.g. '/api/audio.wav?seed=1&page=1&index=1&seconds=10'"
            }
            ErrorCode::OutputFailed => {
                "Check that MUSICSTORE_OUTPUT_PATH is writable and has free space"
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for catalog operations.
#[derive(Debug)]
pub struct CatalogError {
    /// The error code identifying the type of error.
    pub code: ErrorCode,
    /// Human-readable error message with context.
    pub message: String,
    /// Optional underlying cause of the error.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CatalogError {
    /// Creates a new CatalogError with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new CatalogError with an underlying cause.
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a LOCALE_NOT_FOUND error.
    pub fn locale_not_found(code: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::LocaleNotFound,
            format!("Locale JSON not found for {}", code.into()),
        )
    }

    /// Creates a LOCALE_INVALID error.
    pub fn locale_invalid(code: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::LocaleInvalid,
            format!("Locale {} is invalid: {}", code, reason.into()),
        )
    }

    /// Creates an INVALID_AUDIO_REF error.
    pub fn invalid_audio_ref(reference: &str, reason: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidAudioRef,
            format!("Invalid audio reference '{}': {}", reference, reason.into()),
        )
    }

    /// Creates an OUTPUT_FAILED error wrapping an I/O failure.
    pub fn output_failed(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::with_source(
            ErrorCode::OutputFailed,
            format!("Failed to write {}: {}", path.display(), source),
            source,
        )
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}. Recovery: {}",
            self.code,
            self.message,
            self.code.recovery_hint()
        )
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_code_as_str() {
        assert_eq!(ErrorCode::LocaleNotFound.as_str(), "LOCALE_NOT_FOUND");
        assert_eq!(ErrorCode::LocaleInvalid.as_str(), "LOCALE_INVALID");
        assert_eq!(ErrorCode::InvalidAudioRef.as_str(), "INVALID_AUDIO_REF");
        assert_eq!(ErrorCode::OutputFailed.as_str(), "OUTPUT_FAILED");
    }

    #[test]
    fn error_code_recovery_hints_not_empty() {
        for code in [
            ErrorCode::LocaleNotFound,
            ErrorCode::LocaleInvalid,
            ErrorCode::InvalidAudioRef,
            ErrorCode::OutputFailed,
        ] {
            assert!(!code.recovery_hint().is_empty());
            assert!(!code.description().is_empty());
        }
    }

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::locale_not_found("xx-XX");
        assert!(err.to_string().contains("LOCALE_NOT_FOUND"));
        assert!(err.to_string().contains("xx-XX"));
        assert!(err.to_string().contains("Recovery:"));
    }

    #[test]
    fn output_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CatalogError::output_failed(std::path::Path::new("/tmp/x.wav"), io);
        assert_eq!(err.code, ErrorCode::OutputFailed);
        assert!(err.source().is_some());
    }
}
