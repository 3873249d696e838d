//! Error types for the sonification core.

use thiserror::Error;

/// Result type for sonification operations.
pub type SonifyResult<T> = Result<T, SonifyError>;

/// Errors that can occur while turning pixels into audio.
#[derive(Debug, Error)]
pub enum SonifyError {
    /// The pixel buffer does not describe a usable image.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Error message.
        message: String,
    },

    /// Scale templates or pool parameters are unusable.
    #[error("configuration error: {message}")]
    Configuration {
        /// Error message.
        message: String,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid note duration.
    #[error("invalid note duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// The rendered audio does not fit in a WAV data chunk.
    #[error("audio too long for WAV: {data_bytes} bytes of sample data")]
    WavTooLarge {
        /// Size the data chunk would need.
        data_bytes: u64,
    },

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Synthesis was aborted between notes.
    #[error("synthesis cancelled after {completed} notes")]
    Cancelled {
        /// Number of notes fully rendered before the abort was observed.
        completed: usize,
    },
}

impl SonifyError {
    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SonifyError::InvalidInput { .. } => "SONIFY_001",
            SonifyError::Configuration { .. } => "SONIFY_002",
            SonifyError::InvalidSampleRate { .. } => "SONIFY_003",
            SonifyError::InvalidDuration { .. } => "SONIFY_004",
            SonifyError::Cancelled { .. } => "SONIFY_005",
            SonifyError::WavTooLarge { .. } => "SONIFY_006",
            SonifyError::Io(_) => "SONIFY_007",
        }
    }

    /// Broad error category.
    pub fn category(&self) -> &'static str {
        match self {
            SonifyError::InvalidInput { .. } => "input",
            SonifyError::Configuration { .. }
            | SonifyError::InvalidSampleRate { .. }
            | SonifyError::InvalidDuration { .. } => "configuration",
            SonifyError::Cancelled { .. } => "cancelled",
            SonifyError::WavTooLarge { .. } | SonifyError::Io(_) => "output",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_helper() {
        let err = SonifyError::invalid_input("buffer is 3 bytes, expected 4");
        assert!(err.to_string().contains("expected 4"));
        assert_eq!(err.code(), "SONIFY_001");
        assert_eq!(err.category(), "input");
    }

    #[test]
    fn test_configuration_helper() {
        let err = SonifyError::configuration("pool size must be positive");
        assert!(err.to_string().contains("pool size"));
        assert_eq!(err.category(), "configuration");
    }

    #[test]
    fn test_rate_and_duration_are_configuration_defects() {
        assert_eq!(
            SonifyError::InvalidSampleRate { rate: 0 }.category(),
            "configuration"
        );
        assert_eq!(
            SonifyError::InvalidDuration { duration: -1.0 }.category(),
            "configuration"
        );
    }

    #[test]
    fn test_output_errors() {
        let err = SonifyError::WavTooLarge {
            data_bytes: 1 << 33,
        };
        assert_eq!(err.code(), "SONIFY_006");
        assert_eq!(err.category(), "output");

        let io = std::io::Error::new(std::io::ErrorKind::WriteZero, "disk full");
        let err = SonifyError::from(io);
        assert!(err.to_string().contains("disk full"));
        assert_eq!(err.category(), "output");
    }

    #[test]
    fn test_cancelled_reports_progress() {
        let err = SonifyError::Cancelled { completed: 17 };
        assert!(err.to_string().contains("17"));
        assert_eq!(err.code(), "SONIFY_005");
    }
}
