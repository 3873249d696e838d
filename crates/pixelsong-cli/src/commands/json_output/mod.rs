//! JSON output types for machine-readable CLI output.
//!
//! Every command that accepts `--json` prints exactly one of these documents
//! to stdout instead of colored text.

mod records;

pub use records::{RenderOutput, RenderedFile, ScalesOutput};

use serde::{Deserialize, Serialize};

/// Error codes for CLI operations.
///
/// These codes are stable and can be used for programmatic error handling.
pub mod error_codes {
    /// Image could not be read or decoded
    pub const IMAGE_DECODE: &str = "CLI_001";
    /// Config file unreadable or invalid
    pub const CONFIG: &str = "CLI_002";
    /// Output file could not be written
    pub const WRITE: &str = "CLI_004";
    /// More images than a single run accepts
    pub const TOO_MANY_INPUTS: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "SONIFY_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Input file the error refers to (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_serialization() {
        let error = JsonError::new("CLI_001", "bad image").with_file("cat.png");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"CLI_001\""));
        assert!(json.contains("\"file\":\"cat.png\""));
    }

    #[test]
    fn test_json_error_omits_missing_file() {
        let json = serde_json::to_string(&JsonError::new("CLI_002", "x")).unwrap();
        assert!(!json.contains("file"));
    }

    #[test]
    fn test_error_codes_distinct_from_core() {
        let codes = [
            error_codes::IMAGE_DECODE,
            error_codes::CONFIG,
            error_codes::WRITE,
            error_codes::TOO_MANY_INPUTS,
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
        assert!(codes.iter().all(|c| c.starts_with("CLI_")));

        // core failures keep their own code in CLI output
        let core = pixelsong_core::SonifyError::invalid_input("empty image");
        let json = JsonError::new(core.code(), core.to_string());
        assert_eq!(json.code, "SONIFY_001");
    }
}
