use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every polled job outcome passed
    Success = 0,
    /// The aggregated tier verdict contains at least one failed job
    TierFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::TierFailed => write!(f, "Tier Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for metadata aggregation.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Every query-path variant carries the offending URL, and the
/// parameters where they exist, so failures stay diagnosable.
#[derive(Debug, Error)]
pub enum VerdictError {
    #[error("Transport failure while querying '{url}': {details}")]
    Transport { url: String, details: String },

    #[error("'{url}' returned HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unable to access url '{url}' with given options '{params}'")]
    QueryFailed {
        url: String,
        params: String,
        #[source]
        source: Box<VerdictError>,
    },

    #[error("Timeout limit reached and no data were queried from '{url}' with options '{params}'")]
    PollTimeout { url: String, params: String },

    #[error("Unknown catalog parameter '{name}' for entity type '{entity_type}'")]
    UnknownParameter { name: String, entity_type: String },

    #[error("Invalid component NVR '{nvr}': {reason}\n\n💡 Hint: expected at least name-version-release, e.g. 'bash-4.4.19-8.el8'")]
    InvalidNvr { nvr: String, reason: String },

    #[error("Malformed record from '{url}': {details}")]
    MalformedRecord { url: String, details: String },

    #[error("Failed to load CA bundle: {path}\nDetails: {details}\n\n💡 Hint: pass --ca-bundle with a readable PEM certificate bundle")]
    CaBundle { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWrite { path: PathBuf, details: String },
}

impl VerdictError {
    /// Formats query parameters the way they appear in error messages
    pub fn describe_params(params: &[(String, String)]) -> String {
        let rendered: Vec<String> = params
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        rendered.join("&")
    }
}
