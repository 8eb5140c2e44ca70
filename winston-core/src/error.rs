use thiserror::Error;

/// Failures of an upload-and-analyze session.
///
/// `Display` output is what the user sees in an alert or on stderr.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Preferences must be set")]
    MissingParameters,

    #[error("{field} must be a whole number (got {value:?})")]
    InvalidParameter { field: &'static str, value: String },

    #[error("{field} is out of range (got {value:?})")]
    ParameterOutOfRange { field: &'static str, value: String },

    /// The pre-check reported no uploaded files.
    #[error("{0}")]
    NoFiles(String),

    /// Non-success analyze response; carries the raw body.
    #[error("{0}")]
    Server(String),

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}
