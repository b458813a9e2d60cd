use thiserror::Error;

/// Errors raised by the task client components
#[derive(Error, Debug)]
pub enum ClientError {
    /// Rejected locally before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API answered with a non-2xx status
    #[error("Request failed with status {status}: {body}")]
    RemoteRequestFailed { status: u16, body: String },

    /// Network, DNS or timeout failure
    #[error("API unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// A pending AI subtask could not be persisted at submit time
    #[error("Could not save subtask \"{title}\": {source}")]
    SubtaskPersistFailed {
        title: String,
        #[source]
        source: Box<ClientError>,
    },

    /// A 2xx response whose body did not decode
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// True for a non-2xx response carrying the given status
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, ClientError::RemoteRequestFailed { status, .. } if *status == code)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
