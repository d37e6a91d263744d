use shared::error::ErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The collection service answered with a non-success status.
    #[error("{message}")]
    Request { status: u16, message: String },
    /// Anything else: unreachable server, undecodable body, bad URL.
    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl ClientError {
    /// Builds a request error from a status and the raw response body. The
    /// body's `message` wins when it parses; otherwise a generic status line.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.message().map(str::to_string))
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        Self::Request { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            Self::Unknown(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(value: reqwest::Error) -> Self {
        Self::Unknown(anyhow::Error::new(value))
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
