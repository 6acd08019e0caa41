use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx response. `message` is the service's `error` field when it sent one.
    #[error("service responded {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Application { status: u16, message: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),

    #[error("session storage error: {0}")]
    Session(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Network failures and unreadable bodies: the request never produced a
    /// usable answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Malformed(_))
    }

    /// The server's own explanation, if it gave one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Application { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
