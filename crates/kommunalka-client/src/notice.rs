use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A transient message for the user (the toast of a graphical front-end).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }

    /// Turn a failed action into a notice. The server's message wins over
    /// `fallback`; network trouble gets a fixed text.
    pub fn from_error(err: &ClientError, fallback: &str) -> Self {
        match err {
            ClientError::Application { message, .. } => {
                Self::error(message.clone().unwrap_or_else(|| fallback.to_string()))
            }
            ClientError::Transport(_) | ClientError::Malformed(_) => {
                Self::error("Connection problem")
            }
            ClientError::Validation(msg) => Self::error(msg.clone()),
            ClientError::Session(_) | ClientError::Config(_) => Self::error(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
