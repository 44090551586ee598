use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A payload was missing a required field or a field failed its conversion.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("Invalid remote url '{url}': {reason}")]
    RemoteUrl { url: String, reason: String },
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn remote_url(url: &str, reason: impl Into<String>) -> Self {
        Error::RemoteUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    /// True for failures that originate in a backend payload.
    pub fn is_deserialization(&self) -> bool {
        matches!(self, Error::Deserialization(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
