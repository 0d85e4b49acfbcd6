use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("No API key supplied")]
    MissingCredential,

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Request error: {0}")]
    Request(String),

    #[error("Render error: {0}")]
    Render(#[from] std::io::Error),
}

impl ChainError {
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}
