use crate::core::types::Section;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdminError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Invalid content for section '{0}': {1}")]
    InvalidContent(Section, String),

    #[error("Draft path error: {0}")]
    DraftPath(String),

    #[error("Content store error: {0}")]
    Storage(String),

    #[error("Audit log error: {0}")]
    AuditLog(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Lock error: {0}")]
    LockError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    pub fn draft_path(message: impl Into<String>) -> Self {
        Self::DraftPath(message.into())
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn audit_log(message: impl Into<String>) -> Self {
        Self::AuditLog(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }
}

impl<T> From<std::sync::PoisonError<T>> for AdminError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}

impl From<std::io::Error> for AdminError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
