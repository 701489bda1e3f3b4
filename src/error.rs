//! Failures reported by store operations.

use crate::db;
use crate::event::RegistrationStatus;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("registration cannot move from {from} to {to}")]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },

    #[error("database error: {0}")]
    Db(#[from] db::Error),
}

impl Error {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
