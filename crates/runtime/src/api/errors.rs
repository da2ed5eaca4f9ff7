//! Unified error types surfaced by the runtime API.
//!
//! User-caused conditions never show up here; those travel as notification
//! strings inside the responses. These variants are infrastructure and
//! programming errors that abort the request.

use battle_core::UserId;
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Every commit attempt lost the version race. Transient; the client may
    /// simply retry the request.
    #[error("battle was modified concurrently; retries exhausted")]
    ConcurrentModification,

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error("content id {0:?} is not in the catalog")]
    UnknownContent(String),

    #[error("arena roster is empty")]
    EmptyArenaRoster,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
