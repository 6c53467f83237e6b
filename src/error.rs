//! Errors surfaced to callers.
//!
//! Only collaborator failures and unknown resources propagate. Provider and
//! cache failures degrade inside [`crate::resolver`] and never reach here;
//! empty appointment sets and missing coordinates are not errors.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("resource {0} not found")]
    ResourceNotFound(Uuid),

    #[error("appointment store error: {0}")]
    Store(String),
}
