//! Cross-cutting error type for domain-level failures.
//!
//! Booking-specific failures (inventory, transitions, seat conflicts) live in
//! `michitra-db` next to the transactional code that raises them; this type
//! covers the generic cases the API layer maps to 4xx/5xx responses.

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
