//! Ad ownership guard.
//!
//! Only the user who created an ad may edit or delete it. A failed check is
//! not an error response: callers render [`NotAuthor`] as a message page.

use crate::types::DbId;

/// Message shown to a user who tries to change someone else's ad.
pub const NOT_AUTHOR_MESSAGE: &str = "You are not the author of this ad.";

/// The acting user does not own the ad they tried to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("You are not the author of this ad.")]
pub struct NotAuthor;

impl NotAuthor {
    pub fn message(self) -> &'static str {
        NOT_AUTHOR_MESSAGE
    }
}

/// Succeeds only when `actor_id` is the ad owner.
pub fn ensure_author(owner_id: DbId, actor_id: DbId) -> Result<(), NotAuthor> {
    if owner_id == actor_id {
        Ok(())
    } else {
        Err(NotAuthor)
    }
}
