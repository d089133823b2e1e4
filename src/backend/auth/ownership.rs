/**
 * Ownership Guard
 *
 * Restricts mutation of user-owned resources to their author. Applied to
 * post edits and deletions only; reads, likes and comments are open to any
 * authenticated user.
 *
 * Identifiers are compared as parsed `Uuid`s, so differences in textual
 * representation (case, hyphenation) never cause a false mismatch.
 */

use uuid::Uuid;

use crate::backend::error::BackendError;

/// A resource with a single owning user
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// Mutation being attempted, used to pick the rejection message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerAction {
    Edit,
    Delete,
}

impl OwnerAction {
    pub fn denied_message(&self) -> &'static str {
        match self {
            Self::Edit => "You can only edit your own posts.",
            Self::Delete => "You can only delete your own posts.",
        }
    }
}

/// Fail with `Forbidden` unless `actor` owns `resource`
pub fn assert_owner<R: Owned>(resource: &R, actor: Uuid, action: OwnerAction) -> Result<(), BackendError> {
    let owner = resource.owner_id();
    if owner == actor {
        return Ok(());
    }

    tracing::warn!(%owner, %actor, ?action, "Ownership check failed");
    Err(BackendError::forbidden(action.denied_message()))
}
