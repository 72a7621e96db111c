//! Current-user identity source.

/// Supplies the id of the signed-in user, if any.
///
/// The card never authenticates; it only compares this id against the
/// post's owner to decide whether edit/delete are allowed.
pub trait CurrentUser: Clone + Send + Sync + 'static {
    fn current_user_id(&self) -> Option<String>;
}

/// Identity source with a fixed answer.
///
/// Covers the two cases the card cares about: a signed-in user (owner or
/// not) and nobody signed in.
#[derive(Debug, Clone)]
pub struct FixedUser {
    user_id: Option<String>,
}

impl FixedUser {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self { user_id: None }
    }
}

impl CurrentUser for FixedUser {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}
