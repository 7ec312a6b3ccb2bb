//! Who is looking at a read model.

use super::UserId;

/// The caller on whose behalf a view is built.
///
/// Per-viewer flags (`is_favorited`, `is_subscribed`, ...) are always false
/// for [`Viewer::Anonymous`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated(UserId),
}

impl Viewer {
    /// The authenticated user id, if any.
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(id) => Some(id),
        }
    }
}

impl From<Option<UserId>> for Viewer {
    fn from(value: Option<UserId>) -> Self {
        value.map_or(Self::Anonymous, Self::Authenticated)
    }
}
