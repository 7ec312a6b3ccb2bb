//! Driving port for reading user profiles.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, Listing, UserId, UserView, Viewer};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// One page of users as seen by `viewer`.
    async fn list_users(
        &self,
        viewer: Viewer,
        page: PageRequest,
    ) -> Result<Listing<UserView>, Error>;

    /// A single profile as seen by `viewer`.
    async fn get_user(&self, viewer: Viewer, id: UserId) -> Result<UserView, Error>;
}
