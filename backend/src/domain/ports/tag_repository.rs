//! Port for recipe tags.
use async_trait::async_trait;

use crate::domain::{Tag, TagDraft, TagId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by tag repository adapters.
    pub enum TagPersistenceError {
        Connection { message: String } => "tag repository connection failed: {message}",
        Query { message: String } => "tag repository query failed: {message}",
        /// Name, colour or slug is already taken by another tag.
        Duplicate { message: String } => "tag already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn create(&self, draft: &TagDraft) -> Result<Tag, TagPersistenceError>;

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, TagPersistenceError>;

    /// All tags ordered by id.
    async fn list(&self) -> Result<Vec<Tag>, TagPersistenceError>;
}
