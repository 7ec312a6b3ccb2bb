//! Driving port for browsing recipes.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Error, Listing, RecipeId, RecipeView, UserId, Viewer};

/// Listing filters as supplied by a client.
///
/// The list flags refer to the viewer's own lists; an anonymous viewer asking
/// for either gets an empty listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeSearch {
    pub author: Option<UserId>,
    pub tags: Vec<String>,
    pub only_favorited: bool,
    pub only_in_shopping_cart: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    async fn list_recipes(
        &self,
        viewer: Viewer,
        search: RecipeSearch,
        page: PageRequest,
    ) -> Result<Listing<RecipeView>, Error>;

    async fn get_recipe(&self, viewer: Viewer, id: RecipeId) -> Result<RecipeView, Error>;
}
