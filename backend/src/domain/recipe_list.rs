//! Per-user recipe lists: favourites and the shopping cart.

use std::fmt;

/// Which per-user list a recipe is added to or removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeList {
    Favorites,
    ShoppingCart,
}

impl RecipeList {
    /// Message reported when the recipe is already on the list.
    pub const fn already_present_message(self) -> &'static str {
        match self {
            Self::Favorites => "recipe is already in favorites",
            Self::ShoppingCart => "recipe is already in the shopping cart",
        }
    }

    /// Message reported when removing a recipe that is not on the list.
    pub const fn missing_message(self) -> &'static str {
        match self {
            Self::Favorites => "recipe is not in favorites",
            Self::ShoppingCart => "recipe is not in the shopping cart",
        }
    }
}

impl fmt::Display for RecipeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Favorites => "favorites",
            Self::ShoppingCart => "shopping_cart",
        })
    }
}
