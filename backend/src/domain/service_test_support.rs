//! Builders shared by the service tests.

use chrono::{TimeZone, Utc};

use crate::domain::{
    Amount, Email, Ingredient, IngredientId, PersonName, Recipe, RecipeId, RecipeIngredient,
    RecipeSummary, Tag, TagId, User, UserId, Username,
};

pub(crate) fn user_id(raw: i64) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub(crate) fn recipe_id(raw: i64) -> RecipeId {
    RecipeId::new(raw).expect("valid recipe id")
}

pub(crate) fn user(raw: i64) -> User {
    User {
        id: user_id(raw),
        email: Email::new(format!("cook{raw}@example.com")).expect("valid email"),
        username: Username::new(format!("cook{raw}")).expect("valid username"),
        first_name: PersonName::new("Ada").expect("valid name"),
        last_name: PersonName::new("Lovelace").expect("valid name"),
    }
}

pub(crate) fn ingredient(raw: i64, name: &str, unit: &str) -> Ingredient {
    Ingredient {
        id: IngredientId::new(raw).expect("valid ingredient id"),
        name: name.to_owned(),
        unit: unit.to_owned(),
    }
}

pub(crate) fn tag(raw: i64, slug: &str) -> Tag {
    Tag {
        id: TagId::new(raw).expect("valid tag id"),
        name: slug.to_owned(),
        color: "#49B64E".to_owned(),
        slug: slug.to_owned(),
    }
}

pub(crate) fn recipe(raw: i64, author: i64) -> Recipe {
    Recipe {
        id: recipe_id(raw),
        author: user(author),
        title: format!("Recipe {raw}"),
        image: None,
        description: "Mix and bake.".to_owned(),
        ingredients: vec![RecipeIngredient {
            ingredient: ingredient(1, "flour", "g"),
            amount: Amount::new(200).expect("valid amount"),
        }],
        tags: vec![tag(1, "breakfast")],
        time: 30,
        pub_date: Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(crate) fn summary(raw: i64) -> RecipeSummary {
    RecipeSummary::from(&recipe(raw, 1))
}
