//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly. `diesel print-schema`
//! regenerates them from a live database.

diesel::table! {
    /// Registered accounts. `email` and `username` are unique.
    users (id) {
        id -> Int8,
        email -> Varchar,
        username -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    /// `user_id` follows `author_id`; the pair is unique.
    follows (id) {
        id -> Int8,
        user_id -> Int8,
        author_id -> Int8,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Int8,
        name -> Varchar,
        measurement_unit -> Varchar,
    }
}

diesel::table! {
    tags (id) {
        id -> Int8,
        name -> Varchar,
        color -> Varchar,
        slug -> Varchar,
    }
}

diesel::table! {
    /// Published recipes. `image` and `image_mime` are both set or both null.
    recipes (id) {
        id -> Int8,
        author_id -> Int8,
        title -> Varchar,
        image -> Nullable<Bytea>,
        image_mime -> Nullable<Varchar>,
        description -> Text,
        /// Minutes, at least one.
        cooking_time -> Int4,
        pub_date -> Timestamptz,
    }
}

diesel::table! {
    recipe_ingredients (id) {
        id -> Int8,
        recipe_id -> Int8,
        ingredient_id -> Int8,
        amount -> Int2,
    }
}

diesel::table! {
    recipe_tags (id) {
        id -> Int8,
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    favorites (id) {
        id -> Int8,
        user_id -> Int8,
        recipe_id -> Int8,
    }
}

diesel::table! {
    shopping_cart (id) {
        id -> Int8,
        user_id -> Int8,
        recipe_id -> Int8,
    }
}

diesel::joinable!(recipes -> users (author_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(favorites -> recipes (recipe_id));
diesel::joinable!(shopping_cart -> recipes (recipe_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    follows,
    ingredients,
    tags,
    recipes,
    recipe_ingredients,
    recipe_tags,
    favorites,
    shopping_cart,
);
