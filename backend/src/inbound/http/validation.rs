//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors are turned into `400 invalid_request` responses
//! whose `details` name the offending field and a stable machine code.

use std::fmt::Display;

use pagination::PageRequestError;
use serde_json::json;

use crate::domain::{
    Error, ImageValidationError, IngredientId, IngredientValidationError, LoginValidationError,
    RecipeId, RecipeValidationError, TagId, TagValidationError, UserId, UserValidationError,
};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

/// Build a field-scoped `invalid_request` error.
pub(crate) fn invalid_field(field: FieldName, code: &str, message: impl Display) -> Error {
    Error::invalid_request(message.to_string()).with_details(json!({
        "field": field.as_str(),
        "code": code,
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    invalid_field(field, "missing_field", format!("missing required field: {name}"))
}

pub(crate) fn user_validation_error(field: FieldName, err: UserValidationError) -> Error {
    let code = match err {
        UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyUsername
        | UserValidationError::EmptyEmail
        | UserValidationError::EmptyName => "empty",
        UserValidationError::UsernameTooLong { .. }
        | UserValidationError::EmailTooLong { .. }
        | UserValidationError::NameTooLong { .. } => "too_long",
        UserValidationError::UsernameInvalidCharacters => "invalid_characters",
        UserValidationError::InvalidEmail => "invalid_email",
    };
    invalid_field(field, code, err)
}

pub(crate) fn login_validation_error(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyEmail => ("email", "empty_email"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
        LoginValidationError::PasswordTooShort { .. } => ("password", "password_too_short"),
        LoginValidationError::PasswordEntirelyNumeric => ("password", "password_entirely_numeric"),
    };
    invalid_field(FieldName::new(field), code, err)
}

/// Password policy failures reported against a specific payload field.
pub(crate) fn password_policy_error(field: FieldName, err: LoginValidationError) -> Error {
    let code = match err {
        LoginValidationError::EmptyEmail | LoginValidationError::EmptyPassword => "empty",
        LoginValidationError::PasswordTooShort { .. } => "password_too_short",
        LoginValidationError::PasswordEntirelyNumeric => "password_entirely_numeric",
    };
    invalid_field(field, code, err)
}

pub(crate) fn recipe_validation_error(err: RecipeValidationError) -> Error {
    let (field, code) = match &err {
        RecipeValidationError::InvalidId => ("id", "invalid_id"),
        RecipeValidationError::EmptyTitle => ("title", "empty"),
        RecipeValidationError::TitleTooLong { .. } => ("title", "too_long"),
        RecipeValidationError::EmptyDescription => ("description", "empty"),
        RecipeValidationError::InvalidCookingTime => ("time", "out_of_range"),
        RecipeValidationError::NoIngredients => ("ingredients", "empty"),
        RecipeValidationError::AmountOutOfRange { .. } => ("amount", "out_of_range"),
        RecipeValidationError::DuplicateIngredient { .. } => ("ingredients", "duplicate"),
    };
    invalid_field(FieldName::new(field), code, err)
}

pub(crate) fn tag_validation_error(err: TagValidationError) -> Error {
    let (field, code) = match err {
        TagValidationError::InvalidId => ("id", "invalid_id"),
        TagValidationError::EmptyName => ("name", "empty"),
        TagValidationError::NameTooLong { .. } => ("name", "too_long"),
        TagValidationError::InvalidColor => ("color", "invalid_color"),
        TagValidationError::EmptySlug => ("slug", "empty"),
        TagValidationError::SlugTooLong { .. } => ("slug", "too_long"),
        TagValidationError::InvalidSlug => ("slug", "invalid_slug"),
    };
    invalid_field(FieldName::new(field), code, err)
}

pub(crate) fn ingredient_validation_error(err: IngredientValidationError) -> Error {
    let (field, code) = match err {
        IngredientValidationError::InvalidId => ("id", "invalid_id"),
        IngredientValidationError::EmptyName => ("name", "empty"),
        IngredientValidationError::NameTooLong { .. } => ("name", "too_long"),
        IngredientValidationError::EmptyUnit => ("unit", "empty"),
        IngredientValidationError::UnitTooLong { .. } => ("unit", "too_long"),
    };
    invalid_field(FieldName::new(field), code, err)
}

pub(crate) fn image_validation_error(err: ImageValidationError) -> Error {
    let code = match err {
        ImageValidationError::NotADataUri => "not_a_data_uri",
        ImageValidationError::UnsupportedType { .. } => "unsupported_type",
        ImageValidationError::InvalidBase64 => "invalid_base64",
        ImageValidationError::Empty => "empty",
        ImageValidationError::TooLarge { .. } => "too_large",
    };
    invalid_field(FieldName::new("image"), code, err)
}

pub(crate) fn page_request_error(err: PageRequestError) -> Error {
    let field = match err {
        PageRequestError::ZeroPage => "page",
        PageRequestError::LimitOutOfRange { .. } => "limit",
    };
    invalid_field(FieldName::new(field), "out_of_range", err)
}

/// Path identifiers that fail validation point at a resource that cannot
/// exist, so they are reported as not found.
pub(crate) fn user_id_from_path(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(format!("user {raw} not found")))
}

pub(crate) fn recipe_id_from_path(raw: i64) -> Result<RecipeId, Error> {
    RecipeId::new(raw).map_err(|_| Error::not_found(format!("recipe {raw} not found")))
}

pub(crate) fn tag_id_from_path(raw: i64) -> Result<TagId, Error> {
    TagId::new(raw).map_err(|_| Error::not_found(format!("tag {raw} not found")))
}

pub(crate) fn ingredient_id_from_path(raw: i64) -> Result<IngredientId, Error> {
    IngredientId::new(raw).map_err(|_| Error::not_found(format!("ingredient {raw} not found")))
}
