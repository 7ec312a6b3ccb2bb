//! Recipe tags: a display name, a hex colour and a URL slug.

use std::fmt;

/// Maximum length of a tag name, in characters.
pub const TAG_NAME_MAX: usize = 64;
/// Maximum length of a tag slug, in characters.
pub const TAG_SLUG_MAX: usize = 32;

/// Validation errors for tag inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    InvalidColor,
    EmptySlug,
    SlugTooLong { max: usize },
    InvalidSlug,
}

impl fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "tag id must be a positive integer"),
            Self::EmptyName => write!(f, "tag name must not be empty"),
            Self::NameTooLong { max } => write!(f, "tag name must be at most {max} characters"),
            Self::InvalidColor => write!(f, "color must be a hex code such as #49B64E"),
            Self::EmptySlug => write!(f, "slug must not be empty"),
            Self::SlugTooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidSlug => write!(
                f,
                "slug may only contain ASCII letters, digits, hyphens and underscores",
            ),
        }
    }
}

impl std::error::Error for TagValidationError {}

/// Identifier of a tag row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(i64);

impl TagId {
    pub fn new(id: i64) -> Result<Self, TagValidationError> {
        if id <= 0 {
            return Err(TagValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    pub(crate) const fn from_trusted(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value.chars().skip(1).all(|ch| ch.is_ascii_hexdigit())
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

/// A tag attached to recipes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: String,
    pub slug: String,
}

/// Validated tag fields, used both for catalogue creation and for the tag
/// list of a recipe write, where tags are resolved or created by slug.
///
/// # Examples
/// ```
/// use foodgram::domain::TagDraft;
///
/// let draft = TagDraft::new("Breakfast", "#E26C2D", "breakfast").expect("valid tag");
/// assert_eq!(draft.slug(), "breakfast");
/// assert!(TagDraft::new("Lunch", "red", "lunch").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDraft {
    name: String,
    color: String,
    slug: String,
}

impl TagDraft {
    pub fn new(name: &str, color: &str, slug: &str) -> Result<Self, TagValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TagValidationError::EmptyName);
        }
        if name.chars().count() > TAG_NAME_MAX {
            return Err(TagValidationError::NameTooLong { max: TAG_NAME_MAX });
        }
        if !is_hex_color(color) {
            return Err(TagValidationError::InvalidColor);
        }
        if slug.is_empty() {
            return Err(TagValidationError::EmptySlug);
        }
        if slug.chars().count() > TAG_SLUG_MAX {
            return Err(TagValidationError::SlugTooLong { max: TAG_SLUG_MAX });
        }
        if !has_allowed_slug_chars(slug) {
            return Err(TagValidationError::InvalidSlug);
        }
        Ok(Self {
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}
