//! Ingredient catalogue entries and name filters.

use std::fmt;

/// Maximum length of an ingredient name or unit, in characters.
pub const INGREDIENT_FIELD_MAX: usize = 64;

/// Validation errors for ingredient inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientValidationError {
    InvalidId,
    EmptyName,
    NameTooLong { max: usize },
    EmptyUnit,
    UnitTooLong { max: usize },
}

impl fmt::Display for IngredientValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "ingredient id must be a positive integer"),
            Self::EmptyName => write!(f, "ingredient name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "ingredient name must be at most {max} characters")
            }
            Self::EmptyUnit => write!(f, "measurement unit must not be empty"),
            Self::UnitTooLong { max } => {
                write!(f, "measurement unit must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for IngredientValidationError {}

/// Identifier of an ingredient row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IngredientId(i64);

impl IngredientId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i64) -> Result<Self, IngredientValidationError> {
        if id <= 0 {
            return Err(IngredientValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    pub(crate) const fn from_trusted(id: i64) -> Self {
        Self(id)
    }

    /// Raw integer value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named ingredient measured in a fixed unit, e.g. "flour" in "g".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub unit: String,
}

/// Validated input for a new catalogue ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientDraft {
    name: String,
    unit: String,
}

impl IngredientDraft {
    /// Validate name and unit; both are trimmed.
    pub fn new(name: &str, unit: &str) -> Result<Self, IngredientValidationError> {
        let name = name.trim();
        let unit = unit.trim();
        if name.is_empty() {
            return Err(IngredientValidationError::EmptyName);
        }
        if name.chars().count() > INGREDIENT_FIELD_MAX {
            return Err(IngredientValidationError::NameTooLong {
                max: INGREDIENT_FIELD_MAX,
            });
        }
        if unit.is_empty() {
            return Err(IngredientValidationError::EmptyUnit);
        }
        if unit.chars().count() > INGREDIENT_FIELD_MAX {
            return Err(IngredientValidationError::UnitTooLong {
                max: INGREDIENT_FIELD_MAX,
            });
        }
        Ok(Self {
            name: name.to_owned(),
            unit: unit.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// Case-insensitive name filters for ingredient listings.
///
/// Both filters may be combined; an ingredient must satisfy every filter set.
///
/// # Examples
/// ```
/// use foodgram::domain::IngredientFilter;
///
/// let filter = IngredientFilter::default()
///     .with_start_name(" mil ")
///     .with_contain_name("");
/// assert_eq!(filter.start_name(), Some("mil"));
/// assert_eq!(filter.contain_name(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientFilter {
    start_name: Option<String>,
    contain_name: Option<String>,
}

impl IngredientFilter {
    /// Require names to start with `prefix`. Blank prefixes are ignored.
    pub fn with_start_name(mut self, prefix: impl Into<String>) -> Self {
        self.start_name = non_blank(prefix.into());
        self
    }

    /// Require names to contain `needle`. Blank needles are ignored.
    pub fn with_contain_name(mut self, needle: impl Into<String>) -> Self {
        self.contain_name = non_blank(needle.into());
        self
    }

    pub fn start_name(&self) -> Option<&str> {
        self.start_name.as_deref()
    }

    pub fn contain_name(&self) -> Option<&str> {
        self.contain_name.as_deref()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
