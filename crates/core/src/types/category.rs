//! Product categories and their display labels.
//!
//! The label table lives here and nowhere else; both mini-apps render
//! category names through [`Category::label`] so the wording cannot
//! diverge between surfaces.

use serde::{Deserialize, Serialize};

/// Product category.
///
/// A `Bouquet` is a sellable composite product; an `Ingredient` is a raw
/// component excluded from storefront listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Bouquet,
    Ingredient,
}

impl Category {
    /// Human-readable display label for this category.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bouquet => "Bouquets",
            Self::Ingredient => "Ingredients",
        }
    }

    /// Whether products in this category are listed on the storefront.
    #[must_use]
    pub const fn is_sellable(self) -> bool {
        matches!(self, Self::Bouquet)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bouquet" => Ok(Self::Bouquet),
            "ingredient" => Ok(Self::Ingredient),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}
