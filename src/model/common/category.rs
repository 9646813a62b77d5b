use std::fmt::{Display, Formatter};
use std::str::FromStr;

use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of categories that partition nominees and votes.
#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Fitness,
    Clinics,
    ForwardThinker,
    Innovations,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Fitness,
        Category::Clinics,
        Category::ForwardThinker,
        Category::Innovations,
    ];

    /// The literal used for this category in URLs, JSON, and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fitness => "fitness",
            Self::Clinics => "clinics",
            Self::ForwardThinker => "forward_thinker",
            Self::Innovations => "innovations",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names none of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid category type: {0:?}")]
pub struct InvalidCategory(pub String);

impl FromStr for Category {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}

impl From<Category> for Bson {
    fn from(category: Category) -> Self {
        Bson::String(category.as_str().to_string())
    }
}
