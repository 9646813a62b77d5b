use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::{common::category::Category, mongodb::Id};

/// Core nominee data, as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NomineeCore {
    pub name: String,
    #[serde(rename = "type")]
    pub category: Category,
    /// Maintained by the voting process; starts at whatever the creator supplied.
    #[serde(default)]
    pub vote_count: i64,
}

/// A nominee without an ID.
pub type NewNominee = NomineeCore;

/// A nominee from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nominee {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub nominee: NomineeCore,
}

impl Nominee {
    /// Attach an ID to a new nominee.
    pub fn new(id: Id, nominee: NewNominee) -> Self {
        Self { id, nominee }
    }
}

impl Deref for Nominee {
    type Target = NomineeCore;

    fn deref(&self) -> &Self::Target {
        &self.nominee
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl NomineeCore {
        pub fn example(name: &str, category: Category, vote_count: i64) -> Self {
            Self {
                name: name.to_string(),
                category,
                vote_count,
            }
        }

        /// A spread of nominees across categories, deliberately out of vote order.
        pub fn examples() -> Vec<Self> {
            vec![
                Self::example("Anna Lee", Category::Fitness, 3),
                Self::example("Bob Stone", Category::Fitness, 12),
                Self::example("DIANNA ROSS", Category::Fitness, 7),
                Self::example("Northside Clinic", Category::Clinics, 0),
                Self::example("Harbour Health", Category::Clinics, 5),
                Self::example("Grace Hopper", Category::ForwardThinker, 9),
            ]
        }
    }
}
