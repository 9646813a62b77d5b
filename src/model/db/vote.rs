use std::ops::Deref;

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use crate::model::{common::category::Category, mongodb::Id};

/// Core vote data, as written to the database by the voting process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCore {
    pub category_type: Category,
    /// Name of the nominee voted for. Not a reference; matched by exact text.
    pub vote_to: String,
    /// Identity of whoever cast the vote.
    #[serde(default)]
    pub voter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voted_at: Option<DateTime>,
}

/// A vote without an ID.
pub type NewVote = VoteCore;

/// A vote from the database, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    #[serde(rename = "_id")]
    pub id: Id,
    #[serde(flatten)]
    pub vote: VoteCore,
}

impl Vote {
    /// Attach an ID to a new vote.
    pub fn new(id: Id, vote: NewVote) -> Self {
        Self { id, vote }
    }
}

impl Deref for Vote {
    type Target = VoteCore;

    fn deref(&self) -> &Self::Target {
        &self.vote
    }
}
