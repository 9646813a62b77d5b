use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{api::id::ApiId, common::category::Category, db::vote::Vote};

/// API-friendly representation of a vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDescription {
    pub id: ApiId,
    pub category_type: Category,
    pub vote_to: String,
    pub voter: String,
    pub voted_at: Option<DateTime<Utc>>,
}

impl From<Vote> for VoteDescription {
    fn from(vote: Vote) -> Self {
        Self {
            id: vote.id.into(),
            category_type: vote.vote.category_type,
            vote_to: vote.vote.vote_to,
            voter: vote.vote.voter,
            voted_at: vote.vote.voted_at.map(|at| at.to_chrono()),
        }
    }
}
