//! Access to the nominee and vote records.
//!
//! Handlers never talk to a database directly: they receive these traits
//! from managed state, so the MongoDB-backed [`MongoStore`] can be swapped
//! for the in-process [`MemoryStore`].

use std::sync::Arc;

use mongodb::bson::{doc, Document, Regex};

use crate::error::Result;
use crate::model::{
    common::category::Category,
    db::{
        nominee::{NewNominee, Nominee, NomineeCore},
        vote::{Vote, VoteCore},
    },
};

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Read and bulk-create access to nominees.
#[rocket::async_trait]
pub trait NomineeStore: Send + Sync {
    /// All nominees matching the query, in the order it asks for.
    async fn find(&self, query: &NomineeQuery) -> Result<Vec<Nominee>>;

    /// Insert every record in one operation, returning them with their new IDs
    /// in input order.
    async fn insert_many(&self, nominees: Vec<NewNominee>) -> Result<Vec<Nominee>>;
}

/// Read access to votes.
#[rocket::async_trait]
pub trait VoteStore: Send + Sync {
    /// All votes matching the query, in store order.
    async fn find(&self, query: &VoteQuery) -> Result<Vec<Vote>>;
}

/// The nominee store as held in managed state.
pub type DynNomineeStore = Arc<dyn NomineeStore>;

/// The vote store as held in managed state.
pub type DynVoteStore = Arc<dyn VoteStore>;

/// Result ordering for a nominee query.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum NomineeOrder {
    /// Whatever order the store keeps.
    #[default]
    Natural,
    /// Highest `vote_count` first; ties keep store order.
    VotesDescending,
}

/// Selects nominees within one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NomineeQuery {
    pub category: Category,
    /// Case-insensitive literal substring the name must contain.
    pub name_contains: Option<String>,
    pub order: NomineeOrder,
}

impl NomineeQuery {
    pub fn in_category(category: Category) -> Self {
        Self {
            category,
            name_contains: None,
            order: NomineeOrder::Natural,
        }
    }

    /// Restrict to names containing `fragment`. An empty fragment matches everything.
    pub fn name_contains(mut self, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        self.name_contains = (!fragment.is_empty()).then_some(fragment);
        self
    }

    pub fn by_votes_descending(mut self) -> Self {
        self.order = NomineeOrder::VotesDescending;
        self
    }

    /// The MongoDB filter document for this query.
    pub fn filter(&self) -> Document {
        let mut filter = doc! { "type": self.category };
        if let Some(fragment) = &self.name_contains {
            filter.insert(
                "name",
                Regex {
                    pattern: regex::escape(fragment),
                    options: "i".to_string(),
                },
            );
        }
        filter
    }

    /// The MongoDB sort document for this query, if it asks for an ordering.
    pub fn sort(&self) -> Option<Document> {
        match self.order {
            NomineeOrder::Natural => None,
            NomineeOrder::VotesDescending => Some(doc! { "vote_count": -1 }),
        }
    }

    /// Evaluate the filter in process.
    pub fn matches(&self, nominee: &NomineeCore) -> bool {
        nominee.category == self.category
            && self.name_contains.as_ref().map_or(true, |fragment| {
                nominee.name.to_lowercase().contains(&fragment.to_lowercase())
            })
    }
}

/// Selects the votes cast for one nominee in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteQuery {
    pub category: Category,
    /// Exact, case-sensitive nominee name.
    pub nominee_name: String,
}

impl VoteQuery {
    pub fn new(category: Category, nominee_name: impl Into<String>) -> Self {
        Self {
            category,
            nominee_name: nominee_name.into(),
        }
    }

    /// The MongoDB filter document for this query.
    pub fn filter(&self) -> Document {
        doc! {
            "category_type": self.category,
            "vote_to": &self.nominee_name,
        }
    }

    /// Evaluate the filter in process.
    pub fn matches(&self, vote: &VoteCore) -> bool {
        vote.category_type == self.category && vote.vote_to == self.nominee_name
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::Bson;

    use super::*;

    #[test]
    fn category_only_filter() {
        let query = NomineeQuery::in_category(Category::Clinics);
        assert_eq!(query.filter(), doc! { "type": "clinics" });
        assert_eq!(query.sort(), None);
    }

    #[test]
    fn name_filter_is_escaped_and_case_insensitive() {
        let query = NomineeQuery::in_category(Category::Fitness).name_contains("a.b(c)");
        match query.filter().get("name") {
            Some(Bson::RegularExpression(regex)) => {
                assert_eq!(regex.pattern, r"a\.b\(c\)");
                assert_eq!(regex.options, "i");
            }
            other => panic!("expected a regex name filter, got {other:?}"),
        }
    }

    #[test]
    fn empty_fragment_is_no_filter() {
        let query = NomineeQuery::in_category(Category::Fitness).name_contains("");
        assert_eq!(query.name_contains, None);
        assert!(!query.filter().contains_key("name"));
    }

    #[test]
    fn votes_descending_sort() {
        let query = NomineeQuery::in_category(Category::Innovations).by_votes_descending();
        assert_eq!(query.sort(), Some(doc! { "vote_count": -1 }));
    }

    #[test]
    fn in_process_name_match() {
        let query = NomineeQuery::in_category(Category::Fitness).name_contains("ann");
        assert!(query.matches(&NomineeCore::example("Anna", Category::Fitness, 0)));
        assert!(query.matches(&NomineeCore::example("DIANNA", Category::Fitness, 0)));
        assert!(!query.matches(&NomineeCore::example("Bob", Category::Fitness, 0)));
        assert!(!query.matches(&NomineeCore::example("Anna", Category::Clinics, 0)));

        let literal = NomineeQuery::in_category(Category::Fitness).name_contains("a.n");
        assert!(!literal.matches(&NomineeCore::example("Anna", Category::Fitness, 0)));
        assert!(literal.matches(&NomineeCore::example("Dr. A.N. Other", Category::Fitness, 0)));
    }

    #[test]
    fn vote_filter_is_exact() {
        let query = VoteQuery::new(Category::Fitness, "Bob Stone");
        assert_eq!(
            query.filter(),
            doc! { "category_type": "fitness", "vote_to": "Bob Stone" }
        );
        assert!(query.matches(&VoteCore::example(Category::Fitness, "Bob Stone", "a")));
        assert!(!query.matches(&VoteCore::example(Category::Fitness, "bob stone", "a")));
        assert!(!query.matches(&VoteCore::example(Category::Clinics, "Bob Stone", "a")));
    }
}
