use std::cmp::Reverse;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use rocket::tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::model::{
    db::{
        nominee::{NewNominee, Nominee},
        vote::{NewVote, Vote},
    },
    mongodb::Id,
};

use super::{NomineeOrder, NomineeQuery, NomineeStore, VoteQuery, VoteStore};

#[derive(Debug, Default)]
struct Records {
    nominees: Vec<Nominee>,
    votes: Vec<Vote>,
}

/// Nominee and vote stores kept in process memory.
///
/// Clones share the same records, so a test can hold one handle while the
/// server holds another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Records>>,
    offline: Arc<AtomicBool>,
}

impl MemoryStore {
    /// While offline, every operation fails as a lost database connection would.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::Relaxed) {
            Err(Error::Unavailable("in-memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }

    /// Record votes as the external voting process would.
    pub async fn insert_votes(&self, votes: Vec<NewVote>) -> Vec<Vote> {
        let votes: Vec<Vote> = votes
            .into_iter()
            .map(|vote| Vote::new(Id::new(), vote))
            .collect();
        self.records.write().await.votes.extend(votes.iter().cloned());
        votes
    }

    /// Every nominee currently held, in insertion order.
    pub async fn nominees(&self) -> Vec<Nominee> {
        self.records.read().await.nominees.clone()
    }
}

#[rocket::async_trait]
impl NomineeStore for MemoryStore {
    async fn find(&self, query: &NomineeQuery) -> Result<Vec<Nominee>> {
        self.check_online()?;
        let mut nominees: Vec<Nominee> = self
            .records
            .read()
            .await
            .nominees
            .iter()
            .filter(|nominee| query.matches(nominee))
            .cloned()
            .collect();
        if query.order == NomineeOrder::VotesDescending {
            // Stable, so equal counts keep insertion order.
            nominees.sort_by_key(|nominee| Reverse(nominee.vote_count));
        }
        Ok(nominees)
    }

    async fn insert_many(&self, nominees: Vec<NewNominee>) -> Result<Vec<Nominee>> {
        self.check_online()?;
        let nominees: Vec<Nominee> = nominees
            .into_iter()
            .map(|nominee| Nominee::new(Id::new(), nominee))
            .collect();
        self.records
            .write()
            .await
            .nominees
            .extend(nominees.iter().cloned());
        Ok(nominees)
    }
}

#[rocket::async_trait]
impl VoteStore for MemoryStore {
    async fn find(&self, query: &VoteQuery) -> Result<Vec<Vote>> {
        self.check_online()?;
        let votes: Vec<Vote> = self
            .records
            .read()
            .await
            .votes
            .iter()
            .filter(|vote| query.matches(vote))
            .cloned()
            .collect();
        Ok(votes)
    }
}


#[cfg(test)]
mod tests {
    use crate::model::{
        common::category::Category,
        db::{nominee::NomineeCore, vote::VoteCore},
    };

    use super::*;

    #[rocket::async_test]
    async fn find_filters_by_category_in_insertion_order() {
        let store = MemoryStore::example().await;
        let names: Vec<String> = NomineeStore::find(
            &store,
            &NomineeQuery::in_category(Category::Fitness),
        )
        .await
        .unwrap()
        .into_iter()
        .map(|nominee| nominee.nominee.name)
        .collect();
        assert_eq!(names, ["Anna Lee", "Bob Stone", "DIANNA ROSS"]);
    }

    #[rocket::async_test]
    async fn votes_descending_is_stable() {
        let store = MemoryStore::default();
        store
            .insert_many(vec![
                NomineeCore::example("first", Category::Clinics, 2),
                NomineeCore::example("top", Category::Clinics, 9),
                NomineeCore::example("second", Category::Clinics, 2),
            ])
            .await
            .unwrap();

        let query = NomineeQuery::in_category(Category::Clinics).by_votes_descending();
        let names: Vec<String> = NomineeStore::find(&store, &query)
            .await
            .unwrap()
            .into_iter()
            .map(|nominee| nominee.nominee.name)
            .collect();
        assert_eq!(names, ["top", "first", "second"]);
    }

    #[rocket::async_test]
    async fn insert_many_assigns_distinct_ids() {
        let store = MemoryStore::default();
        let inserted = store
            .insert_many(vec![
                NomineeCore::example("a", Category::Fitness, 0),
                NomineeCore::example("b", Category::Fitness, 0),
            ])
            .await
            .unwrap();
        assert_eq!(inserted.len(), 2);
        assert_ne!(inserted[0].id, inserted[1].id);
        assert_eq!(store.nominees().await, inserted);
    }

    #[rocket::async_test]
    async fn vote_find_is_exact() {
        let store = MemoryStore::example().await;
        let votes = VoteStore::find(&store, &VoteQuery::new(Category::Fitness, "Bob Stone"))
            .await
            .unwrap();
        assert_eq!(votes.len(), 2);
        assert!(votes
            .iter()
            .all(|vote| vote.vote_to == "Bob Stone" && vote.category_type == Category::Fitness));

        store
            .insert_votes(vec![VoteCore::example(Category::Fitness, "bob stone", "x")])
            .await;
        let votes = VoteStore::find(&store, &VoteQuery::new(Category::Fitness, "Bob Stone"))
            .await
            .unwrap();
        assert_eq!(votes.len(), 2);
    }

    #[rocket::async_test]
    async fn offline_store_fails_everything() {
        let store = MemoryStore::example().await;
        store.set_offline(true);

        let query = NomineeQuery::in_category(Category::Fitness);
        assert!(matches!(
            NomineeStore::find(&store, &query).await,
            Err(Error::Unavailable(_))
        ));
        assert!(matches!(
            store.insert_many(Vec::new()).await,
            Err(Error::Unavailable(_))
        ));
        assert!(matches!(
            VoteStore::find(&store, &VoteQuery::new(Category::Fitness, "Bob Stone")).await,
            Err(Error::Unavailable(_))
        ));

        store.set_offline(false);
        assert_eq!(NomineeStore::find(&store, &query).await.unwrap().len(), 3);
    }
}
