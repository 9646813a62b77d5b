use std::collections::HashMap;

use mongodb::{bson::Bson, options::FindOptions, Database};
use rocket::futures::TryStreamExt;

use crate::error::{Error, Result};
use crate::model::{
    db::{
        nominee::{NewNominee, Nominee},
        vote::Vote,
    },
    mongodb::{Coll, Id},
};

use super::{NomineeQuery, NomineeStore, VoteQuery, VoteStore};

/// Nominee and vote stores backed by MongoDB collections.
#[derive(Clone)]
pub struct MongoStore {
    nominees: Coll<Nominee>,
    new_nominees: Coll<NewNominee>,
    votes: Coll<Vote>,
}

impl MongoStore {
    pub fn from_db(db: &Database) -> Self {
        Self {
            nominees: Coll::from_db(db),
            new_nominees: Coll::from_db(db),
            votes: Coll::from_db(db),
        }
    }
}

#[rocket::async_trait]
impl NomineeStore for MongoStore {
    async fn find(&self, query: &NomineeQuery) -> Result<Vec<Nominee>> {
        let options = FindOptions::builder().sort(query.sort()).build();
        let nominees: Vec<Nominee> = self
            .nominees
            .find(query.filter(), options)
            .await?
            .try_collect()
            .await?;
        Ok(nominees)
    }

    async fn insert_many(&self, nominees: Vec<NewNominee>) -> Result<Vec<Nominee>> {
        // The driver refuses an empty batch; there is nothing to do anyway.
        if nominees.is_empty() {
            return Ok(Vec::new());
        }

        let result = self.new_nominees.insert_many(&nominees, None).await?;
        with_inserted_ids(nominees, &result.inserted_ids)
    }
}

/// Pair each nominee with the ID the driver reported for its position in the batch.
fn with_inserted_ids(
    nominees: Vec<NewNominee>,
    inserted_ids: &HashMap<usize, Bson>,
) -> Result<Vec<Nominee>> {
    nominees
        .into_iter()
        .enumerate()
        .map(|(index, nominee)| {
            let id = inserted_ids
                .get(&index)
                .and_then(|id| id.as_object_id())
                .ok_or_else(|| Error::create_failed(format!("No ID returned for nominee {index}")))?;
            Ok(Nominee::new(Id::from(id), nominee))
        })
        .collect()
}

#[rocket::async_trait]
impl VoteStore for MongoStore {
    async fn find(&self, query: &VoteQuery) -> Result<Vec<Vote>> {
        let votes: Vec<Vote> = self
            .votes
            .find(query.filter(), None)
            .await?
            .try_collect()
            .await?;
        Ok(votes)
    }
}
