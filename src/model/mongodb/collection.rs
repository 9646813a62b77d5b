use std::ops::Deref;

use log::debug;
use mongodb::{bson::doc, error::Error as DbError, Collection, Database, IndexModel};

use crate::model::db::{
    nominee::{NewNominee, Nominee},
    vote::Vote,
};

/// A type that can be directly inserted/read to/from the database.
pub trait MongoCollection {
    /// The name of the collection.
    const NAME: &'static str;
}

/// A database collection of the given type.
pub struct Coll<T>(Collection<T>);

impl<T> Coll<T>
where
    T: MongoCollection,
{
    /// Get a handle on this collection in the given database.
    pub fn from_db(db: &Database) -> Self {
        Self(db.collection(T::NAME))
    }
}

// `Derive(Clone)` would only derive if `T: Clone`, but we don't need that bound.
impl<T> Clone for Coll<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Deref for Coll<T> {
    type Target = Collection<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// Nominee collections
const NOMINEES: &str = "nominees";
impl MongoCollection for Nominee {
    const NAME: &'static str = NOMINEES;
}
impl MongoCollection for NewNominee {
    const NAME: &'static str = NOMINEES;
}

// Vote collection
const VOTES: &str = "votes";
impl MongoCollection for Vote {
    const NAME: &'static str = VOTES;
}

/// Ensure that all the required indexes exist on the given database.
///
/// This operation is idempotent.
pub async fn ensure_indexes_exist(db: &Database) -> Result<(), DbError> {
    debug!("Ensuring collection indexes exist");

    // Nominee collection: listing by category, optionally ranked by votes.
    let nominee_index = IndexModel::builder()
        .keys(doc! {"type": 1, "vote_count": -1})
        .build();
    Coll::<Nominee>::from_db(db)
        .create_index(nominee_index, None)
        .await?;

    // Vote collection: voters for a nominee.
    let vote_index = IndexModel::builder()
        .keys(doc! {"category_type": 1, "vote_to": 1})
        .build();
    Coll::<Vote>::from_db(db)
        .create_index(vote_index, None)
        .await?;

    Ok(())
}
