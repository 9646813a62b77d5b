use rocket::{serde::json::Json, Route, State};

use crate::{
    error::{Error, Result},
    model::{
        api::{nominee::NomineeDescription, vote::VoteDescription},
        common::category::Category,
    },
    store::{DynNomineeStore, DynVoteStore, NomineeQuery, VoteQuery},
};

use super::common::non_empty;

const MISSING_PARAMS: &str = "Type and Name are required";

pub fn routes() -> Vec<Route> {
    routes![
        ranked_nominees,
        voters_for_nominee,
        voters_missing_name,
        voters_missing_params,
    ]
}

#[get("/admin/nominees/<category_type>")]
pub async fn ranked_nominees(
    category_type: &str,
    nominees: &State<DynNomineeStore>,
) -> Result<Json<Vec<NomineeDescription>>> {
    let category: Category = category_type.parse()?;
    let query = NomineeQuery::in_category(category).by_votes_descending();
    let found = nominees.find(&query).await?;
    non_empty(found, "No nominees found for the specified category type")
}

#[get("/admin/voters/<category_type>/<nominee_name>")]
pub async fn voters_for_nominee(
    category_type: &str,
    nominee_name: &str,
    votes: &State<DynVoteStore>,
) -> Result<Json<Vec<VoteDescription>>> {
    if category_type.trim().is_empty() || nominee_name.trim().is_empty() {
        return Err(Error::bad_request(MISSING_PARAMS));
    }
    let category: Category = category_type.parse()?;
    let found = votes.find(&VoteQuery::new(category, nominee_name)).await?;
    non_empty(found, "No voters found for this nominee")
}

#[get("/admin/voters/<_>")]
pub async fn voters_missing_name() -> Result<()> {
    Err(Error::bad_request(MISSING_PARAMS))
}

#[get("/admin/voters")]
pub async fn voters_missing_params() -> Result<()> {
    Err(Error::bad_request(MISSING_PARAMS))
}
