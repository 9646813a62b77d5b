use log::debug;
use rocket::{
    http::Status,
    serde::json::{Error as JsonError, Json},
    Route, State,
};

use crate::{
    error::{Error, Result},
    logging::RequestId,
    model::{
        api::nominee::{validate_batch, NomineeDescription, NomineeSpec, NomineesCreated},
        common::category::Category,
        db::nominee::NewNominee,
    },
    store::{DynNomineeStore, NomineeQuery},
    Config,
};

use super::common::non_empty;

pub fn routes() -> Vec<Route> {
    routes![
        list_by_category,
        create_many,
        search_by_name,
        search_in_category
    ]
}

#[get("/nominees/<category_type>")]
pub async fn list_by_category(
    category_type: &str,
    nominees: &State<DynNomineeStore>,
) -> Result<Json<Vec<NomineeDescription>>> {
    let category: Category = category_type.parse()?;
    let found = nominees
        .find(&NomineeQuery::in_category(category))
        .await?;
    non_empty(found, "No nominees found for the specified category type")
}

#[post("/nominees", data = "<nominees>")]
pub async fn create_many(
    id: &RequestId,
    nominees: std::result::Result<Json<Vec<NomineeSpec>>, JsonError<'_>>,
    store: &State<DynNomineeStore>,
    config: &State<Config>,
) -> Result<(Status, Json<NomineesCreated>)> {
    let specs = nominees.map_err(Error::create_failed)?.into_inner();
    validate_batch(&specs, config.nominee_validation()).map_err(Error::BadRequest)?;

    debug!("req{id} inserting {} nominees", specs.len());
    let new_nominees: Vec<NewNominee> = specs.into_iter().map(Into::into).collect();
    let inserted = store
        .insert_many(new_nominees)
        .await
        .map_err(Error::create_failed)?;

    Ok((Status::Created, Json(NomineesCreated::new(inserted))))
}

#[get("/nominees/<category_type>/search/<name>")]
pub async fn search_by_name(
    category_type: &str,
    name: &str,
    nominees: &State<DynNomineeStore>,
) -> Result<Json<Vec<NomineeDescription>>> {
    search(category_type, Some(name), nominees).await
}

#[get("/nominees/<category_type>/search")]
pub async fn search_in_category(
    category_type: &str,
    nominees: &State<DynNomineeStore>,
) -> Result<Json<Vec<NomineeDescription>>> {
    search(category_type, None, nominees).await
}

/// Nominees in a category whose name contains `name`, ignoring case.
async fn search(
    category_type: &str,
    name: Option<&str>,
    nominees: &DynNomineeStore,
) -> Result<Json<Vec<NomineeDescription>>> {
    let category: Category = category_type.parse()?;
    let mut query = NomineeQuery::in_category(category);
    if let Some(name) = name {
        query = query.name_contains(name);
    }
    let found = nominees.find(&query).await?;
    non_empty(found, "No nominees found")
}
