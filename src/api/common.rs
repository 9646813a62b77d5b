use rocket::serde::json::Json;

use crate::error::{Error, Result};

/// Convert query results for the response, treating an empty result as not found.
pub fn non_empty<T, D>(found: Vec<T>, not_found: &str) -> Result<Json<Vec<D>>>
where
    D: From<T>,
{
    if found.is_empty() {
        return Err(Error::not_found(not_found));
    }
    Ok(Json(found.into_iter().map(D::from).collect()))
}
