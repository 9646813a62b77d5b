use log::{debug, error};
use mongodb::error::Error as DbError;
use rocket::{
    http::{Status, StatusClass},
    response::Responder,
    serde::json::Json,
    Request,
};
use serde::Serialize;
use thiserror::Error;

use crate::model::common::category::InvalidCategory;

pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to clients in place of any server-side failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Failed to create nominees: {0}")]
    CreateFailed(String),
}

impl Error {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Wrap any failure of a bulk creation, keeping only its description.
    pub fn create_failed(err: impl ToString) -> Self {
        Self::CreateFailed(err.to_string())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::BadRequest(_) => Status::BadRequest,
            Self::NotFound(_) => Status::NotFound,
            Self::Db(_) | Self::Unavailable(_) | Self::CreateFailed(_) => {
                Status::InternalServerError
            }
        }
    }
}

impl From<InvalidCategory> for Error {
    fn from(_: InvalidCategory) -> Self {
        Self::bad_request("Invalid category type")
    }
}

/// Body of most error responses.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of a failed bulk creation.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        match status.class() {
            StatusClass::ServerError => error!("{self}"),
            _ => debug!("{self}"),
        }
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => {
                (status, Json(MessageBody { message })).respond_to(req)
            }
            Self::CreateFailed(error) => (status, Json(ErrorBody { error })).respond_to(req),
            Self::Db(_) | Self::Unavailable(_) => {
                (status, Json(MessageBody::new(INTERNAL_ERROR_MESSAGE))).respond_to(req)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::common::category::Category;

    use super::*;

    #[test]
    fn statuses_follow_taxonomy() {
        assert_eq!(Error::bad_request("x").status(), Status::BadRequest);
        assert_eq!(Error::not_found("x").status(), Status::NotFound);
        assert_eq!(
            Error::Unavailable("offline".to_string()).status(),
            Status::InternalServerError
        );
        assert_eq!(
            Error::create_failed("boom").status(),
            Status::InternalServerError
        );
    }

    #[test]
    fn invalid_category_is_a_bad_request() {
        let err: Error = "sports".parse::<Category>().unwrap_err().into();
        assert!(matches!(err, Error::BadRequest(ref msg) if msg == "Invalid category type"));
    }
}
