use rocket::{http::Status, serde::json::Json, Catcher, Request};

use crate::error::{MessageBody, INTERNAL_ERROR_MESSAGE};

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, bad_request, unprocessable, internal_error, fallback]
}

#[catch(404)]
fn not_found() -> Json<MessageBody> {
    Json(MessageBody::new("Not found"))
}

#[catch(400)]
fn bad_request() -> Json<MessageBody> {
    Json(MessageBody::new("Bad request"))
}

// Rocket answers 422 when a guard rejects well-formed input.
#[catch(422)]
fn unprocessable() -> Json<MessageBody> {
    Json(MessageBody::new("Bad request"))
}

#[catch(500)]
fn internal_error() -> Json<MessageBody> {
    Json(MessageBody::new(INTERNAL_ERROR_MESSAGE))
}

#[catch(default)]
fn fallback(status: Status, _req: &Request<'_>) -> (Status, Json<MessageBody>) {
    let reason = status.reason().unwrap_or("Unknown error");
    (status, Json(MessageBody::new(reason)))
}

#[cfg(test)]
mod tests {
    use rocket::{
        http::ContentType,
        local::asynchronous::Client,
        serde::json::{serde_json::json, Value},
    };

    use super::*;

    #[backend_test]
    async fn unknown_route_is_json_404(client: Client) {
        let response = client.get("/no/such/route/here").dispatch().await;
        assert_eq!(Status::NotFound, response.status());
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body, json!({ "message": "Not found" }));
    }

    #[backend_test]
    async fn wrong_method_falls_through_to_404(client: Client) {
        let response = client
            .put("/nominees")
            .header(ContentType::JSON)
            .body("[]")
            .dispatch()
            .await;
        assert_eq!(Status::NotFound, response.status());
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["message"], "Not found");
    }
}
