mod analyze;
mod chat;
mod execute;
mod leaderboard;
mod models;
mod suggest;
mod tutorial;

pub use analyze::*;
pub use chat::*;
pub use execute::*;
pub use leaderboard::*;
pub use models::*;
pub use suggest::*;
pub use tutorial::*;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub reason: &'static str,
    pub code: u32,
}

#[derive(Serialize)]
pub struct ErrorResponseWithMessage {
    pub reason: &'static str,
    pub code: u32,
    pub message: String,
}

pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        reason: "ERR_INVALID_ARGUMENT",
        code: 1,
    });
    InternalError::from_response(err, response).into()
}

/// 400 for a missing or empty required field
pub(crate) fn missing_field(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponseWithMessage {
        reason: "ERR_INVALID_ARGUMENT",
        code: 1,
        message: message.to_string(),
    })
}
