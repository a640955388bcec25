use actix_web::{HttpResponse, Responder, post, web};
use serde::Deserialize;

use super::missing_field;
use crate::executor::ExecutorClient;

const DEFAULT_LANGUAGE: &str = "python";

#[derive(Deserialize, Debug)]
pub struct ExecuteRequest {
    pub language: Option<String>,
    pub source: String,
    pub stdin: Option<String>,
}

#[post("/execute")]
pub async fn execute_handler(
    executor: web::Data<ExecutorClient>,
    body: web::Json<ExecuteRequest>,
) -> impl Responder {
    if body.source.trim().is_empty() {
        return missing_field("Source code is required");
    }

    let language = body.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
    let result = executor
        .run(language, &body.source, body.stdin.as_deref().unwrap_or(""))
        .await;

    // Execution faults are data, not HTTP errors: the error field carries
    // them and the status stays 200
    HttpResponse::Ok().json(result)
}
