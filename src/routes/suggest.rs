use actix_web::{HttpResponse, Responder, post, web};
use serde::{Deserialize, Serialize};

use super::missing_field;

#[derive(Deserialize, Debug)]
pub struct SuggestRequest {
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

#[post("/suggest")]
pub async fn suggest_handler(body: web::Json<SuggestRequest>) -> impl Responder {
    if body.code.trim().is_empty() {
        return missing_field("Code is required");
    }

    HttpResponse::Ok().json(SuggestResponse {
        suggestions: code_suggestions(&body.code),
    })
}

/// Ordered suggestions from simple substring heuristics
pub fn code_suggestions(code: &str) -> Vec<String> {
    let mut suggestions = Vec::new();

    if code.contains("for") {
        suggestions.push("Optimize loops to avoid repeated work inside the body".to_string());
    }
    if !code.contains("try") {
        suggestions.push("Add error handling for operations that can fail".to_string());
    }
    if code.contains("input") {
        suggestions.push("Validate user input before using it".to_string());
    }
    if suggestions.is_empty() {
        suggestions.push("Consider adding comments".to_string());
    }

    suggestions
}
