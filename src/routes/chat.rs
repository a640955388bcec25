use actix_web::{HttpResponse, Responder, post, web};
use serde::{Deserialize, Serialize};

use super::missing_field;
use crate::ai::{AiClient, chat_prompt};

/// Placeholder answer when every backend model is unavailable
const UNAVAILABLE: &str = "The tutor is unavailable right now. Please try again in a moment.";

#[derive(Deserialize, Debug)]
pub struct ChatRequest {
    pub question: String,
    pub context: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

#[post("/chat-explain")]
pub async fn chat_explain_handler(
    client: web::Data<AiClient>,
    body: web::Json<ChatRequest>,
) -> impl Responder {
    if body.question.trim().is_empty() {
        return missing_field("Question is required");
    }
    if body.context.trim().is_empty() {
        return missing_field("Context is required");
    }

    let prompt = chat_prompt(&body.context, &body.question);
    let response = match client.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("chat explanation failed: {e}");
            UNAVAILABLE.to_string()
        }
    };

    HttpResponse::Ok().json(ChatResponse { response })
}
