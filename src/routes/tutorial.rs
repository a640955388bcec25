use actix_web::{HttpResponse, Responder, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ErrorResponseWithMessage, missing_field};
use crate::ai::{AiClient, tutorial_prompt};

#[derive(Deserialize, Debug)]
pub struct TutorialRequest {
    pub problem: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TutorialResponse {
    pub steps: Vec<Value>,
}

#[post("/generate-tutorial")]
pub async fn generate_tutorial_handler(
    client: web::Data<AiClient>,
    body: web::Json<TutorialRequest>,
) -> impl Responder {
    if body.problem.trim().is_empty() {
        return missing_field("Problem is required");
    }

    let prompt = tutorial_prompt(&body.problem);
    let reply = match client.generate(&prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            log::error!("tutorial generation failed: {e}");
            return tutorial_error(format!("Failed to generate tutorial: {e}"));
        }
    };

    match parse_steps(&reply) {
        Some(steps) => HttpResponse::Ok().json(TutorialResponse { steps }),
        None => {
            log::warn!("tutorial reply was not a valid step array");
            tutorial_error("Failed to generate tutorial: invalid tutorial format".to_string())
        }
    }
}

/// A tutorial is a JSON array of step objects, each carrying at least a
/// `text` field. Models often wrap JSON in a markdown code fence, so strip
/// one before parsing.
fn parse_steps(reply: &str) -> Option<Vec<Value>> {
    let steps: Vec<Value> = serde_json::from_str(strip_code_fence(reply)).ok()?;
    if steps.is_empty() || !steps.iter().all(|step| step.get("text").is_some()) {
        return None;
    }
    Some(steps)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn tutorial_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponseWithMessage {
        reason: "ERR_EXTERNAL",
        code: 5,
        message,
    })
}
