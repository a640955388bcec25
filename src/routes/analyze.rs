use actix_web::{HttpResponse, Responder, post, web};
use serde::{Deserialize, Serialize};

use super::missing_field;
use crate::ai::{AiClient, Extraction, NOT_FOUND, analysis_prompt, parse_analysis};

#[derive(Deserialize, Debug)]
pub struct AnalyzeRequest {
    pub problem: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub math_explanation: String,
    pub pseudo_code: String,
}

#[post("/analyze")]
pub async fn analyze_handler(
    client: web::Data<AiClient>,
    body: web::Json<AnalyzeRequest>,
) -> impl Responder {
    if body.problem.trim().is_empty() {
        return missing_field("Problem is required");
    }

    let prompt = analysis_prompt(&body.problem);
    let extraction = match client.generate(&prompt).await {
        Ok(reply) => parse_analysis(&reply),
        Err(e) => {
            // Degrade to sentinels rather than surfacing the outage
            log::error!("analysis failed: {e}");
            return HttpResponse::Ok().json(AnalyzeResponse {
                math_explanation: NOT_FOUND.to_string(),
                pseudo_code: NOT_FOUND.to_string(),
            });
        }
    };

    if let Extraction::Unparsed { raw } = &extraction {
        log::warn!(
            "reply matched no extraction marker ({} chars), substituting sentinels",
            raw.len()
        );
    }

    HttpResponse::Ok().json(AnalyzeResponse {
        math_explanation: extraction.math_explanation().to_string(),
        pseudo_code: extraction.pseudo_code().to_string(),
    })
}
