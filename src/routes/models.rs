use actix_web::{HttpResponse, Responder, get, web};
use serde::{Deserialize, Serialize};

use crate::ai::AiClient;

#[derive(Serialize, Deserialize, Debug)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[get("/list-models")]
pub async fn list_models_handler(client: web::Data<AiClient>) -> impl Responder {
    HttpResponse::Ok().json(ModelsResponse {
        models: client.models().to_vec(),
    })
}
