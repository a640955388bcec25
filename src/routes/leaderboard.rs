use actix_web::{HttpResponse, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqlitePool;

use super::{ErrorResponse, missing_field};
use crate::database as db;

pub const LEADERBOARD_LIMIT: i64 = 10;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct ScoreRecord {
    pub name: String,
    pub score: i64,
}

#[derive(Deserialize, Debug)]
pub struct ScoreSubmission {
    pub name: String,
    /// Points to add; absent means "ensure the record exists"
    #[serde(default)]
    pub delta: i64,
}

#[get("/leaderboard")]
pub async fn get_leaderboard_handler(pool: web::Data<SqlitePool>) -> impl Responder {
    match db::top_scores(LEADERBOARD_LIMIT, pool.get_ref()).await {
        Ok(records) => {
            log::debug!("got {} leaderboard records", records.len());
            HttpResponse::Ok().json(records)
        }
        Err(e) => {
            log::error!("failed to read leaderboard: {e}");
            HttpResponse::InternalServerError().json(ErrorResponse {
                reason: "ERR_EXTERNAL",
                code: 5,
            })
        }
    }
}

#[post("/score")]
pub async fn post_score_handler(
    pool: web::Data<SqlitePool>,
    body: web::Json<ScoreSubmission>,
) -> impl Responder {
    if body.name.trim().is_empty() {
        return missing_field("Name is required");
    }

    match db::upsert_increment(&body.name, body.delta, pool.get_ref()).await {
        Ok(record) => {
            log::info!("score for {} is now {}", record.name, record.score);
            HttpResponse::Ok().json(record)
        }
        Err(e) => {
            log::error!("failed to update score for {}: {e}", body.name);
            HttpResponse::InternalServerError().json(ErrorResponse {
                reason: "ERR_EXTERNAL",
                code: 5,
            })
        }
    }
}
