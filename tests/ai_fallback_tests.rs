use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, HttpResponse, HttpServer, dev::ServerHandle, web};
use pretty_assertions::assert_eq;
use serde_json::json;

use tutor::ai::{AiClient, AiError};

/// Per-model request counter shared with the mock backend
#[derive(Clone, Default)]
struct Hits(Arc<Mutex<HashMap<String, u32>>>);

impl Hits {
    fn record(&self, model: &str) {
        *self.0.lock().unwrap().entry(model.to_string()).or_insert(0) += 1;
    }

    fn for_model(&self, model: &str) -> u32 {
        self.0.lock().unwrap().get(model).copied().unwrap_or(0)
    }
}

fn reply_json(text: &str) -> serde_json::Value {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
}

/// Stub generateContent endpoint. The model name encodes the behavior:
/// "down" -> 500, "blank" -> whitespace-only content, "refusing" -> error
/// object in a 200 body, anything else -> a well-formed reply.
async fn generate_stub(path: web::Path<String>, hits: web::Data<Hits>) -> HttpResponse {
    let call = path.into_inner();
    let model = call.split(':').next().unwrap_or("").to_string();
    hits.record(&model);

    if model.contains("down") {
        return HttpResponse::InternalServerError().finish();
    }
    if model.contains("blank") {
        return HttpResponse::Ok().json(reply_json("   \n  "));
    }
    if model.contains("refusing") {
        return HttpResponse::Ok().json(json!({
            "error": {"code": 429, "message": "Resource has been exhausted"}
        }));
    }
    HttpResponse::Ok().json(reply_json(&format!("reply from {model}")))
}

async fn spawn_mock_backend(hits: Hits) -> (String, ServerHandle) {
    let hits = web::Data::new(hits);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(hits.clone())
            .route("/v1beta/models/{call:.*}", web::post().to(generate_stub))
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}"), handle)
}

fn test_client(base_url: &str, models: &[&str], retries: u32) -> AiClient {
    AiClient::new(
        "test-key".to_string(),
        base_url.to_string(),
        models.iter().map(|m| m.to_string()).collect(),
        retries,
        Duration::from_secs(5),
    )
}

#[actix_web::test]
async fn primary_failure_falls_back_to_secondary() {
    let hits = Hits::default();
    let (base_url, handle) = spawn_mock_backend(hits.clone()).await;

    let client = test_client(&base_url, &["gemini-down", "gemini-good"], 1);
    let reply = client.generate("hello").await.unwrap();

    assert_eq!(reply, "reply from gemini-good");
    // Primary burns its full budget of retries + 1, secondary answers once
    assert_eq!(hits.for_model("gemini-down"), 2);
    assert_eq!(hits.for_model("gemini-good"), 1);

    handle.stop(true).await;
}

#[actix_web::test]
async fn success_short_circuits_remaining_models() {
    let hits = Hits::default();
    let (base_url, handle) = spawn_mock_backend(hits.clone()).await;

    let client = test_client(&base_url, &["gemini-good", "gemini-down"], 1);
    client.generate("hello").await.unwrap();

    assert_eq!(hits.for_model("gemini-good"), 1);
    assert_eq!(hits.for_model("gemini-down"), 0);

    handle.stop(true).await;
}

#[actix_web::test]
async fn all_models_exhausted_is_backend_unavailable() {
    let hits = Hits::default();
    let (base_url, handle) = spawn_mock_backend(hits.clone()).await;

    let client = test_client(&base_url, &["gemini-down", "gemini-down-b"], 1);
    let err = client.generate("hello").await.unwrap_err();

    assert!(matches!(err, AiError::BackendUnavailable));
    assert_eq!(hits.for_model("gemini-down"), 2);
    assert_eq!(hits.for_model("gemini-down-b"), 2);

    handle.stop(true).await;
}

#[actix_web::test]
async fn blank_content_counts_as_attempt_failure() {
    let hits = Hits::default();
    let (base_url, handle) = spawn_mock_backend(hits.clone()).await;

    let client = test_client(&base_url, &["gemini-blank", "gemini-good"], 1);
    let reply = client.generate("hello").await.unwrap();

    assert_eq!(reply, "reply from gemini-good");
    assert_eq!(hits.for_model("gemini-blank"), 2);

    handle.stop(true).await;
}

#[actix_web::test]
async fn error_body_counts_as_attempt_failure() {
    let hits = Hits::default();
    let (base_url, handle) = spawn_mock_backend(hits.clone()).await;

    let client = test_client(&base_url, &["gemini-refusing", "gemini-good"], 1);
    let reply = client.generate("hello").await.unwrap();

    assert_eq!(reply, "reply from gemini-good");
    assert_eq!(hits.for_model("gemini-refusing"), 2);

    handle.stop(true).await;
}

#[actix_web::test]
async fn zero_retries_means_one_attempt_per_model() {
    let hits = Hits::default();
    let (base_url, handle) = spawn_mock_backend(hits.clone()).await;

    let client = test_client(&base_url, &["gemini-down", "gemini-good"], 0);
    client.generate("hello").await.unwrap();

    assert_eq!(hits.for_model("gemini-down"), 1);

    handle.stop(true).await;
}

#[actix_web::test]
async fn transport_failure_exhausts_all_models() {
    // Nothing listens here; every attempt is a connection error
    let client = test_client("http://127.0.0.1:9", &["gemini-a", "gemini-b"], 1);
    let err = client.generate("hello").await.unwrap_err();
    assert!(matches!(err, AiError::BackendUnavailable));
}
