use actix_cors::Cors;
use actix_web::{App, HttpServer, dev::Server, middleware, web};
use sqlx::sqlite::SqlitePool;

use crate::ai::AiClient;
use crate::config::ServerConfig;
use crate::executor::ExecutorClient;
use crate::routes::{
    analyze_handler, chat_explain_handler, execute_handler, generate_tutorial_handler,
    get_leaderboard_handler, json_error_handler, list_models_handler, post_score_handler,
    suggest_handler,
};

/// Origins allowed when the configuration does not list any: the local dev
/// frontend and the deployed one
const DEFAULT_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://ai-tutor-platform-lac.vercel.app",
];

pub fn build_server(
    config: ServerConfig,
    db_pool: SqlitePool,
    ai: AiClient,
    executor: ExecutorClient,
) -> std::io::Result<Server> {
    let db_pool = web::Data::new(db_pool);
    let ai = web::Data::new(ai);
    let executor = web::Data::new(executor);
    let allowed_origins = config
        .allowed_origins
        .unwrap_or_else(|| DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect());

    let server = HttpServer::new(move || {
        let mut cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .app_data(db_pool.clone())
            .app_data(ai.clone())
            .app_data(executor.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(middleware::Logger::default())
            .wrap(cors)
            .service(analyze_handler)
            .service(chat_explain_handler)
            .service(generate_tutorial_handler)
            .service(execute_handler)
            .service(suggest_handler)
            .service(get_leaderboard_handler)
            .service(post_score_handler)
            .service(list_models_handler)
    })
    .bind((
        config
            .bind_address
            .unwrap_or("127.0.0.1".to_string()),
        config.bind_port.unwrap_or(8000),
    ))?
    .run();

    Ok(server)
}
