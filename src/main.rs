use clap::Parser;

use tutor::ai::AiClient;
use tutor::config::{CliArgs, Config};
use tutor::database as db;
use tutor::executor::ExecutorClient;
use tutor::web_server::build_server;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = CliArgs::parse();
    let Config {
        server: server_config,
        ai: ai_config,
        executor: executor_config,
    } = cli.to_config().expect("Failed to load configuration");

    // Fail fast on a missing backend credential, before any network attempt
    let ai = AiClient::from_config(&ai_config).expect("Missing AI backend credential");
    let executor = ExecutorClient::from_config(&executor_config);

    let db_path = db::get_db_path();
    if cli.flush_data {
        db::remove_db(&db_path);
    }
    let db_pool = db::init_db(&db_path)
        .await
        .expect("Failed to initialize database");

    // ======= PREPARATION END, EXECUTION START =======

    let server = build_server(server_config, db_pool.clone(), ai, executor)
        .expect("Failed to build server");

    let server_handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            log::info!("Ctrl-c received, shutting down...");
        }
        res_server = server_task => {
            log::error!("Server terminated unexpectedly: {:?}", res_server);
        }
    }

    // Stop accepting requests, then release the store
    server_handle.stop(true).await;
    db_pool.close().await;

    log::info!("Shutdown complete");
    Ok(())
}
