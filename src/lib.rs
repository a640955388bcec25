pub mod ai;
pub mod config;
pub mod database;
pub mod executor;
pub mod routes;
pub mod web_server;
