use clap::Parser;
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "tutor", version = "1.0", about, long_about = None)]
pub struct CliArgs {
    /// Path to the configuration file; defaults are used when omitted
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<String>,

    /// Whether to flush the existing leaderboard database
    #[arg(long = "flush-data", short = 'f', default_value_t = false)]
    pub flush_data: bool,
}

impl CliArgs {
    /// Load the configuration from the specified file
    pub fn to_config(&self) -> std::io::Result<Config> {
        let Some(path) = &self.config_path else {
            return Ok(Config::default());
        };
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| e.into())
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub executor: ExecutorConfig,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: Option<String>,
    pub bind_port: Option<u16>,
    /// Origins allowed to call this service cross-origin (local dev
    /// frontend plus the deployed one)
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct AiConfig {
    /// Candidate backend models, primary first
    pub models: Option<Vec<String>>,
    /// Extra attempts per model after the first one
    pub retries: Option<u32>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ExecutorConfig {
    pub url: Option<String>,
    pub timeout_secs: Option<u64>,
}
