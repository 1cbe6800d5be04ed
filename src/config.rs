use std::time::Duration;

use anyhow::Context;
use tracing::Level;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,

    /// MySQL connection url. When unset the api runs against an in-memory store.
    pub db_connection_url: Option<String>,
    pub db_max_connections: u32,
    pub db_seed_demo: bool,

    pub cors_origin: Option<String>,
    pub request_timeout: Duration,
    pub log_level: Level,
}

pub fn build_from_env() -> anyhow::Result<Config> {
    let _ = dotenv::dotenv();

    return build(|key| std::env::var(key).ok());
}

pub fn build<F>(lookup: F) -> anyhow::Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    let server_port = match get("PORT") {
        Some(port) => port.trim().parse().context("PORT must be a port number")?,
        None => DEFAULT_PORT,
    };

    let db_max_connections = match get("DB_MAX_CONNECTIONS") {
        Some(max) => max
            .trim()
            .parse()
            .context("DB_MAX_CONNECTIONS must be a positive integer")?,
        None => DEFAULT_DB_MAX_CONNECTIONS,
    };
    if db_max_connections == 0 {
        anyhow::bail!("DB_MAX_CONNECTIONS must be a positive integer");
    }

    let db_seed_demo = match get("SEED_DEMO") {
        Some(flag) => parse_flag(&flag).context("SEED_DEMO must be true or false")?,
        None => false,
    };

    let request_timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
        Some(secs) => secs
            .trim()
            .parse()
            .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
        None => DEFAULT_REQUEST_TIMEOUT_SECS,
    };

    let log_level = match get("LOG_LEVEL") {
        Some(level) => level
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("LOG_LEVEL must be one of trace, debug, info, warn, error"))?,
        None => Level::INFO,
    };

    return Ok(Config {
        server_port,

        db_connection_url: get("DATABASE_URL"),
        db_max_connections,
        db_seed_demo,

        cors_origin: get("CORS_ORIGIN").map(|origin| origin.trim().to_string()),
        request_timeout: Duration::from_secs(request_timeout_secs),
        log_level,
    });
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    return match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("unrecognised flag value {other:?}")),
    };
}
