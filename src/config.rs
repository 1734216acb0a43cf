use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub relay_addr: SocketAddr,
    pub collection: String,
    pub content_root: PathBuf,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("FORMRELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_HOST: {e}"))?;

        let port: u16 = env_or("FORMRELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_PORT: {e}"))?;

        // The collector binds this address; the front-end sends to it.
        let relay_addr: SocketAddr = env_or("FORMRELAY_RELAY_ADDR", "127.0.0.1:5000")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_RELAY_ADDR: {e}"))?;

        let collection = env_or("FORMRELAY_COLLECTION", "messages");

        let content_root = PathBuf::from(env_or("FORMRELAY_CONTENT_ROOT", "static"));

        let max_body_size: usize = env_or("FORMRELAY_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid FORMRELAY_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("FORMRELAY_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            host,
            port,
            relay_addr,
            collection,
            content_root,
            max_body_size,
            log_level,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
