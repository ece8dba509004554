use super::ConfigError;
use std::env;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HASH_ITERATIONS: i64 = 3;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub database_url: String,
    /// Work factor applied to newly provisioned credentials.
    pub default_iterations: i64,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", DEFAULT_HOST);
        let host = host
            .parse::<IpAddr>()
            .map_err(|_| ConfigError::Invalid { name: "HOST", value: host })?;

        let port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let default_iterations = match env::var("DEFAULT_HASH_ITERATIONS") {
            Ok(value) => value
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DEFAULT_HASH_ITERATIONS",
                    value,
                })?,
            Err(_) => DEFAULT_HASH_ITERATIONS,
        };

        Ok(Self {
            host,
            port,
            database_url,
            default_iterations,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
