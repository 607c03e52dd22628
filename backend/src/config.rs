use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;

use crate::error::ConfigError;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// SQLite file holding titles, genres, budgets and production metadata.
    pub movies_db_path: String,

    /// SQLite file holding per-movie ratings.
    pub ratings_db_path: String,

    /// Rows per listing page.
    ///
    /// Fixed for the lifetime of the process; clients cannot override it.
    pub page_size: NonZeroU32,

    /// Pool size for each store.
    pub db_max_connections: u32,

    pub host: IpAddr,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. Unset keys fall back
    /// to defaults; set but malformed keys are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let movies_db_path = lookup("MOVIES_DB_PATH").unwrap_or_else(|| "db/movies.db".to_string());
        let ratings_db_path =
            lookup("RATINGS_DB_PATH").unwrap_or_else(|| "db/ratings.db".to_string());

        let page_size = parse_or(&lookup, "PAGE_SIZE", "a positive integer", || {
            NonZeroU32::new(50)
        })?;
        let db_max_connections =
            parse_or(&lookup, "DB_MAX_CONNECTIONS", "a positive integer", || {
                NonZeroU32::new(8)
            })?;
        let host = parse_or(&lookup, "HOST", "an IP address", || {
            Some(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
        })?;
        let port = parse_or(&lookup, "PORT", "a port number", || Some(3000))?;

        Ok(Self {
            movies_db_path,
            ratings_db_path,
            page_size,
            db_max_connections: db_max_connections.get(),
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: impl FnOnce() -> Option<T>,
) -> Result<T, ConfigError> {
    let invalid = |value: String| ConfigError::Invalid {
        name,
        value,
        expected,
    };

    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| invalid(raw)),
        None => default().ok_or_else(|| invalid(String::new())),
    }
}
