use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PORT_ATTEMPTS: u16 = 10;
pub const DEFAULT_HOLDINGS_PATH: &str = "data/holdings.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub port_attempts: u16,
    pub holdings_path: PathBuf,
    pub timeline_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            port_attempts: DEFAULT_PORT_ATTEMPTS,
            holdings_path: PathBuf::from(DEFAULT_HOLDINGS_PATH),
            timeline_path: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            host: parse_or(non_empty("HOST"), "HOST", defaults.host),
            port: parse_or(non_empty("PORT"), "PORT", defaults.port),
            port_attempts: parse_or(non_empty("PORT_ATTEMPTS"), "PORT_ATTEMPTS", defaults.port_attempts).max(1),
            holdings_path: non_empty("HOLDINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.holdings_path),
            timeline_path: non_empty("TIMELINE_PATH").map(PathBuf::from),
        }
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> T {
    match raw {
        Some(v) => v.parse().unwrap_or_else(|_| {
            warn!(key, value = %v, "Invalid configuration value, using default");
            default
        }),
        None => default,
    }
}
