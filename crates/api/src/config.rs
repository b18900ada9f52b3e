//! Process configuration, read once at startup from the environment.
//!
//! | Variable         | Default          |
//! |------------------|------------------|
//! | `JWT_SECRET`     | insecure dev key |
//! | `TOKEN_TTL_HOURS`| `168`            |
//! | `BIND_ADDR`      | `0.0.0.0:8081`   |
//! | `STATIC_DIR`     | `./frontend`     |
//! | `SEED_DEMO_DATA` | `true`           |
//! | `LOG_FORMAT`     | `json`           |

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::Duration;

use shopledger_auth::token::DEFAULT_TOKEN_TTL_HOURS;
use shopledger_observability::LogFormat;

pub const DEV_JWT_SECRET: &str = "dev-secret";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_STATIC_DIR: &str = "./frontend";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    pub seed_demo_data: bool,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8081)),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            seed_demo_data: true,
            log_format: LogFormat::Json,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let token_ttl = match lookup("TOKEN_TTL_HOURS") {
            Some(raw) => {
                let hours: i64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("TOKEN_TTL_HOURS is not an integer: {raw}"))?;
                if hours <= 0 {
                    return Err(anyhow!("TOKEN_TTL_HOURS must be positive, got {hours}"));
                }
                Duration::hours(hours)
            }
            None => Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a socket address")?;

        let static_dir = PathBuf::from(lookup("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()));

        let seed_demo_data = match lookup("SEED_DEMO_DATA") {
            Some(raw) => parse_bool(&raw).with_context(|| format!("SEED_DEMO_DATA is not a boolean: {raw}"))?,
            None => true,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|e| anyhow!(e))?,
            None => LogFormat::Json,
        };

        Ok(Self {
            jwt_secret,
            token_ttl,
            bind_addr,
            static_dir,
            seed_demo_data,
            log_format,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.uses_dev_secret());
        assert_eq!(config.token_ttl, Duration::hours(168));
        assert_eq!(config.bind_addr.port(), 8081);
        assert_eq!(config.static_dir, PathBuf::from("./frontend"));
        assert!(config.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_HOURS", "2"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("STATIC_DIR", "/srv/www"),
            ("SEED_DEMO_DATA", "false"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert!(!config.uses_dev_secret());
        assert_eq!(config.token_ttl, Duration::hours(2));
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert!(!config.seed_demo_data);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(ApiConfig::from_lookup(lookup(&[("TOKEN_TTL_HOURS", "0")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("TOKEN_TTL_HOURS", "abc")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("BIND_ADDR", "nowhere")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("SEED_DEMO_DATA", "maybe")])).is_err());
        assert!(ApiConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).is_err());
    }
}
