use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};

pub const DEFAULT_DB_NAME: &str = "reliefnet";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DB_TIMEOUT_SECS: u64 = 5;

/// Settings read from the environment (after `.env`, if present).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub db_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub auto_migrate: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup("DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => {
                let dir = lookup("DB_DIR").unwrap_or_else(|| ".".into());
                let name = lookup("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.into());
                PathBuf::from(dir).join(format!("{name}.db"))
            }
        };

        let timeout_secs: u64 = match lookup("RELIEFNET_DB_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("RELIEFNET_DB_TIMEOUT_SECS is not a number: {v}"))?,
            None => DEFAULT_DB_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("RELIEFNET_DB_TIMEOUT_SECS must be at least 1");
        }

        let port: u16 = match lookup("RELIEFNET_PORT") {
            Some(v) => v
                .parse()
                .with_context(|| format!("RELIEFNET_PORT is not a valid port: {v}"))?,
            None => DEFAULT_PORT,
        };

        let auto_migrate = match lookup("RELIEFNET_AUTO_MIGRATE") {
            Some(v) => parse_bool(&v)
                .with_context(|| format!("RELIEFNET_AUTO_MIGRATE is not a boolean: {v}"))?,
            None => false,
        };

        Ok(Self {
            db_path,
            db_timeout: Duration::from_secs(timeout_secs),
            host: lookup("RELIEFNET_HOST").unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            auto_migrate,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
