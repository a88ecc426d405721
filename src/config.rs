//! Process configuration, read once at startup.

use anyhow::{Context, Result};
use log::{info, warn};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "dbname=learning-journal";
const DEFAULT_SESSION_SECRET: &str = "itsaseekrit";
const DEFAULT_AUTH_SECRET: &str = "anotherseekrit";
const DEFAULT_PASSWORD: &str = "secret";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub pool_size: u32,
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    /// bcrypt hash of the admin password
    pub admin_password_hash: String,
    pub session_secret: String,
    pub auth_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_password_hash = match lookup("AUTH_PASSWORD_HASH") {
            Some(hash) => hash,
            None => {
                let password = lookup("AUTH_PASSWORD").unwrap_or_else(|| {
                    warn!("AUTH_PASSWORD not set, using the default admin password");
                    DEFAULT_PASSWORD.to_owned()
                });
                bcrypt::hash(password, bcrypt::DEFAULT_COST)
                    .context("Failed to hash the admin password")?
            }
        };

        Ok(Self {
            database_url: or_default(&lookup, "DATABASE_URL", DEFAULT_DATABASE_URL),
            pool_size: parse_or_default(&lookup, "DATABASE_POOL_SIZE", 10)?,
            host: or_default(&lookup, "HOST", "0.0.0.0"),
            port: parse_or_default(&lookup, "PORT", 5000)?,
            admin_username: or_default(&lookup, "AUTH_USERNAME", "admin"),
            admin_password_hash,
            session_secret: secret_or_default(&lookup, "JOURNAL_SESSION_SECRET", DEFAULT_SESSION_SECRET),
            auth_secret: secret_or_default(&lookup, "JOURNAL_AUTH_SECRET", DEFAULT_AUTH_SECRET),
        })
    }
}

fn or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        info!("{} not set, using default: {}", key, default);
        default.to_owned()
    })
}

fn secret_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        warn!("{} not set, falling back to the built-in secret", key);
        default.to_owned()
    })
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid {} value: {}", key, value)),
        None => {
            info!("{} not set, using default: {}", key, default);
            Ok(default)
        }
    }
}
