use std::env;
use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Process configuration, read once at startup. `.env` is loaded by the
/// binary before this runs; every key has a development default.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: String,
    pub jwt_secret: String,
    /// Argon2 time cost for password hashing.
    pub hash_cost: u32,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            host: var_or("STUCODE_HOST", "0.0.0.0"),
            port: parse_var("STUCODE_PORT", "3609")?,
            db_path: var_or("STUCODE_DB_PATH", "stucode.db"),
            jwt_secret: var_or("STUCODE_JWT_SECRET", "dev-secret-change-me"),
            hash_cost: parse_var("STUCODE_HASH_COST", "2")?,
            token_ttl_days: parse_var("STUCODE_TOKEN_TTL_DAYS", "7")?,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parse_var<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    var_or(key, default)
        .parse()
        .map_err(|e| anyhow!("invalid value for {key}: {e}"))
}
