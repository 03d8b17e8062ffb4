use std::{ops::RangeInclusive, str::FromStr};

use anyhow::Context;
use argon2::Params;
use time::Duration;

/// Accepted `JWT_TTL_MINUTES`, up to one week.
pub const ACCESS_TTL_MINUTES: RangeInclusive<i64> = 1..=7 * 24 * 60;
/// Accepted `REFRESH_TTL_DAYS`, up to ten years.
pub const REFRESH_TTL_DAYS: RangeInclusive<i64> = 1..=3650;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    /// Upper bound for access token lifetime; also the default.
    pub fn access_ttl(&self) -> Duration {
        Duration::minutes(self.ttl_minutes)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::days(self.refresh_ttl_days)
    }
}

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy)]
pub struct HashConfig {
    pub m_cost: u32,
    pub t_cost: u32,
    pub p_cost: u32,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            m_cost: Params::DEFAULT_M_COST,
            t_cost: Params::DEFAULT_T_COST,
            p_cost: Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub hashing: HashConfig,
    pub polka_key: String,
    pub platform: String,
    pub host: String,
    pub port: u16,
    pub fileserver_root: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("DB_URL"))
            .context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: required("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "chirpy".into()),
            ttl_minutes: bounded_or("JWT_TTL_MINUTES", 60, ACCESS_TTL_MINUTES)?,
            refresh_ttl_days: bounded_or("REFRESH_TTL_DAYS", 60, REFRESH_TTL_DAYS)?,
        };
        let defaults = HashConfig::default();
        let hashing = HashConfig {
            m_cost: parsed_or("ARGON2_M_COST", defaults.m_cost),
            t_cost: parsed_or("ARGON2_T_COST", defaults.t_cost),
            p_cost: parsed_or("ARGON2_P_COST", defaults.p_cost),
        };

        Ok(Self {
            database_url,
            jwt,
            hashing,
            polka_key: required("POLKA_KEY")?,
            platform: required("PLATFORM")?,
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: parsed_or("APP_PORT", 8080),
            fileserver_root: std::env::var("FILESERVER_ROOT").unwrap_or_else(|_| ".".into()),
        })
    }

    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

fn required(key: &str) -> anyhow::Result<String> {
    match std::env::var(key) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => anyhow::bail!("{key} must be set"),
    }
}

/// Like [`parsed_or`], but a set value must parse and fall inside `range`.
fn bounded_or(key: &str, default: i64, range: RangeInclusive<i64>) -> anyhow::Result<i64> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    let value: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be an integer"))?;
    in_range(key, value, range)
}

fn in_range(key: &str, value: i64, range: RangeInclusive<i64>) -> anyhow::Result<i64> {
    if !range.contains(&value) {
        anyhow::bail!(
            "{key} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        );
    }
    Ok(value)
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
