use std::{net::SocketAddr, str::FromStr, time::Duration};

use captable_core::constants::SHARE_DISCREPANCY_TOLERANCE;
use rust_decimal::Decimal;

const DEFAULT_LISTEN_PORT: u16 = 8088;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub share_tolerance: Decimal,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let listen_addr = parse_or_default(
            "CAPTABLE_LISTEN_ADDR",
            var("CAPTABLE_LISTEN_ADDR"),
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_LISTEN_PORT)),
        );
        let share_tolerance = parse_or_default(
            "CAPTABLE_SHARE_TOLERANCE",
            var("CAPTABLE_SHARE_TOLERANCE"),
            SHARE_DISCREPANCY_TOLERANCE,
        );
        let share_tolerance = if share_tolerance < Decimal::ZERO {
            tracing::warn!(
                "CAPTABLE_SHARE_TOLERANCE must not be negative, using {}",
                SHARE_DISCREPANCY_TOLERANCE
            );
            SHARE_DISCREPANCY_TOLERANCE
        } else {
            share_tolerance
        };
        let cors_allow = var("CAPTABLE_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = parse_or_default(
            "CAPTABLE_REQUEST_TIMEOUT_MS",
            var("CAPTABLE_REQUEST_TIMEOUT_MS"),
            DEFAULT_REQUEST_TIMEOUT_MS,
        );
        Self {
            listen_addr,
            share_tolerance,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Invalid {} '{}', using {}", key, raw, default);
                default
            }
        },
    }
}
