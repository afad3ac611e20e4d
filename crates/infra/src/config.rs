//! Configuration loading and representation.
//!
//! Read once at startup from environment variables; every setting has a
//! default so a bare `cargo run` serves on port 8080.

use std::net::SocketAddr;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "UNIFORMDESK_BIND_ADDR";
pub const SEED_DEMO_VAR: &str = "UNIFORMDESK_SEED_DEMO";
pub const REALTIME_CAPACITY_VAR: &str = "UNIFORMDESK_REALTIME_CAPACITY";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Load the demo school (`SCH001`) with stock and students at startup.
    pub seed_demo: bool,
    /// Buffer size of the realtime broadcast channel; slow subscribers lose
    /// messages beyond this.
    pub realtime_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            seed_demo: false,
            realtime_capacity: 256,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let bind_addr = match lookup(BIND_ADDR_VAR) {
            Some(raw) => raw.trim().parse::<SocketAddr>().map_err(|e| {
                ConfigError::Invalid {
                    var: BIND_ADDR_VAR,
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => defaults.bind_addr,
        };

        let seed_demo = match lookup(SEED_DEMO_VAR) {
            Some(raw) => parse_bool(SEED_DEMO_VAR, &raw)?,
            None => defaults.seed_demo,
        };

        let realtime_capacity = match lookup(REALTIME_CAPACITY_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: REALTIME_CAPACITY_VAR,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: REALTIME_CAPACITY_VAR,
                        value: raw.clone(),
                        reason: e.to_string(),
                    });
                }
            },
            None => defaults.realtime_capacity,
        };

        Ok(Self {
            bind_addr,
            seed_demo,
            realtime_capacity,
        })
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}
