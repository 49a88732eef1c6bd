use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

const DEFAULT_BACKEND_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SLOT_MINUTES: u32 = 30;

/// Where the data-access layer lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendMode {
    /// Process-local collections, optionally seeded with demo data.
    Memory,
    /// JSON-over-HTTP against the clinic REST backend.
    Rest,
}

impl FromStr for BackendMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mock" | "in_memory" => Ok(BackendMode::Memory),
            "rest" | "http" | "remote" => Ok(BackendMode::Rest),
            other => Err(format!("unknown backend mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_mode: BackendMode,
    pub backend_api_url: String,
    pub backend_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub slot_minutes: u32,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_mode: BackendMode::Memory,
            backend_api_url: DEFAULT_BACKEND_API_URL.to_string(),
            backend_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            slot_minutes: DEFAULT_SLOT_MINUTES,
            seed_demo_data: true,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            backend_mode: parse_var("BACKEND_MODE", BackendMode::Memory),
            backend_api_url: env::var("BACKEND_API_URL")
                .unwrap_or_else(|_| {
                    warn!("BACKEND_API_URL not set, using default");
                    DEFAULT_BACKEND_API_URL.to_string()
                }),
            backend_timeout: Duration::from_secs(
                parse_var("BACKEND_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
            ),
            bind_addr: parse_var(
                "BIND_ADDR",
                SocketAddr::from(([0, 0, 0, 0], 3000)),
            ),
            slot_minutes: parse_var("SLOT_MINUTES", DEFAULT_SLOT_MINUTES),
            seed_demo_data: parse_var("SEED_DEMO_DATA", true),
        }
        .validated()
    }

    /// Replaces unusable values with defaults and reports incomplete setups.
    pub fn validated(mut self) -> Self {
        if self.slot_minutes == 0 {
            warn!("SLOT_MINUTES must be positive, falling back to {}", DEFAULT_SLOT_MINUTES);
            self.slot_minutes = DEFAULT_SLOT_MINUTES;
        }

        if !self.is_configured() {
            warn!("Application not fully configured - rest backend selected without BACKEND_API_URL");
        }

        self
    }

    pub fn is_configured(&self) -> bool {
        match self.backend_mode {
            BackendMode::Memory => true,
            BackendMode::Rest => !self.backend_api_url.trim().is_empty(),
        }
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {:?}", key, raw, default);
            default
        }),
        Err(_) => {
            warn!("{} not set, using default {:?}", key, default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_mode_parses_aliases() {
        assert_eq!("memory".parse::<BackendMode>(), Ok(BackendMode::Memory));
        assert_eq!(" REST ".parse::<BackendMode>(), Ok(BackendMode::Rest));
        assert!("postgres".parse::<BackendMode>().is_err());
    }

    #[test]
    fn rest_mode_requires_url() {
        let config = AppConfig {
            backend_mode: BackendMode::Rest,
            backend_api_url: String::new(),
            ..AppConfig::default()
        };
        assert!(!config.is_configured());
        assert!(AppConfig::default().is_configured());
    }

    #[test]
    fn zero_slot_length_falls_back_without_masking_other_settings() {
        let config = AppConfig {
            backend_mode: BackendMode::Rest,
            backend_api_url: "  ".to_string(),
            slot_minutes: 0,
            ..AppConfig::default()
        }
        .validated();

        assert_eq!(config.slot_minutes, DEFAULT_SLOT_MINUTES);
        assert_eq!(config.backend_mode, BackendMode::Rest);
        assert!(!config.is_configured());
    }

    #[test]
    fn valid_config_passes_through_unchanged() {
        let config = AppConfig {
            slot_minutes: 15,
            ..AppConfig::default()
        }
        .validated();

        assert_eq!(config.slot_minutes, 15);
        assert!(config.is_configured());
    }
}
