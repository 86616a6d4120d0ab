/**
 * Bridge configuration
 * Read from the environment once at startup
 */

use std::time::Duration;
use tracing::warn;

use crate::channel::DEFAULT_CHANNEL;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_CONNECT_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub bind_addr: String,
    pub channel: String,
    pub connect_delay: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            connect_delay: Duration::from_millis(DEFAULT_CONNECT_DELAY_MS),
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let connect_delay = match lookup("BIOID_CONNECT_DELAY_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    warn!("Ignoring BIOID_CONNECT_DELAY_MS={:?}: {}", raw, e);
                    defaults.connect_delay
                }
            },
            None => defaults.connect_delay,
        };

        Self {
            bind_addr: lookup("BIOID_BIND_ADDR").unwrap_or(defaults.bind_addr),
            channel: lookup("BIOID_CHANNEL")
                .filter(|channel| !channel.is_empty())
                .unwrap_or(defaults.channel),
            connect_delay,
        }
    }
}
