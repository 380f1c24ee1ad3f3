//! Endpoint configuration parameters
//!
//! Tunables for the link drivers.  The firmware embeds `endpoint.json`
//! at build time and parses it with [`EndpointConfig::from_json`].

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which driver runs the link.  Exactly one is ever constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveMode {
    /// Transfer-complete / error interrupts feed the event queue.
    Interrupt,
    /// The main loop polls the select line and runs blocking transfers.
    Polling,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub drive_mode: DriveMode,

    // --- Polling ---
    /// Bounded wait for one blocking transfer (milliseconds)
    pub poll_timeout_ms: u32,

    // --- Recovery ---
    /// Arm retries inside one event before deferring to the next service pass
    pub rearm_attempts: u8,

    // --- Bus ---
    /// SPI mode 0-3 (CPOL << 1 | CPHA)
    pub spi_mode: u8,

    // --- Diagnostics ---
    /// Link statistics log interval (seconds)
    pub stats_log_interval_secs: u32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            drive_mode: DriveMode::Interrupt,
            poll_timeout_ms: 100,
            rearm_attempts: 3,
            spi_mode: 0, // CPOL low, sample on first edge
            stats_log_interval_secs: 60,
        }
    }
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.poll_timeout_ms == 0 {
            return Err(Error::Config("poll_timeout_ms must be non-zero"));
        }
        if self.rearm_attempts == 0 {
            return Err(Error::Config("rearm_attempts must be at least 1"));
        }
        if self.spi_mode > 3 {
            return Err(Error::Config("spi_mode must be 0..=3"));
        }
        if self.stats_log_interval_secs == 0 {
            return Err(Error::Config("stats_log_interval_secs must be non-zero"));
        }
        Ok(())
    }

    /// Parse and validate.  Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        let config: Self =
            serde_json::from_str(text).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }
}
