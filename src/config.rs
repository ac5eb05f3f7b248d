//! Configuration for pager behavior
//!
//! Mirrors the flat-field config style used elsewhere in the stack:
//! plain struct, serde derive, `Default` plus `with_*` builder setters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for a pager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Reset the visible cumulative list to empty as soon as a new query
    /// starts, before its first page resolves. When false, the previous
    /// session's list stays visible until the new first page arrives.
    pub clear_on_new_request: bool,

    /// Delay applied before each underlying request is issued.
    /// A throttling/testing hook, not a retry mechanism.
    #[serde(rename = "fetch_delay_ms", with = "duration_ms")]
    pub fetch_delay: Duration,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            clear_on_new_request: false,
            fetch_delay: Duration::ZERO,
        }
    }
}

impl PagerConfig {
    /// Create a new pager config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the visible list is cleared on each new query
    #[must_use]
    pub fn with_clear_on_new_request(mut self, clear: bool) -> Self {
        self.clear_on_new_request = clear;
        self
    }

    /// Set the pre-request fetch delay
    #[must_use]
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }
}

/// Serialize a `Duration` as integer milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok(Duration::from_millis(ms))
    }
}
