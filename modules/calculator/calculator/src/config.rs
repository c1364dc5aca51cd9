use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::ServiceConfig;

/// Configuration of the calculator module (`modules.calculator` in the app config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Upper bound on concurrently held sessions.
    pub max_sessions: usize,

    /// Longest number the display accepts from keystrokes.
    pub max_display_length: usize,

    /// Sessions idle for this long are discarded.
    #[serde(with = "duration_serde")]
    pub session_idle_timeout: Duration,

    /// How often the idle-session reaper runs.
    #[serde(with = "duration_serde")]
    pub reaper_interval: Duration,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            max_sessions: 10_000,
            max_display_length: 32,
            session_idle_timeout: Duration::from_secs(30 * 60),
            reaper_interval: Duration::from_secs(60),
        }
    }
}

impl CalculatorConfig {
    /// Reaper period, never shorter than one second.
    #[must_use]
    pub fn effective_reaper_interval(&self) -> Duration {
        self.reaper_interval.max(Duration::from_secs(1))
    }
}

impl From<&CalculatorConfig> for ServiceConfig {
    fn from(cfg: &CalculatorConfig) -> Self {
        Self {
            max_display_length: cfg.max_display_length,
            session_idle_timeout: cfg.session_idle_timeout,
        }
    }
}

/// Human readable durations (`"30m"`, `"15s"`) via `humantime`.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(&humantime::format_duration(*d))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        humantime::parse_duration(&raw).map_err(de::Error::custom)
    }
}
