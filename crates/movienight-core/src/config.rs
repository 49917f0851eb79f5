use std::str::FromStr;

use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// How long a pending suggestion stays confirmable.
pub const PENDING_TTL_SECS: i64 = 5 * 60;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (movienight.toml + MOVIENIGHT_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieNightConfig {
    pub telegram: TelegramConfig,
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub deadline: DeadlineConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// The single group chat this deployment serves. Messages from any
    /// other chat are ignored.
    pub group_chat_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub api_key: String,
}

/// The recurring weekly instant at which suggestions close and the poll
/// is dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeadlineConfig {
    /// IANA timezone name, e.g. "Europe/Berlin".
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Day of week, 0=Sunday … 6=Saturday.
    #[serde(default = "default_day")]
    pub day: u8,
    /// Hour of day (0–23), on the hour.
    #[serde(default = "default_hour")]
    pub hour: u8,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            day: default_day(),
            hour: default_hour(),
        }
    }
}

impl DeadlineConfig {
    /// Resolve the configured timezone name to a `chrono_tz::Tz`.
    pub fn tz(&self) -> Result<Tz> {
        Tz::from_str(&self.timezone).map_err(|_| CoreError::InvalidTimezone(self.timezone.clone()))
    }

    /// Validate day/hour ranges and the timezone name.
    pub fn validate(&self) -> Result<()> {
        if self.day > 6 {
            return Err(CoreError::InvalidDeadline(format!(
                "day must be 0 (Sunday) … 6 (Saturday), got {}",
                self.day
            )));
        }
        if self.hour > 23 {
            return Err(CoreError::InvalidDeadline(format!(
                "hour must be 0 … 23, got {}",
                self.hour
            )));
        }
        self.tz().map(|_| ())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON suggestion snapshot.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_timezone() -> String {
    "Europe/Berlin".to_string()
}
fn default_day() -> u8 {
    5 // Friday
}
fn default_hour() -> u8 {
    12
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_snapshot_path() -> String {
    "data/suggestions.json".to_string()
}

impl MovieNightConfig {
    /// Load config from a TOML file with MOVIENIGHT_* env var overrides
    /// (double underscore separates nesting: MOVIENIGHT_TELEGRAM__BOT_TOKEN).
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or("movienight.toml");

        let config: MovieNightConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("MOVIENIGHT_").split("__"))
            .extract()
            .map_err(|e| CoreError::Config(e.to_string()))?;

        config.deadline.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deadline_is_friday_noon_berlin() {
        let d = DeadlineConfig::default();
        assert_eq!(d.day, 5);
        assert_eq!(d.hour, 12);
        assert_eq!(d.timezone, "Europe/Berlin");
        assert!(d.validate().is_ok());
    }

    #[test]
    fn out_of_range_day_rejected() {
        let d = DeadlineConfig {
            day: 7,
            ..Default::default()
        };
        assert!(matches!(d.validate(), Err(CoreError::InvalidDeadline(_))));
    }

    #[test]
    fn out_of_range_hour_rejected() {
        let d = DeadlineConfig {
            hour: 24,
            ..Default::default()
        };
        assert!(matches!(d.validate(), Err(CoreError::InvalidDeadline(_))));
    }

    #[test]
    fn unknown_timezone_rejected() {
        let d = DeadlineConfig {
            timezone: "Mars/OlympusMons".to_string(),
            ..Default::default()
        };
        assert!(matches!(d.validate(), Err(CoreError::InvalidTimezone(_))));
    }
}
