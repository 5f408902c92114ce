//! TOML configuration with environment overrides.

use std::{num::NonZeroU32, path::Path, time::Duration};

use serde::Deserialize;
use sheet_ingestor::sources::sheet_csv::SheetCsvConfig;
use shared_utils::env::optional_env;
use thiserror::Error;

/// Environment variable that overrides the configured spreadsheet id.
pub const SHEET_ID_VAR: &str = "SHEET_ID";

/// Errors while loading the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration, normally read from `dashboard.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Chart title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Where the data comes from and how hard to try.
    pub source: SourceConfig,

    /// Animation pacing.
    #[serde(default)]
    pub animation: AnimationConfig,
}

/// The `[source]` section: sheet coordinates plus the retry policy the
/// polling loop applies around a failed fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Sheet endpoint settings, flattened into the same table.
    #[serde(flatten)]
    pub sheet: SheetCsvConfig,

    /// Retries after a failed fetch before the cycle is skipped.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// First backoff delay; doubles per retry.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

impl SourceConfig {
    /// Base backoff delay as a [`Duration`].
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

/// The `[animation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    /// Interpolation steps per transition; a transition renders `steps + 1`
    /// frames. Zero is rejected at parse time.
    #[serde(default = "default_steps")]
    pub steps: NonZeroU32,

    /// Pause between rendered frames, in milliseconds.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u64,

    /// Pause between fetch cycles, in seconds.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl AnimationConfig {
    /// Pause between rendered frames.
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    /// Pause between fetch cycles.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            frame_delay_ms: default_frame_delay_ms(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

fn default_title() -> String {
    "Who will get pied?!".to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_steps() -> NonZeroU32 {
    NonZeroU32::new(12).unwrap()
}

fn default_frame_delay_ms() -> u64 {
    80
}

fn default_poll_interval_secs() -> u64 {
    60
}

impl DashboardConfig {
    /// Reads and parses the config file, then applies environment
    /// overrides: `SHEET_ID` beats the file's `sheet_id`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&text)?;
        if let Some(sheet_id) = optional_env(SHEET_ID_VAR) {
            config.source.sheet.sheet_id = sheet_id;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    #[serial]
    fn minimal_config_fills_defaults() {
        let file = write_config("[source]\nsheet_id = \"abc123\"\n");
        let config = DashboardConfig::load(file.path()).expect("loads");
        assert_eq!(config.title, "Who will get pied?!");
        assert_eq!(config.source.sheet.sheet_id, "abc123");
        assert_eq!(config.source.max_retries, 2);
        assert_eq!(config.animation.steps.get(), 12);
        assert_eq!(config.animation.frame_delay(), Duration::from_millis(80));
        assert_eq!(config.animation.poll_interval(), Duration::from_secs(60));
    }

    #[test]
    #[serial]
    fn full_config_overrides_defaults() {
        let file = write_config(
            "title = \"Bake sale\"\n\
             [source]\n\
             sheet_id = \"abc123\"\n\
             range = \"A2:C12\"\n\
             value_column = 2\n\
             max_retries = 5\n\
             [animation]\n\
             steps = 4\n\
             frame_delay_ms = 40\n\
             poll_interval_secs = 15\n",
        );
        let config = DashboardConfig::load(file.path()).expect("loads");
        assert_eq!(config.title, "Bake sale");
        assert_eq!(config.source.sheet.range, "A2:C12");
        assert_eq!(config.source.sheet.value_column, 2);
        assert_eq!(config.source.max_retries, 5);
        assert_eq!(config.animation.steps.get(), 4);
    }

    #[test]
    #[serial]
    fn zero_steps_is_rejected_at_parse_time() {
        let file = write_config("[source]\nsheet_id = \"abc\"\n[animation]\nsteps = 0\n");
        assert!(matches!(
            DashboardConfig::load(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    #[serial]
    fn sheet_id_env_var_beats_the_file() {
        let file = write_config("[source]\nsheet_id = \"from-file\"\n");
        unsafe {
            std::env::set_var(SHEET_ID_VAR, "from-env");
        }
        let config = DashboardConfig::load(file.path()).expect("loads");
        unsafe {
            std::env::remove_var(SHEET_ID_VAR);
        }
        assert_eq!(config.source.sheet.sheet_id, "from-env");
    }
}
