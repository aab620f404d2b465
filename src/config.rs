// SPDX-License-Identifier: MPL-2.0

use std::{
    fs::{create_dir_all, read_to_string, write},
    path::PathBuf,
};

use anyhow::{Context, Result};

const APP_NAME: &str = "timefill";

pub const DEFAULT_BASE_URL: &str = "https://eu-central-1.api.clockify.me";
pub const DEFAULT_START_HOUR: u32 = 9;
pub const DEFAULT_END_HOUR: u32 = 17;

// The lunch draw lands somewhere in [11:30, 13:00] and lasts one hour, so
// working hours must strictly bracket the 11:30-14:00 band for both halves
// of a split day to be non-empty.
pub const LUNCH_EARLIEST_MINUTE: u32 = 11 * 60 + 30;
pub const LUNCH_LATEST_END_MINUTE: u32 = 14 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{0} is required but was left empty")]
    MissingField(&'static str),
    #[error("{field} must be between 0 and 23, got {value}")]
    HourOutOfRange { field: &'static str, value: u32 },
    #[error("start hour ({start}) must be earlier than end hour ({end})")]
    HoursOutOfOrder { start: u32, end: u32 },
    #[error(
        "working hours {start}:00-{end}:00 cannot contain a lunch break \
         (start before 11:30 and end after 14:00 are required)"
    )]
    LunchDoesNotFit { start: u32, end: u32 },
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),
}

/// Settings for one run.  Collected once from the config file, CLI flags and
/// interactive prompts, validated, then never modified again.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Configuration {
    pub workspace_id: String,
    pub project_id: String,
    pub auth_token: String,
    pub description: String,
    pub start_hour: u32,
    pub end_hour: u32,
    pub lunch_break: bool,
    pub base_url: String,
}

impl Configuration {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.workspace_id.trim().is_empty() {
            return Err(ConfigurationError::MissingField("workspace id"));
        }
        if self.project_id.trim().is_empty() {
            return Err(ConfigurationError::MissingField("project id"));
        }
        if self.auth_token.trim().is_empty() {
            return Err(ConfigurationError::MissingField("auth token"));
        }
        if self.description.trim().is_empty() {
            return Err(ConfigurationError::MissingField("description"));
        }
        for (field, value) in [("start hour", self.start_hour), ("end hour", self.end_hour)] {
            if value > 23 {
                return Err(ConfigurationError::HourOutOfRange { field, value });
            }
        }
        if self.start_hour >= self.end_hour {
            return Err(ConfigurationError::HoursOutOfOrder {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        if self.lunch_break
            && (self.start_hour * 60 >= LUNCH_EARLIEST_MINUTE
                || self.end_hour * 60 <= LUNCH_LATEST_END_MINUTE)
        {
            return Err(ConfigurationError::LunchDoesNotFit {
                start: self.start_hour,
                end: self.end_hour,
            });
        }
        Ok(())
    }
}

/// The subset of [`Configuration`] that may be present in the config file.
/// Anything missing here gets filled in from CLI flags or by prompting.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct PartialConfig {
    pub workspace_id: Option<String>,
    pub project_id: Option<String>,
    pub auth_token: Option<String>,
    pub description: Option<String>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub lunch_break: Option<bool>,
    pub base_url: Option<String>,
}

/// Reads and writes the persisted defaults.  Only this type touches the
/// filesystem; everything downstream works on the loaded values.
pub struct ConfigStore {
    path: Option<PathBuf>,
}

impl ConfigStore {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let path = config_path
            .or_else(|| dirs::config_local_dir().map(|dir| dir.join(APP_NAME).join("config.toml")));
        Self { path }
    }

    /// Loads whatever defaults were saved by an earlier run.  A missing or
    /// unparseable file is not an error, just an empty starting point.
    pub fn load(&self) -> PartialConfig {
        let Some(path) = &self.path else {
            log::warn!("OS config directory could not be determined, no defaults loaded");
            return PartialConfig::default();
        };
        log::debug!("Reading configuration at path {:?}", path);
        match read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("Could not parse config at path {:?} {err}", path);
                    PartialConfig::default()
                }
            },
            Err(err) => {
                log::trace!("Could not read path {path:?} (assuming no config file set yet) {err}");
                PartialConfig::default()
            }
        }
    }

    /// Persists the given configuration as the defaults for the next run.
    pub fn save(&self, config: &Configuration) -> Result<()> {
        let Some(path) = &self.path else {
            anyhow::bail!("OS config directory could not be determined, cannot save defaults");
        };
        if let Some(dir) = path.parent() {
            create_dir_all(dir)
                .with_context(|| format!("could not create config directory {dir:?}"))?;
        }
        let contents = toml::to_string(config).context("could not serialize configuration")?;
        write(path, contents).with_context(|| format!("could not write config file {path:?}"))?;
        log::debug!("Saved configuration defaults to {:?}", path);
        Ok(())
    }
}
