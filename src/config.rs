//! Portal configuration.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`ACADEMIA_*`, e.g. `ACADEMIA_TIMEOUT_SECS=10`)
//! 2. `academia.toml` in the working directory
//! 3. Built-in defaults
//!
//! A `.env` file is loaded first by [`PortalConfig::load_with_dotenv`].

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use url::Url;

use crate::core::metrics::DEFAULT_TARGET_PERCENTAGE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

const CONFIG_FILE: &str = "academia.toml";

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PortalConfig {
    /// Portal origin; every page path is resolved against it.
    pub base_url: String,
    pub attendance_page: String,
    pub timetable_page: String,
    pub planner_page: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Attendance percentage the metrics are computed against.
    pub target_percentage: f64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://academia.srmist.edu.in".to_string(),
            attendance_page: "/srm_university/academia-academic-services/page/My_Attendance"
                .to_string(),
            timetable_page: "/srm_university/academia-academic-services/page/My_Time_Table_2023_24"
                .to_string(),
            planner_page:
                "/srm_university/academia-academic-services/page/Academic_Planner_2025_26_ODD"
                    .to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/141.0.0.0 Safari/537.36".to_string(),
            timeout_secs: 30,
            target_percentage: DEFAULT_TARGET_PERCENTAGE,
        }
    }
}

impl PortalConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }
        figment.merge(Env::prefixed("ACADEMIA_"))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.base()?;
        if !(0.0..=100.0).contains(&self.target_percentage) {
            return Err(ConfigError::InvalidValue {
                field: "target_percentage",
                reason: format!("{} is outside 0..=100", self.target_percentage),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|err| ConfigError::InvalidValue {
            field: "base_url",
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_point_at_the_portal() {
        let config = PortalConfig::default();
        assert_eq!(config.base_url, "https://academia.srmist.edu.in");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.target_percentage, 75.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_and_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "timeout_secs = 5\ntarget_percentage = 80.0")?;
            jail.set_env("ACADEMIA_TIMEOUT_SECS", "12");

            let config = PortalConfig::load().expect("config");
            assert_eq!(config.timeout_secs, 12);
            assert_eq!(config.target_percentage, 80.0);
            assert_eq!(config.base_url, PortalConfig::default().base_url);
            Ok(())
        });
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("ACADEMIA_TARGET_PERCENTAGE", "120");
            let err = PortalConfig::load().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue {
                    field: "target_percentage",
                    ..
                }
            ));
            Ok(())
        });
    }

    #[test]
    fn bad_base_url_is_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("ACADEMIA_BASE_URL", "not a url");
            assert!(PortalConfig::load().is_err());
            Ok(())
        });
    }
}
