use cloudpub_config::constants::{
    CLOUDPUB_LOG, CLOUDPUB_SERVICE_SETTINGS, CLOUDPUB_SLOT, CLOUDPUB_SUBSCRIPTION,
};
use cloudpub_config::{DEFAULT_LOG_FILTER, DEFAULT_SERVICE_SETTINGS_PATH};
use cloudpub_settings::{DeploymentSlot, ServiceSettingsOverrides};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid deployment slot in CLOUDPUB_SLOT: {0}")]
    InvalidSlot(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub service_settings_path: PathBuf,
    pub default_slot: Option<DeploymentSlot>,
    pub default_subscription: Option<String>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            service_settings_path: PathBuf::from(DEFAULT_SERVICE_SETTINGS_PATH),
            default_slot: None,
            default_subscription: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let service_settings_path = non_empty_var(CLOUDPUB_SERVICE_SETTINGS)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SERVICE_SETTINGS_PATH));

        let default_slot = non_empty_var(CLOUDPUB_SLOT)
            .map(|slot| {
                slot.parse::<DeploymentSlot>()
                    .map_err(|_| ConfigError::InvalidSlot(slot.clone()))
            })
            .transpose()?;

        let default_subscription = non_empty_var(CLOUDPUB_SUBSCRIPTION);

        let log_filter =
            non_empty_var(CLOUDPUB_LOG).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            service_settings_path,
            default_slot,
            default_subscription,
            log_filter,
        })
    }

    /// Values used for service settings fields the settings file leaves unset
    pub fn service_defaults(&self) -> ServiceSettingsOverrides {
        ServiceSettingsOverrides {
            slot: self.default_slot,
            subscription: self.default_subscription.clone(),
            ..Default::default()
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
