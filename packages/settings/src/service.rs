// ABOUTME: Cloud service settings record and its JSON file loader
// ABOUTME: Slot parsing, default handling and command-line overrides

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ServiceSettingsError {
    #[error("Invalid deployment slot: {0}. Must be 'Production' or 'Staging'")]
    InvalidSlot(String),

    #[error("Failed to read service settings from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse service settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Deployment environment of a cloud service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeploymentSlot {
    #[default]
    Production,
    Staging,
}

impl DeploymentSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentSlot::Production => "Production",
            DeploymentSlot::Staging => "Staging",
        }
    }
}

impl fmt::Display for DeploymentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentSlot {
    type Err = ServiceSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" => Ok(DeploymentSlot::Production),
            "staging" => Ok(DeploymentSlot::Staging),
            _ => Err(ServiceSettingsError::InvalidSlot(s.to_string())),
        }
    }
}

impl TryFrom<String> for DeploymentSlot {
    type Error = ServiceSettingsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeploymentSlot> for String {
    fn from(slot: DeploymentSlot) -> Self {
        slot.as_str().to_string()
    }
}

/// Settings describing a cloud service, as stored in `ServiceSettings.json`.
///
/// Every field is optional on disk. An unset slot means `Production`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ServiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot: Option<DeploymentSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affinity_group: Option<String>,
}

/// Optional values layered over loaded service settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSettingsOverrides {
    pub slot: Option<DeploymentSlot>,
    pub location: Option<String>,
    pub subscription: Option<String>,
    pub storage_account_name: Option<String>,
    pub affinity_group: Option<String>,
}

impl ServiceSettings {
    /// Read service settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ServiceSettingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ServiceSettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: ServiceSettings =
            serde_json::from_str(&contents).map_err(|source| ServiceSettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %path.display(),
            slot = %settings.slot(),
            "Loaded service settings"
        );
        Ok(settings)
    }

    /// Like [`ServiceSettings::load`], but a missing file yields the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ServiceSettingsError> {
        match Self::load(path) {
            Err(ServiceSettingsError::Io { path, source })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                warn!(
                    path = %path.display(),
                    "Service settings file not found, using defaults"
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Effective deployment slot
    pub fn slot(&self) -> DeploymentSlot {
        self.slot.unwrap_or_default()
    }

    pub fn subscription(&self) -> Option<&str> {
        self.subscription.as_deref()
    }

    /// Replace every field the overrides set. Empty strings count as unset.
    pub fn apply(self, overrides: ServiceSettingsOverrides) -> Self {
        ServiceSettings {
            slot: overrides.slot.or(self.slot),
            location: non_empty(overrides.location).or(self.location),
            subscription: non_empty(overrides.subscription).or(self.subscription),
            storage_account_name: non_empty(overrides.storage_account_name)
                .or(self.storage_account_name),
            affinity_group: non_empty(overrides.affinity_group).or(self.affinity_group),
        }
    }

    /// Fill only the fields still unset, keeping everything already present
    pub fn fill_unset(self, defaults: ServiceSettingsOverrides) -> Self {
        ServiceSettings {
            slot: self.slot.or(defaults.slot),
            location: self.location.or(non_empty(defaults.location)),
            subscription: self.subscription.or(non_empty(defaults.subscription)),
            storage_account_name: self
                .storage_account_name
                .or(non_empty(defaults.storage_account_name)),
            affinity_group: self.affinity_group.or(non_empty(defaults.affinity_group)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_settings(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[rstest]
    #[case("Production", DeploymentSlot::Production)]
    #[case("production", DeploymentSlot::Production)]
    #[case("STAGING", DeploymentSlot::Staging)]
    #[case("Staging", DeploymentSlot::Staging)]
    fn test_parse_slot(#[case] input: &str, #[case] expected: DeploymentSlot) {
        assert_eq!(input.parse::<DeploymentSlot>().unwrap(), expected);
    }

    #[test]
    fn test_parse_slot_invalid() {
        let err = "preview".parse::<DeploymentSlot>().unwrap_err();
        assert!(matches!(err, ServiceSettingsError::InvalidSlot(ref s) if s == "preview"));
    }

    #[test]
    fn test_default_settings() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.slot(), DeploymentSlot::Production);
        assert_eq!(settings.subscription(), None);
    }

    #[test]
    fn test_load_full_settings() {
        let file = write_settings(
            r#"{
                "Slot": "staging",
                "Location": "West US",
                "Subscription": "TestSubscription2",
                "StorageAccountName": "mystorage",
                "AffinityGroup": "group1"
            }"#,
        );

        let settings = ServiceSettings::load(file.path()).unwrap();

        assert_eq!(
            settings,
            ServiceSettings {
                slot: Some(DeploymentSlot::Staging),
                location: Some("West US".to_string()),
                subscription: Some("TestSubscription2".to_string()),
                storage_account_name: Some("mystorage".to_string()),
                affinity_group: Some("group1".to_string()),
            }
        );
    }

    #[test]
    fn test_load_partial_settings_uses_defaults() {
        let file = write_settings(r#"{ "Subscription": "sub" }"#);

        let settings = ServiceSettings::load(file.path()).unwrap();

        assert_eq!(settings.slot(), DeploymentSlot::Production);
        assert_eq!(settings.subscription(), Some("sub"));
        assert_eq!(settings.location, None);
    }

    #[test]
    fn test_load_invalid_slot_is_parse_error() {
        let file = write_settings(r#"{ "Slot": "Preview" }"#);

        let err = ServiceSettings::load(file.path()).unwrap_err();

        assert!(matches!(err, ServiceSettingsError::Parse { .. }));
        assert!(err.to_string().contains("Preview"));
    }

    #[test]
    fn test_load_malformed_json() {
        let file = write_settings("{ not json");

        let err = ServiceSettings::load(file.path()).unwrap_err();

        assert!(matches!(err, ServiceSettingsError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ServiceSettings.json");

        let err = ServiceSettings::load(&path).unwrap_err();
        assert!(matches!(err, ServiceSettingsError::Io { .. }));

        let settings = ServiceSettings::load_or_default(&path).unwrap();
        assert_eq!(settings, ServiceSettings::default());
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let file = write_settings("42");

        let result = ServiceSettings::load_or_default(file.path());

        assert!(matches!(result, Err(ServiceSettingsError::Parse { .. })));
    }

    #[test]
    fn test_serialize_skips_unset_fields() {
        let settings = ServiceSettings {
            slot: Some(DeploymentSlot::Staging),
            subscription: Some("sub".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "Slot": "Staging", "Subscription": "sub" })
        );
    }

    #[test]
    fn test_apply_overrides() {
        let settings = ServiceSettings {
            slot: Some(DeploymentSlot::Production),
            location: Some("West US".to_string()),
            subscription: Some("file-sub".to_string()),
            ..Default::default()
        };

        let merged = settings.apply(ServiceSettingsOverrides {
            slot: Some(DeploymentSlot::Staging),
            subscription: Some("flag-sub".to_string()),
            location: Some(String::new()),
            affinity_group: Some("group".to_string()),
            ..Default::default()
        });

        assert_eq!(merged.slot(), DeploymentSlot::Staging);
        assert_eq!(merged.subscription(), Some("flag-sub"));
        assert_eq!(merged.location.as_deref(), Some("West US"));
        assert_eq!(merged.affinity_group.as_deref(), Some("group"));
        assert_eq!(merged.storage_account_name, None);
    }

    #[test]
    fn test_fill_unset_keeps_existing_values() {
        let settings = ServiceSettings {
            subscription: Some("file-sub".to_string()),
            ..Default::default()
        };

        let filled = settings.fill_unset(ServiceSettingsOverrides {
            slot: Some(DeploymentSlot::Staging),
            subscription: Some("env-sub".to_string()),
            ..Default::default()
        });

        assert_eq!(filled.slot, Some(DeploymentSlot::Staging));
        assert_eq!(filled.subscription(), Some("file-sub"));
    }
}
