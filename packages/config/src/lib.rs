// ABOUTME: Configuration names and defaults shared across cloudpub packages
// ABOUTME: Keeps environment variable names and fallback values in one place

pub mod constants;

/// Service settings file used when `CLOUDPUB_SERVICE_SETTINGS` is unset
pub const DEFAULT_SERVICE_SETTINGS_PATH: &str = "ServiceSettings.json";

/// Tracing filter used when `CLOUDPUB_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
