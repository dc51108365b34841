// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of every environment variable cloudpub reads

// Service settings
pub const CLOUDPUB_SERVICE_SETTINGS: &str = "CLOUDPUB_SERVICE_SETTINGS";
pub const CLOUDPUB_SLOT: &str = "CLOUDPUB_SLOT";
pub const CLOUDPUB_SUBSCRIPTION: &str = "CLOUDPUB_SUBSCRIPTION";

// Logging
pub const CLOUDPUB_LOG: &str = "CLOUDPUB_LOG";
