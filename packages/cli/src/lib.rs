// ABOUTME: Library side of the cloudpub binary
// ABOUTME: Command definitions, environment configuration and logging setup

pub mod commands;
pub mod config;
pub mod telemetry;
