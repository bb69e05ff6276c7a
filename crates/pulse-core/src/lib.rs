//! Shared configuration for the pulse workspace.
//!
//! Loads [`AppConfig`] from environment variables (every knob has a default)
//! and carries the [`AnalysisPolicy`] blend weights used by the analysis
//! pipeline.

pub mod app_config;
pub mod config;

pub use app_config::{AnalysisPolicy, AppConfig};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
