// Core modules
pub mod api;
pub mod chart;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod models;
pub mod notify;
pub mod registry;

// Re-export commonly used types
pub use config::Config;
pub use engine::PollingEngine;
pub use error::{BotError, Result};
pub use models::*;
pub use registry::TrackedAssetRegistry;
