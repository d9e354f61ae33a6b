//! LaserSketch Settings Crate
//!
//! Handles application configuration: import normalization, bounds sampling
//! and artboard size, loaded from TOML or JSON.

pub mod config;
pub mod error;

pub use config::{ArtboardSettings, BoundsSettings, Config, ImportSettings};
pub use error::{SettingsError, SettingsResult};
