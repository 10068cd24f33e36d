//! ZoneKit Settings Crate
//!
//! Handles editor configuration and settings persistence.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    AppearanceDefaults, Config, EditorSettings, LayoutDefaults, SnappingSettings,
};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
