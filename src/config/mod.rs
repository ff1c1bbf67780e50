// src/config/mod.rs

//! Configuration: the optional TOML file, its validation, and the merge
//! with command-line flags and environment into [`MonitorSettings`].

pub mod loader;
pub mod model;
pub mod settings;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_optional};
pub use model::{
    ConfigFile, MonitorConfig, MonitorSection, NotifyConfig, NotifySection, RawConfigFile,
};
pub use settings::{MonitorSettings, NotifySettings};
