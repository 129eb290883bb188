//! Configuration loading and validation.
//!
//! Config files: `mtsend.toml`, `mtsend.yaml`, `mtsend.yml` or `mtsend.json`,
//! searched in `./` then the user config directory.
//!
//! Supports `${ENV_VAR}` substitution in the raw file text.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::{config_dir, discover_and_load, find_config_file, load_config, parse_config},
    schema::{MtsendConfig, SendConfig, UploadConfig},
    validate::{Problem, validate},
};
