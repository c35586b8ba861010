//! Parley configuration system.
//!
//! TOML-based configuration with `serde(default)` throughout, so partial
//! configs work out of the box. Secrets never live in the config file; they
//! come from the environment (with `.env` support) and are checked against
//! the enabled feature toggles at startup.

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{load_dotenv, Credentials};
pub use schema::ParleyConfig;
pub use validation::{validate, validate_credentials};

use std::path::Path;

use parley_common::ConfigError;

/// Load config from an explicit path, or the platform default when `None`.
///
/// The default path gets a commented default file created on first run.
pub fn load_config(path_override: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    match path_override {
        Some(path) => toml_loader::load_from_path(path),
        None => toml_loader::load_default(),
    }
}
