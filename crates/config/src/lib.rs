//! Configuration loading and validation.
//!
//! Config files: `sedbot.toml`, `sedbot.yaml`, `sedbot.yml`, or `sedbot.json`
//! Searched in `./` then `~/.config/sedbot/`.
//!
//! Supports `${ENV_VAR}` substitution in all string values.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{config_dir, discover_and_load, find_config_file, load_config},
    schema::{IrcConfig, SedbotConfig},
    validate::{Diagnostic, Severity, ValidationResult, validate},
};
