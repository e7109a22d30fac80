//! Configuration loading
//!
//! Loads client configuration from the environment (including `.env`) and
//! from JSON or TOML files.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
