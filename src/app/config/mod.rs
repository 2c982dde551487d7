//! Host configuration loading.
//!
//! Pure parsing and validation live in `domain::config`.

mod load_config;

pub use load_config::{ConfigSource, load_config, load_from, resolve_config_source};
