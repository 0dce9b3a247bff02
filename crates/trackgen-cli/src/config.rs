//! Layered configuration: a TOML spec file, built-in defaults and command-line overrides,
//! merged into the core `TestSpec` and `OutputConfig`.

mod builder;
mod defaults;
mod file;

pub use builder::{RunConfig, build_run_config};
