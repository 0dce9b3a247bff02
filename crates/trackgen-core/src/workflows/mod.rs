//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow takes a typed [`TestSpec`] and an
//! [`OutputConfig`], resolves how many decks the sweep declares, and either writes them
//! ([`write`]) or lists where they would go ([`plan`]).
//!
//! ## Key Capabilities
//!
//! - **Deck generation** for every combination of a component's parameter lists
//! - **Directory sharding** for sweeps larger than the shard size
//! - **Progress monitoring** through the engine's `ProgressReporter`
//! - **Test registration** of written decks in `CMakeLists.txt` files
//!
//! [`TestSpec`]: crate::engine::config::TestSpec
//! [`OutputConfig`]: crate::engine::config::OutputConfig

pub mod plan;
pub mod write;
