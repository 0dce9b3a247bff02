//! # trackgen Core Library
//!
//! Generates batches of beamline input decks (GMAD files) used as regression tests for a
//! particle-tracking simulator. Each accelerator component family is swept over the
//! Cartesian product of its parameter lists, and every combination becomes one deck on
//! disk under a directory keyed by the component type.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless pieces: relativistic kinematics, the element
//!   and machine model, canonical number rendering and the deck writers.
//!
//! - **[`engine`]: The Sweep Machinery.** Typed test specifications, one sweep routine per
//!   component family, deck naming, directory sharding and the emission facade that threads
//!   an explicit `WriteContext` through every write.
//!
//! - **[`workflows`]: The Public API.** `write_tests` writes every deck a specification
//!   describes; `plan_tests` lists them without touching the filesystem.

pub mod core;
pub mod engine;
pub mod workflows;
