//! # Core Module
//!
//! Stateless building blocks shared by the sweep engine.
//!
//! - **Kinematics** ([`kinematics`]) - Energy, momentum and magnetic rigidity relations
//! - **Element Model** ([`models`]) - Parameter values, beams, beamline elements and machines
//! - **Deck I/O** ([`io`]) - The serialization contract, the GMAD writer and the CMake test registry
//! - **Utilities** ([`utils`]) - Canonical number rendering used in names and decks

pub mod io;
pub mod kinematics;
pub mod models;
pub mod utils;
