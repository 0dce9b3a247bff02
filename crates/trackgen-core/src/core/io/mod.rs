//! Deck serialization.
//!
//! [`traits::DeckFormat`] is the narrow contract the emission facade talks to: hand over an
//! assembled machine, a deck name and a target directory, get back the files written.
//! [`gmad::GmadWriter`] implements it for the simulator's GMAD input language, and
//! [`cmake::CmakeRegistry`] registers written decks as CMake tests.

pub mod cmake;
pub mod gmad;
pub mod traits;
