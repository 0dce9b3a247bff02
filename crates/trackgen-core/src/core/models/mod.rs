//! In-memory beamline model.
//!
//! A [`machine::Machine`] is an ordered list of [`element::Element`]s plus a sampler
//! placement and an attached [`beam::Beam`]. Sweeps only append to a machine; the emission
//! facade only rewrites the beam's distribution-file reference before handing it to a
//! deck writer.

pub mod beam;
pub mod element;
pub mod machine;
pub mod value;
