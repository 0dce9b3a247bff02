//! # Engine Module
//!
//! The sweep machinery that turns a typed test specification into a stream of named test
//! machines and hands each one to a deck writer.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Typed per-family parameter records, `TestSpec`, `OutputConfig`
//! - **Sweeps** ([`sweep`]) - One sweep routine per component family over its parameter grid
//! - **Naming** ([`naming`]) - Canonical deck names built from parameter tokens
//! - **Sharding** ([`shard`]) - Splitting large sweeps into numbered subdirectories
//! - **Emission** ([`emit`]) - The write facade and its explicit `WriteContext`
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! All state is explicit: the only value carried from one write to the next is the
//! `WriteContext` returned by each emission, and it starts afresh for every invocation.

pub mod config;
pub mod emit;
pub mod error;
pub mod naming;
pub mod progress;
pub mod shard;
pub mod sweep;
