//! Core data types.
//!
//! - [`record`]: parsed alignment records and strand derivation
//! - [`catalog`]: the reference catalog built from a stream's header block
//! - [`stats`]: per-library counter bundles exchanged with other stages

pub mod catalog;
pub mod record;
pub mod stats;
