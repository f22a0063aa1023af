//! Autos Domain Layer
//!
//! This crate holds the canonical shape every court data source is normalized
//! into, plus the trait boundary towards persistence. It performs no I/O and
//! knows nothing about the heterogeneous upstream formats.
//!
//! ## Key Concepts
//!
//! - **ProcessRecord**: the single normalized record for one judicial process
//! - **Party**: one entry of the claimant or respondent roster
//! - **Movement**: one event of the process timeline, in source order
//! - **ProcessSink**: where normalized records go once mapped
//!
//! ## Architecture
//!
//! - Pure data types only, serializable with serde
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod movement;
pub mod party;
pub mod process;
pub mod traits;

// Re-exports for convenience
pub use movement::Movement;
pub use party::{Party, PartySide, PersonKind};
pub use process::{ProcessId, ProcessRecord};
