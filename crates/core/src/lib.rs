//! Cap Table Core - Domain entities, calculator, and editing services.
//!
//! This crate models startup equity across a sequence of financing events.
//! It performs no I/O: callers hand in a state value and receive a freshly
//! calculated table of per-round ownership snapshots.

pub mod captable;
pub mod constants;
pub mod errors;
pub mod palette;

// Re-export common types from the cap table module
pub use captable::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
