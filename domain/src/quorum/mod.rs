//! Quorum domain
//!
//! Decides whether enough workers answered for the judge to proceed.

mod gate;

pub use gate::{QuorumGate, QuorumVerdict};
