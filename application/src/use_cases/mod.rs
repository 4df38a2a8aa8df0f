//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod deadline;
pub mod fan_out;
pub mod run_judge;
