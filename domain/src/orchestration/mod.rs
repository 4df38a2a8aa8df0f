//! Orchestration domain
//!
//! Entities and value objects for running one prompt across several
//! workers and tracking how each of them settles.

pub mod entities;
pub mod progress;
pub mod selection;
pub mod value_objects;
