//! Core domain concepts shared across all subdomains.
//!
//! - [`model::ModelRegistry`] - the models that can act as worker or judge
//! - [`prompt::Prompt`] - a validated user prompt with its attachments
//! - [`error::SelectionError`] - rejections raised before any network call

pub mod error;
pub mod model;
pub mod prompt;
pub mod string;
