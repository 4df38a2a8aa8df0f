//! Progress reporters for the worker and judge phases

pub mod reporter;
