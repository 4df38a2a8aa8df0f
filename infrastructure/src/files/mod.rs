//! Local file adapters
//!
//! - [`read_attachments`] - load `--attach` files as prompt attachments
//! - [`ReportWriter`] - save a finished report as markdown

mod attachments;
mod report_writer;

pub use attachments::read_attachments;
pub use report_writer::{ReportWriter, report_filename};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from local file adapters
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a UTF-8 text file")]
    NotText { path: PathBuf },

    #[error("Could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
