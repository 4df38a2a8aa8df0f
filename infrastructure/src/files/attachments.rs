//! Attachment loading for `--attach`.

use super::FileError;
use godel_domain::Attachment;
use std::path::Path;
use tracing::debug;

/// Read every path as a UTF-8 text attachment, named by its file name.
///
/// Fails on the first unreadable or non-text file so that a submission is
/// never sent with a silently missing attachment.
pub fn read_attachments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Attachment>, FileError> {
    paths.iter().map(|p| read_one(p.as_ref())).collect()
}

fn read_one(path: &Path) -> Result<Attachment, FileError> {
    let bytes = std::fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|_| FileError::NotText {
        path: path.to_path_buf(),
    })?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!("Attached {} ({} bytes)", name, content.len());

    Ok(Attachment::new(name, content))
}
