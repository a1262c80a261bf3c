//! CSV output for extracted rows.

use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A row with a fixed, ordered set of named fields.
pub trait Record {
    const HEADERS: &'static [&'static str];

    /// Field values in `HEADERS` order.
    fn fields(&self) -> Vec<&str>;
}

/// Write a header row plus one row per record, replacing any existing file.
///
/// The header is written even when `rows` is empty. Content goes to a sibling
/// temp file first and is renamed into place once complete.
pub fn write_records<R: Record>(path: &Path, rows: &[R]) -> Result<()> {
    replace_file(path, |tmp_path| {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .from_path(tmp_path)
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        writer.write_record(R::HEADERS)?;
        for row in rows {
            let fields = row.fields();
            if fields.len() != R::HEADERS.len() {
                bail!(
                    "record has {} fields, expected {}",
                    fields.len(),
                    R::HEADERS.len()
                );
            }
            writer.write_record(&fields)?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        Ok(())
    })
}

/// Fill `<path>.tmp` with `write`, then rename it over `path`.
///
/// The temp file is removed when either step fails, leaving `path` as it was.
pub fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> Result<()>,
{
    ensure_parent_dir(path)?;
    let tmp_path = temp_path(path);
    let result = write(&tmp_path).and_then(|()| {
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to finalize {}", path.display()))
    });
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// `<path>.tmp`, next to the destination so the final rename stays on one filesystem.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
