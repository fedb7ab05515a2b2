use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Write `value` as JSON to `path`, creating or truncating the file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or serialization fails.
pub(crate) fn save_as_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> anyhow::Result<()> {
    tracing::debug!(path = %path.display(), "saving json");
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(())
}
