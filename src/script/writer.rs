use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{PreviewError, PreviewResult};
use crate::foundation::paths::PreviewPaths;
use crate::script::model::{PreviewText, ScriptDocument, StyleBlock};

/// Write the preview script for `text` to [`PreviewPaths::document_path`].
///
/// Any previous script at that path is replaced as a whole; the returned path always refers to a
/// complete document.
pub fn build_document(
    paths: &PreviewPaths,
    styles: &StyleBlock,
    text: &PreviewText,
) -> PreviewResult<PathBuf> {
    let doc = ScriptDocument::for_preview(styles, text);
    let out = paths.document_path();
    write_document(&doc, &out)?;
    tracing::debug!(
        path = %out.display(),
        rows = doc.events.len(),
        "wrote preview script"
    );
    Ok(out)
}

/// Atomically write `doc` to `out`, creating parent directories as needed.
pub fn write_document(doc: &ScriptDocument, out: &Path) -> PreviewResult<()> {
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create script directory '{}'", dir.display()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".subpreview-")
        .suffix(".ass.tmp")
        .tempfile_in(dir)
        .with_context(|| format!("failed to create temporary script in '{}'", dir.display()))?;
    tmp.write_all(doc.to_script_string().as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("failed to write script for '{}'", out.display()))?;

    tmp.persist(out).map_err(|e| {
        PreviewError::io(format!(
            "failed to move script into place at '{}': {}",
            out.display(),
            e.error
        ))
    })?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/script/writer.rs"]
mod tests;
