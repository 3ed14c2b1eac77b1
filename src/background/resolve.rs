use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{PreviewError, PreviewResult};
use crate::foundation::paths::PreviewPaths;
use crate::raster::ffmpeg::{
    DEFAULT_BACKGROUND_SIZE, Invocation, Rasterizer, ToolOutcome, ensure_parent_dir,
};

/// Fill color of the synthesized fallback background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "black";

/// Where a resolved background came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundSource {
    /// The caller's own image, used as-is.
    Supplied,
    /// The fallback image, already present from an earlier call.
    CachedDefault,
    /// The fallback image, synthesized by this call.
    SynthesizedDefault,
}

/// An image path that is known to exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedBackground {
    /// Existing regular file to render against.
    pub path: PathBuf,
    /// How `path` was obtained.
    pub source: BackgroundSource,
}

/// Pick the image to render against.
///
/// A `candidate` that is an existing regular file is returned unchanged. Anything else falls back
/// to [`PreviewPaths::default_background_path`], which is synthesized with `rasterizer` the first
/// time it is needed and reused afterwards. A failed synthesis is an error; this never hands back
/// a path to a missing file.
pub fn resolve_background(
    paths: &PreviewPaths,
    candidate: Option<&Path>,
    rasterizer: &dyn Rasterizer,
) -> PreviewResult<ResolvedBackground> {
    if let Some(candidate) = candidate
        && candidate.is_file()
    {
        tracing::debug!(path = %candidate.display(), "using supplied background");
        return Ok(ResolvedBackground {
            path: candidate.to_path_buf(),
            source: BackgroundSource::Supplied,
        });
    }

    if let Some(candidate) = candidate {
        tracing::debug!(
            path = %candidate.display(),
            "background is not a regular file; falling back to default"
        );
    }

    let default = paths.default_background_path();
    if default.is_file() {
        return Ok(ResolvedBackground {
            path: default,
            source: BackgroundSource::CachedDefault,
        });
    }

    synthesize_default(&default, rasterizer)?;
    Ok(ResolvedBackground {
        path: default,
        source: BackgroundSource::SynthesizedDefault,
    })
}

fn synthesize_default(out: &Path, rasterizer: &dyn Rasterizer) -> PreviewResult<()> {
    ensure_parent_dir(out)?;
    let dir = match out.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // The default path only ever receives a completed render. `.png` selects ffmpeg's muxer.
    let staging = tempfile::Builder::new()
        .prefix(".subpreview-bg-")
        .suffix(".png")
        .tempfile_in(dir)
        .with_context(|| format!("failed to create staging file in '{}'", dir.display()))?
        .into_temp_path();

    let (width, height) = DEFAULT_BACKGROUND_SIZE;
    tracing::info!(
        path = %out.display(),
        width,
        height,
        "synthesizing default background"
    );
    let invocation =
        Invocation::solid_background(&staging, width, height, DEFAULT_BACKGROUND_COLOR);

    match rasterizer.run(&invocation) {
        ToolOutcome::Succeeded => staging.persist(out).map_err(|e| {
            PreviewError::io(format!(
                "failed to move default background into place at '{}': {}",
                out.display(),
                e.error
            ))
        }),
        ToolOutcome::Failed(failure) => Err(PreviewError::rasterize(format!(
            "failed to synthesize default background '{}': {failure}",
            out.display()
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/resolve.rs"]
mod tests;
