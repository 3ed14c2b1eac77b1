use std::path::{Path, PathBuf};

use crate::background::resolve::{ResolvedBackground, resolve_background};
use crate::foundation::error::{PreviewError, PreviewResult};
use crate::foundation::paths::PreviewPaths;
use crate::raster::ffmpeg::{
    FfmpegRasterizer, Invocation, Rasterizer, ToolOutcome, ensure_parent_dir,
};
use crate::script::model::{PreviewText, StyleBlock};
use crate::script::writer::build_document;

/// Everything a preview run touched, plus whether the final frame was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewReport {
    /// The script that was rendered.
    pub document_path: PathBuf,
    /// The background the script was burned onto.
    pub background: ResolvedBackground,
    /// Where the frame was (or would have been) written.
    pub image_path: PathBuf,
    /// Result of the final rasterization step.
    pub outcome: ToolOutcome,
}

impl PreviewReport {
    /// `true` when the preview image was written by this run.
    pub fn succeeded(&self) -> bool {
        self.outcome.is_success()
    }

    /// The preview image, or the rasterizer's diagnostic when rendering failed.
    pub fn image_path(&self) -> PreviewResult<&Path> {
        match &self.outcome {
            ToolOutcome::Succeeded => Ok(&self.image_path),
            ToolOutcome::Failed(failure) => Err(PreviewError::rasterize(format!(
                "failed to render preview '{}': {failure}",
                self.image_path.display()
            ))),
        }
    }

    /// Owned variant of [`PreviewReport::image_path`].
    pub fn into_image_path(self) -> PreviewResult<PathBuf> {
        self.image_path()?;
        Ok(self.image_path)
    }
}

/// Render one preview frame of `text` styled by `styles` over `background`.
///
/// Filesystem problems and a failed default-background synthesis are errors. A failed final
/// render is reported through [`PreviewReport::outcome`]; the image path is then guaranteed not
/// to hold a previous run's frame.
#[tracing::instrument(skip_all, fields(stem = paths.file_stem()))]
pub fn render_preview(
    paths: &PreviewPaths,
    styles: &StyleBlock,
    text: &PreviewText,
    background: Option<&Path>,
    rasterizer: &dyn Rasterizer,
) -> PreviewResult<PreviewReport> {
    let document_path = build_document(paths, styles, text)?;
    let background = resolve_background(paths, background, rasterizer)?;

    let image_path = paths.image_path();
    ensure_parent_dir(&image_path)?;
    remove_stale(&image_path)?;

    let invocation = Invocation::composite_subtitles(&background.path, &document_path, &image_path);
    let outcome = rasterizer.run(&invocation);
    match &outcome {
        ToolOutcome::Succeeded => {
            tracing::debug!(path = %image_path.display(), "rendered preview");
        }
        ToolOutcome::Failed(failure) => {
            tracing::debug!(path = %image_path.display(), "preview render failed: {failure}");
        }
    }

    Ok(PreviewReport {
        document_path,
        background,
        image_path,
        outcome,
    })
}

fn remove_stale(path: &Path) -> PreviewResult<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!(
                "failed to remove previous preview '{}'",
                path.display()
            ))
            .into()),
    }
}

/// Preview pipeline bound to one set of paths and one rasterizer.
pub struct PreviewRenderer<R = FfmpegRasterizer> {
    paths: PreviewPaths,
    rasterizer: R,
}

impl PreviewRenderer<FfmpegRasterizer> {
    /// Renderer using the system `ffmpeg`.
    pub fn new(paths: PreviewPaths) -> Self {
        Self::with_rasterizer(paths, FfmpegRasterizer::new())
    }
}

impl<R: Rasterizer> PreviewRenderer<R> {
    /// Renderer using a custom rasterizer.
    pub fn with_rasterizer(paths: PreviewPaths, rasterizer: R) -> Self {
        Self { paths, rasterizer }
    }

    /// Configured artifact locations.
    pub fn paths(&self) -> &PreviewPaths {
        &self.paths
    }

    /// The underlying rasterizer.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// See [`render_preview`].
    pub fn render(
        &self,
        styles: &StyleBlock,
        text: &PreviewText,
        background: Option<&Path>,
    ) -> PreviewResult<PreviewReport> {
        render_preview(&self.paths, styles, text, background, &self.rasterizer)
    }

    /// See [`build_document`].
    pub fn write_script(&self, styles: &StyleBlock, text: &PreviewText) -> PreviewResult<PathBuf> {
        build_document(&self.paths, styles, text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/render.rs"]
mod tests;
