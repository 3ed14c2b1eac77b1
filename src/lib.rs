//! subpreview renders a single still frame showing how a styled subtitle line will look once
//! burned onto video.
//!
//! # Pipeline overview
//!
//! 1. **Script**: `StyleBlock + PreviewText -> ScriptDocument`, written to the cache directory
//! 2. **Background**: a caller image, or a solid black default synthesized once and reused
//! 3. **Rasterize**: the system `ffmpeg` burns the script onto the background, emitting one frame
//!
//! Artifact locations come from [`PreviewPaths`]. The defaults mirror a single shared slot
//! (`preview.ass` / `preview.png`), so concurrent callers should use distinct stems.
//!
//! Rasterization failures are returned as [`ToolOutcome`] values inside [`PreviewReport`];
//! filesystem failures and a missing default background are [`PreviewError`]s.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod background;
mod foundation;
mod preview;
mod raster;
mod script;

pub use background::resolve::{
    BackgroundSource, DEFAULT_BACKGROUND_COLOR, ResolvedBackground, resolve_background,
};
pub use foundation::error::{PreviewError, PreviewResult};
pub use foundation::paths::{CACHE_DIR_ENV, PreviewPaths, RESOURCE_DIR_ENV};
pub use preview::render::{PreviewRenderer, PreviewReport, render_preview};
pub use preview::request::{PreviewRequest, SAMPLE_STYLE};
pub use raster::ffmpeg::{
    DEFAULT_BACKGROUND_SIZE, FfmpegRasterizer, Invocation, Rasterizer, ToolFailure, ToolOutcome,
    ensure_parent_dir, escape_filter_path, is_ffmpeg_on_path,
};
pub use script::model::{
    DEFAULT_STYLE, DialogueLine, EVENT_FORMAT, PREVIEW_WINDOW, PreviewText, SECONDARY_STYLE,
    ScriptDocument, ScriptHeader, StyleBlock, Timestamp,
};
pub use script::writer::{build_document, write_document};
