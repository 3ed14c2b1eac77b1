use std::path::PathBuf;

use crate::foundation::error::{PreviewError, PreviewResult};

/// Environment variable overriding the cache directory.
pub const CACHE_DIR_ENV: &str = "SUBPREVIEW_CACHE_DIR";
/// Environment variable overriding the resource directory.
pub const RESOURCE_DIR_ENV: &str = "SUBPREVIEW_RESOURCE_DIR";

const DEFAULT_FILE_STEM: &str = "preview";
const DEFAULT_BACKGROUND_REL: [&str; 2] = ["assets", "default_bg.png"];

/// Locations of every artifact the preview pipeline reads or writes.
///
/// The default stem reproduces the single shared slot layout:
/// `<cache>/preview.ass`, `<cache>/preview.png` and `<resource>/assets/default_bg.png`.
/// Callers that render concurrently should give each request its own stem (or cache dir), since
/// nothing here locks the files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewPaths {
    /// Directory holding the generated script and the rendered frame.
    pub cache_dir: PathBuf,
    /// Directory holding long-lived assets such as the default background.
    pub resource_dir: PathBuf,
    file_stem: String,
}

impl PreviewPaths {
    /// Paths rooted at `cache_dir` and `resource_dir` with the default `preview` stem.
    pub fn new(cache_dir: impl Into<PathBuf>, resource_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            resource_dir: resource_dir.into(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }

    /// Read directory locations from [`CACHE_DIR_ENV`] / [`RESOURCE_DIR_ENV`].
    ///
    /// Unset variables fall back to `./cache` and `./resource`.
    pub fn from_env() -> Self {
        let cache = std::env::var_os(CACHE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("cache"));
        let resource = std::env::var_os(RESOURCE_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("resource"));
        Self::new(cache, resource)
    }

    /// Use `stem` for the script and image file names instead of `preview`.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> PreviewResult<Self> {
        let stem = stem.into();
        validate_stem(&stem)?;
        self.file_stem = stem;
        Ok(self)
    }

    /// File stem shared by the script and image artifacts.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Where the generated subtitle script is written.
    pub fn document_path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.ass", self.file_stem))
    }

    /// Where the rendered preview frame is written.
    pub fn image_path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.png", self.file_stem))
    }

    /// Where the lazily synthesized fallback background lives.
    pub fn default_background_path(&self) -> PathBuf {
        DEFAULT_BACKGROUND_REL
            .iter()
            .fold(self.resource_dir.clone(), |acc, part| acc.join(part))
    }
}

fn validate_stem(stem: &str) -> PreviewResult<()> {
    if stem.trim().is_empty() {
        return Err(PreviewError::validation("file stem must be non-empty"));
    }
    if stem.contains(['/', '\\']) {
        return Err(PreviewError::validation(
            "file stem must not contain path separators",
        ));
    }
    if stem == "." || stem == ".." {
        return Err(PreviewError::validation(
            "file stem must not be a relative path component",
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/paths.rs"]
mod tests;
