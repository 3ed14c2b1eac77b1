use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::foundation::error::PreviewResult;

/// Resolution of the synthesized fallback background.
pub const DEFAULT_BACKGROUND_SIZE: (u32, u32) = (1920, 1080);

/// One call to the external rasterization tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments passed to the tool, not including the program name.
    pub args: Vec<OsString>,
    /// The single image file this invocation is expected to produce.
    pub output: PathBuf,
}

impl Invocation {
    /// Produce a one-frame solid-color image of `width`x`height` at `out`.
    pub fn solid_background(out: &Path, width: u32, height: u32, color: &str) -> Self {
        let source = format!("color=c={color}:s={width}x{height}");
        let mut args = common_args();
        args.extend(["-f", "lavfi", "-i", source.as_str(), "-frames:v", "1"].map(OsString::from));
        args.push(out.as_os_str().to_owned());
        Self {
            args,
            output: out.to_path_buf(),
        }
    }

    /// Burn the script at `document` onto `background` and write exactly one frame to `out`.
    pub fn composite_subtitles(background: &Path, document: &Path, out: &Path) -> Self {
        let mut args = common_args();
        args.push("-i".into());
        args.push(background.as_os_str().to_owned());
        args.push("-vf".into());
        args.push(format!("ass={}", escape_filter_path(document)).into());
        args.extend(["-frames:v", "1"].map(OsString::from));
        args.push(out.as_os_str().to_owned());
        Self {
            args,
            output: out.to_path_buf(),
        }
    }
}

// `-y` so a stale output never turns into an "already exists" prompt.
fn common_args() -> Vec<OsString> {
    ["-y", "-loglevel", "error"].map(OsString::from).to_vec()
}

/// Diagnostic captured from a failed tool run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolFailure {
    /// Exit code, or `None` when the tool could not be started or was killed by a signal.
    pub status: Option<i32>,
    /// Captured standard error (or the spawn error message).
    pub stderr: String,
}

impl std::fmt::Display for ToolFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(code) => write!(f, "exited with status {code}")?,
            None => write!(f, "did not run to completion")?,
        }
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            write!(f, ": {stderr}")?;
        }
        Ok(())
    }
}

/// Result of a tool run. Failures are values, not errors: callers decide whether they are fatal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolOutcome {
    /// The tool exited successfully and its output file is non-empty.
    Succeeded,
    /// The tool failed, or succeeded without producing its output.
    Failed(ToolFailure),
}

impl ToolOutcome {
    /// `true` for [`ToolOutcome::Succeeded`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// The failure diagnostic, if any.
    pub fn failure(&self) -> Option<&ToolFailure> {
        match self {
            Self::Succeeded => None,
            Self::Failed(f) => Some(f),
        }
    }

    /// Classify a finished run by exit status and by whether `output` now holds data.
    pub fn from_exit(success: bool, code: Option<i32>, stderr: &[u8], output: &Path) -> Self {
        let stderr = String::from_utf8_lossy(stderr).into_owned();
        if !success {
            return Self::Failed(ToolFailure {
                status: code,
                stderr,
            });
        }
        if !is_nonempty_file(output) {
            return Self::Failed(ToolFailure {
                status: code,
                stderr: format!(
                    "tool reported success but '{}' was not written{}{}",
                    output.display(),
                    if stderr.trim().is_empty() { "" } else { "; " },
                    stderr.trim()
                ),
            });
        }
        Self::Succeeded
    }
}

fn is_nonempty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// Seam over the external rasterization tool.
///
/// Runs are blocking and have no timeout.
pub trait Rasterizer {
    /// Execute `invocation`, reporting failure as a [`ToolOutcome`] rather than an error.
    fn run(&self, invocation: &Invocation) -> ToolOutcome;
}

/// [`Rasterizer`] backed by the system `ffmpeg` binary.
#[derive(Clone, Debug)]
pub struct FfmpegRasterizer {
    program: PathBuf,
}

impl Default for FfmpegRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegRasterizer {
    /// Use `ffmpeg` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("ffmpeg")
    }

    /// Use a specific `ffmpeg` executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Rasterizer for FfmpegRasterizer {
    fn run(&self, invocation: &Invocation) -> ToolOutcome {
        tracing::debug!(
            program = %self.program.display(),
            args = ?invocation.args,
            "running rasterizer"
        );

        // We intentionally use the system `ffmpeg` binary rather than linking libav.
        let output = Command::new(&self.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let outcome = match output {
            Ok(out) => ToolOutcome::from_exit(
                out.status.success(),
                out.status.code(),
                &out.stderr,
                &invocation.output,
            ),
            Err(e) => ToolOutcome::Failed(ToolFailure {
                status: None,
                stderr: format!(
                    "failed to spawn '{}' (is it installed and on PATH?): {e}",
                    self.program.display()
                ),
            }),
        };

        if let ToolOutcome::Failed(failure) = &outcome {
            tracing::warn!(
                program = %self.program.display(),
                output = %invocation.output.display(),
                "rasterizer {failure}"
            );
        }
        outcome
    }
}

/// Rewrite a path for use inside an ffmpeg filter argument.
///
/// Backslashes become `/`, and every `:` becomes `\\:` so that both the filtergraph and the
/// filter option parser unescape it back to a literal colon.
pub fn escape_filter_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .replace(':', r"\\:")
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PreviewResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/ffmpeg.rs"]
mod tests;
