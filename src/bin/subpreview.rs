use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "subpreview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a preview frame as a PNG (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Write the preview subtitle script only.
    Script(ScriptArgs),
    /// Check that the external tools are available.
    Doctor,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// JSON preview request (`style`, `original`, `translation`, `background`).
    #[arg(long, conflicts_with_all = ["text", "translation", "style"])]
    request: Option<PathBuf>,

    /// Original subtitle line.
    #[arg(long, required_unless_present = "request")]
    text: Option<String>,

    /// Translated subtitle line, drawn with the `Secondary` style.
    #[arg(long)]
    translation: Option<String>,

    /// File holding a `[V4+ Styles]` table. Defaults to the bundled sample style.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Directory for the generated script and frame. Overrides `SUBPREVIEW_CACHE_DIR`.
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Directory for the cached default background. Overrides `SUBPREVIEW_RESOURCE_DIR`.
    #[arg(long)]
    resource_dir: Option<PathBuf>,

    /// File stem for the script and frame (default `preview`).
    #[arg(long)]
    stem: Option<String>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Background image. Missing or non-file paths fall back to the default background.
    #[arg(long)]
    background: Option<PathBuf>,

    /// `ffmpeg` executable to run.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    #[command(flatten)]
    input: InputArgs,
}

struct Resolved {
    paths: subpreview::PreviewPaths,
    styles: subpreview::StyleBlock,
    text: subpreview::PreviewText,
    background: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subpreview=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Script(args) => cmd_script(args),
        Command::Doctor => cmd_doctor(),
    }
}

fn resolve_input(input: InputArgs) -> anyhow::Result<Resolved> {
    let mut paths = subpreview::PreviewPaths::from_env();
    if let Some(dir) = input.cache_dir {
        paths.cache_dir = dir;
    }
    if let Some(dir) = input.resource_dir {
        paths.resource_dir = dir;
    }
    if let Some(stem) = input.stem {
        paths = paths.with_file_stem(stem)?;
    }

    if let Some(req_path) = input.request {
        let req = subpreview::PreviewRequest::from_path(&req_path)?;
        return Ok(Resolved {
            paths,
            styles: req.style_block(),
            text: req.text(),
            background: req.background,
        });
    }

    let styles = match input.style {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("read style table '{}'", path.display()))?
            .into(),
        None => subpreview::StyleBlock::new(subpreview::SAMPLE_STYLE),
    };
    let original = input
        .text
        .context("--text is required when --request is not given")?;
    let mut text = subpreview::PreviewText::new(original);
    text.translation = input.translation;

    Ok(Resolved {
        paths,
        styles,
        text,
        background: None,
    })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut resolved = resolve_input(args.input)?;
    if args.background.is_some() {
        resolved.background = args.background;
    }

    let renderer = subpreview::PreviewRenderer::with_rasterizer(
        resolved.paths,
        subpreview::FfmpegRasterizer::with_program(args.ffmpeg),
    );
    let report = renderer.render(
        &resolved.styles,
        &resolved.text,
        resolved.background.as_deref(),
    )?;
    let out = report.into_image_path()?;

    println!("{}", out.display());
    Ok(())
}

fn cmd_script(args: ScriptArgs) -> anyhow::Result<()> {
    let resolved = resolve_input(args.input)?;
    let out = subpreview::build_document(&resolved.paths, &resolved.styles, &resolved.text)?;
    println!("{}", out.display());
    Ok(())
}

fn cmd_doctor() -> anyhow::Result<()> {
    if subpreview::is_ffmpeg_on_path() {
        eprintln!("ffmpeg: found on PATH");
        Ok(())
    } else {
        anyhow::bail!("ffmpeg: not found on PATH (required for `subpreview render`)")
    }
}
