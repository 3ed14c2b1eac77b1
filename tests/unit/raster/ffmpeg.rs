use super::*;

fn args_of(inv: &Invocation) -> Vec<String> {
    inv.args
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

#[test]
fn escape_normalizes_separators_and_double_escapes_colons() {
    assert_eq!(
        escape_filter_path(Path::new(r"C:\Users\me\cache\preview.ass")),
        r"C\\:/Users/me/cache/preview.ass"
    );
    assert_eq!(
        escape_filter_path(Path::new("/tmp/cache/preview.ass")),
        "/tmp/cache/preview.ass"
    );
    assert_eq!(escape_filter_path(Path::new("a:b:c")), r"a\\:b\\:c");
}

#[test]
fn solid_background_arguments() {
    let inv = Invocation::solid_background(Path::new("res/assets/default_bg.png"), 1920, 1080, "black");
    assert_eq!(
        args_of(&inv),
        vec![
            "-y",
            "-loglevel",
            "error",
            "-f",
            "lavfi",
            "-i",
            "color=c=black:s=1920x1080",
            "-frames:v",
            "1",
            "res/assets/default_bg.png",
        ]
    );
    assert_eq!(inv.output, PathBuf::from("res/assets/default_bg.png"));
}

#[test]
fn composite_arguments_emit_one_frame_with_escaped_script() {
    let inv = Invocation::composite_subtitles(
        Path::new("bg.jpg"),
        Path::new(r"D:\cache\preview.ass"),
        Path::new("cache/preview.png"),
    );
    assert_eq!(
        args_of(&inv),
        vec![
            "-y",
            "-loglevel",
            "error",
            "-i",
            "bg.jpg",
            "-vf",
            r"ass=D\\:/cache/preview.ass",
            "-frames:v",
            "1",
            "cache/preview.png",
        ]
    );
}

#[test]
fn nonzero_exit_is_failure_with_stderr() {
    let outcome = ToolOutcome::from_exit(false, Some(1), b"No such filter: 'ass'\n", Path::new("x"));
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.status, Some(1));
    assert_eq!(
        failure.to_string(),
        "exited with status 1: No such filter: 'ass'"
    );
}

#[test]
fn success_without_output_file_is_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("missing.png");
    let outcome = ToolOutcome::from_exit(true, Some(0), b"", &missing);
    assert!(!outcome.is_success());
    assert!(outcome.failure().unwrap().stderr.contains("was not written"));

    std::fs::write(&missing, b"").unwrap();
    assert!(!ToolOutcome::from_exit(true, Some(0), b"", &missing).is_success());

    std::fs::write(&missing, b"png").unwrap();
    assert!(ToolOutcome::from_exit(true, Some(0), b"", &missing).is_success());
}

#[test]
fn missing_program_reports_spawn_failure() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out.png");
    let rasterizer = FfmpegRasterizer::with_program(tmp.path().join("no-such-ffmpeg"));
    let outcome = rasterizer.run(&Invocation::solid_background(&out, 2, 2, "black"));

    let failure = outcome.failure().unwrap();
    assert_eq!(failure.status, None);
    assert!(failure.stderr.contains("failed to spawn"));
    assert!(!out.exists());
}

#[test]
fn ensure_parent_dir_creates_nested_dirs() {
    let tmp = tempfile::tempdir().unwrap();
    let target = tmp.path().join("a").join("b").join("out.png");
    ensure_parent_dir(&target).unwrap();
    assert!(tmp.path().join("a").join("b").is_dir());
}
