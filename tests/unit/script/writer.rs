use super::*;

#[test]
fn build_document_creates_cache_dir_and_writes_script() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = PreviewPaths::new(tmp.path().join("nested").join("cache"), tmp.path());

    let out = build_document(
        &paths,
        &StyleBlock::new("[V4+ Styles]"),
        &PreviewText::new("Only line"),
    )
    .unwrap();

    assert_eq!(out, paths.document_path());
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("[Script Info]\n"));
    assert!(written.contains("Default,,0,0,0,,Only line"));
}

#[test]
fn rebuild_fully_replaces_previous_script() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = PreviewPaths::new(tmp.path(), tmp.path());
    let styles = StyleBlock::new("[V4+ Styles]");

    build_document(
        &paths,
        &styles,
        &PreviewText::new("first original").with_translation("first translation"),
    )
    .unwrap();
    let out = build_document(&paths, &styles, &PreviewText::new("second")).unwrap();

    let written = std::fs::read_to_string(out).unwrap();
    assert!(!written.contains("first"));
    assert_eq!(
        written.lines().filter(|l| l.starts_with("Dialogue:")).count(),
        1
    );
}

#[test]
fn no_temporary_files_are_left_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = PreviewPaths::new(tmp.path(), tmp.path());
    build_document(&paths, &StyleBlock::default(), &PreviewText::new("x")).unwrap();

    let names: Vec<String> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["preview.ass".to_string()]);
}

#[test]
fn unwritable_cache_location_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();
    let paths = PreviewPaths::new(blocker.join("cache"), tmp.path());

    let err = build_document(&paths, &StyleBlock::default(), &PreviewText::new("x")).unwrap_err();
    assert!(err.to_string().contains("failed to create script directory"));
}
