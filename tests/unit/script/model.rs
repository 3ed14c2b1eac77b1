use super::*;

const STYLES: &str = "[V4+ Styles]\nFormat: Name,Fontname,Fontsize\nStyle: Default,Arial,70\nStyle: Secondary,Arial,40";

fn dialogue_rows(doc: &str) -> Vec<&str> {
    doc.lines().filter(|l| l.starts_with("Dialogue:")).collect()
}

#[test]
fn timestamps_use_script_clock_format() {
    assert_eq!(Timestamp::from_secs(0).to_string(), "0:00:00.00");
    assert_eq!(Timestamp::from_secs(1).to_string(), "0:00:01.00");
    assert_eq!(Timestamp::from_centis(366_105).to_string(), "1:01:01.05");
}

#[test]
fn original_only_yields_single_default_row() {
    let doc = ScriptDocument::for_preview(&StyleBlock::new(STYLES), &PreviewText::new("Only line"))
        .to_script_string();
    assert_eq!(
        dialogue_rows(&doc),
        vec!["Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,Only line"]
    );
}

#[test]
fn translation_row_precedes_default_row() {
    let text = PreviewText::new("Hello, world!").with_translation("你好，世界！");
    let doc = ScriptDocument::for_preview(&StyleBlock::new(STYLES), &text).to_script_string();
    assert_eq!(
        dialogue_rows(&doc),
        vec![
            "Dialogue: 0,0:00:00.00,0:00:01.00,Secondary,,0,0,0,,你好，世界！",
            "Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,Hello, world!",
        ]
    );
}

#[test]
fn empty_translation_counts_as_absent() {
    let text = PreviewText::new("a").with_translation("");
    let doc = ScriptDocument::for_preview(&StyleBlock::default(), &text);
    assert_eq!(doc.events.len(), 1);
    assert_eq!(doc.events[0].style, DEFAULT_STYLE);
}

#[test]
fn empty_original_is_kept_as_empty_row() {
    let doc = ScriptDocument::for_preview(&StyleBlock::default(), &PreviewText::new(""));
    assert_eq!(
        doc.events[0].to_string(),
        "Dialogue: 0,0:00:00.00,0:00:01.00,Default,,0,0,0,,"
    );
}

#[test]
fn embedded_newlines_become_hard_breaks() {
    let doc = ScriptDocument::for_preview(
        &StyleBlock::default(),
        &PreviewText::new("one\ntwo\r\nthree"),
    )
    .to_script_string();
    let rows = dialogue_rows(&doc);
    assert_eq!(rows.len(), 1);
    assert!(rows[0].ends_with(",,one\\Ntwo\\Nthree"));
}

#[test]
fn document_layout_is_header_styles_events() {
    let doc = ScriptDocument::for_preview(&StyleBlock::new(STYLES), &PreviewText::new("x"))
        .to_script_string();

    let lines: Vec<&str> = doc.lines().collect();
    assert_eq!(lines[0], "[Script Info]");
    assert!(lines[1].starts_with("; Script generated by subpreview"));
    assert_eq!(lines[2], "ScriptType: v4.00+");
    assert_eq!(lines[3], "PlayResX: 1280");
    assert_eq!(lines[4], "PlayResY: 720");
    assert_eq!(lines[5], "");
    assert!(doc.contains(STYLES), "style block must be spliced verbatim");

    let events_at = lines.iter().position(|l| *l == "[Events]").unwrap();
    assert_eq!(
        lines[events_at + 1],
        "Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text"
    );
    assert!(doc.find(STYLES).unwrap() < doc.find("[Events]").unwrap());
    assert!(doc.ends_with('\n'));
}
