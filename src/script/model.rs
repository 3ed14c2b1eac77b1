use std::fmt;

/// Style name used for the original line.
pub const DEFAULT_STYLE: &str = "Default";
/// Style name used for the translated line.
pub const SECONDARY_STYLE: &str = "Secondary";

/// Column order of every dialogue row in the `[Events]` section.
pub const EVENT_FORMAT: &str =
    "Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text";

/// Caller-supplied `[V4+ Styles]` table.
///
/// The block is opaque: it is spliced into the script verbatim and never parsed or validated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleBlock(String);

impl StyleBlock {
    /// Wrap raw style-table text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw text as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StyleBlock {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StyleBlock {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The text shown in a preview: the original line plus an optional translation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreviewText {
    /// Line rendered with the default style. May be empty.
    pub original: String,
    /// Line rendered with the secondary style, when present and non-empty.
    pub translation: Option<String>,
}

impl PreviewText {
    /// Original-only preview text.
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translation: None,
        }
    }

    /// Attach a translated line.
    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    /// The translation if it would produce a visible row.
    pub fn effective_translation(&self) -> Option<&str> {
        self.translation.as_deref().filter(|t| !t.is_empty())
    }
}

/// Script timestamp with centisecond resolution, printed as `H:MM:SS.cc`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    /// Hundredths of a second since the start of the script.
    pub centis: u64,
}

impl Timestamp {
    /// Timestamp at `centis` hundredths of a second.
    pub const fn from_centis(centis: u64) -> Self {
        Self { centis }
    }

    /// Timestamp at a whole number of seconds.
    pub const fn from_secs(secs: u64) -> Self {
        Self { centis: secs * 100 }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cs = self.centis % 100;
        let total_secs = self.centis / 100;
        let s = total_secs % 60;
        let m = (total_secs / 60) % 60;
        let h = total_secs / 3600;
        write!(f, "{h}:{m:02}:{s:02}.{cs:02}")
    }
}

/// Fixed window every preview row is shown in.
pub const PREVIEW_WINDOW: (Timestamp, Timestamp) =
    (Timestamp::from_secs(0), Timestamp::from_secs(1));

/// One row of the `[Events]` section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueLine {
    /// Layer index; higher layers draw on top.
    pub layer: u32,
    /// Start time.
    pub start: Timestamp,
    /// End time.
    pub end: Timestamp,
    /// Name of the style entry this row references.
    pub style: String,
    /// Speaker name.
    pub name: String,
    /// Left margin override (0 keeps the style value).
    pub margin_l: u32,
    /// Right margin override (0 keeps the style value).
    pub margin_r: u32,
    /// Vertical margin override (0 keeps the style value).
    pub margin_v: u32,
    /// Effect field.
    pub effect: String,
    /// Row text, already free of raw line breaks.
    pub text: String,
}

impl DialogueLine {
    /// A row in the preview window with no overrides.
    pub fn preview(style: &str, text: &str) -> Self {
        let (start, end) = PREVIEW_WINDOW;
        Self {
            layer: 0,
            start,
            end,
            style: style.to_string(),
            name: String::new(),
            margin_l: 0,
            margin_r: 0,
            margin_v: 0,
            effect: String::new(),
            text: escape_line_breaks(text),
        }
    }
}

impl fmt::Display for DialogueLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dialogue: {},{},{},{},{},{},{},{},{},{}",
            self.layer,
            self.start,
            self.end,
            self.style,
            self.name,
            self.margin_l,
            self.margin_r,
            self.margin_v,
            self.effect,
            self.text
        )
    }
}

/// `[Script Info]` fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptHeader {
    /// Comment line emitted right after the section header.
    pub title_comment: String,
    /// Declared script format version.
    pub script_type: String,
    /// Canvas width the style metrics refer to.
    pub play_res_x: u32,
    /// Canvas height the style metrics refer to.
    pub play_res_y: u32,
}

impl Default for ScriptHeader {
    fn default() -> Self {
        Self {
            title_comment: concat!("Script generated by subpreview ", env!("CARGO_PKG_VERSION"))
                .to_string(),
            script_type: "v4.00+".to_string(),
            play_res_x: 1280,
            play_res_y: 720,
        }
    }
}

/// A complete subtitle script: typed header, opaque styles, typed events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptDocument {
    /// Script header.
    pub header: ScriptHeader,
    /// Verbatim style table.
    pub styles: StyleBlock,
    /// Event rows in draw order.
    pub events: Vec<DialogueLine>,
}

impl ScriptDocument {
    /// Build the one- or two-row preview document for `text`.
    ///
    /// With a translation the secondary row comes first, followed by the default row.
    pub fn for_preview(styles: &StyleBlock, text: &PreviewText) -> Self {
        let mut events = Vec::with_capacity(2);
        if let Some(translation) = text.effective_translation() {
            events.push(DialogueLine::preview(SECONDARY_STYLE, translation));
        }
        events.push(DialogueLine::preview(DEFAULT_STYLE, &text.original));

        Self {
            header: ScriptHeader::default(),
            styles: styles.clone(),
            events,
        }
    }

    /// Render the document text.
    pub fn to_script_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ScriptDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Script Info]")?;
        writeln!(f, "; {}", self.header.title_comment)?;
        writeln!(f, "ScriptType: {}", self.header.script_type)?;
        writeln!(f, "PlayResX: {}", self.header.play_res_x)?;
        writeln!(f, "PlayResY: {}", self.header.play_res_y)?;
        writeln!(f)?;
        writeln!(f, "{}", self.styles.as_str())?;
        writeln!(f)?;
        writeln!(f, "[Events]")?;
        writeln!(f, "Format: {EVENT_FORMAT}")?;
        for line in &self.events {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Replace raw newlines with the script's hard line break `\N`.
pub(crate) fn escape_line_breaks(text: &str) -> String {
    text.replace("\r\n", "\n").replace(['\n', '\r'], "\\N")
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
