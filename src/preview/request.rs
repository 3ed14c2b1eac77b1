use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PreviewError, PreviewResult};
use crate::script::model::{PreviewText, StyleBlock};

/// Style table with `Default` and `Secondary` entries, usable when the caller has none.
pub const SAMPLE_STYLE: &str = "[V4+ Styles]
Format: Name,Fontname,Fontsize,PrimaryColour,SecondaryColour,OutlineColour,BackColour,Bold,Italic,Underline,StrikeOut,ScaleX,ScaleY,Spacing,Angle,BorderStyle,Outline,Shadow,Alignment,MarginL,MarginR,MarginV,Encoding
Style: Default,Noto Sans CJK SC,70,&H00eb7f33,&H000000FF,&H00000000,&H00000000,-1,0,0,0,100,100,2.0,0,1,2.0,0,2,10,10,10,1
Style: Secondary,Noto Sans CJK SC,40,&H00eff0f3,&H000000FF,&H00000000,&H00000000,-1,0,0,0,100,100,0.0,0,1,1.0,0,2,10,10,10,1";

/// A preview request as exchanged in JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewRequest {
    /// Style table text. Defaults to [`SAMPLE_STYLE`].
    #[serde(default = "sample_style")]
    pub style: String,
    /// Original line.
    pub original: String,
    /// Optional translated line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    /// Optional background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<PathBuf>,
}

fn sample_style() -> String {
    SAMPLE_STYLE.to_string()
}

impl PreviewRequest {
    /// Parse a request from JSON text.
    pub fn from_json_str(json: &str) -> PreviewResult<Self> {
        serde_json::from_str(json).map_err(|e| PreviewError::serde(e.to_string()))
    }

    /// Read a request from a JSON file.
    pub fn from_path(path: &Path) -> PreviewResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("failed to open preview request '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            PreviewError::serde(format!(
                "invalid preview request '{}': {e}",
                path.display()
            ))
        })
    }

    /// The style table of this request.
    pub fn style_block(&self) -> StyleBlock {
        StyleBlock::new(self.style.clone())
    }

    /// The text pair of this request.
    pub fn text(&self) -> PreviewText {
        PreviewText {
            original: self.original.clone(),
            translation: self.translation.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/preview/request.rs"]
mod tests;
