use super::voice::turn_prefix;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFormat {
    Monologue,
    #[default]
    Dialogue,
}

impl ScriptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptFormat::Monologue => "monologue",
            ScriptFormat::Dialogue => "dialogue",
        }
    }

    /// Format named by a request.
    ///
    /// Only `dialogue` gets speaker prefixes; any other label leaves the
    /// script untouched, so it maps to a monologue.
    pub fn from_label(label: &str) -> Self {
        if label == "dialogue" {
            ScriptFormat::Dialogue
        } else {
            ScriptFormat::Monologue
        }
    }

    /// Format implied by the number of speakers taking part
    pub fn for_speakers(speakers: usize) -> Self {
        if speakers > 1 {
            ScriptFormat::Dialogue
        } else {
            ScriptFormat::Monologue
        }
    }
}

impl std::fmt::Display for ScriptFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag each line of a dialogue script with its speaker.
///
/// Lines are assigned round-robin by index: line `i` belongs to speaker
/// `i % speakers`. Monologues and single-speaker scripts pass through as-is.
pub fn format_script(script: &str, format: ScriptFormat, speakers: usize) -> String {
    if format != ScriptFormat::Dialogue || speakers <= 1 {
        return script.to_string();
    }

    script
        .split('\n')
        .enumerate()
        .map(|(index, line)| format!("{}{}", turn_prefix(index % speakers), line))
        .collect::<Vec<_>>()
        .join("\n")
}
