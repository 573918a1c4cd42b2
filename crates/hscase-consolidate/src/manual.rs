//! Explanatory manual corpus and the hierarchical-prefix lookup.
//!
//! Entries carry a section label, a heading key, and free text. A code is
//! resolved at three levels: the chapter entry keyed `"Chapter NN"` (first
//! two digits), the heading entry keyed `"NN.NN"` (first four digits), and
//! the section entry named by the chapter's section label. Missing levels
//! yield placeholder text, never an error.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})\.(\d{2})").unwrap_or_else(|e| panic!("heading regex: {e}")));
static CHAPTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Chapter\s+(\d{1,2})\b").unwrap_or_else(|e| panic!("chapter regex: {e}")));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManualEntry {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub text: String,
}

/// The three explanation levels for one code. Any level may be absent.
#[derive(Debug, Clone, Default)]
pub struct ManualContent {
    pub section_text: Option<String>,
    pub chapter_text: Option<String>,
    pub heading_text: Option<String>,
}

impl ManualContent {
    pub fn is_empty(&self) -> bool {
        self.section_text.is_none() && self.chapter_text.is_none() && self.heading_text.is_none()
    }

    /// Flatten the levels into prompt-ready text.
    pub fn rendered(&self) -> String {
        let mut out = String::new();
        if let Some(text) = &self.section_text {
            out.push_str("Section notes: ");
            out.push_str(text);
            out.push('\n');
        }
        if let Some(text) = &self.chapter_text {
            out.push_str("Chapter notes: ");
            out.push_str(text);
            out.push('\n');
        }
        if let Some(text) = &self.heading_text {
            out.push_str("Heading notes: ");
            out.push_str(text);
            out.push('\n');
        }
        out
    }
}

pub struct Manual {
    entries: Vec<ManualEntry>,
}

impl Manual {
    /// Load from a JSON array; a missing file is an empty manual.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(path = %path.display(), "manual corpus missing, treating as empty");
            return Ok(Self { entries: Vec::new() });
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let entries: Vec<ManualEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<ManualEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ManualEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hierarchical-prefix lookup for a code with at least two digits.
    pub fn lookup(&self, hs_code: &str) -> ManualContent {
        let digits: String = hs_code.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 2 {
            return ManualContent::default();
        }

        let chapter: u32 = digits[..2].parse().unwrap_or(0);
        let chapter_key = format!("Chapter {chapter}");
        let chapter_entry = self.entries.iter().find(|e| e.heading == chapter_key);

        let heading_entry = if digits.len() >= 4 {
            let heading_key = format!("{}.{}", &digits[..2], &digits[2..4]);
            self.entries.iter().find(|e| e.heading == heading_key)
        } else {
            None
        };

        let section_entry = chapter_entry.and_then(|chapter| {
            self.entries
                .iter()
                .find(|e| !chapter.section.is_empty() && e.heading == chapter.section)
        });

        ManualContent {
            section_text: section_entry.map(|e| e.text.clone()),
            chapter_text: chapter_entry.map(|e| e.text.clone()),
            heading_text: heading_entry.map(|e| e.text.clone()),
        }
    }
}

/// Extract the classification codes embedded in an entry heading:
/// `"NN.NN"` becomes a four-digit code; a bare `"Chapter N"` falls back to
/// the chapter-level code `NN00`.
pub fn heading_codes(heading: &str) -> Vec<String> {
    let mut codes = Vec::new();
    for caps in HEADING_RE.captures_iter(heading) {
        let code = format!("{}{}", &caps[1], &caps[2]);
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    if codes.is_empty() {
        for caps in CHAPTER_RE.captures_iter(heading) {
            let code = format!("{:0>2}00", &caps[1]);
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }
    codes
}
