//! Word tables the candidate finder draws from
//!
//! The built-in tables hold the Thai song words, artists and genres of the
//! demo. A replacement can be loaded from a JSON file with the same shape:
//!
//! ```json
//! {
//!   "title_prefix": "song-",
//!   "title_words": ["รัก", "เหงา"],
//!   "artists": ["..."],
//!   "genres": ["..."],
//!   "owner_prefix": "label-",
//!   "owner_labels": ["A", "B"]
//! }
//! ```
//!
//! Missing fields fall back to the built-in values; empty tables are rejected.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub title_prefix: String,
    pub title_words: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub owner_prefix: String,
    pub owner_labels: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            title_prefix: "song-".to_string(),
            title_words: strings(&["รัก", "เหงา", "คิดถึง", "ใจ", "ฝัน"]),
            artists: strings(&[
                "เบิร์ด ธงไชย",
                "ทาทา ยัง",
                "แสตมป์ อภิวัชร์",
                "อัสนี-วสันต์",
                "ป้าง นครินทร์",
            ]),
            genres: strings(&["เพลงป็อป", "เพลงร็อค", "เพลงลูกทุ่ง", "เพลงสตริง", "เพลงแร็พ"]),
            owner_prefix: "label-".to_string(),
            owner_labels: strings(&["A", "B", "C", "D"]),
        }
    }
}

impl Vocabulary {
    /// Load and validate a vocabulary JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let vocabulary: Vocabulary = serde_json::from_str(&text)?;
        vocabulary.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "loaded vocabulary");
        Ok(vocabulary)
    }

    /// Every table must have at least one entry to draw from
    pub fn validate(&self) -> Result<()> {
        let tables = [
            ("title_words", &self.title_words),
            ("artists", &self.artists),
            ("genres", &self.genres),
            ("owner_labels", &self.owner_labels),
        ];
        for (name, table) in tables {
            if table.is_empty() {
                return Err(Error::InvalidVocabulary(format!("{} is empty", name)));
            }
            if table.iter().any(|s| s.trim().is_empty()) {
                return Err(Error::InvalidVocabulary(format!("{} has a blank entry", name)));
            }
        }
        Ok(())
    }
}
