//! Similarity scorer
//!
//! Produces the four per-category similarity percentages shown in the bar
//! chart. Each value is an independent uniform draw over [0, 100]; the audio
//! handle is accepted but its content is never read.

use crate::audio::AudioInput;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// The compared aspects of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Melody,
    Rhythm,
    Vocal,
    Music,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Melody,
        Category::Rhythm,
        Category::Vocal,
        Category::Music,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Melody => "melody",
            Category::Rhythm => "rhythm",
            Category::Vocal => "vocal",
            Category::Music => "music",
        }
    }

    /// Label used on the chart axis
    pub fn label(&self) -> &'static str {
        match self {
            Category::Melody => "ทำนอง",
            Category::Rhythm => "จังหวะ",
            Category::Vocal => "เสียงร้อง",
            Category::Music => "ดนตรี",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityReport {
    pub melody: f64,
    pub rhythm: f64,
    pub vocal: f64,
    pub music: f64,
}

impl SimilarityReport {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Melody => self.melody,
            Category::Rhythm => self.rhythm,
            Category::Vocal => self.vocal,
            Category::Music => self.music,
        }
    }

    /// Category/percent pairs in chart order
    pub fn categories(&self) -> [(Category, f64); 4] {
        Category::ALL.map(|c| (c, self.get(c)))
    }
}

/// Draw a fresh report. `_input` is ignored for scoring.
pub fn score<R: Rng + ?Sized>(rng: &mut R, _input: &AudioInput) -> SimilarityReport {
    SimilarityReport {
        melody: rng.random_range(0.0..=100.0),
        rhythm: rng.random_range(0.0..=100.0),
        vocal: rng.random_range(0.0..=100.0),
        music: rng.random_range(0.0..=100.0),
    }
}
