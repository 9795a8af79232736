//! Candidate finder: the "similar songs" list
//!
//! Draws 1 to 3 synthetic records from a [`Vocabulary`]. Nothing here looks
//! at the uploaded audio.

use super::vocabulary::Vocabulary;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use std::fmt;

pub const MIN_CANDIDATES: usize = 1;
pub const MAX_CANDIDATES: usize = 3;

pub const MIN_SIMILARITY: f64 = 70.0;
pub const MAX_SIMILARITY: f64 = 99.0;

/// Display banding for a candidate's similarity
///
/// | Similarity | Band |
/// |------------|------|
/// | >= 90 | High |
/// | 80 - <90 | Caution |
/// | < 80 | Info |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Info,
    Caution,
    High,
}

impl RiskBand {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            RiskBand::High
        } else if percent >= 80.0 {
            RiskBand::Caution
        } else {
            RiskBand::Info
        }
    }

    /// Banner text shown on the candidate panel
    pub fn message(&self) -> &'static str {
        match self {
            RiskBand::High => "⚠️ มีความเสี่ยงสูงในการละเมิดลิขสิทธิ์",
            RiskBand::Caution => "⚡ มีความคล้ายคลึงที่ควรระวัง",
            RiskBand::Info => "ℹ️ มีความคล้ายคลึงบางส่วน",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::High => write!(f, "HIGH"),
            RiskBand::Caution => write!(f, "CAUTION"),
            RiskBand::Info => write!(f, "INFO"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateMatch {
    pub title: String,
    pub artist: String,
    pub genre_tag: String,
    pub similarity_percent: f64,
    pub copyright_owner: String,
    pub risk: RiskBand,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateFinder {
    vocabulary: Vocabulary,
}

impl CandidateFinder {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn find_candidates<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<CandidateMatch> {
        let count = rng.random_range(MIN_CANDIDATES..=MAX_CANDIDATES);
        (0..count).map(|_| self.draw(&mut *rng)).collect()
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> CandidateMatch {
        let v = &self.vocabulary;

        let title = format!("{}{}", v.title_prefix, pick(rng, &v.title_words));
        let artist = pick(rng, &v.artists);
        let genre_tag = pick(rng, &v.genres);
        let similarity_percent = round2(rng.random_range(MIN_SIMILARITY..=MAX_SIMILARITY));
        let copyright_owner = format!("{}{}", v.owner_prefix, pick(rng, &v.owner_labels));

        CandidateMatch {
            title,
            artist,
            genre_tag,
            similarity_percent,
            copyright_owner,
            risk: RiskBand::from_percent(similarity_percent),
        }
    }
}

// Tables are validated non-empty at load time; an empty one yields "".
fn pick<R: Rng + ?Sized>(rng: &mut R, table: &[String]) -> String {
    table.choose(rng).cloned().unwrap_or_default()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
