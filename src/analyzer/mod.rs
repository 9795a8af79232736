//! Mock copyright analysis
//!
//! Two independent generators make up the analysis:
//!
//! - [`scorer`]: four per-category similarity percentages in [0, 100]
//! - [`candidates`]: 1-3 synthetic "similar songs" with a risk band each
//!
//! Neither reads the uploaded audio. The random source is passed in by the
//! caller so tests (and `--seed`) can make a run reproducible.
//!
//! ```
//! use copycheck::{Analyzer, AudioInput};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let input = AudioInput::new("demo.mp3", vec![0xFF, 0xFB]).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let report = Analyzer::new().analyze(&mut rng, &input);
//!
//! assert_eq!(report.similarity.categories().len(), 4);
//! assert!((1..=3).contains(&report.candidates.len()));
//! ```

pub mod candidates;
pub mod scorer;
pub mod vocabulary;

pub use candidates::{CandidateFinder, CandidateMatch, RiskBand};
pub use scorer::{Category, SimilarityReport};
pub use vocabulary::Vocabulary;

use crate::audio::{AudioFormat, AudioInfo, AudioInput};
use rand::Rng;
use serde::Serialize;

/// Everything shown for one analyzed upload
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub generated: String,
    pub file_name: String,
    pub format: AudioFormat,
    pub size_bytes: u64,
    pub audio: Option<AudioInfo>,
    pub similarity: SimilarityReport,
    pub candidates: Vec<CandidateMatch>,
}

impl AnalysisReport {
    /// Highest band among the candidates
    pub fn worst_risk(&self) -> RiskBand {
        self.candidates
            .iter()
            .map(|c| c.risk)
            .max()
            .unwrap_or(RiskBand::Info)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    finder: CandidateFinder,
    /// Skip the symphonia header probe
    pub skip_probe: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.finder = CandidateFinder::new(vocabulary);
        self
    }

    pub fn with_skip_probe(mut self, skip: bool) -> Self {
        self.skip_probe = skip;
        self
    }

    /// Score the upload, then find candidates
    pub fn analyze<R: Rng + ?Sized>(&self, rng: &mut R, input: &AudioInput) -> AnalysisReport {
        let similarity = scorer::score(rng, input);
        let candidates = self.finder.find_candidates(rng);
        let audio = if self.skip_probe { None } else { input.probe() };

        tracing::debug!(
            file = input.file_name(),
            candidates = candidates.len(),
            overall = similarity.music,
            "analysis complete"
        );

        AnalysisReport {
            generated: chrono::Local::now().to_rfc3339(),
            file_name: input.file_name().to_string(),
            format: input.format(),
            size_bytes: input.size_bytes(),
            audio,
            similarity,
            candidates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn input() -> AudioInput {
        AudioInput::new("upload.mp3", vec![0xFF; 64]).unwrap()
    }

    #[test]
    fn test_analyze_shape() {
        let analyzer = Analyzer::new();
        let mut rng = rand::rng();

        for _ in 0..100 {
            let report = analyzer.analyze(&mut rng, &input());
            assert_eq!(report.similarity.categories().len(), 4);
            assert!((1..=3).contains(&report.candidates.len()));
            assert_eq!(report.file_name, "upload.mp3");
            assert_eq!(report.format, AudioFormat::Mp3);
            assert_eq!(report.size_bytes, 64);
        }
    }

    #[test]
    fn test_seeded_analysis_is_reproducible() {
        let analyzer = Analyzer::new().with_skip_probe(true);
        let a = analyzer.analyze(&mut StdRng::seed_from_u64(99), &input());
        let b = analyzer.analyze(&mut StdRng::seed_from_u64(99), &input());

        assert_eq!(a.similarity, b.similarity);
        assert_eq!(a.candidates, b.candidates);
        assert!(a.audio.is_none());
    }

    #[test]
    fn test_probe_fills_audio_info() {
        let wav = crate::audio::tests::silent_wav(8000, 800);
        let input = AudioInput::new("tone.wav", wav).unwrap();
        let report = Analyzer::new().analyze(&mut StdRng::seed_from_u64(1), &input);
        assert_eq!(report.audio.and_then(|a| a.sample_rate), Some(8000));
    }

    #[test]
    fn test_worst_risk() {
        let mut report = Analyzer::new()
            .with_skip_probe(true)
            .analyze(&mut StdRng::seed_from_u64(5), &input());

        let template = report.candidates[0].clone();
        report.candidates = vec![
            CandidateMatch { similarity_percent: 75.0, risk: RiskBand::Info, ..template.clone() },
            CandidateMatch { similarity_percent: 92.5, risk: RiskBand::High, ..template.clone() },
            CandidateMatch { similarity_percent: 81.0, risk: RiskBand::Caution, ..template },
        ];
        assert_eq!(report.worst_risk(), RiskBand::High);

        report.candidates.clear();
        assert_eq!(report.worst_risk(), RiskBand::Info);
    }

    #[test]
    fn test_report_serializes() {
        let report = Analyzer::new()
            .with_skip_probe(true)
            .analyze(&mut StdRng::seed_from_u64(8), &input());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(json["format"], "mp3");
        assert!(json["similarity"]["melody"].is_number());
        assert!(json["candidates"].as_array().is_some());
        assert!(json["audio"].is_null());
        let risk = json["candidates"][0]["risk"].as_str().unwrap();
        assert!(["high", "caution", "info"].contains(&risk));
    }
}
