//! copycheck - Demo song copyright similarity checker
//!
//! Upload an MP3 or WAV and get a "copyright similarity" report: four
//! per-category percentages plus a short list of similar songs, each with a
//! risk band.
//!
//! # This is a mock
//!
//! No audio is decoded for scoring, fingerprinted or compared. Every number
//! comes from the random source handed to the [`Analyzer`]. The upload is
//! only probed for display facts (sample rate, channels, duration).
//!
//! # Quick Start
//!
//! ```no_run
//! use copycheck::{Analyzer, AudioInput, RiskBand};
//!
//! let input = AudioInput::from_file("demo.mp3").unwrap();
//! let report = Analyzer::new().analyze(&mut rand::rng(), &input);
//!
//! for (category, percent) in report.similarity.categories() {
//!     println!("{:<8} {:>6.2}%", category, percent);
//! }
//! for c in &report.candidates {
//!     match c.risk {
//!         RiskBand::High => println!("{} - high risk", c.title),
//!         RiskBand::Caution => println!("{} - caution", c.title),
//!         RiskBand::Info => println!("{} - partial similarity", c.title),
//!     }
//! }
//! ```
//!
//! # Risk Bands
//!
//! | Similarity | Band | Meaning |
//! |------------|------|---------|
//! | >= 90 | HIGH | High risk of infringement |
//! | 80 - <90 | CAUTION | Similar enough to be careful |
//! | < 80 | INFO | Some similarity |
//!
//! # Modules
//!
//! - [`analyzer`]: mock scorer, candidate finder and their vocabulary
//! - [`audio`]: upload validation and metadata probe
//! - [`report`]: output formatters (HTML, JSON, CSV)
//! - [`serve`]: embedded web UI and JSON API

pub mod analyzer;
pub mod audio;
pub mod error;
pub mod report;
pub mod serve;

pub use analyzer::{
    AnalysisReport, Analyzer, CandidateFinder, CandidateMatch, Category, RiskBand,
    SimilarityReport, Vocabulary,
};
pub use audio::{AudioFormat, AudioInfo, AudioInput};
pub use error::{Error, Result};
