//! Report generation for analysis results
//!
//! Output formats, picked from the file extension:
//!
//! - **HTML**: standalone page with D3.js bar charts and candidate panels
//! - **JSON**: machine-readable, same shape as the `/api/analyze` payload
//! - **CSV**: one row per candidate, spreadsheet friendly
//!
//! # Usage
//!
//! ```ignore
//! use copycheck::report;
//!
//! report::generate("report.html", &reports)?;  // HTML
//! report::generate("report.json", &reports)?;  // JSON
//! report::generate("report.csv", &reports)?;   // CSV
//! ```

pub mod csv;
pub mod html;
pub mod json;

use crate::analyzer::{AnalysisReport, RiskBand};
use crate::error::Result;
use serde::Serialize;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, reports: &[AnalysisReport]) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "html" | "htm" => html::write(&mut file, reports),
        "json" => json::write(&mut file, reports),
        _ => csv::write(&mut file, reports),
    }?;

    tracing::info!(path = %path.display(), files = reports.len(), "report written");
    Ok(())
}

/// An [`AnalysisReport`] plus the display strings the page and HTML report
/// render: chart bars with their labels, and one banner per candidate.
#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    #[serde(flatten)]
    pub report: &'a AnalysisReport,
    pub chart: Vec<ChartBar>,
    pub banners: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ChartBar {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        let chart = report
            .similarity
            .categories()
            .iter()
            .map(|(category, value)| ChartBar {
                key: category.key(),
                label: category.label(),
                value: *value,
            })
            .collect();
        let banners = report.candidates.iter().map(|c| c.risk.message()).collect();

        Self { report, chart, banners }
    }
}

/// Candidate band counts for a batch of reports
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub total_candidates: usize,
    pub high: usize,
    pub caution: usize,
    pub info: usize,
}

impl Summary {
    pub fn from_reports(reports: &[AnalysisReport]) -> Self {
        let mut summary = Self {
            total_files: reports.len(),
            ..Self::default()
        };

        for c in reports.iter().flat_map(|r| &r.candidates) {
            summary.total_candidates += 1;
            match c.risk {
                RiskBand::High => summary.high += 1,
                RiskBand::Caution => summary.caution += 1,
                RiskBand::Info => summary.info += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analyzer::{CandidateMatch, SimilarityReport};
    use crate::audio::AudioFormat;

    pub(crate) fn candidate(similarity_percent: f64) -> CandidateMatch {
        CandidateMatch {
            title: "song-รัก".to_string(),
            artist: "ทาทา ยัง".to_string(),
            genre_tag: "เพลงป็อป".to_string(),
            similarity_percent,
            copyright_owner: "label-A".to_string(),
            risk: RiskBand::from_percent(similarity_percent),
        }
    }

    pub(crate) fn report(name: &str, similarities: &[f64]) -> AnalysisReport {
        AnalysisReport {
            generated: "2026-01-01T00:00:00+00:00".to_string(),
            file_name: name.to_string(),
            format: AudioFormat::Mp3,
            size_bytes: 1024,
            audio: None,
            similarity: SimilarityReport { melody: 10.0, rhythm: 20.0, vocal: 30.0, music: 40.0 },
            candidates: similarities.iter().map(|&s| candidate(s)).collect(),
        }
    }

    // ==========================================================================
    // SUMMARY STATISTICS TESTS
    // ==========================================================================
    //
    // The summary counts candidates per risk band across every analyzed file.
    // It is shown at the top of HTML reports and at the end of `check`.
    // ==========================================================================

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_reports(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_summary_mixed() {
        let reports = vec![
            report("a.mp3", &[95.0, 85.0]),
            report("b.wav", &[75.0]),
            report("c.mp3", &[90.0, 80.0, 79.99]),
        ];
        let summary = Summary::from_reports(&reports);

        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.total_candidates, 6);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.caution, 2);
        assert_eq!(summary.info, 2);
    }

    #[test]
    fn test_view_labels_and_banners() {
        let r = report("a.mp3", &[95.0, 85.0, 75.0]);
        let view = ReportView::new(&r);

        let labels: Vec<&str> = view.chart.iter().map(|b| b.label).collect();
        assert_eq!(labels, vec!["ทำนอง", "จังหวะ", "เสียงร้อง", "ดนตรี"]);
        assert_eq!(view.chart[3].value, 40.0);
        assert_eq!(
            view.banners,
            vec![RiskBand::High.message(), RiskBand::Caution.message(), RiskBand::Info.message()]
        );

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["file_name"], "a.mp3");
        assert_eq!(json["chart"][0]["key"], "melody");
    }

    // ==========================================================================
    // FORMAT SELECTION
    // ==========================================================================

    fn temp_path(ext: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("copycheck_report_{}.{}", std::process::id(), ext))
    }

    #[test]
    fn test_generate_picks_format_by_extension() {
        let reports = vec![report("a.mp3", &[91.0])];

        let json_path = temp_path("json");
        generate(&json_path, &reports).unwrap();
        let json = std::fs::read_to_string(&json_path).unwrap();
        std::fs::remove_file(&json_path).ok();
        assert!(json.trim_start().starts_with('{'));

        let html_path = temp_path("html");
        generate(&html_path, &reports).unwrap();
        let html = std::fs::read_to_string(&html_path).unwrap();
        std::fs::remove_file(&html_path).ok();
        assert!(html.starts_with("<!DOCTYPE html>"));

        let csv_path = temp_path("csv");
        generate(&csv_path, &reports).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        std::fs::remove_file(&csv_path).ok();
        assert!(csv.starts_with("file,"));
    }
}
