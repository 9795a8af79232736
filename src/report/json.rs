//! JSON report output

use super::{ReportView, Summary};
use crate::analyzer::AnalysisReport;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: Summary,
    files: Vec<ReportView<'a>>,
}

pub fn write<W: Write>(writer: &mut W, reports: &[AnalysisReport]) -> Result<()> {
    let doc = JsonReport {
        generated: chrono::Local::now().to_rfc3339(),
        summary: Summary::from_reports(reports),
        files: reports.iter().map(ReportView::new).collect(),
    };
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}
