//! CSV report output: one row per candidate match

use crate::analyzer::AnalysisReport;
use crate::error::Result;
use std::io::Write;

const HEADER: &str = "file,format,melody,rhythm,vocal,music,title,artist,genre,similarity,owner,risk";

pub fn write<W: Write>(writer: &mut W, reports: &[AnalysisReport]) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;

    for r in reports {
        let s = &r.similarity;
        for c in &r.candidates {
            writeln!(
                writer,
                "{},{},{:.2},{:.2},{:.2},{:.2},{},{},{},{:.2},{},{}",
                escape(&r.file_name),
                r.format.extension(),
                s.melody,
                s.rhythm,
                s.vocal,
                s.music,
                escape(&c.title),
                escape(&c.artist),
                escape(&c.genre_tag),
                c.similarity_percent,
                escape(&c.copyright_owner),
                c.risk,
            )?;
        }
    }

    Ok(())
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::report;

    #[test]
    fn test_csv_rows_per_candidate() {
        let reports = vec![report("a.mp3", &[95.0, 85.0]), report("b.mp3", &[75.0])];
        let mut out = Vec::new();
        write(&mut out, &reports).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], HEADER);
        assert!(lines[1].starts_with("a.mp3,mp3,10.00,20.00,30.00,40.00,song-รัก,"));
        assert!(lines[1].ends_with(",95.00,label-A,HIGH"));
        assert!(lines[2].ends_with(",CAUTION"));
        assert!(lines[3].ends_with(",INFO"));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_csv_empty() {
        let mut out = Vec::new();
        write(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), HEADER);
    }
}
