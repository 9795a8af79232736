use clap::{Parser, Subcommand};
use copycheck::serve::{ServeConfig, DEFAULT_MAX_UPLOAD_MB};
use copycheck::{AnalysisReport, Analyzer, AudioFormat, AudioInput, RiskBand, Vocabulary};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "copycheck")]
#[command(author, version, about = "Demo song copyright similarity checker (mock analysis)")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the web UI for uploading and checking songs
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3001", env = "COPYCHECK_PORT")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "127.0.0.1", env = "COPYCHECK_HOST")]
        host: String,

        /// Don't open a browser window
        #[arg(long)]
        no_open: bool,

        /// Seed the random source for reproducible results
        #[arg(long, env = "COPYCHECK_SEED")]
        seed: Option<u64>,

        /// JSON file with custom titles/artists/genres/owners
        #[arg(long, env = "COPYCHECK_VOCABULARY")]
        vocabulary: Option<PathBuf>,

        /// Largest accepted upload in megabytes
        #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB, env = "COPYCHECK_MAX_UPLOAD_MB")]
        max_upload_mb: u64,
    },

    /// Check a file or every mp3/wav under a directory
    Check {
        /// File or directory to check
        path: PathBuf,

        /// Output report file (.html, .json, .csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Seed the random source for reproducible results
        #[arg(long, env = "COPYCHECK_SEED")]
        seed: Option<u64>,

        /// JSON file with custom titles/artists/genres/owners
        #[arg(long, env = "COPYCHECK_VOCABULARY")]
        vocabulary: Option<PathBuf>,

        /// Show per-category scores for each file
        #[arg(short, long)]
        verbose: bool,

        /// Only show summary
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "copycheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match args.command {
        Command::Serve { port, host, no_open, seed, vocabulary, max_upload_mb } => {
            let analyzer = build_analyzer(vocabulary.as_deref());
            let config = ServeConfig {
                host,
                port,
                open_browser: !no_open,
                seed,
                max_upload_bytes: max_upload_mb.saturating_mul(1024 * 1024),
            };
            if let Err(e) = copycheck::serve::start(config, analyzer) {
                eprintln!("Server error: {}", e);
                std::process::exit(1);
            }
        }

        Command::Check { path, output, seed, vocabulary, verbose, quiet } => {
            let analyzer = build_analyzer(vocabulary.as_deref());
            let code = run_check(&analyzer, &path, output.as_deref(), seed, verbose, quiet);
            std::process::exit(code);
        }
    }
}

fn build_analyzer(vocabulary: Option<&Path>) -> Analyzer {
    let analyzer = Analyzer::new();
    match vocabulary {
        None => analyzer,
        Some(path) => match Vocabulary::load(path) {
            Ok(v) => analyzer.with_vocabulary(v),
            Err(e) => {
                eprintln!("Failed to load vocabulary {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
    }
}

fn collect_files(path: &Path) -> Vec<PathBuf> {
    if path.is_dir() {
        WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && AudioFormat::from_path(e.path()).is_some())
            .map(|e| e.path().to_path_buf())
            .collect()
    } else {
        vec![path.to_path_buf()]
    }
}

/// Returns the process exit code: see [`exit_code`], or 1 when nothing could
/// be analyzed
fn run_check(
    analyzer: &Analyzer,
    path: &Path,
    output: Option<&Path>,
    seed: Option<u64>,
    verbose: bool,
    quiet: bool,
) -> i32 {
    let files = collect_files(path);
    if files.is_empty() {
        eprintln!("No audio files found (supported: mp3, wav)");
        return 1;
    }

    if !quiet {
        eprintln!("\x1b[1mcopycheck - Song Copyright Similarity (mock)\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        eprintln!("Found {} audio file(s)\n", files.len());
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let pb = if !quiet && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=>-"));
        }
        Some(pb)
    } else {
        None
    };

    let mut reports: Vec<AnalysisReport> = Vec::with_capacity(files.len());
    let mut error_count = 0;

    for file in &files {
        match AudioInput::from_file(file) {
            Ok(input) => {
                if let Some(ref pb) = pb {
                    pb.set_message(input.file_name().to_string());
                }
                reports.push(analyzer.analyze(&mut rng, &input));
            }
            Err(e) => {
                error_count += 1;
                tracing::warn!(file = %file.display(), error = %e, "skipped");
                if !quiet {
                    if let Some(ref pb) = pb {
                        pb.suspend(|| eprintln!("\x1b[31mError:\x1b[0m {}: {}", file.display(), e));
                    } else {
                        eprintln!("\x1b[31mError:\x1b[0m {}: {}", file.display(), e);
                    }
                }
            }
        }
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if reports.is_empty() {
        eprintln!("No files could be analyzed ({} failed)", error_count);
        return 1;
    }

    if !quiet {
        for r in &reports {
            print_report(r, verbose);
        }
    }

    let summary = copycheck::report::Summary::from_reports(&reports);
    if !quiet {
        eprintln!("\n{}", "─".repeat(70));
        eprintln!("\x1b[1mSummary:\x1b[0m {} file(s), {} candidate(s)", summary.total_files, summary.total_candidates);
        eprintln!("  \x1b[31m⚠ High:\x1b[0m    {}", summary.high);
        eprintln!("  \x1b[33m⚡ Caution:\x1b[0m {}", summary.caution);
        eprintln!("  \x1b[34mℹ Info:\x1b[0m    {}", summary.info);
        if error_count > 0 {
            eprintln!("  \x1b[90mSkipped:\x1b[0m   {}", error_count);
        }
    }

    if let Some(output) = output {
        if let Err(e) = copycheck::report::generate(output, &reports) {
            eprintln!("Failed to write report: {}", e);
            return 1;
        }
        if !quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output.display());
        }
    }

    exit_code(&reports)
}

/// 2 if any candidate is high risk, 1 for caution, 0 otherwise
fn exit_code(reports: &[AnalysisReport]) -> i32 {
    match reports.iter().map(|r| r.worst_risk()).max() {
        Some(RiskBand::High) => 2,
        Some(RiskBand::Caution) => 1,
        _ => 0,
    }
}

fn print_report(r: &AnalysisReport, verbose: bool) {
    println!("\x1b[1m{}\x1b[0m ({})", r.file_name, r.format);

    if verbose {
        for (category, percent) in r.similarity.categories() {
            println!("    {:<8} {:>6.2}%", category.to_string(), percent);
        }
    }

    for c in &r.candidates {
        let color = match c.risk {
            RiskBand::High => "\x1b[31m",
            RiskBand::Caution => "\x1b[33m",
            RiskBand::Info => "\x1b[34m",
        };
        println!(
            "  {}{:<10}\x1b[0m {:>6.2}%  {}  {}  {}  {}",
            color,
            format!("[{}]", c.risk),
            c.similarity_percent,
            c.title,
            c.artist,
            c.genre_tag,
            c.copyright_owner
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copycheck::{CandidateMatch, SimilarityReport};
    use tempfile::TempDir;

    fn analyzer() -> Analyzer {
        Analyzer::new().with_skip_probe(true)
    }

    fn report_with(risks: &[f64]) -> AnalysisReport {
        AnalysisReport {
            generated: String::new(),
            file_name: "a.mp3".to_string(),
            format: AudioFormat::Mp3,
            size_bytes: 1,
            audio: None,
            similarity: SimilarityReport { melody: 0.0, rhythm: 0.0, vocal: 0.0, music: 0.0 },
            candidates: risks
                .iter()
                .map(|&p| CandidateMatch {
                    title: "song-x".to_string(),
                    artist: "x".to_string(),
                    genre_tag: "x".to_string(),
                    similarity_percent: p,
                    copyright_owner: "label-A".to_string(),
                    risk: RiskBand::from_percent(p),
                })
                .collect(),
        }
    }

    // ==========================================================================
    // EXIT CODES
    // ==========================================================================
    //
    // `check` is scriptable: 2 means some candidate is HIGH, 1 means CAUTION
    // (or nothing could be analyzed), 0 means only INFO candidates.
    // ==========================================================================

    #[test]
    fn test_exit_code_follows_worst_band() {
        assert_eq!(exit_code(&[report_with(&[75.0])]), 0);
        assert_eq!(exit_code(&[report_with(&[75.0]), report_with(&[85.0])]), 1);
        assert_eq!(exit_code(&[report_with(&[85.0, 90.0]), report_with(&[70.0])]), 2);
        assert_eq!(exit_code(&[]), 0);
    }

    #[test]
    fn test_check_directory_matches_seeded_analysis() {
        let dir = TempDir::new().unwrap();
        for name in ["one.mp3", "two.mp3", "three.wav", "notes.txt"] {
            std::fs::write(dir.path().join(name), [0xFFu8; 64]).unwrap();
        }

        let files = collect_files(dir.path());
        assert_eq!(files.len(), 3);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let expected: Vec<AnalysisReport> = files
                .iter()
                .map(|f| analyzer().analyze(&mut rng, &AudioInput::from_file(f).unwrap()))
                .collect();

            let code = run_check(&analyzer(), dir.path(), None, Some(seed), false, true);
            assert_eq!(code, exit_code(&expected), "seed {}", seed);
        }
    }

    #[test]
    fn test_check_writes_report() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("song.wav"), [1u8; 16]).unwrap();
        let output = dir.path().join("report.json");

        run_check(&analyzer(), &dir.path().join("song.wav"), Some(&output), Some(3), false, true);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json["summary"]["total_files"], 1);
    }

    #[test]
    fn test_check_empty_directory_fails() {
        let dir = TempDir::new().unwrap();
        assert_eq!(run_check(&analyzer(), dir.path(), None, Some(1), false, true), 1);
    }

    #[test]
    fn test_check_unsupported_file_fails() {
        let dir = TempDir::new().unwrap();
        let flac = dir.path().join("song.flac");
        std::fs::write(&flac, [1u8; 16]).unwrap();
        assert_eq!(run_check(&analyzer(), &flac, None, Some(1), false, true), 1);
    }

    #[test]
    fn test_check_all_inputs_failing_fails() {
        let dir = TempDir::new().unwrap();
        // Empty payloads are rejected
        std::fs::write(dir.path().join("a.mp3"), b"").unwrap();
        std::fs::write(dir.path().join("b.wav"), b"").unwrap();
        assert_eq!(run_check(&analyzer(), dir.path(), None, Some(1), false, true), 1);
        assert_eq!(run_check(&analyzer(), dir.path(), None, Some(1), false, false), 1);

        let missing = dir.path().join("missing.mp3");
        assert_eq!(run_check(&analyzer(), &missing, None, Some(1), false, true), 1);
    }
}
