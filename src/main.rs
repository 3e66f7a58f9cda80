use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use fourtrack::config::{AppConfig, ConfigManager, MAX_SEED};
use fourtrack::data::{SequenceKind, TextConnector};
use fourtrack::engines::analysis::{
    BatchAnalyzer, BatchResult, FailedSequence, SequenceAnalyzer, SequenceReport,
};
use fourtrack::engines::metrics::MetricsEngine;
use fourtrack::engines::validation::{RobustnessReport, ValidationOrchestrator};
use fourtrack::report::{self, ReportAggregator, RunMetadata};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Four-track analysis of DNA and constant digit sequences"
)]
struct Cli {
    /// TOML configuration file (FOURTRACK__SECTION__KEY variables override it)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Seed for the null-model generator (at most 2^63 - 1); drawn at random and reported when unset
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(..=MAX_SEED))]
    seed: Option<u64>,

    /// Number of null-model reference sequences
    #[arg(long, global = true)]
    trials: Option<usize>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyse a single sequence file
    Analyze(AnalyzeArgs),

    /// Run the fixed edge-case robustness suite
    Robustness(RobustnessArgs),

    /// Analyse every .txt/.dat file in a directory
    Batch(BatchArgs),

    /// Robustness suite plus batch analysis, aggregated and graded
    Report(ReportArgs),

    /// Print, describe or write the effective configuration
    Config(ConfigArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Auto,
    Dna,
    Digits,
}

impl From<KindArg> for SequenceKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Auto => SequenceKind::Auto,
            KindArg::Dna => SequenceKind::Dna,
            KindArg::Digits => SequenceKind::Digits,
        }
    }
}

#[derive(Args)]
struct AnalyzeArgs {
    #[arg(value_hint = ValueHint::FilePath)]
    file: PathBuf,

    #[arg(long, value_enum, default_value = "auto")]
    kind: KindArg,

    /// Name used in the report (defaults to the file name)
    #[arg(long)]
    name: Option<String>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    markdown: Option<PathBuf>,
}

#[derive(Args)]
struct RobustnessArgs {
    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct BatchArgs {
    #[arg(value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    #[arg(long, value_enum, default_value = "auto")]
    kind: KindArg,

    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    #[arg(long, value_enum, default_value = "auto")]
    kind: KindArg,

    #[arg(long, value_hint = ValueHint::FilePath)]
    markdown: Option<PathBuf>,

    #[arg(long, value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Write the effective configuration as TOML
    #[arg(long, value_hint = ValueHint::FilePath)]
    write: Option<PathBuf>,

    /// Print every field with its default and description
    #[arg(long)]
    describe: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let manager = load_manager(cli.config.as_deref(), cli.seed, cli.trials)?;

    match cli.command {
        Command::Analyze(args) => analyze(&manager, args),
        Command::Robustness(args) => robustness(&manager, args),
        Command::Batch(args) => batch(&manager, args),
        Command::Report(args) => evaluation_report(&manager, args),
        Command::Config(args) => show_config(&manager, args),
    }
}

/// Configuration file and environment, then command-line overrides. Any error here
/// ends the process with a non-zero status.
fn load_manager(
    path: Option<&Path>,
    seed: Option<u64>,
    trials: Option<usize>,
) -> anyhow::Result<ConfigManager> {
    let manager = ConfigManager::new();
    manager.load(path).context("failed to load configuration")?;
    manager
        .update(|c| {
            if let Some(trials) = trials {
                c.null_model.trials = trials;
            }
            if let Some(seed) = seed {
                c.null_model.seed = Some(seed);
            }
        })
        .context("invalid command-line override")?;
    Ok(manager)
}

/// Configured seed, or one drawn now and logged so the run can be repeated
fn resolve_seed(config: &AppConfig) -> u64 {
    config.null_model.seed.unwrap_or_else(|| {
        let seed = rand::thread_rng().gen_range(0..=MAX_SEED);
        log::info!("No seed configured, using {}", seed);
        seed
    })
}

enum AnalyzeOutcome {
    Analyzed(Box<SequenceReport>),
    /// The input held a symbol outside its alphabet; the command still succeeds
    Failed(FailedSequence),
}

fn analyze_file(
    config: &AppConfig,
    file: &Path,
    kind: SequenceKind,
    name: Option<String>,
) -> anyhow::Result<AnalyzeOutcome> {
    let mut raw = TextConnector::load(file, kind, &config.analysis)
        .with_context(|| format!("cannot read {}", file.display()))?;
    if let Some(name) = name {
        raw.name = name;
    }

    let analyzer = SequenceAnalyzer::new(config)?;
    let mut rng = StdRng::seed_from_u64(resolve_seed(config));

    match analyzer.analyze_raw(&raw, &mut rng) {
        Ok(sequence_report) => Ok(AnalyzeOutcome::Analyzed(Box::new(sequence_report))),
        Err(e) if e.is_validation() => {
            log::error!("{}: {}", raw.name, e);
            Ok(AnalyzeOutcome::Failed(FailedSequence {
                name: raw.name,
                error: e.to_string(),
            }))
        }
        Err(e) => Err(e.into()),
    }
}

fn analyze(manager: &ConfigManager, args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = manager.get();

    match analyze_file(&config, &args.file, args.kind.into(), args.name)? {
        AnalyzeOutcome::Analyzed(sequence_report) => {
            let markdown = report::render_sequence(&sequence_report)?;
            println!("{}", markdown);
            if let Some(path) = &args.json {
                report::write_json(&sequence_report, path)?;
            }
            if let Some(path) = &args.markdown {
                report::write_text(&markdown, path)?;
            }
        }
        AnalyzeOutcome::Failed(failed) => {
            println!("Analysis of {} failed: {}", failed.name, failed.error);
            if let Some(path) = &args.json {
                report::write_json(&failed, path)?;
            }
        }
    }
    Ok(())
}

fn run_suite(config: &AppConfig) -> RobustnessReport {
    let orchestrator = ValidationOrchestrator::new(MetricsEngine::from_config(&config.analysis));
    orchestrator.run_robustness_report("edge-inputs".to_string())
}

fn robustness(manager: &ConfigManager, args: RobustnessArgs) -> anyhow::Result<()> {
    let suite = run_suite(&manager.get());

    for result in &suite.test_results {
        println!(
            "{:<18} {:<4} {}",
            result.test_name,
            if result.passed { "ok" } else { "FAIL" },
            result.error.as_deref().unwrap_or(&result.interpretation)
        );
    }
    println!("{}", suite.summary);

    if let Some(path) = &args.json {
        report::write_json(&suite, path)?;
    }
    Ok(())
}

fn run_batch(config: &AppConfig, dir: &Path, kind: SequenceKind) -> anyhow::Result<BatchResult> {
    let sequences = TextConnector::load_dir(dir, kind, &config.analysis)
        .with_context(|| format!("cannot read sequences from {}", dir.display()))?;
    let analyzer = SequenceAnalyzer::new(config)?;
    let seed = resolve_seed(config);
    Ok(BatchAnalyzer::new(&analyzer).run(sequences, seed)?)
}

fn batch(manager: &ConfigManager, args: BatchArgs) -> anyhow::Result<()> {
    let config = manager.get();
    let result = run_batch(&config, &args.dir, args.kind.into())?;

    for r in &result.reports {
        println!(
            "{:<24} {:>7} codes  best {}  score {:.3}  significant {}/{}",
            r.metadata.name,
            r.metadata.code_length,
            r.four_track.summary.best_track,
            r.four_track.summary.average_score,
            r.significant_count(),
            r.null_comparisons.len()
        );
    }
    for f in &result.failed {
        println!("{:<24} FAILED  {}", f.name, f.error);
    }

    if let Some(path) = &args.json {
        report::write_json(&result, path)?;
    }
    Ok(())
}

fn evaluation_report(manager: &ConfigManager, args: ReportArgs) -> anyhow::Result<()> {
    let config = manager.get();
    let suite = run_suite(&config);
    let batch = run_batch(&config, &args.dir, args.kind.into())?;

    let run = RunMetadata {
        seed: batch.seed,
        trials: config.null_model.trials,
        significance_threshold: config.null_model.significance_threshold,
    };
    let evaluation = ReportAggregator::new(config.report.clone()).aggregate(Some(suite), Some(batch), run);

    let markdown = report::render_evaluation(&evaluation)?;
    match &args.markdown {
        Some(path) => report::write_text(&markdown, path)?,
        None => println!("{}", markdown),
    }
    if let Some(path) = &args.json {
        report::write_json(&evaluation, path)?;
    }

    println!(
        "Overall score {:.1}% (grade {})",
        evaluation.performance.overall_score, evaluation.performance.grade
    );
    Ok(())
}

fn show_config(manager: &ConfigManager, args: ConfigArgs) -> anyhow::Result<()> {
    if args.describe {
        println!("{}", report::to_json(&manager.get().manifests())?);
    } else {
        println!("{}", manager.to_toml()?);
    }

    if let Some(path) = &args.write {
        manager
            .save_to_file(path)
            .with_context(|| format!("cannot write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn quick_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.null_model.trials = 20;
        config.null_model.seed = Some(5);
        config
    }

    #[test]
    fn test_invalid_symbol_is_recorded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acgtx.txt");
        fs::write(&path, "ACGTX").unwrap();

        let outcome = analyze_file(&quick_config(), &path, SequenceKind::Auto, None).unwrap();
        match outcome {
            AnalyzeOutcome::Failed(failed) => {
                assert_eq!(failed.name, "acgtx.txt");
                assert!(failed.error.contains("'X'"));
            }
            AnalyzeOutcome::Analyzed(_) => panic!("ACGTX must not analyse"),
        }
    }

    #[test]
    fn test_valid_file_is_analysed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gc.txt");
        fs::write(&path, "GCGCGCGCGC").unwrap();

        let outcome = analyze_file(&quick_config(), &path, SequenceKind::Auto, Some("gc".into())).unwrap();
        match outcome {
            AnalyzeOutcome::Analyzed(report) => assert_eq!(report.metadata.name, "gc"),
            AnalyzeOutcome::Failed(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        assert!(analyze_file(&quick_config(), &path, SequenceKind::Auto, None).is_err());
    }

    #[test]
    fn test_bad_overrides_are_fatal() {
        assert!(load_manager(None, None, Some(1)).is_err());
        assert!(load_manager(None, Some(u64::MAX), None).is_err());

        let manager = load_manager(None, Some(MAX_SEED), Some(50)).unwrap();
        assert_eq!(manager.get().null_model.trials, 50);
        assert_eq!(manager.get().null_model.seed, Some(MAX_SEED));
    }

    #[test]
    fn test_missing_config_file_is_fatal() {
        assert!(load_manager(Some(Path::new("/no/such/fourtrack.toml")), None, None).is_err());
    }

    #[test]
    fn test_cli_rejects_unstorable_seed() {
        let parsed = Cli::try_parse_from(["fourtrack", "--seed", "18446744073709551615", "config"]);
        assert!(parsed.is_err());
        let parsed = Cli::try_parse_from(["fourtrack", "--seed", "9223372036854775807", "config"]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_drawn_seed_is_storable() {
        let config = AppConfig::default();
        for _ in 0..20 {
            assert!(resolve_seed(&config) <= MAX_SEED);
        }
    }
}
