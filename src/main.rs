use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use mdtrain::audit::check_dataset;
use mdtrain::domain::{IngestionOutcome, OutcomeKind};
use mdtrain::extract::SectionExtractor;
use mdtrain::ingest::{IngestReport, IngestionPipeline};
use mdtrain::normalize::InstructionNormalizer;
use mdtrain::store::{CommandStore, MemoryStore, resolve_executable};
use mdtrain::synth::{RecordSynthesizer, builtin_examples, generate_dataset, load_examples};

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, GenerateArgs};
use config::Config;

fn setup_logging(level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mdtrain")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("mdtrain.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level.unwrap_or("info"));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Generate(args) => handle_generate_command(args, None, config).map(|_| ()),
        Commands::Normalize { dataset, keyword } => {
            let dataset = dataset.as_ref().unwrap_or(&config.dataset.path);
            handle_normalize_command(dataset, keyword.as_deref(), config)
        }
        Commands::Build { generate, keyword } => {
            let output = handle_generate_command(generate, keyword.as_deref(), config)?;
            handle_normalize_command(&output, keyword.as_deref(), config)
        }
        Commands::Ingest {
            dataset,
            executable,
            dry_run,
        } => {
            let dataset = dataset.as_ref().unwrap_or(&config.dataset.path);
            handle_ingest_command(dataset, executable.as_deref(), *dry_run, cli.is_verbose(), config)
        }
        Commands::Check { dataset, keyword } => {
            let dataset = dataset.as_ref().unwrap_or(&config.dataset.path);
            handle_check_command(dataset, keyword.as_deref(), config)
        }
    }
}

fn build_synthesizer(keyword: Option<&str>, config: &Config) -> Result<RecordSynthesizer> {
    let mut synthesizer = RecordSynthesizer::new(keyword.unwrap_or(config.normalize.keyword.as_str()));
    if config.extract.include_builtin_examples {
        synthesizer = synthesizer.with_examples(builtin_examples());
    }
    if let Some(path) = &config.extract.manual_examples {
        let extra = load_examples(path).context(format!("Failed to load examples from {}", path.display()))?;
        synthesizer = synthesizer.with_examples(extra);
    }
    Ok(synthesizer)
}

fn handle_generate_command(args: &GenerateArgs, keyword: Option<&str>, config: &Config) -> Result<PathBuf> {
    let document = args.document.as_ref().unwrap_or(&config.extract.document);
    let output = args.output.clone().unwrap_or_else(|| config.dataset.path.clone());
    info!("Generating dataset from {} into {}", document.display(), output.display());

    let synthesizer = build_synthesizer(keyword, config)?;
    let extractor = SectionExtractor::new(&config.extract.heading_prefix)
        .context(format!("Invalid heading prefix '{}'", config.extract.heading_prefix))?;
    let report = generate_dataset(document, &output, &extractor, &synthesizer).context("Dataset generation failed")?;

    println!(
        "{} {} ({} examples, {} sections, {} records)",
        "Dataset created:".green(),
        report.output.display(),
        report.manual_count,
        report.section_count,
        report.record_count
    );
    Ok(output)
}

fn handle_normalize_command(dataset: &Path, keyword: Option<&str>, config: &Config) -> Result<()> {
    let normalizer = InstructionNormalizer::new(keyword.unwrap_or(config.normalize.keyword.as_str()));
    let report = normalizer
        .normalize_file(dataset)
        .context(format!("Failed to normalize {}", dataset.display()))?;

    for err in &report.malformed {
        println!("{} {}", "Skipping invalid JSON:".yellow(), err);
    }
    println!(
        "{} {} of {} instructions in {}",
        "Updated".green(),
        report.updated,
        report.records,
        dataset.display()
    );
    Ok(())
}

fn print_outcome(outcome: &IngestionOutcome, verbose: bool) {
    match &outcome.kind {
        OutcomeKind::Saved => {
            if verbose {
                println!("{} line {}: {}", "Saved".green(), outcome.line_number, outcome.description);
            }
        }
        OutcomeKind::Skipped => {
            println!("{} line {}: incomplete entry", "Skipping".yellow(), outcome.line_number);
        }
        OutcomeKind::Rejected { stdout, stderr, .. } => {
            println!(
                "{} line {}: {}",
                "Failed to save".red(),
                outcome.line_number,
                outcome.description
            );
            println!("  Error: {}", stderr);
            println!("  Output: {}", stdout);
        }
        OutcomeKind::Malformed(reason) => {
            println!("{} line {}: {}", "Invalid JSON".red(), outcome.line_number, reason);
        }
        OutcomeKind::Error(message) => {
            println!("{} line {}: {}", "Unexpected error".red(), outcome.line_number, message);
        }
    }
}

fn print_summary(report: &IngestReport) {
    println!("{}", "-".repeat(50));
    println!("Import completed.");
    println!("{} {}", "Successfully added:".green(), report.success_count);
    println!("{} {}", "Errors:".red(), report.error_count);
    if report.skipped_count > 0 {
        println!("{} {}", "Skipped:".yellow(), report.skipped_count);
    }
}

fn handle_ingest_command(
    dataset: &Path,
    executable: Option<&Path>,
    dry_run: bool,
    verbose: bool,
    config: &Config,
) -> Result<()> {
    let result = if dry_run {
        println!("{}", "Dry run: records are not sent to the store".yellow());
        let mut pipeline = IngestionPipeline::new(MemoryStore::new());
        pipeline.run(dataset, |o| print_outcome(o, verbose))
    } else {
        let explicit = executable.or(config.ingest.executable.as_deref());
        let exe = resolve_executable(explicit, &config.ingest.program).context("Cannot ingest without the store")?;
        println!("Using executable: {}", exe.display());
        println!("Reading from: {}", dataset.display());
        println!("{}", "-".repeat(50));

        let store = CommandStore::new(exe).with_save_flag(&config.ingest.save_flag);
        let mut pipeline = IngestionPipeline::new(store);
        pipeline.run(dataset, |o| print_outcome(o, verbose))
    };
    let report = result.context(format!("Failed to ingest {}", dataset.display()))?;

    print_summary(&report);
    Ok(())
}

fn handle_check_command(dataset: &Path, keyword: Option<&str>, config: &Config) -> Result<()> {
    let keyword = keyword.unwrap_or(config.normalize.keyword.as_str());
    let report = check_dataset(dataset, keyword).context(format!("Failed to check {}", dataset.display()))?;

    for err in &report.malformed {
        println!("{} {}", "Invalid JSON:".red(), err);
    }
    for line in &report.incomplete {
        println!("{} line {}", "Empty instruction or output:".red(), line);
    }
    for line in &report.missing_keyword {
        println!("{} line {} does not mention '{}'", "Missing keyword:".yellow(), line, keyword);
    }
    println!("{} records in {}", report.records, dataset.display());

    if !report.is_clean() {
        bail!("{} has problems", dataset.display());
    }
    println!("{}", "Dataset is clean".green());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdtrain::domain::Section;

    fn config_without_examples() -> Config {
        let mut config = Config::default();
        config.extract.include_builtin_examples = false;
        config
    }

    #[test]
    fn test_build_keyword_reaches_synthesizer() {
        let synthesizer = build_synthesizer(Some("Rust"), &config_without_examples()).unwrap();
        let section = Section {
            title: "Lists".to_string(),
            body: "- a",
        };
        let [explain, examples] = synthesizer.section_records(&section);

        assert_eq!(synthesizer.domain(), "Rust");
        assert_eq!(explain.instruction, "Explain Rust syntax for Lists.");
        assert_eq!(examples.instruction, "Provide examples of Lists in Rust.");
    }

    #[test]
    fn test_synthesizer_defaults_to_configured_keyword() {
        let mut config = config_without_examples();
        config.normalize.keyword = "AsciiDoc".to_string();
        let synthesizer = build_synthesizer(None, &config).unwrap();

        assert_eq!(
            synthesizer.document_record("doc").instruction,
            "Generate a comprehensive AsciiDoc cheat sheet."
        );
    }

    #[test]
    fn test_build_generates_and_normalizes_with_cli_keyword() {
        let temp = tempfile::TempDir::new().unwrap();
        let document = temp.path().join("doc.md");
        let output = temp.path().join("out.jsonl");
        fs::write(&document, "## 1. Lists\n- a\n").unwrap();

        let args = GenerateArgs {
            document: Some(document),
            output: Some(output.clone()),
        };
        let config = config_without_examples();
        let written = handle_generate_command(&args, Some("Rust"), &config).unwrap();
        handle_normalize_command(&written, Some("Rust"), &config).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        let instructions: Vec<String> = text
            .lines()
            .map(|l| serde_json::from_str::<mdtrain::domain::DatasetRecord>(l).unwrap().instruction)
            .collect();
        assert_eq!(
            instructions,
            vec![
                "Explain Rust syntax for Lists.",
                "Provide examples of Lists in Rust.",
                "Generate a comprehensive Rust cheat sheet.",
            ]
        );
    }
}
