use anyhow::Result;
use clap::Parser;
use log::info;
use ompminer::analyzers::CorpusAnalyzer;
use ompminer::cli::{Cli, Commands};
use ompminer::config::AnalysisConfig;
use ompminer::io::output::{ExportFile, MemorySink};
use ompminer::io::walker::CorpusWalker;
use ompminer::parsing::NullParser;
use ompminer::stats::AnalysisStats;
use std::fs::File;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            output,
            config,
            stats,
        } => run_analyze(path, output, config, stats),
        Commands::Stats { input } => run_stats(input),
    }
}

fn run_analyze(
    path: PathBuf,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    print_stats: bool,
) -> Result<()> {
    let config = match config_path {
        Some(p) => AnalysisConfig::load(&p)?,
        None => AnalysisConfig::default(),
    };

    let files = CorpusWalker::new(path)
        .with_patterns(config.patterns.clone())
        .with_extensions(config.extensions.clone())
        .walk()?;

    // No real front end is wired in here; the pipeline degrades to
    // text-level signals under the null parser.
    let analyzer = CorpusAnalyzer::new(Box::new(NullParser), config.parser_args.clone());
    let mut sink = MemorySink::new();
    let summary = analyzer.analyze_all(&files, &mut sink)?;

    let export_path = output.unwrap_or(config.export_path);
    let export = ExportFile::new(sink.records);
    let mut file = File::create(&export_path)?;
    export.write_to(&mut file)?;
    info!(
        "exported {} records to {} ({} failed)",
        export.metadata.total_records,
        export_path.display(),
        summary.failed
    );

    if print_stats {
        println!("{}", serde_json::to_string_pretty(&summary.stats)?);
    }

    Ok(())
}

fn run_stats(input: PathBuf) -> Result<()> {
    let mut file = File::open(&input)?;
    let export = ExportFile::read_from(&mut file)?;

    let mut stats = AnalysisStats::default();
    for record in &export.records {
        stats.observe(record);
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
