use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ompminer")]
#[command(about = "Feature extractor for OpenMP compiler-test corpora", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a corpus of OpenMP test files and export records
    Analyze {
        /// Corpus root to scan
        path: PathBuf,

        /// Export file (defaults to the config's export path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print aggregate statistics after the run
        #[arg(long)]
        stats: bool,
    },

    /// Summarize a previously exported record set
    Stats {
        /// Export file produced by `analyze`
        input: PathBuf,
    },
}
