#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions)]

use std::{path::PathBuf, process};

mod app;
mod config;
mod file;

use clap::Parser;
use texbib::Source;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let cli = Cli::parse();

    setup_errlog(cli.verbosity as usize, cli.quiet)?;

    let config = config::load(cli.config.as_deref())?;
    app::run(cli, config)
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 1 } else { verbosity + 2 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "texbib")]
#[clap(
    about = "Extract citation keys from LaTeX sources and build a BibTeX file \
             from INSPIRE, NASA/ADS and Semantic Scholar"
)]
#[clap(version, author)]
pub struct Cli {
    /// A LaTeX file, or a directory scanned recursively for *.tex files
    #[clap(parse(from_os_str))]
    pub path: PathBuf,

    /// Output BibTeX file (existing entries are retained)
    #[clap(short, long, parse(from_os_str))]
    pub output: Option<PathBuf>,

    /// Maximum number of authors before truncating with 'and others'
    /// (use 0 for no limit)
    #[clap(short = 'a', long)]
    pub max_authors: Option<usize>,

    /// List citation keys found in the LaTeX sources and exit (no lookups)
    #[clap(short, long)]
    pub list_keys: bool,

    /// Start from scratch, ignoring an existing output file
    #[clap(long)]
    pub fresh: bool,

    /// Preferred BibTeX source: 'ads' (default), 'inspire', 'auto' or
    /// 'semantic-scholar'
    #[clap(short = 's', long, parse(try_from_str))]
    pub preferred_source: Option<Source>,

    /// ADS API key (overrides the ADS_API_KEY environment variable)
    #[clap(long)]
    pub ads_api_key: Option<String>,

    /// Semantic Scholar API key (overrides SEMANTIC_SCHOLAR_API_KEY)
    #[clap(long)]
    pub semantic_scholar_api_key: Option<String>,

    /// Path to the config file (default: ~/.texbib.toml)
    #[clap(long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    pub verbosity: u8,

    /// Prevents log output to stderr beyond errors
    #[clap(short, long)]
    pub quiet: bool,
}
