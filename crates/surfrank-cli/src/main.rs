#![forbid(unsafe_code)]

mod crawl;
mod output;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use output::{RankReport, SamplingSection};
use surfrank_core::{RankConfig, RankError, iterate_pagerank, sample_pagerank};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "surfrank: PageRank for a directory of HTML pages",
    long_about = None
)]
struct Cli {
    /// Directory holding the corpus's `.html` pages.
    #[arg(value_name = "CORPUS")]
    corpus: PathBuf,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// TOML config file. Defaults to `surfrank.toml` in the corpus directory.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Damping factor, strictly between 0 and 1.
    #[arg(long)]
    damping: Option<f64>,

    /// Random-walk steps taken by the sampler.
    #[arg(long)]
    samples: Option<usize>,

    /// Convergence threshold for the iterative solver.
    #[arg(long)]
    epsilon: Option<f64>,

    /// Sweep cap for the iterative solver.
    #[arg(long)]
    max_sweeps: Option<usize>,

    /// Seed for the sampler, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Run only one estimator.
    #[arg(long, value_enum)]
    only: Option<Estimator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Estimator {
    Sampling,
    Iteration,
}

impl Cli {
    fn runs(&self, estimator: Estimator) -> bool {
        self.only.is_none_or(|only| only == estimator)
    }

    /// Layer flags over the config file over the built-in defaults.
    fn rank_config(&self) -> anyhow::Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => RankConfig::load(path)?,
            None => RankConfig::load_for_corpus(&self.corpus)?,
        };
        if let Some(damping) = self.damping {
            config.damping = damping;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(max_sweeps) = self.max_sweeps {
            config.max_sweeps = max_sweeps;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate().map_err(rank_failure)?;
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SURFRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "surfrank_core=debug,surfrank_cli=debug,info"
        } else {
            "warn"
        })
    });

    let format = env::var("SURFRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

/// Attach the error's code and remediation hint for the terminal.
fn rank_failure(err: RankError) -> anyhow::Error {
    let headline = format!("{} ({})", err.kind(), err.code());
    let context = match err.kind().hint() {
        Some(hint) => format!("{headline}. {hint}"),
        None => headline,
    };
    anyhow::Error::new(err).context(context)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let config = cli.rank_config()?;
    debug!(?config, "resolved rank config");

    let corpus = crawl::crawl(&cli.corpus)?;
    info!(
        pages = corpus.len(),
        links = corpus.link_count(),
        sinks = corpus.sinks().count(),
        "corpus loaded"
    );

    let sampling = if cli.runs(Estimator::Sampling) {
        let ranks = sample_pagerank(&corpus, &config).map_err(rank_failure)?;
        Some(SamplingSection {
            samples: config.samples,
            seed: config.seed,
            ranks,
        })
    } else {
        None
    };

    let iteration = if cli.runs(Estimator::Iteration) {
        Some(iterate_pagerank(&corpus, &config).map_err(rank_failure)?)
    } else {
        None
    };

    let report = RankReport {
        corpus: cli.corpus.display().to_string(),
        pages: corpus.len(),
        links: corpus.link_count(),
        damping: config.damping,
        sampling,
        iteration,
    };

    let mode = output::resolve_output_mode(cli.json);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render(mode, &report, &mut out)?;
    out.flush().context("Failed to flush stdout")
}
