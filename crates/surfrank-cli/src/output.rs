//! Output layer: plain text for people, JSON for scripts.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--json` flag
//! 2. `FORMAT` env var → `"text"` | `"json"`
//! 3. Default: [`OutputMode::Text`]

use std::io::{self, Write};

use serde::Serialize;
use surfrank_core::{IterationReport, RankMapping};

/// The output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One `page: score` line per page, four decimals, sorted by page.
    Text,
    /// A single pretty-printed JSON object with full-precision scores.
    Json,
}

/// Core resolution logic, separated from the environment for testability.
fn resolve_output_mode_inner(json_flag: bool, format_env: Option<&str>) -> OutputMode {
    if json_flag {
        return OutputMode::Json;
    }
    match format_env.map(str::to_ascii_lowercase).as_deref() {
        Some("json") => OutputMode::Json,
        _ => OutputMode::Text,
    }
}

/// Resolve the output mode from the `--json` flag and the `FORMAT` env var.
pub fn resolve_output_mode(json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    resolve_output_mode_inner(json_flag, env_val.as_deref())
}

/// Sampler output plus the parameters that produced it.
#[derive(Debug, Serialize)]
pub struct SamplingSection {
    pub samples: usize,
    pub seed: Option<u64>,
    pub ranks: RankMapping,
}

/// Everything one `surfrank` run reports.
#[derive(Debug, Serialize)]
pub struct RankReport {
    pub corpus: String,
    pub pages: usize,
    pub links: usize,
    pub damping: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling: Option<SamplingSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iteration: Option<IterationReport>,
}

impl RankReport {
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()> {
        if let Some(sampling) = &self.sampling {
            writeln!(w, "PageRank Results from Sampling (n = {})", sampling.samples)?;
            write!(w, "{}", sampling.ranks)?;
        }
        if let Some(iteration) = &self.iteration {
            writeln!(w, "PageRank Results from Iteration")?;
            write!(w, "{}", iteration.ranks)?;
        }
        Ok(())
    }
}

/// Write `report` to `w` in the given mode.
///
/// # Errors
///
/// Returns an error if writing or JSON serialization fails.
pub fn render(mode: OutputMode, report: &RankReport, w: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, report)?;
            writeln!(w)?;
        }
        OutputMode::Text => report.render_text(w)?,
    }
    Ok(())
}
