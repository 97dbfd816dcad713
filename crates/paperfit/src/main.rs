//! Fit stored summaries into a model's context window and report the result.
//!
//! Reads a JSON array of candidates (`id`, `text`, RFC 3339 `timestamp`,
//! optional `size`) from a file or stdin.
//!
//! # Examples
//!
//! ```sh
//! # Human-readable report, most recent summaries first
//! paperfit --candidates summaries.json --prompt "Compare these papers."
//!
//! # Smallest first against a specific model, full result as JSON
//! cat summaries.json | paperfit --model gpt-3.5-turbo --sort size --json
//!
//! # Print the prompt with the fitted summaries appended
//! paperfit --config paperfit.toml --candidates summaries.json \
//!   --prompt-file prompt.txt --assemble
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use paperfit::context::{FitResult, SortStrategy, augment_prompt};
use paperfit::{ConfigError, FitConfig, parse_candidates};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Fit stored summaries into a model's context window.
#[derive(Parser)]
#[command(name = "paperfit", version)]
struct Cli {
    // ── Inputs ─────────────────────────────────────────────────
    /// TOML config file (model, max_context_tokens, output_reserve, sort)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON candidate file, or `-` for stdin (the default)
    #[arg(long)]
    candidates: Option<String>,

    /// Prompt text that will accompany the candidates
    #[arg(long, conflicts_with = "prompt_file")]
    prompt: Option<String>,

    /// Read the prompt text from a file
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    // ── Budget overrides ───────────────────────────────────────
    /// Model name, used to look up its context window
    #[arg(long)]
    model: Option<String>,

    /// Cap on context tokens
    #[arg(long, allow_negative_numbers = true)]
    max_context_tokens: Option<i64>,

    /// Explicit model context window, bypassing the lookup table
    #[arg(long, allow_negative_numbers = true)]
    context_window: Option<i64>,

    /// Tokens reserved for the response
    #[arg(
        long,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    output_reserve: Option<i64>,

    /// Candidate ordering: date, alphabetical, or size
    #[arg(long)]
    sort: Option<SortStrategy>,

    // ── Output mode ────────────────────────────────────────────
    /// Print the full fit result as JSON
    #[arg(long, conflicts_with = "assemble")]
    json: bool,

    /// Print the prompt with the included candidates appended
    #[arg(long)]
    assemble: bool,
}

fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_candidates_source(source: Option<&str>) -> Result<String, ConfigError> {
    match source {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ConfigError::Io {
                    path: PathBuf::from("<stdin>"),
                    source: e,
                })?;
            Ok(buf)
        }
        Some(path) => read_to_string(Path::new(path)),
    }
}

/// Layer CLI flags over the config file (or defaults).
fn resolve_config(cli: &Cli) -> Result<FitConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => FitConfig::load(path)?,
        None => FitConfig::default(),
    };

    if let Some(model) = &cli.model {
        config = config.with_model(model);
    }
    if let Some(tokens) = cli.max_context_tokens {
        config = config.with_max_context_tokens(tokens);
    }
    if let Some(tokens) = cli.context_window {
        config = config.with_context_window(tokens);
    }
    if let Some(tokens) = cli.output_reserve {
        config = config.with_output_reserve(tokens);
    }
    if let Some(sort) = cli.sort {
        config = config.with_sort(sort);
    }
    Ok(config)
}

fn render(cli: &Cli, prompt: &str, result: &FitResult) -> Result<String, ConfigError> {
    if cli.json {
        Ok(format!("{}\n", serde_json::to_string_pretty(result)?))
    } else if cli.assemble {
        Ok(augment_prompt(prompt, result))
    } else {
        Ok(result.preview())
    }
}

fn run(cli: &Cli) -> Result<String, ConfigError> {
    let config = resolve_config(cli)?;

    let prompt = match (&cli.prompt, &cli.prompt_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_to_string(path)?,
        (None, None) => String::new(),
    };

    let candidates = parse_candidates(&read_candidates_source(cli.candidates.as_deref())?)?;

    let budget = config.build_budget();
    let result = config.build_fitter().fit(&candidates, &prompt, &budget);

    info!(model = %config.model, ceiling = budget.ceiling(), "{}", result.to_log_string());
    if result.is_empty() && !candidates.is_empty() {
        warn!(
            candidates = candidates.len(),
            available = result.max_available_tokens,
            "no content fits in context window"
        );
    }

    render(cli, &prompt, &result)
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match run(&cli) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
