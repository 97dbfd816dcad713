//! Context window fitting for LLM-assisted reading tools.
//!
//! `paperfit` decides which previously generated text blocks (summaries of
//! papers, notes, annotations) fit into a single language-model request
//! alongside a prompt. Candidates are sorted by a chosen strategy and packed
//! greedily under a token budget derived from the user's cap and the
//! model's published context window.
//!
//! Everything here is pure and synchronous. Gathering candidates, sending the
//! request and persisting the response are the caller's business.
//!
//! # Getting started
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use paperfit::prelude::*;
//!
//! let summaries = vec![
//!     Candidate::new("smith-2023", "x".repeat(4_000), Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()),
//!     Candidate::new("lee-2024", "y".repeat(4_000), Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
//! ];
//!
//! let config = FitConfig::default()
//!     .with_model("gpt-4o-mini")
//!     .with_max_context_tokens(5_100)
//!     .with_sort(SortStrategy::Date);
//!
//! let result = config
//!     .build_fitter()
//!     .fit(&summaries, "Compare these papers.", &config.build_budget());
//!
//! // 5,100 - 6 (prompt) - 4,000 (reserve) leaves room for one 1,000-token summary.
//! assert_eq!(result.included_ids(), vec!["lee-2024"]);
//! println!("{}", result.preview());
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`context`] | Token estimation, budgets, the greedy [`ContextFitter`](context::ContextFitter), reports and context assembly |
//! | [`config`] | [`FitConfig`](config::FitConfig) with defaults, TOML loading and candidate parsing |
//! | [`error`] | [`ConfigError`](error::ConfigError) for file and input handling |

pub mod config;
pub mod context;
pub mod error;
pub mod prelude;

pub use config::{FitConfig, parse_candidates};
pub use error::ConfigError;
