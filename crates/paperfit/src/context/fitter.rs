//! Greedy context window fitting.
//!
//! Candidates are sorted by a [`SortStrategy`] and walked once. Each one is
//! included if it still fits in the running budget and excluded otherwise.
//! There is no backtracking: a skipped candidate is never reconsidered, and
//! the pass makes no attempt at an optimal packing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::budget::Budget;
use super::candidate::Candidate;
use super::tokens::{CharRatioEstimator, TokenEstimator};

/// Order in which candidates are offered to the budget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    /// Most recent first.
    #[default]
    Date,
    /// Ascending by text under root-locale collation (accent- and
    /// case-insensitive first).
    Alphabetical,
    /// Smallest first, to maximize the number of candidates included.
    Size,
}

impl SortStrategy {
    pub const ALL: [SortStrategy; 3] = [Self::Date, Self::Alphabetical, Self::Size];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Alphabetical => "alphabetical",
            Self::Size => "size",
        }
    }

    /// Stable sort in place. Ties always keep their input order.
    pub fn sort(&self, candidates: &mut [&Candidate]) {
        match self {
            Self::Date => candidates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            Self::Alphabetical => {
                let collator = root_collator();
                candidates.sort_by(|a, b| collate(collator.as_ref(), &a.text, &b.text));
            }
            Self::Size => candidates.sort_by_key(|c| c.sort_size()),
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "alphabetical" | "alpha" => Ok(Self::Alphabetical),
            "size" => Ok(Self::Size),
            other => Err(format!(
                "unknown sort strategy '{other}' (expected date, alphabetical, or size)"
            )),
        }
    }
}

/// Root-locale collator at secondary strength: base letters first, then
/// accents, ignoring case.
fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options)
        .map_err(|e| warn!("collator unavailable, falling back to case-folded order: {e}"))
        .ok()
}

/// Collate `a` and `b`, then break ties on the raw text so the order is
/// total. Without a collator, compares case-folded code points.
fn collate(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    let primary = match collator {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    };
    primary.then_with(|| a.cmp(b))
}

/// Outcome of one fitting pass.
///
/// `included` keeps the sort order used. The result is a snapshot of the
/// inputs at call time; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitResult {
    /// Candidates that fit, in sort order.
    pub included: Vec<Candidate>,
    /// Candidates that would have exceeded the budget when evaluated.
    pub excluded: Vec<Candidate>,
    /// Sum of the estimated tokens of `included`.
    pub total_tokens_included: i64,
    /// `ceiling - prompt_tokens - output_reserve`, saturating. May be negative.
    pub max_available_tokens: i64,
    /// Estimated tokens of the prompt text.
    pub prompt_tokens: i64,
}

impl FitResult {
    /// True when no candidate fit. Callers should surface this explicitly
    /// ("no content fits in context window") rather than send an empty request.
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    /// Number of candidates evaluated.
    pub fn total_candidates(&self) -> usize {
        self.included.len() + self.excluded.len()
    }

    /// Ids of the included candidates, in order.
    pub fn included_ids(&self) -> Vec<&str> {
        self.included.iter().map(|c| c.id.as_str()).collect()
    }

    /// Tokens left unused after the included candidates. Zero when the
    /// budget was already exhausted by the prompt.
    pub fn remaining_tokens(&self) -> i64 {
        self.max_available_tokens
            .saturating_sub(self.total_tokens_included)
            .max(0)
    }
}

/// Sorts and packs candidates under a token budget.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use paperfit::context::{Budget, Candidate, ContextFitter, SortStrategy};
///
/// let now = Utc::now();
/// let candidates = vec![
///     Candidate::new("a", "x".repeat(400), now),
///     Candidate::new("b", "y".repeat(40), now),
/// ];
/// let fitter = ContextFitter::new().with_strategy(SortStrategy::Size);
/// let budget = Budget::new(4_020, 128_000);
///
/// let result = fitter.fit(&candidates, "Summarize:", &budget);
/// assert_eq!(result.included_ids(), vec!["b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContextFitter<E = CharRatioEstimator> {
    estimator: E,
    strategy: SortStrategy,
}

impl ContextFitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: TokenEstimator> ContextFitter<E> {
    /// Swap in a different token estimator.
    pub fn with_estimator<F: TokenEstimator>(self, estimator: F) -> ContextFitter<F> {
        ContextFitter {
            estimator,
            strategy: self.strategy,
        }
    }

    pub fn with_strategy(mut self, strategy: SortStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// Fit `candidates` alongside `prompt` under `budget`.
    pub fn fit(&self, candidates: &[Candidate], prompt: &str, budget: &Budget) -> FitResult {
        self.fit_within(candidates, prompt, budget.ceiling(), budget.output_reserve)
    }

    /// Fit against an explicit ceiling and output reserve.
    ///
    /// The inclusion test is `running + tokens <= available`, so a zero-cost
    /// candidate still fits when exactly nothing is available.
    pub fn fit_within(
        &self,
        candidates: &[Candidate],
        prompt: &str,
        ceiling: i64,
        output_reserve: i64,
    ) -> FitResult {
        let prompt_tokens = self.estimator.estimate(prompt);
        let available = ceiling
            .saturating_sub(prompt_tokens)
            .saturating_sub(output_reserve);

        let mut order: Vec<&Candidate> = candidates.iter().collect();
        self.strategy.sort(&mut order);

        let mut included = Vec::new();
        let mut excluded = Vec::new();
        let mut running: i64 = 0;

        for candidate in order {
            let tokens = self.estimator.estimate(&candidate.text);
            // Overflowing i64 can never be within the budget.
            match running.checked_add(tokens) {
                Some(next) if next <= available => {
                    running = next;
                    included.push(candidate.clone());
                }
                _ => excluded.push(candidate.clone()),
            }
        }

        debug!(
            strategy = %self.strategy,
            prompt_tokens,
            available,
            included = included.len(),
            excluded = excluded.len(),
            used = running,
            "fitted candidates into context window"
        );

        FitResult {
            included,
            excluded,
            total_tokens_included: running,
            max_available_tokens: available,
            prompt_tokens,
        }
    }
}

/// Fit with the default four-characters-per-token estimator.
pub fn fit(
    candidates: &[Candidate],
    prompt: &str,
    ceiling: i64,
    output_reserve: i64,
    strategy: SortStrategy,
) -> FitResult {
    ContextFitter::new()
        .with_strategy(strategy)
        .fit_within(candidates, prompt, ceiling, output_reserve)
}
