//! Human-readable summaries of a [`FitResult`].
//!
//! Everything here is presentational and derived; nothing feeds back into
//! fitting.

use std::fmt::Write as _;

use serde::Serialize;

use super::fitter::FitResult;

/// Characters of excluded-candidate text shown in a preview.
pub const PREVIEW_CHARS: usize = 50;

/// How many candidates made it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    /// Number of included candidates.
    pub can_fit: usize,
    /// Number of candidates evaluated.
    pub total: usize,
    /// `round(can_fit / total * 100)`, or 100 when there were no candidates.
    pub percentage: u32,
}

/// Capacity summary for `result`.
pub fn capacity(result: &FitResult) -> Capacity {
    let can_fit = result.included.len();
    let total = result.total_candidates();
    let percentage = if total == 0 {
        100
    } else {
        (can_fit as f64 / total as f64 * 100.0).round() as u32
    };
    Capacity {
        can_fit,
        total,
        percentage,
    }
}

/// Multi-line report of token usage plus a short preview of every excluded
/// candidate.
pub fn preview(result: &FitResult) -> String {
    let cap = capacity(result);
    let mut out = String::new();

    let _ = writeln!(out, "Prompt tokens:    {}", result.prompt_tokens);
    let _ = writeln!(out, "Included tokens:  {}", result.total_tokens_included);
    let _ = writeln!(out, "Available tokens: {}", result.max_available_tokens);
    let _ = writeln!(
        out,
        "Candidates:       {}/{} fit ({}%)",
        cap.can_fit, cap.total, cap.percentage
    );

    if result.is_empty() && cap.total > 0 {
        let _ = writeln!(out, "No content fits in the context window.");
    }

    if !result.excluded.is_empty() {
        let _ = writeln!(out, "Excluded ({}):", result.excluded.len());
        for candidate in &result.excluded {
            let _ = writeln!(
                out,
                "  - [{}] {}",
                candidate.id,
                candidate.preview(PREVIEW_CHARS).replace('\n', " ")
            );
        }
    }

    out
}

impl FitResult {
    /// Shorthand for [`capacity`].
    pub fn capacity(&self) -> Capacity {
        capacity(self)
    }

    /// Shorthand for [`preview`].
    pub fn preview(&self) -> String {
        preview(self)
    }

    /// Format as a short log-friendly string.
    pub fn to_log_string(&self) -> String {
        let cap = self.capacity();
        format!(
            "fit: {}/{} candidates ({}%), ~{} of {} tokens, prompt ~{}",
            cap.can_fit,
            cap.total,
            cap.percentage,
            self.total_tokens_included,
            self.max_available_tokens,
            self.prompt_tokens,
        )
    }
}
