//! Token budget for a single model request.
//!
//! The effective ceiling is the smaller of the user-configured cap and the
//! selected model's published context window. A fixed reserve is held back
//! for the model's response; whatever remains after the prompt is what the
//! fitter may spend on candidates.

use serde::{Deserialize, Serialize};

/// Tokens reserved for the expected response.
pub const DEFAULT_OUTPUT_RESERVE: i64 = 4000;

/// Default user-configured cap on context tokens.
pub const DEFAULT_MAX_CONTEXT_TOKENS: i64 = 100_000;

/// Context window assumed for models missing from the lookup table.
pub const DEFAULT_CONTEXT_WINDOW: i64 = 128_000;

/// Budget inputs for one fitting call.
///
/// All values are signed: a misconfigured negative cap is accepted and
/// simply yields an all-excluded fit.
///
/// # Example
///
/// ```
/// use paperfit::context::Budget;
///
/// let budget = Budget::for_model("gpt-3.5-turbo", 100_000);
/// assert_eq!(budget.ceiling(), 16_385);
/// assert_eq!(budget.available_after(1_000), 16_385 - 1_000 - 4_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Ceiling from configuration.
    pub max_context_tokens: i64,
    /// Ceiling from the selected model's published limit.
    pub model_context_window: i64,
    /// Tokens held back for the response.
    pub output_reserve: i64,
}

impl Budget {
    pub fn new(max_context_tokens: i64, model_context_window: i64) -> Self {
        Self {
            max_context_tokens,
            model_context_window,
            output_reserve: DEFAULT_OUTPUT_RESERVE,
        }
    }

    /// Budget for a named model, looking its window up with
    /// [`context_window_for_model`].
    pub fn for_model(model: &str, max_context_tokens: i64) -> Self {
        Self::new(max_context_tokens, context_window_for_model(model))
    }

    /// Override the output reserve.
    pub fn with_output_reserve(mut self, tokens: i64) -> Self {
        self.output_reserve = tokens;
        self
    }

    /// `min(max_context_tokens, model_context_window)`.
    pub fn ceiling(&self) -> i64 {
        self.max_context_tokens.min(self.model_context_window)
    }

    /// Tokens left for candidates once the prompt and reserve are paid for.
    /// May be zero or negative; saturates at the `i64` bounds.
    pub fn available_after(&self, prompt_tokens: i64) -> i64 {
        self.ceiling()
            .saturating_sub(prompt_tokens)
            .saturating_sub(self.output_reserve)
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_TOKENS, DEFAULT_CONTEXT_WINDOW)
    }
}

/// Published context window for a model, in tokens.
///
/// Matches on the name segment after the last `/` (so
/// `"openai/gpt-4o-mini"` and `"gpt-4o-mini"` agree), case-insensitively.
/// Covers the OpenAI and Gemini families; anything else gets
/// [`DEFAULT_CONTEXT_WINDOW`].
pub fn context_window_for_model(model: &str) -> i64 {
    let name = model.rsplit('/').next().unwrap_or(model).to_lowercase();

    // Most specific prefixes first: "gpt-4" would otherwise swallow "gpt-4o".
    if name.starts_with("gpt-4.1") {
        1_047_576
    } else if name.starts_with("gpt-4o") || name.starts_with("gpt-4-turbo") {
        128_000
    } else if name.starts_with("gpt-4-32k") {
        32_768
    } else if name.starts_with("gpt-4") {
        8_192
    } else if name.starts_with("gpt-3.5-turbo") {
        16_385
    } else if name.starts_with("o1") || name.starts_with("o3") || name.starts_with("o4") {
        200_000
    } else if name.starts_with("gemini-1.5-pro") {
        2_097_152
    } else if name.starts_with("gemini-1.5-flash") || name.starts_with("gemini-2") {
        1_048_576
    } else if name.starts_with("gemini") {
        32_760
    } else {
        DEFAULT_CONTEXT_WINDOW
    }
}
