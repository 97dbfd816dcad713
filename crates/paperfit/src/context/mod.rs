//! Context window fitting: token estimates, budgets, greedy packing and
//! reporting.
//!
//! 1. **[`tokens`]** — [`TokenEstimator`] and the default
//!    [`CharRatioEstimator`] (`ceil(len / 4)`).
//!
//! 2. **[`budget`]** — [`Budget`] resolves the effective ceiling from the
//!    configured cap and the model's published window, minus the output
//!    reserve.
//!
//! 3. **[`fitter`]** — [`ContextFitter`] sorts [`Candidate`]s by a
//!    [`SortStrategy`] and includes them in one greedy pass.
//!
//! 4. **[`report`]** and **[`assembly`]** — derived views over a
//!    [`FitResult`]: capacity, previews, and the rendered context block.

pub mod assembly;
pub mod budget;
pub mod candidate;
pub mod fitter;
pub mod report;
pub mod tokens;

pub use assembly::{assemble_context, augment_prompt};
pub use budget::{
    Budget, DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_CONTEXT_TOKENS, DEFAULT_OUTPUT_RESERVE,
    context_window_for_model,
};
pub use candidate::Candidate;
pub use fitter::{ContextFitter, FitResult, SortStrategy, fit};
pub use report::{Capacity, capacity, preview};
pub use tokens::{CharRatioEstimator, DEFAULT_CHARS_PER_TOKEN, TokenEstimator, estimate_tokens};
