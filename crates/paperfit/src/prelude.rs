//! Convenience re-exports for common `paperfit` types.
//!
//! ```ignore
//! use paperfit::prelude::*;
//! ```

pub use crate::config::{FitConfig, parse_candidates};
pub use crate::context::{
    Budget, Candidate, Capacity, CharRatioEstimator, ContextFitter, FitResult, SortStrategy,
    TokenEstimator, assemble_context, augment_prompt, estimate_tokens, fit,
};
pub use crate::error::ConfigError;
