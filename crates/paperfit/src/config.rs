//! Fitting configuration with sensible defaults.
//!
//! [`FitConfig`] replaces the host application's preference store: every
//! setting the fitter needs is passed in explicitly. It can be built in
//! code, loaded from a TOML file, and converted into a [`Budget`] and a
//! [`ContextFitter`] ready for use.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::{
    Budget, Candidate, ContextFitter, DEFAULT_MAX_CONTEXT_TOKENS, DEFAULT_OUTPUT_RESERVE,
    SortStrategy, context_window_for_model,
};
use crate::error::ConfigError;

/// Settings for one fitting run.
///
/// ```toml
/// model = "gpt-4o-mini"
/// max_context_tokens = 100000
/// output_reserve = 4000
/// sort = "date"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    /// Model identifier. Default: `"gpt-4o-mini"`.
    pub model: String,
    /// User cap on context tokens. Default: `100000`.
    pub max_context_tokens: i64,
    /// Explicit context window, overriding the model lookup table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_window: Option<i64>,
    /// Tokens held back for the response. Default: `4000`.
    pub output_reserve: i64,
    /// Candidate ordering. Default: `date`.
    pub sort: SortStrategy,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_context_tokens: DEFAULT_MAX_CONTEXT_TOKENS,
            context_window: None,
            output_reserve: DEFAULT_OUTPUT_RESERVE,
            sort: SortStrategy::default(),
        }
    }
}

impl FitConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), model = %config.model, "loaded fit config");
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_context_tokens(mut self, tokens: i64) -> Self {
        self.max_context_tokens = tokens;
        self
    }

    pub fn with_context_window(mut self, tokens: i64) -> Self {
        self.context_window = Some(tokens);
        self
    }

    pub fn with_output_reserve(mut self, tokens: i64) -> Self {
        self.output_reserve = tokens;
        self
    }

    pub fn with_sort(mut self, sort: SortStrategy) -> Self {
        self.sort = sort;
        self
    }

    /// The model's window: the explicit override if set, otherwise the
    /// lookup-table value.
    pub fn model_context_window(&self) -> i64 {
        self.context_window.unwrap_or_else(|| context_window_for_model(&self.model))
    }

    pub fn build_budget(&self) -> Budget {
        Budget::new(self.max_context_tokens, self.model_context_window())
            .with_output_reserve(self.output_reserve)
    }

    pub fn build_fitter(&self) -> ContextFitter {
        ContextFitter::new().with_strategy(self.sort)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".into()));
        }
        if self.output_reserve < 0 {
            return Err(ConfigError::Invalid(format!(
                "output_reserve must be non-negative, got {}",
                self.output_reserve
            )));
        }
        Ok(())
    }
}

/// Parse a JSON array of candidates.
pub fn parse_candidates(json: &str) -> Result<Vec<Candidate>, ConfigError> {
    Ok(serde_json::from_str(json)?)
}
