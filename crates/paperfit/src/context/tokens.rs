//! Token estimation from character counts.
//!
//! The estimate is a crude proxy for subword tokenization: one token per four
//! characters, rounded up. It is not model-accurate and callers must not
//! treat it as an exact count. Fitting goes through the [`TokenEstimator`]
//! trait so a real tokenizer can be dropped in without touching the fitter.

/// Default characters per token.
pub const DEFAULT_CHARS_PER_TOKEN: usize = 4;

/// Maps text to an approximate token count.
pub trait TokenEstimator {
    /// Estimate the number of tokens in `text`. Must be non-negative.
    fn estimate(&self, text: &str) -> i64;
}

/// Character-ratio estimator: `ceil(len / chars_per_token)`.
///
/// Length is measured in UTF-16 code units so that counts agree with
/// estimates persisted by the host application, which measures strings the
/// same way. For ASCII text this is identical to the byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharRatioEstimator {
    chars_per_token: usize,
}

impl CharRatioEstimator {
    /// Create an estimator with a custom ratio. A ratio of zero is clamped to one.
    pub fn new(chars_per_token: usize) -> Self {
        Self {
            chars_per_token: chars_per_token.max(1),
        }
    }

    /// The configured characters-per-token ratio.
    pub fn chars_per_token(&self) -> usize {
        self.chars_per_token
    }
}

impl Default for CharRatioEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_CHARS_PER_TOKEN)
    }
}

impl TokenEstimator for CharRatioEstimator {
    fn estimate(&self, text: &str) -> i64 {
        text_len(text).div_ceil(self.chars_per_token) as i64
    }
}

impl<E: TokenEstimator + ?Sized> TokenEstimator for &E {
    fn estimate(&self, text: &str) -> i64 {
        (**self).estimate(text)
    }
}

/// Estimate tokens with the default four-characters-per-token ratio.
pub fn estimate_tokens(text: &str) -> i64 {
    CharRatioEstimator::default().estimate(text)
}

/// Length of `text` in UTF-16 code units.
pub fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}
