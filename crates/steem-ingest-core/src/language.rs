//! Language detection for post bodies.
//!
//! The classifier itself is an external collaborator. This module owns the
//! policy around it: short texts are not classified, and a failing
//! classifier costs one record its language, never the batch.

use tracing::{debug, warn};

use crate::error::ClassifierError;

/// Texts shorter than this many characters are not classified.
pub const MIN_TEXT_LENGTH_FOR_DETECTION: usize = 20;

/// A language classifier, returning a language code such as `"en"`.
///
/// Implementations must be deterministic for a given input.
pub trait LanguageClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<String, ClassifierError>;
}

impl<F> LanguageClassifier for F
where
    F: Fn(&str) -> Result<String, ClassifierError> + Send + Sync,
{
    fn classify(&self, text: &str) -> Result<String, ClassifierError> {
        self(text)
    }
}

/// Detect the language of `text`, or `None` when it is too short or the
/// classifier fails.
pub fn detect_language<C: LanguageClassifier + ?Sized>(classifier: &C, text: &str) -> Option<String> {
    if text.chars().count() < MIN_TEXT_LENGTH_FOR_DETECTION {
        debug!("not enough text to perform language detection");
        return None;
    }
    match classifier.classify(text) {
        Ok(code) => Some(code),
        Err(error) => {
            warn!(%error, "language detection failed");
            None
        }
    }
}
