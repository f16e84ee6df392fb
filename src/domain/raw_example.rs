// ============================================================
// Layer 3 — RawExample Domain Type
// ============================================================
// One question exactly as it appears in the corpus:
//   - a context paragraph
//   - a question about it
//   - zero or more reference answers
//   - for each answer, the CHARACTER offset where it starts
//
// Example (SQuAD1):
//   context:      "A cat sat."
//   question:     "What sat?"
//   answers:      ["cat"]
//   answer_start: [2]
//
// SQuAD2 adds unanswerable questions. Those carry the sentinel
// offset -1 (NO_ANSWER) and an empty answer string.
//
// Reference: Rajpurkar et al. (2016, 2018) SQuAD papers

use serde::{Deserialize, Serialize};

use crate::domain::error::{DatasetError, Result};

/// Offset marking an unanswerable question.
pub const NO_ANSWER: i64 = -1;

/// A raw, un-tokenised question-answer example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExample {
    pub context: String,

    pub question: String,

    /// Reference answer texts, in corpus order
    pub answers: Vec<String>,

    /// Character offset of each answer inside `context`,
    /// or NO_ANSWER. Same length as `answers`.
    pub answer_start: Vec<i64>,
}

impl RawExample {
    pub fn new(
        context:      impl Into<String>,
        question:     impl Into<String>,
        answers:      Vec<String>,
        answer_start: Vec<i64>,
    ) -> Self {
        Self {
            context:  context.into(),
            question: question.into(),
            answers,
            answer_start,
        }
    }

    /// An unanswerable SQuAD2 question.
    pub fn unanswerable(context: impl Into<String>, question: impl Into<String>) -> Self {
        Self::new(context, question, vec![String::new()], vec![NO_ANSWER])
    }

    /// Check the answers/offsets contract.
    /// `index` is only used to label the error.
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.answers.len() != self.answer_start.len() {
            return Err(DatasetError::DataIntegrity {
                index,
                reason: format!(
                    "{} answers but {} answer offsets",
                    self.answers.len(),
                    self.answer_start.len()
                ),
            });
        }
        if let Some(bad) = self.answer_start.iter().find(|&&s| s < NO_ANSWER) {
            return Err(DatasetError::DataIntegrity {
                index,
                reason: format!("answer offset {bad} is negative"),
            });
        }
        Ok(())
    }

    /// The context up to (not including) character `offset`.
    /// Offsets past the end yield the whole context.
    pub fn context_prefix(&self, offset: usize) -> &str {
        match self.context.char_indices().nth(offset) {
            Some((byte, _)) => &self.context[..byte],
            None            => &self.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_example_passes() {
        let ex = RawExample::new("A cat sat.", "What sat?", vec!["cat".into()], vec![2]);
        assert!(ex.validate(0).is_ok());
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let ex = RawExample::new("ctx", "q", vec!["a".into(), "b".into()], vec![0]);
        let err = ex.validate(7).unwrap_err();
        assert!(matches!(err, DatasetError::DataIntegrity { index: 7, .. }));
    }

    #[test]
    fn test_offset_below_sentinel_is_rejected() {
        let ex = RawExample::new("ctx", "q", vec!["a".into()], vec![-3]);
        assert!(ex.validate(0).is_err());
    }

    #[test]
    fn test_unanswerable_uses_sentinel() {
        let ex = RawExample::unanswerable("ctx", "q");
        assert_eq!(ex.answer_start, vec![NO_ANSWER]);
        assert!(ex.validate(0).is_ok());
    }

    #[test]
    fn test_prefix_counts_characters_not_bytes() {
        let ex = RawExample::new("café au lait", "q", vec![], vec![]);
        assert_eq!(ex.context_prefix(5), "café ");
    }

    #[test]
    fn test_prefix_past_end_is_whole_context() {
        let ex = RawExample::new("short", "q", vec![], vec![]);
        assert_eq!(ex.context_prefix(99), "short");
        assert_eq!(ex.context_prefix(0), "");
    }
}
