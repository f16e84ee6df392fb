// ============================================================
// Layer 4 — Transform Pipeline
// ============================================================
// Turns raw fields into 64-bit integer tensors.
//
//   text field (context / question / answer):
//       "A cat sat."
//         │ tokenizer
//         ▼
//       ["a", "cat", "sat", "."]
//         │ vocab lookup
//         ▼
//       [5, 9, 12, 3]
//         │ to_tensor
//         ▼
//       LongTensor([5, 9, 12, 3])
//
//   ans_pos field:
//       [start, end] ──to_tensor──▶ LongTensor([start, end])
//
// Context, question and answers share one composed function;
// the ans_pos transform only converts. A tokenizer failure
// surfaces as an Err from the text transform. Each role is its own
// named field in `Transforms`, so a missing role is a compile
// error rather than a failed map lookup.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::vocab::Vocab;
use crate::domain::error::Result;
use crate::domain::traits::Tokenize;

// ─── LongTensor ───────────────────────────────────────────────────────────────
/// A 1-D tensor of `i64` values, owned and backend-free.
///
/// Conversion to a burn tensor happens in the batcher, once a
/// device is known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LongTensor(Vec<i64>);

impl LongTensor {
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }
}

impl From<Vec<i64>> for LongTensor {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

impl<const N: usize> From<[i64; N]> for LongTensor {
    fn from(values: [i64; N]) -> Self {
        Self(values.to_vec())
    }
}

/// Convert an integer sequence into a `LongTensor`.
pub fn to_tensor(values: impl Into<Vec<i64>>) -> LongTensor {
    LongTensor(values.into())
}

// ─── Transforms ───────────────────────────────────────────────────────────────
/// A text field → tensor function.
pub type TextTransform = Arc<dyn Fn(&str) -> Result<LongTensor> + Send + Sync>;

/// A `[start, end]` pair → tensor function.
pub type PositionTransform = Arc<dyn Fn([i64; 2]) -> LongTensor + Send + Sync>;

/// One transform per field of a raw example.
#[derive(Clone)]
pub struct Transforms {
    pub context:  TextTransform,
    pub question: TextTransform,
    pub answers:  TextTransform,
    pub ans_pos:  PositionTransform,
}

impl Transforms {
    /// tokenize → vocab lookup → tensor for every text field,
    /// plain tensor conversion for answer positions.
    pub fn text_pipeline(tokenizer: Arc<dyn Tokenize>, vocab: Arc<Vocab>) -> Self {
        let text = text_transform(tokenizer, vocab);
        Self {
            context:  Arc::clone(&text),
            question: Arc::clone(&text),
            answers:  text,
            ans_pos:  Arc::new(|pos: [i64; 2]| to_tensor(pos)),
        }
    }
}

impl fmt::Debug for Transforms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transforms").finish_non_exhaustive()
    }
}

/// Compose a tokenizer and a vocabulary into one text transform.
pub fn text_transform(tokenizer: Arc<dyn Tokenize>, vocab: Arc<Vocab>) -> TextTransform {
    Arc::new(move |text: &str| -> Result<LongTensor> {
        let tokens = tokenizer.tokenize(text)?;
        Ok(to_tensor(vocab.lookup_indices(&tokens[..])))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::tokenizer::WhitespaceTokenizer;
    use crate::data::vocab::UNK_TOKEN;
    use crate::domain::error::DatasetError;

    fn pipeline() -> (Transforms, Arc<Vocab>) {
        let vocab = Arc::new(Vocab::new(
            ["<unk>", "A", "cat", "sat", "."].map(String::from),
            UNK_TOKEN,
        ));
        let transforms = Transforms::text_pipeline(Arc::new(WhitespaceTokenizer), Arc::clone(&vocab));
        (transforms, vocab)
    }

    #[test]
    fn test_text_fields_encode_through_vocab() {
        let (t, _) = pipeline();
        assert_eq!((t.context)("A cat sat.").unwrap(), LongTensor::from([1, 2, 3, 4]));
        assert_eq!((t.question)("cat dog").unwrap(), LongTensor::from([2, 0]));
        assert_eq!((t.answers)("cat").unwrap(), LongTensor::from([2]));
    }

    #[test]
    fn test_positions_pass_through() {
        let (t, _) = pipeline();
        assert_eq!((t.ans_pos)([-1, -1]).as_slice(), &[-1, -1]);
        assert_eq!((t.ans_pos)([3, 7]).into_vec(), vec![3, 7]);
    }

    #[test]
    fn test_text_roles_share_one_function() {
        let (t, _) = pipeline();
        assert!(Arc::ptr_eq(&t.context, &t.question));
        assert!(Arc::ptr_eq(&t.context, &t.answers));
    }

    #[test]
    fn test_empty_text_is_empty_tensor() {
        let (t, _) = pipeline();
        assert!((t.context)("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenizer_failure_reaches_caller() {
        let failing = FailingTokenizer;
        let vocab = Arc::new(Vocab::new(Vec::new(), UNK_TOKEN));
        let t = Transforms::text_pipeline(Arc::new(failing), vocab);
        assert!(matches!((t.context)("anything"), Err(DatasetError::Tokenizer(_))));
    }

    struct FailingTokenizer;

    impl Tokenize for FailingTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<String>> {
            Err(DatasetError::tokenizer(format!("cannot tokenize '{text}'")))
        }
    }
}
