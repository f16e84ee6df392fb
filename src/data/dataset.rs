// ============================================================
// Layer 4 — QuestionAnswerDataset
// ============================================================
// Presents one split of raw SQuAD examples as an indexable
// burn Dataset of encoded examples.
//
// Nothing is encoded up front. Every get(i):
//   1. fetches raw example i
//   2. encodes context and question
//   3. encodes each answer
//   4. converts each answer's CHARACTER offset into a TOKEN span
//
// Span conversion (step 4):
//
//   context:  "A cat sat."        answer: "cat" @ char 2
//   prefix:   "A "                → 1 token   → start = 1
//   answer:   "cat"               → 1 token   → end   = 1 + 1 - 1 = 1
//   span:     [1, 1]
//
// Unanswerable questions (offset -1) get the span [-1, -1].
//
// Tokenizing the prefix with the SAME context transform keeps
// the span consistent with whatever tokenizer was plugged in.
// `with_precomputed_spans` does that work once at construction
// and returns identical spans afterwards.
//
// A tokenizer failure is returned from item(i), never replaced
// by an empty encoding.
//
// Reference: Burn Book §4 (Datasets)

use std::sync::Arc;

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::transforms::{LongTensor, Transforms};
use crate::data::vocab::Vocab;
use crate::domain::error::{DatasetError, Result};
use crate::domain::raw_example::{RawExample, NO_ANSWER};

/// One fully encoded example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedExample {
    pub context:  LongTensor,
    pub question: LongTensor,
    /// One tensor per reference answer
    pub answers:  Vec<LongTensor>,
    /// One `[start, end]` token span per reference answer
    pub ans_pos:  Vec<LongTensor>,
}

impl EncodedExample {
    /// The `[start, end]` pair of answer `j`, if present.
    pub fn span(&self, j: usize) -> Option<[i64; 2]> {
        match self.ans_pos.get(j)?.as_slice() {
            &[start, end] => Some([start, end]),
            _             => None,
        }
    }
}

pub struct QuestionAnswerDataset {
    data:       Arc<[RawExample]>,
    vocab:      Arc<Vocab>,
    transforms: Transforms,
    /// Token spans per example, when precomputed
    spans:      Option<Vec<Vec<[i64; 2]>>>,
}

impl QuestionAnswerDataset {
    /// Wrap one split's raw examples.
    ///
    /// Every example is checked up front: mismatched
    /// answers/offsets fail here instead of on first access.
    pub fn new(
        data:       impl Into<Arc<[RawExample]>>,
        vocab:      Arc<Vocab>,
        transforms: Transforms,
    ) -> Result<Self> {
        let data = data.into();
        for (index, example) in data.iter().enumerate() {
            example.validate(index)?;
        }
        Ok(Self { data, vocab, transforms, spans: None })
    }

    /// Compute every answer span now and serve them from memory.
    pub fn with_precomputed_spans(mut self) -> Result<Self> {
        let spans = self
            .data
            .iter()
            .map(|raw| {
                (0..raw.answers.len())
                    .map(|j| {
                        let answer_len = (self.transforms.answers)(&raw.answers[j])?.len();
                        self.compute_span(raw, j, answer_len)
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!("Precomputed answer spans for {} examples", spans.len());
        self.spans = Some(spans);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The vocabulary shared by every split of this corpus.
    pub fn get_vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    /// Raw example `index`, un-encoded.
    pub fn raw(&self, index: usize) -> Option<&RawExample> {
        self.data.get(index)
    }

    /// Encode example `index`.
    pub fn item(&self, index: usize) -> Result<EncodedExample> {
        let raw = self.data.get(index).ok_or(DatasetError::IndexOutOfBounds {
            index,
            len: self.data.len(),
        })?;

        let context  = (self.transforms.context)(&raw.context)?;
        let question = (self.transforms.question)(&raw.question)?;

        let mut answers = Vec::with_capacity(raw.answers.len());
        let mut ans_pos = Vec::with_capacity(raw.answers.len());

        for (j, answer) in raw.answers.iter().enumerate() {
            let encoded = (self.transforms.answers)(answer)?;
            let span = match &self.spans {
                Some(spans) => spans[index][j],
                None        => self.compute_span(raw, j, encoded.len())?,
            };
            answers.push(encoded);
            ans_pos.push((self.transforms.ans_pos)(span));
        }

        Ok(EncodedExample { context, question, answers, ans_pos })
    }

    /// Token-space span of answer `j`, given its encoded length.
    fn compute_span(&self, raw: &RawExample, j: usize, answer_len: usize) -> Result<[i64; 2]> {
        let offset = raw.answer_start[j];
        if offset == NO_ANSWER {
            return Ok([NO_ANSWER, NO_ANSWER]);
        }
        let prefix = raw.context_prefix(offset as usize);
        let start  = (self.transforms.context)(prefix)?.len() as i64;
        Ok([start, start + answer_len as i64 - 1])
    }
}

impl Dataset<EncodedExample> for QuestionAnswerDataset {
    fn get(&self, index: usize) -> Option<EncodedExample> {
        self.item(index).ok()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
