// ============================================================
// Layer 4 — Q&A Batcher
// ============================================================
// Implements burn's Batcher trait: a Vec<EncodedExample> goes
// in, one QaBatch of Int tensors comes out.
//
// Contexts and questions have different lengths per example,
// so each is right-padded to the longest one in the batch:
//
//   context 0: [4 9 2]       →  [4 9 2 1 1]
//   context 1: [7 3 8 5 6]   →  [7 3 8 5 6]
//                                  (1 = <pad> index)
//
// Labels come from each example's FIRST answer span:
//   start_positions [N], end_positions [N]
// Unanswerable examples, or examples with no answers at all,
// carry -1 in both.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::EncodedExample;
use crate::data::transforms::LongTensor;
use crate::data::vocab::Vocab;
use crate::domain::raw_example::NO_ANSWER;

// ─── QaBatch ──────────────────────────────────────────────────────────────────
/// A padded batch of encoded examples.
#[derive(Debug, Clone)]
pub struct QaBatch<B: Backend> {
    /// Context token indices — shape: [batch_size, max_context_len]
    pub context: Tensor<B, 2, Int>,

    /// Question token indices — shape: [batch_size, max_question_len]
    pub question: Tensor<B, 2, Int>,

    /// First answer's start token — shape: [batch_size]
    pub start_positions: Tensor<B, 1, Int>,

    /// First answer's end token — shape: [batch_size]
    pub end_positions: Tensor<B, 1, Int>,
}

// ─── QaBatcher ────────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct QaBatcher {
    /// Index written into padding positions
    pad_index: i64,
}

impl QaBatcher {
    pub fn new(pad_index: i64) -> Self {
        Self { pad_index }
    }

    /// Pad with the vocabulary's "<pad>" index, or "<unk>" if it has none.
    pub fn for_vocab(vocab: &Vocab) -> Self {
        let pad = vocab.pad_index().unwrap_or_else(|| vocab.unk_index());
        Self::new(pad as i64)
    }

    /// Flatten rows into one row-major buffer padded to the longest row.
    fn pad_rows<'a>(&self, rows: impl Iterator<Item = &'a LongTensor> + Clone) -> (Vec<i64>, usize) {
        let width = rows.clone().map(LongTensor::len).max().unwrap_or(0);
        let mut flat = Vec::new();
        for row in rows {
            flat.extend_from_slice(row.as_slice());
            flat.extend(std::iter::repeat(self.pad_index).take(width - row.len()));
        }
        (flat, width)
    }
}

impl<B: Backend> Batcher<B, EncodedExample, QaBatch<B>> for QaBatcher {
    fn batch(&self, items: Vec<EncodedExample>, device: &B::Device) -> QaBatch<B> {
        let batch_size = items.len();

        let (context_flat, context_len)   = self.pad_rows(items.iter().map(|ex| &ex.context));
        let (question_flat, question_len) = self.pad_rows(items.iter().map(|ex| &ex.question));

        let (starts, ends): (Vec<i64>, Vec<i64>) = items
            .iter()
            .map(|ex| {
                let [start, end] = ex.span(0).unwrap_or([NO_ANSWER, NO_ANSWER]);
                (start, end)
            })
            .unzip();

        let context = Tensor::<B, 2, Int>::from_data(
            TensorData::new(context_flat, [batch_size, context_len]),
            device,
        );
        let question = Tensor::<B, 2, Int>::from_data(
            TensorData::new(question_flat, [batch_size, question_len]),
            device,
        );
        let start_positions = Tensor::<B, 1, Int>::from_data(
            TensorData::new(starts, [batch_size]),
            device,
        );
        let end_positions = Tensor::<B, 1, Int>::from_data(
            TensorData::new(ends, [batch_size]),
            device,
        );

        QaBatch { context, question, start_positions, end_positions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn example(context: &[i64], question: &[i64], spans: &[[i64; 2]]) -> EncodedExample {
        EncodedExample {
            context:  LongTensor::new(context.to_vec()),
            question: LongTensor::new(question.to_vec()),
            answers:  spans.iter().map(|_| LongTensor::new(vec![9])).collect(),
            ans_pos:  spans.iter().map(|s| LongTensor::from(*s)).collect(),
        }
    }

    fn ints<const D: usize>(t: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        t.into_data().convert::<i64>().to_vec::<i64>().unwrap()
    }

    #[test]
    fn test_pads_to_longest_row() {
        let items = vec![
            example(&[4, 9, 2], &[7], &[[0, 1]]),
            example(&[7, 3, 8, 5, 6], &[2, 2], &[[3, 4]]),
        ];
        let batcher = QaBatcher::new(1);
        let batch: QaBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&batcher, items, &Default::default());

        assert_eq!(batch.context.dims(), [2, 5]);
        assert_eq!(batch.question.dims(), [2, 2]);
        assert_eq!(ints(batch.context), vec![4, 9, 2, 1, 1, 7, 3, 8, 5, 6]);
        assert_eq!(ints(batch.question), vec![7, 1, 2, 2]);
    }

    #[test]
    fn test_labels_use_first_span_or_sentinel() {
        let items = vec![
            example(&[1, 2], &[3], &[[1, 1], [0, 0]]),
            example(&[1, 2], &[3], &[[-1, -1]]),
            example(&[1, 2], &[3], &[]),
        ];
        let batcher = QaBatcher::new(0);
        let batch: QaBatch<TestBackend> =
            Batcher::<TestBackend, _, _>::batch(&batcher, items, &Default::default());

        assert_eq!(ints(batch.start_positions), vec![1, -1, -1]);
        assert_eq!(ints(batch.end_positions), vec![1, -1, -1]);
    }

    #[test]
    fn test_for_vocab_prefers_pad_token() {
        use crate::data::vocab::{FrequencyVocabBuilder, VocabBuilder};
        let vocab = FrequencyVocabBuilder::new().build(&mut std::iter::empty::<String>());
        assert_eq!(QaBatcher::for_vocab(&vocab).pad_index, 1);
    }
}
