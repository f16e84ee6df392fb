// ============================================================
// Layer 2 — SQuAD Dataset Factory
// ============================================================
// Builds ready-to-use datasets for the requested splits:
//
//   Step 1: check the split request and vocab requirement
//   Step 2: load raw examples for each requested split
//   Step 3: build the vocab from train (unless one was given)
//   Step 4: compose tokenizer + vocab into shared transforms
//   Step 5: wrap each split in a QuestionAnswerDataset
//
// All failures happen here, before any dataset is returned.
// The returned datasets share one Vocab and one Transforms.
//
//   squad1(".", None, None, SplitRequest::default())
//       → Datasets::Many([train, dev])
//   squad1(".", Some(vocab), None, SplitRequest::single("dev")?)
//       → Datasets::Single(dev)

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::data::dataset::QuestionAnswerDataset;
use crate::data::loader::SquadJsonLoader;
use crate::data::tokenizer::BasicEnglishTokenizer;
use crate::data::transforms::Transforms;
use crate::data::vocab::{FrequencyVocabBuilder, Vocab, VocabBuilder};
use crate::domain::error::{DatasetError, Result};
use crate::domain::raw_example::RawExample;
use crate::domain::split::{Split, SplitRequest, SquadVersion};
use crate::domain::traits::{RawSource, Tokenize};

/// Datasets in the same shape as the split request.
pub enum Datasets {
    Single(QuestionAnswerDataset),
    Many(Vec<QuestionAnswerDataset>),
}

impl Datasets {
    /// All datasets in request order.
    pub fn into_vec(self) -> Vec<QuestionAnswerDataset> {
        match self {
            Datasets::Single(ds) => vec![ds],
            Datasets::Many(v)    => v,
        }
    }

    /// The dataset of a single-split request.
    pub fn into_single(self) -> Option<QuestionAnswerDataset> {
        match self {
            Datasets::Single(ds) => Some(ds),
            Datasets::Many(_)    => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Datasets::Single(_) => 1,
            Datasets::Many(v)   => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Datasets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datasets::Single(ds) => write!(f, "Datasets::Single(len={})", ds.len()),
            Datasets::Many(v)    => {
                let lens: Vec<usize> = v.iter().map(QuestionAnswerDataset::len).collect();
                write!(f, "Datasets::Many(lens={lens:?})")
            }
        }
    }
}

/// Knobs beyond the four factory arguments.
#[derive(Clone)]
pub struct DatasetOptions {
    /// Compute token spans once at construction
    pub precompute_spans: bool,
    /// Used when no vocab is supplied
    pub vocab_builder: Arc<dyn VocabBuilder + Send + Sync>,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            precompute_spans: false,
            vocab_builder:    Arc::new(FrequencyVocabBuilder::new()),
        }
    }
}

impl fmt::Debug for DatasetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetOptions")
            .field("precompute_spans", &self.precompute_spans)
            .finish_non_exhaustive()
    }
}

/// SQuAD 1.1 train/dev datasets from JSON files under `root`.
pub fn squad1(
    root:      impl AsRef<Path>,
    vocab:     Option<Arc<Vocab>>,
    tokenizer: Option<Arc<dyn Tokenize>>,
    split:     SplitRequest,
) -> Result<Datasets> {
    let loader = SquadJsonLoader::new(root.as_ref());
    setup_datasets(SquadVersion::Squad1, &loader, vocab, tokenizer, split, &DatasetOptions::default())
}

/// SQuAD 2.0 train/dev datasets from JSON files under `root`.
pub fn squad2(
    root:      impl AsRef<Path>,
    vocab:     Option<Arc<Vocab>>,
    tokenizer: Option<Arc<dyn Tokenize>>,
    split:     SplitRequest,
) -> Result<Datasets> {
    let loader = SquadJsonLoader::new(root.as_ref());
    setup_datasets(SquadVersion::Squad2, &loader, vocab, tokenizer, split, &DatasetOptions::default())
}

/// Shared body of the SQuAD entry points, with any raw source.
pub fn setup_datasets(
    version:   SquadVersion,
    source:    &dyn RawSource,
    vocab:     Option<Arc<Vocab>>,
    tokenizer: Option<Arc<dyn Tokenize>>,
    split:     SplitRequest,
    options:   &DatasetOptions,
) -> Result<Datasets> {
    // ── Step 1: validate before touching any data ────────────────────────────
    if split.splits().is_empty() {
        return Err(DatasetError::usage("at least one split must be requested"));
    }
    if vocab.is_none() && !split.contains(Split::Train) {
        return Err(DatasetError::usage(
            "a vocab must be supplied when the train split is not selected",
        ));
    }
    let tokenizer: Arc<dyn Tokenize> = tokenizer.unwrap_or_else(|| Arc::new(BasicEnglishTokenizer));

    // ── Step 2: load each distinct split once ─────────────────────────────────
    let mut raw_data: HashMap<Split, Arc<[RawExample]>> = HashMap::new();
    for &s in split.splits() {
        if !raw_data.contains_key(&s) {
            let examples = source.load(version, s)?;
            raw_data.insert(s, examples.into());
        }
    }

    // ── Step 3: vocab from train, unless supplied ─────────────────────────────
    let vocab = match vocab {
        Some(v) => v,
        None => {
            tracing::info!("Building vocab based on {} train data", version);
            let train = &raw_data[&Split::Train];
            let mut failure = None;
            let built = {
                let mut stream = vocab_token_stream(train, tokenizer.as_ref())
                    .scan(&mut failure, |failure, tokens| match tokens {
                        Ok(tokens) => Some(tokens),
                        Err(e) => {
                            **failure = Some(e);
                            None
                        }
                    })
                    .flatten();
                options.vocab_builder.build(&mut stream)
            };
            if let Some(e) = failure {
                return Err(e);
            }
            Arc::new(built)
        }
    };
    tracing::info!("Vocab has {} entries", vocab.len());

    // ── Step 4: one transform set for every split ─────────────────────────────
    let transforms = Transforms::text_pipeline(tokenizer, Arc::clone(&vocab));

    // ── Step 5: one dataset per requested split, in order ─────────────────────
    let names: Vec<&str> = split.splits().iter().map(|s| s.as_str()).collect();
    tracing::info!("Building {} datasets for {:?}", version, names);

    let build = |s: Split| -> Result<QuestionAnswerDataset> {
        let ds = QuestionAnswerDataset::new(
            Arc::clone(&raw_data[&s]),
            Arc::clone(&vocab),
            transforms.clone(),
        )?;
        if options.precompute_spans { ds.with_precomputed_spans() } else { Ok(ds) }
    };

    match split {
        SplitRequest::Single(s) => Ok(Datasets::Single(build(s)?)),
        SplitRequest::Many(v)   => Ok(Datasets::Many(
            v.into_iter().map(build).collect::<Result<Vec<_>>>()?,
        )),
    }
}

/// Per example, in order: context tokens, question tokens, then
/// the tokens of every answer.
pub fn vocab_token_stream<'a>(
    examples:  &'a [RawExample],
    tokenizer: &'a dyn Tokenize,
) -> impl Iterator<Item = Result<Vec<String>>> + 'a {
    examples.iter().map(move |ex| -> Result<Vec<String>> {
        let mut tokens = tokenizer.tokenize(&ex.context)?;
        tokens.extend(tokenizer.tokenize(&ex.question)?);
        for answer in &ex.answers {
            tokens.extend(tokenizer.tokenize(answer)?);
        }
        Ok(tokens)
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::InMemorySource;
    use crate::data::tokenizer::WhitespaceTokenizer;

    fn source() -> InMemorySource {
        InMemorySource::new()
            .with_split(Split::Train, vec![
                RawExample::new("A cat sat.", "What sat?", vec!["cat".into()], vec![2]),
                RawExample::new("A dog ran.", "What ran?", vec!["dog".into()], vec![2]),
            ])
            .with_split(Split::Dev, vec![
                RawExample::new("A cow sat.", "What sat?", vec!["cow".into()], vec![2]),
            ])
    }

    #[test]
    fn test_token_stream_order() {
        let ex = [RawExample::new("x y", "q", vec!["a".into(), "b c".into()], vec![0, 2])];
        let tokens: Vec<Vec<String>> = vocab_token_stream(&ex, &WhitespaceTokenizer)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(tokens, vec![vec!["x", "y", "q", "a", "b", "c"]]);
    }

    #[test]
    fn test_default_request_builds_train_then_dev() {
        let out = setup_datasets(
            SquadVersion::Squad1, &source(), None, None,
            SplitRequest::default(), &DatasetOptions::default(),
        ).unwrap();
        let sets = match out {
            Datasets::Many(v) => v,
            other => panic!("expected many, got {other:?}"),
        };
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 2);
        assert_eq!(sets[1].len(), 1);
        assert!(Arc::ptr_eq(sets[0].get_vocab(), sets[1].get_vocab()));
    }

    #[test]
    fn test_dev_without_vocab_is_usage_error() {
        let err = setup_datasets(
            SquadVersion::Squad2, &source(), None, None,
            SplitRequest::single("dev").unwrap(), &DatasetOptions::default(),
        ).unwrap_err();
        assert!(matches!(err, DatasetError::Usage(_)));
    }

    #[test]
    fn test_vocab_is_built_from_train_only() {
        let train = setup_datasets(
            SquadVersion::Squad1, &source(), None, None,
            SplitRequest::single("train").unwrap(), &DatasetOptions::default(),
        ).unwrap().into_single().unwrap();
        assert!(!train.get_vocab().contains("cow"));
    }

    #[test]
    fn test_missing_split_data_propagates() {
        let only_train = InMemorySource::new().with_split(Split::Train, vec![]);
        let result = setup_datasets(
            SquadVersion::Squad1, &only_train, None, None,
            SplitRequest::default(), &DatasetOptions::default(),
        );
        assert!(matches!(
            result,
            Err(DatasetError::SplitUnavailable { split: Split::Dev, .. })
        ));
    }

    #[test]
    fn test_tokenizer_failure_stops_vocab_build() {
        let picky: Arc<dyn Tokenize> = Arc::new(PickyTokenizer);
        let result = setup_datasets(
            SquadVersion::Squad1, &source(), None, Some(picky),
            SplitRequest::single("train").unwrap(), &DatasetOptions::default(),
        );
        assert!(matches!(result, Err(DatasetError::Tokenizer(_))));
    }

    #[test]
    fn test_tokenizer_failure_with_supplied_vocab_surfaces_on_precompute() {
        let picky: Arc<dyn Tokenize> = Arc::new(PickyTokenizer);
        let vocab = Arc::new(Vocab::new(Vec::new(), "<unk>"));
        let options = DatasetOptions { precompute_spans: true, ..DatasetOptions::default() };
        let result = setup_datasets(
            SquadVersion::Squad1, &source(), Some(vocab), Some(picky),
            SplitRequest::single("train").unwrap(), &options,
        );
        assert!(matches!(result, Err(DatasetError::Tokenizer(_))));
    }

    // Rejects any text mentioning a dog.
    struct PickyTokenizer;

    impl Tokenize for PickyTokenizer {
        fn tokenize(&self, text: &str) -> Result<Vec<String>> {
            if text.contains("dog") {
                return Err(DatasetError::tokenizer("no id for 'dog'"));
            }
            WhitespaceTokenizer.tokenize(text)
        }
    }

    #[test]
    fn test_duplicate_split_loads_once_and_returns_both() {
        let out = setup_datasets(
            SquadVersion::Squad1, &source(), None, None,
            SplitRequest::many(["train", "train"]).unwrap(), &DatasetOptions::default(),
        ).unwrap();
        assert_eq!(out.len(), 2);
    }
}
