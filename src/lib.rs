// ============================================================
// squad_qa — SQuAD question-answer datasets for burn
// ============================================================
// Layers, outermost first:
//
//   cli          — clap commands (binary only uses this)
//   application  — SQuAD1/SQuAD2 factory, config, use cases
//   data         — loader, tokenizers, vocab, transforms,
//                  burn Dataset and Batcher
//   infra        — HuggingFace tokenizer adapter
//   domain       — plain types, errors and traits
//
// Typical use:
//
//   use squad_qa::prelude::*;
//
//   let datasets = squad1("data/squad", None, None, SplitRequest::default())?;
//   let [train, dev]: [QuestionAnswerDataset; 2] =
//       datasets.into_vec().try_into().expect("two splits");
//   let example = train.item(0)?;

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;

/// The types most callers need.
pub mod prelude {
    pub use crate::application::dataset_factory::{
        setup_datasets, squad1, squad2, DatasetOptions, Datasets,
    };
    pub use crate::data::batcher::{QaBatch, QaBatcher};
    pub use crate::data::dataset::{EncodedExample, QuestionAnswerDataset};
    pub use crate::data::loader::{InMemorySource, SquadJsonLoader};
    pub use crate::data::tokenizer::{BasicEnglishTokenizer, WhitespaceTokenizer};
    pub use crate::data::transforms::{LongTensor, Transforms};
    pub use crate::data::vocab::{FrequencyVocabBuilder, Vocab, VocabBuilder};
    pub use crate::domain::error::DatasetError;
    pub use crate::domain::raw_example::{RawExample, NO_ANSWER};
    pub use crate::domain::split::{Split, SplitRequest, SquadVersion};
    pub use crate::domain::traits::{Persistable, RawSource, Tokenize};
}
