// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads a HuggingFace `tokenizer.json` from disk and adapts it
// to the crate's Tokenize trait, so any pretrained or custom
// tokenizer can drive the dataset pipeline.
//
// Only the token STRINGS are used. Their ids inside the
// tokenizer model are ignored: the dataset's own Vocab assigns
// indices.
//
// Words the MODEL does not know come back as the model's own
// unknown token (e.g. "[UNK]" for WordLevel / WordPiece). Those
// are rewritten to the crate's UNK_TOKEN so they land on the
// Vocab's unknown index. Which words count as unknown is then
// decided by the model's vocabulary, not by min_freq/max_size.
//
// An encoding failure (for instance a WordLevel model whose
// unk_token is missing from its vocab) is returned as
// DatasetError::Tokenizer.
//
// Reference: tokenizers crate documentation

use std::path::{Path, PathBuf};

use tokenizers::models::ModelWrapper;
use tokenizers::Tokenizer;

use crate::data::vocab::UNK_TOKEN;
use crate::domain::error::{DatasetError, Result};
use crate::domain::traits::Tokenize;

/// A `tokenizers::Tokenizer` used as a plain text → tokens function.
pub struct HfTokenizer {
    inner:     Tokenizer,
    /// The model's unknown token, rewritten to UNK_TOKEN
    model_unk: Option<String>,
}

impl HfTokenizer {
    pub fn new(inner: Tokenizer) -> Self {
        let model_unk = match inner.get_model() {
            ModelWrapper::WordLevel(m) => Some(m.unk_token.clone()),
            ModelWrapper::WordPiece(m) => Some(m.unk_token.clone()),
            ModelWrapper::BPE(m)       => m.unk_token.clone(),
            _                          => None,
        };
        Self { inner, model_unk }
    }

    pub fn model_unk(&self) -> Option<&str> {
        self.model_unk.as_deref()
    }
}

impl Tokenize for HfTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| DatasetError::tokenizer(format!("cannot encode {text:?}: {e}")))?;

        let tokens = encoding
            .get_tokens()
            .iter()
            .map(|t| match &self.model_unk {
                Some(unk) if t == unk => UNK_TOKEN.to_string(),
                _                     => t.clone(),
            })
            .collect();
        Ok(tokens)
    }
}

pub struct TokenizerStore {
    path: PathBuf,
}

impl TokenizerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the tokenizer JSON file.
    pub fn load(&self) -> Result<HfTokenizer> {
        let tokenizer = Tokenizer::from_file(&self.path).map_err(|e| {
            DatasetError::tokenizer(format!(
                "cannot load tokenizer from '{}': {e}",
                self.path.display()
            ))
        })?;
        tracing::info!("Loaded tokenizer from '{}'", self.path.display());
        Ok(HfTokenizer::new(tokenizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal word-level tokenizer with a whitespace pre-tokenizer.
    const WORD_LEVEL: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": { "type": "Lowercase" },
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": { "[UNK]": 0, "a": 1, "cat": 2, "sat": 3, ".": 4 },
            "unk_token": "[UNK]"
        }
    }"#;

    // Same shape, but "[UNK]" is absent from the vocab, so
    // encoding any unknown word fails inside the model.
    const WORD_LEVEL_BROKEN_UNK: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": { "A": 0, "cat": 1, "sat": 2, ".": 3 },
            "unk_token": "[UNK]"
        }
    }"#;

    fn load(json: &str) -> (tempfile::TempDir, HfTokenizer) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, json).unwrap();
        let tok = TokenizerStore::new(&path).load().unwrap();
        (dir, tok)
    }

    #[test]
    fn test_load_and_tokenize() {
        let (_dir, tok) = load(WORD_LEVEL);
        assert_eq!(tok.tokenize("A cat sat.").unwrap(), vec!["a", "cat", "sat", "."]);
    }

    #[test]
    fn test_model_unknown_maps_to_crate_unknown() {
        let (_dir, tok) = load(WORD_LEVEL);
        assert_eq!(tok.model_unk(), Some("[UNK]"));
        assert_eq!(tok.tokenize("A dog sat.").unwrap(), vec!["a", UNK_TOKEN, "sat", "."]);
    }

    #[test]
    fn test_encode_failure_is_tokenizer_error() {
        let (_dir, tok) = load(WORD_LEVEL_BROKEN_UNK);
        assert_eq!(tok.tokenize("A cat sat.").unwrap(), vec!["A", "cat", "sat", "."]);
        assert!(matches!(tok.tokenize("A dog sat."), Err(DatasetError::Tokenizer(_))));
    }

    #[test]
    fn test_encode_failure_reaches_dataset_caller() {
        use std::sync::Arc;

        use crate::application::dataset_factory::{setup_datasets, DatasetOptions};
        use crate::data::loader::InMemorySource;
        use crate::data::vocab::Vocab;
        use crate::domain::raw_example::RawExample;
        use crate::domain::split::{Split, SplitRequest, SquadVersion};

        let (_dir, tok) = load(WORD_LEVEL_BROKEN_UNK);
        let tok: Arc<dyn Tokenize> = Arc::new(tok);
        let source = InMemorySource::new().with_split(Split::Train, vec![
            RawExample::new("A dog sat.", "What sat?", vec!["dog".into()], vec![2]),
        ]);

        let built = setup_datasets(
            SquadVersion::Squad1, &source, None, Some(Arc::clone(&tok)),
            SplitRequest::single("train").unwrap(), &DatasetOptions::default(),
        );
        assert!(matches!(built, Err(DatasetError::Tokenizer(_))));

        // With a vocab supplied the dataset builds, and the failure
        // comes back from item() instead of an empty encoding.
        let vocab = Arc::new(Vocab::new(["A", "cat", "sat", "."].map(String::from), UNK_TOKEN));
        let train = setup_datasets(
            SquadVersion::Squad1, &source, Some(vocab), Some(tok),
            SplitRequest::single("train").unwrap(), &DatasetOptions::default(),
        )
        .unwrap()
        .into_single()
        .unwrap();
        assert!(matches!(train.item(0), Err(DatasetError::Tokenizer(_))));
    }

    #[test]
    fn test_missing_file_is_tokenizer_error() {
        let err = TokenizerStore::new("/no/such/tokenizer.json").load().err().unwrap();
        assert!(matches!(err, DatasetError::Tokenizer(_)));
    }
}
