// ============================================================
// Layer 2 — Dataset Configuration
// ============================================================
// Everything needed to build datasets, in one serialisable
// struct. The CLI converts its flags into this; it can also be
// read from a JSON file so runs are reproducible.
//
// Example config.json:
//   {
//     "root": "data/squad",
//     "version": "squad2",
//     "splits": ["train", "dev"],
//     "vocab_path": null,
//     "tokenizer_file": null,
//     "precompute_spans": false,
//     "min_freq": 1,
//     "max_vocab_size": null
//   }

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::dataset_factory::DatasetOptions;
use crate::data::vocab::{FrequencyVocabBuilder, Vocab};
use crate::domain::split::{SplitRequest, SquadVersion};
use crate::domain::traits::{Persistable, Tokenize};
use crate::infra::tokenizer_store::TokenizerStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding the SQuAD JSON files
    pub root:             PathBuf,
    pub version:          SquadVersion,
    /// One name → a single dataset, several → a list
    pub splits:           Vec<String>,
    /// Pre-built vocab JSON; built from train when absent
    pub vocab_path:       Option<PathBuf>,
    /// HuggingFace tokenizer.json; basic English when absent
    pub tokenizer_file:   Option<PathBuf>,
    pub precompute_spans: bool,
    pub min_freq:         usize,
    pub max_vocab_size:   Option<usize>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root:             PathBuf::from("."),
            version:          SquadVersion::Squad1,
            splits:           vec!["train".to_string(), "dev".to_string()],
            vocab_path:       None,
            tokenizer_file:   None,
            precompute_spans: false,
            min_freq:         1,
            max_vocab_size:   None,
        }
    }
}

impl DatasetConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config JSON in '{}'", path.display()))
    }

    pub fn split_request(&self) -> Result<SplitRequest> {
        let request = match self.splits.as_slice() {
            [one] => SplitRequest::single(one)?,
            many  => SplitRequest::many(many)?,
        };
        Ok(request)
    }

    pub fn tokenizer(&self) -> Result<Option<Arc<dyn Tokenize>>> {
        match &self.tokenizer_file {
            Some(path) => {
                let tok = TokenizerStore::new(path).load()?;
                Ok(Some(Arc::new(tok)))
            }
            None => Ok(None),
        }
    }

    pub fn vocab(&self) -> Result<Option<Arc<Vocab>>> {
        match &self.vocab_path {
            Some(path) => {
                let vocab = Vocab::load(path)
                    .with_context(|| format!("Cannot load vocab '{}'", path.display()))?;
                Ok(Some(Arc::new(vocab)))
            }
            None => Ok(None),
        }
    }

    pub fn options(&self) -> DatasetOptions {
        let mut builder = FrequencyVocabBuilder::new().with_min_freq(self.min_freq);
        if let Some(max) = self.max_vocab_size {
            builder = builder.with_max_size(max);
        }
        DatasetOptions {
            precompute_spans: self.precompute_spans,
            vocab_builder:    Arc::new(builder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_factory_defaults() {
        let cfg = DatasetConfig::default();
        assert_eq!(cfg.root, PathBuf::from("."));
        assert_eq!(cfg.split_request().unwrap(), SplitRequest::default());
        assert!(cfg.vocab().unwrap().is_none());
        assert!(cfg.tokenizer().unwrap().is_none());
    }

    #[test]
    fn test_one_split_name_is_single_request() {
        let cfg = DatasetConfig { splits: vec!["dev".into()], ..Default::default() };
        assert!(matches!(cfg.split_request().unwrap(), SplitRequest::Single(_)));
    }

    #[test]
    fn test_bad_split_name_is_rejected() {
        let cfg = DatasetConfig { splits: vec!["test".into()], ..Default::default() };
        assert!(cfg.split_request().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: DatasetConfig =
            serde_json::from_str(r#"{ "version": "squad2", "splits": ["train"] }"#).unwrap();
        assert_eq!(cfg.version, SquadVersion::Squad2);
        assert_eq!(cfg.min_freq, 1);
        assert!(!cfg.precompute_spans);
    }
}
