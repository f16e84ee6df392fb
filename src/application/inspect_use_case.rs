// ============================================================
// Layer 2 — Inspect Use Case
// ============================================================
// Loads the configured datasets and reports on them:
//   - vocabulary size
//   - number of examples per split
//   - one encoded example, with its raw text alongside
//
// Useful for checking that a tokenizer and vocab produce the
// spans you expect before wiring the datasets into training.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::config::DatasetConfig;
use crate::application::dataset_factory::setup_datasets;
use crate::data::dataset::{EncodedExample, QuestionAnswerDataset};
use crate::data::loader::SquadJsonLoader;
use crate::domain::raw_example::RawExample;

#[derive(Debug, Clone, Serialize)]
pub struct SplitSummary {
    pub split:    String,
    pub examples: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub version:    String,
    pub vocab_size: usize,
    pub splits:     Vec<SplitSummary>,
    /// Raw and encoded form of the sampled example of the first split
    pub sample:     Option<(RawExample, EncodedExample)>,
}

pub struct InspectUseCase {
    config: DatasetConfig,
    index:  usize,
}

impl InspectUseCase {
    pub fn new(config: DatasetConfig, index: usize) -> Self {
        Self { config, index }
    }

    pub fn execute(&self) -> Result<InspectReport> {
        let cfg = &self.config;
        let request = cfg.split_request()?;
        let names: Vec<String> = request.splits().iter().map(|s| s.to_string()).collect();

        let loader = SquadJsonLoader::new(&cfg.root);
        let datasets = setup_datasets(
            cfg.version,
            &loader,
            cfg.vocab()?,
            cfg.tokenizer()?,
            request,
            &cfg.options(),
        )
        .with_context(|| format!("Cannot build {} datasets from '{}'", cfg.version, cfg.root.display()))?
        .into_vec();

        let vocab_size = datasets.first().map(|ds| ds.get_vocab().len()).unwrap_or(0);
        let splits = names
            .into_iter()
            .zip(&datasets)
            .map(|(split, ds)| SplitSummary { split, examples: ds.len() })
            .collect();

        let sample = match datasets.first() {
            Some(ds) if !ds.is_empty() => Some(self.sample(ds)?),
            _ => None,
        };

        Ok(InspectReport {
            version: cfg.version.to_string(),
            vocab_size,
            splits,
            sample,
        })
    }

    fn sample(&self, ds: &QuestionAnswerDataset) -> Result<(RawExample, EncodedExample)> {
        let encoded = ds.item(self.index)?;
        let raw = ds
            .raw(self.index)
            .cloned()
            .context("raw example vanished after encoding")?;
        Ok((raw, encoded))
    }
}
