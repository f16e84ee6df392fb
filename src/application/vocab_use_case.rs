// ============================================================
// Layer 2 — Build Vocab Use Case
// ============================================================
// Builds the vocabulary from a corpus' train split and writes
// it to disk, so later runs (e.g. dev-only evaluation) can pass
// it back in with --vocab instead of rebuilding it.
//
//   Step 1: build the train dataset (this builds the vocab)
//   Step 2: save the shared vocab as JSON

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::config::DatasetConfig;
use crate::application::dataset_factory::setup_datasets;
use crate::data::loader::SquadJsonLoader;
use crate::domain::split::SplitRequest;
use crate::domain::traits::Persistable;

pub struct BuildVocabUseCase {
    config: DatasetConfig,
    out:    PathBuf,
}

impl BuildVocabUseCase {
    pub fn new(config: DatasetConfig, out: impl Into<PathBuf>) -> Self {
        Self { config, out: out.into() }
    }

    /// Returns the number of vocabulary entries written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;
        let loader = SquadJsonLoader::new(&cfg.root);

        let train = setup_datasets(
            cfg.version,
            &loader,
            None,
            cfg.tokenizer()?,
            SplitRequest::single("train")?,
            &cfg.options(),
        )?
        .into_single()
        .context("single split request returned several datasets")?;

        let vocab = train.get_vocab();
        vocab
            .save(&self.out)
            .with_context(|| format!("Cannot save vocab to '{}'", self.out.display()))?;

        tracing::info!("Saved {} vocab entries to '{}'", vocab.len(), self.out.display());
        Ok(vocab.len())
    }
}
