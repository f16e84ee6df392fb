// ============================================================
// Layer 4 — Raw SQuAD Loaders
// ============================================================
// Reads the official SQuAD JSON releases from a local directory.
//
// File layout under `root`:
//   train-v1.1.json  dev-v1.1.json   ← SQuAD1
//   train-v2.0.json  dev-v2.0.json   ← SQuAD2
//
// JSON structure (serde walks it for us):
//   { "data": [
//       { "title": ...,
//         "paragraphs": [
//           { "context": "...",
//             "qas": [
//               { "question": "...",
//                 "answers": [ { "text": "...", "answer_start": 42 } ],
//                 "is_impossible": false } ] } ] } ] }
//
// Every qa entry becomes one RawExample. A question with an
// empty answers list (SQuAD2 "impossible") becomes
//   answers = [""], answer_start = [-1]
//
// Downloading the files is not this crate's job; they must
// already be on disk.
//
// Reference: serde_json documentation

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::error::{DatasetError, Result};
use crate::domain::raw_example::RawExample;
use crate::domain::split::{Split, SquadVersion};
use crate::domain::traits::RawSource;

// ─── JSON schema ──────────────────────────────────────────────────────────────
#[derive(Debug, Deserialize)]
struct SquadFile {
    data: Vec<SquadArticle>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    #[serde(default)]
    title: String,
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    context: String,
    qas: Vec<SquadQa>,
}

#[derive(Debug, Deserialize)]
struct SquadQa {
    question: String,
    #[serde(default)]
    answers: Vec<SquadAnswer>,
}

#[derive(Debug, Deserialize)]
struct SquadAnswer {
    text: String,
    answer_start: i64,
}

// ─── SquadJsonLoader ──────────────────────────────────────────────────────────
/// Loads SQuAD splits from JSON files under a root directory.
#[derive(Debug, Clone)]
pub struct SquadJsonLoader {
    root: PathBuf,
}

impl SquadJsonLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the file for `(version, split)` is expected.
    pub fn path_for(&self, version: SquadVersion, split: Split) -> PathBuf {
        self.root.join(version.file_name(split))
    }

    /// Parse one SQuAD JSON file into raw examples.
    pub fn load_file(path: &Path) -> Result<Vec<RawExample>> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed: SquadFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| DatasetError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(flatten(parsed))
    }
}

impl RawSource for SquadJsonLoader {
    fn load(&self, version: SquadVersion, split: Split) -> Result<Vec<RawExample>> {
        let path = self.path_for(version, split);
        tracing::debug!("Reading {} {} from '{}'", version, split, path.display());
        let examples = Self::load_file(&path)?;
        tracing::info!("Loaded {} {} examples for {}", examples.len(), split, version);
        Ok(examples)
    }
}

/// Walk articles → paragraphs → questions in file order.
fn flatten(file: SquadFile) -> Vec<RawExample> {
    let mut examples = Vec::new();

    for article in file.data {
        for paragraph in article.paragraphs {
            for qa in paragraph.qas {
                let example = if qa.answers.is_empty() {
                    RawExample::unanswerable(paragraph.context.clone(), qa.question)
                } else {
                    let (answers, answer_start) = qa
                        .answers
                        .into_iter()
                        .map(|a| (a.text, a.answer_start))
                        .unzip();
                    RawExample::new(paragraph.context.clone(), qa.question, answers, answer_start)
                };
                examples.push(example);
            }
        }
        tracing::trace!("Flattened article '{}'", article.title);
    }
    examples
}

// ─── InMemorySource ───────────────────────────────────────────────────────────
/// Raw examples already in memory, keyed by split.
/// The same examples are served for every SQuAD version.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    splits: HashMap<Split, Vec<RawExample>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_split(mut self, split: Split, examples: Vec<RawExample>) -> Self {
        self.splits.insert(split, examples);
        self
    }
}

impl RawSource for InMemorySource {
    fn load(&self, version: SquadVersion, split: Split) -> Result<Vec<RawExample>> {
        self.splits
            .get(&split)
            .cloned()
            .ok_or(DatasetError::SplitUnavailable { version, split })
    }
}
