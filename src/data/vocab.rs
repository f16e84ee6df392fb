// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// A Vocab maps every known token to a dense integer index and
// back again. Unknown tokens map to the "<unk>" index, so
// lookup never fails.
//
// Built by counting token frequencies over the train split:
//
//   stream:  the cat sat the mat the
//   counts:  the=3 cat=1 sat=1 mat=1
//   vocab:   <unk>=0 <pad>=1 the=2 cat=3 sat=4 mat=5
//
// Specials come first. Equal counts keep the order in which the
// tokens first appeared, so the same corpus always produces the
// same indices.
//
// Once built, a Vocab is never mutated. Datasets share it
// through an Arc.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::error::{DatasetError, Result};
use crate::domain::traits::Persistable;

pub const UNK_TOKEN: &str = "<unk>";
pub const PAD_TOKEN: &str = "<pad>";

/// Immutable token ↔ index mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VocabFile", into = "VocabFile")]
pub struct Vocab {
    itos:      Vec<String>,
    stoi:      HashMap<String, usize>,
    unk_index: usize,
}

/// On-disk form: just the ordered tokens.
#[derive(Serialize, Deserialize)]
struct VocabFile {
    unk_token: String,
    tokens:    Vec<String>,
}

impl Vocab {
    /// Build from an ordered token list. Duplicates keep their first
    /// position; `unk_token` is prepended if the list lacks it.
    pub fn new(tokens: impl IntoIterator<Item = String>, unk_token: &str) -> Self {
        let mut itos: Vec<String> = Vec::new();
        let mut stoi: HashMap<String, usize> = HashMap::new();

        for token in tokens {
            if !stoi.contains_key(&token) {
                stoi.insert(token.clone(), itos.len());
                itos.push(token);
            }
        }

        if !stoi.contains_key(unk_token) {
            itos.insert(0, unk_token.to_string());
            for index in stoi.values_mut() {
                *index += 1;
            }
            stoi.insert(unk_token.to_string(), 0);
        }

        let unk_index = stoi[unk_token];
        Self { itos, stoi, unk_index }
    }

    pub fn len(&self) -> usize {
        self.itos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itos.is_empty()
    }

    /// Index of `token`, or the unknown index.
    pub fn lookup(&self, token: &str) -> usize {
        self.stoi.get(token).copied().unwrap_or(self.unk_index)
    }

    /// Exact index of `token`, without the unknown fallback.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.stoi.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.stoi.contains_key(token)
    }

    /// Token stored at `index`.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.itos.get(index).map(String::as_str)
    }

    pub fn unk_index(&self) -> usize {
        self.unk_index
    }

    /// Index of "<pad>", if the vocabulary has one.
    pub fn pad_index(&self) -> Option<usize> {
        self.index_of(PAD_TOKEN)
    }

    /// Look up a token sequence as 64-bit indices.
    pub fn lookup_indices<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<i64> {
        tokens
            .iter()
            .map(|t| self.lookup(t.as_ref()) as i64)
            .collect()
    }

    /// Tokens in index order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.itos.iter().map(String::as_str)
    }
}

impl TryFrom<VocabFile> for Vocab {
    type Error = String;

    fn try_from(file: VocabFile) -> std::result::Result<Self, Self::Error> {
        if file.unk_token.is_empty() {
            return Err("vocab file has an empty unk_token".to_string());
        }
        Ok(Vocab::new(file.tokens, &file.unk_token))
    }
}

impl From<Vocab> for VocabFile {
    fn from(vocab: Vocab) -> Self {
        let unk_token = vocab.itos[vocab.unk_index].clone();
        VocabFile { unk_token, tokens: vocab.itos }
    }
}

impl Persistable for Vocab {
    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Saved vocab ({} entries) to '{}'", self.len(), path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocab: Vocab = serde_json::from_str(&raw).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded vocab ({} entries) from '{}'", vocab.len(), path.display());
        Ok(vocab)
    }
}

// ─── VocabBuilder ─────────────────────────────────────────────────────────────
/// Turns a token stream into a vocabulary.
pub trait VocabBuilder {
    fn build(&self, tokens: &mut dyn Iterator<Item = String>) -> Vocab;
}

/// Frequency-ordered vocabulary builder.
#[derive(Debug, Clone)]
pub struct FrequencyVocabBuilder {
    /// Placed first, in this order. The first one is the unknown token.
    pub specials: Vec<String>,
    /// Tokens seen fewer times than this are dropped.
    pub min_freq: usize,
    /// Cap on non-special entries.
    pub max_size: Option<usize>,
}

impl FrequencyVocabBuilder {
    pub fn new() -> Self {
        Self {
            specials: vec![UNK_TOKEN.to_string(), PAD_TOKEN.to_string()],
            min_freq: 1,
            max_size: None,
        }
    }

    pub fn with_min_freq(mut self, min_freq: usize) -> Self {
        self.min_freq = min_freq.max(1);
        self
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }
}

impl Default for FrequencyVocabBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VocabBuilder for FrequencyVocabBuilder {
    fn build(&self, tokens: &mut dyn Iterator<Item = String>) -> Vocab {
        // token → (count, first position)
        let mut freq: HashMap<String, (usize, usize)> = HashMap::new();
        for (pos, token) in tokens.enumerate() {
            freq.entry(token).or_insert((0, pos)).0 += 1;
        }

        let mut counted: Vec<(String, usize, usize)> = freq
            .into_iter()
            .filter(|(tok, (count, _))| *count >= self.min_freq && !self.specials.contains(tok))
            .map(|(tok, (count, first))| (tok, count, first))
            .collect();
        counted.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        if let Some(max) = self.max_size {
            counted.truncate(max);
        }

        let unk = self
            .specials
            .first()
            .cloned()
            .unwrap_or_else(|| UNK_TOKEN.to_string());
        let ordered = self
            .specials
            .iter()
            .cloned()
            .chain(counted.into_iter().map(|(tok, _, _)| tok));
        Vocab::new(ordered, &unk)
    }
}
