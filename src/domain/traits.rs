// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The seams where callers plug in their own collaborators:
//
//   Tokenize     → text in, ordered tokens out
//   RawSource    → produces raw examples for a (version, split)
//   Persistable  → save/restore a component as a file
//
// The dataset and factory code only see these traits, so a
// caller can swap the basic English tokenizer for a HuggingFace
// one, or the JSON loader for an in-memory corpus, without
// touching the pipeline.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use std::path::Path;

use crate::domain::error::Result;
use crate::domain::raw_example::RawExample;
use crate::domain::split::{Split, SquadVersion};

// ─── Tokenize ─────────────────────────────────────────────────────────────────
/// Splits a string into an ordered sequence of tokens.
///
/// Implementations:
///   - BasicEnglishTokenizer → lowercase + punctuation splitting (default)
///   - WhitespaceTokenizer   → whitespace + trailing punctuation
///   - HfTokenizer           → any `tokenizer.json` from HuggingFace
///   - any `Fn(&str) -> Vec<String>` closure
///
/// Must be pure: the same input always yields the same tokens.
/// A tokenizer that cannot handle some input returns an error
/// instead of a partial or empty token list.
pub trait Tokenize: Send + Sync {
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

impl<F> Tokenize for F
where
    F: Fn(&str) -> Vec<String> + Send + Sync,
{
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self(text))
    }
}

// ─── RawSource ────────────────────────────────────────────────────────────────
/// Anything that can yield the raw examples of one split.
///
/// Implementations:
///   - SquadJsonLoader → official SQuAD JSON files under a root dir
///   - InMemorySource  → examples already held in memory
pub trait RawSource {
    fn load(&self, version: SquadVersion, split: Split) -> Result<Vec<RawExample>>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// A component whose state can be written to and read from disk.
///
/// Implementations:
///   - Vocab → JSON list of tokens plus the unknown-token index
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}
