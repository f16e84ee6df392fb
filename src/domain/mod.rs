// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that define what the system
// talks about: raw SQuAD examples, splits, errors, and the
// collaborator seams.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only structs, enums and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Typed errors shared by every layer
pub mod error;

/// A question with its context, answers and character offsets
pub mod raw_example;

/// Split names and SQuAD releases
pub mod split;

/// Tokenizer, raw source and persistence abstractions
pub mod traits;
