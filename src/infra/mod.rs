// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Adapters to third-party libraries that the rest of the crate
// only sees through domain traits.
//
//   tokenizer_store.rs — loads a HuggingFace tokenizer.json and
//                        exposes it as a Tokenize implementation

/// HuggingFace tokenizer loading and adaptation
pub mod tokenizer_store;
