// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw SQuAD files and burn tensor batches.
//
//   SQuAD JSON files
//       │
//       ▼
//   SquadJsonLoader   → RawExample per question
//       │
//       ▼
//   Tokenizer + Vocab → Transforms (text → LongTensor)
//       │
//       ▼
//   QuestionAnswerDataset → burn Dataset, token-space spans
//       │
//       ▼
//   QaBatcher         → padded Int tensor batches
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads SQuAD JSON releases into raw examples
pub mod loader;

/// Built-in rule-based tokenizers
pub mod tokenizer;

/// Token ↔ index vocabulary and its frequency builder
pub mod vocab;

/// Per-field transforms and the LongTensor type
pub mod transforms;

/// burn Dataset over one split with span remapping
pub mod dataset;

/// burn Batcher producing padded tensor batches
pub mod batcher;
