// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data and infrastructure layers:
//
//   dataset_factory  — SQuAD1 / SQuAD2 entry points
//   config           — serialisable run configuration
//   inspect_use_case — load datasets and report on them
//   vocab_use_case   — build a vocab from train and save it
//
// No printing here; that belongs to the CLI layer.

/// SQuAD1 / SQuAD2 dataset construction
pub mod dataset_factory;

/// Run configuration shared by the use cases
pub mod config;

/// Dataset inspection workflow
pub mod inspect_use_case;

/// Vocabulary building workflow
pub mod vocab_use_case;
