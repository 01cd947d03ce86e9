// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the .pkl file on disk and a batch of
// Burn tensors:
//
//   {dataset}/{mode}.pkl
//       │
//       ▼
//   DatasetStore      → eight parallel sequences, validated
//       │
//       ▼
//   Shuffler          → one seeded permutation for all eight
//       │
//       ▼
//   Padder            → post-pad / post-truncate to 50 rounds
//       │
//       ▼
//   Encoder           → one-hot label streams (categorical only)
//       │
//       ▼
//   DialogueBatcher   → DialogueBatch<B> on the target device
//       │
//       ▼
//   BatchGenerator    → lazy iterator over one epoch
//
// Reference: Burn Book §4 (Datasets and Dataloaders)
//            Rust Book §13 (Iterators and Closures)

/// Reads and writes the eight-value .pkl split files
pub mod store;

/// Seeded, all-fields-at-once dataset permutation
pub mod shuffler;

/// Fixed-round padding and truncation
pub mod padder;

/// One-hot label encoding with range checks
pub mod encoder;

/// Turns a chunk of dialogues into Burn tensors
pub mod batcher;

/// Iterator over the batches of one epoch
pub mod generator;

pub use batcher::{BatchLabels, DialogueBatch, DialogueBatcher, LabelPolicy};
pub use generator::{BatchGenerator, GeneratorOptions};
pub use store::DatasetStore;
