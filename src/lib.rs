//! Loads pickled customer-service dialogue datasets and turns them into
//! shuffled, padded, one-hot encoded training batches.
//!
//! ```no_run
//! use dialogue_batcher::data::{BatchGenerator, DatasetStore, GeneratorOptions, LabelPolicy};
//! use dialogue_batcher::domain::{DatasetName, Mode};
//!
//! # fn main() -> dialogue_batcher::domain::Result<()> {
//! let store   = DatasetStore::new("data/MHCH_SSA", DatasetName::Clothes);
//! let options = GeneratorOptions::default().with_epoch(3).with_policy(LabelPolicy::Categorical);
//!
//! for batch in BatchGenerator::<burn::backend::NdArray>::new(&store, Mode::Train, options, Default::default())? {
//!     let batch = batch?;
//!     println!("{} dialogues, tokens {:?}", batch.batch_size(), batch.token_ids.dims());
//! }
//! # Ok(())
//! # }
//! ```

#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod data;
pub mod domain;
pub mod infra;
