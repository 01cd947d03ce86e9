// ============================================================
// Layer 2 — LoadUseCase
// ============================================================
// The `load_data` smoke test, in order:
//
//   Step 1: Locate the dataset folder      (Layer 4 - store)
//   Step 2: Build the generator            (Layer 4 - generator)
//           sequence-labeling variant, loads + shuffles the split
//   Step 3: Pull the first few batches and keep their session ids
//
// The session ids are returned, not printed. Printing is the
// CLI's job.

use std::{fmt, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{BatchGenerator, DatasetStore, GeneratorOptions, LabelPolicy};
use crate::domain::{DatasetName, LoaderError, Mode, SessionId};

type LoadBackend = burn::backend::NdArray;

// ─── Loader Configuration ────────────────────────────────────────────────────
// Every knob of a load run. Serialisable so a run can be described
// in a JSON file; missing keys fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub data_dir:        String,
    pub data_name:       DatasetName,
    pub mode:            Mode,
    pub batch_size:      usize,
    pub epoch:           u64,
    pub shuffle:         bool,
    pub seed_offset:     u64,
    pub max_rounds:      usize,
    pub max_turn_len:    usize,
    pub use_pretrain:    bool,
    pub embed_size:      usize,
    pub min_cnt:         usize,
    pub form:            String,
    pub preview_batches: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            data_dir:        "data/MHCH_SSA".to_string(),
            data_name:       DatasetName::Clothes,
            mode:            Mode::Eval,
            batch_size:      32,
            epoch:           0,
            shuffle:         true,
            seed_offset:     0,
            max_rounds:      50,
            max_turn_len:    64,
            use_pretrain:    true,
            embed_size:      200,
            min_cnt:         2,
            form:            "pkl".to_string(),
            preview_batches: 3,
        }
    }
}

impl LoaderConfig {
    pub fn store(&self) -> DatasetStore {
        DatasetStore::new(&self.data_dir, self.data_name)
    }

    pub fn generator_options(&self, policy: LabelPolicy) -> GeneratorOptions {
        GeneratorOptions::default()
            .with_batch_size(self.batch_size)
            .with_shuffle(self.shuffle)
            .with_epoch(self.epoch)
            .with_seed_offset(self.seed_offset)
            .with_max_rounds(self.max_rounds)
            .with_turn_width(self.max_turn_len)
            .with_policy(policy)
    }
}

// ─── Phase ────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Load the split and preview its first batches
    LoadData,
    /// Parse the configuration only
    TestLoad,
}

impl FromStr for Phase {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load_data" => Ok(Phase::LoadData),
            "test_load" => Ok(Phase::TestLoad),
            other       => Err(LoaderError::InvalidPhase(other.to_string())),
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::LoadData => "load_data",
            Phase::TestLoad => "test_load",
        })
    }
}

// ─── LoadUseCase ──────────────────────────────────────────────────────────────
pub struct LoadUseCase {
    config: LoaderConfig,
}

impl LoadUseCase {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Run `phase` and return the session ids of every previewed batch
    pub fn execute(&self, phase: Phase) -> Result<Vec<Vec<SessionId>>> {
        let cfg = &self.config;
        tracing::debug!("Running phase '{}' with {:?}", phase, cfg);

        match phase {
            Phase::TestLoad => Ok(Vec::new()),
            Phase::LoadData => self.preview(),
        }
    }

    fn preview(&self) -> Result<Vec<Vec<SessionId>>> {
        let cfg = &self.config;

        // ── Step 1: Locate the dataset ────────────────────────────────────────
        let store = cfg.store();
        tracing::info!(
            "Dataset '{}' in '{}' (vocabulary: '{}')",
            cfg.data_name,
            store.dir().display(),
            store.vocab_path().display()
        );

        // ── Step 2: Build the sequence-labeling generator ─────────────────────
        let options = cfg
            .generator_options(LabelPolicy::SequenceLabeling)
            .with_progress(true);
        let generator = BatchGenerator::<LoadBackend>::new(&store, cfg.mode, options, Default::default())
            .with_context(|| format!("Cannot prepare the {} split of '{}'", cfg.mode, cfg.data_name))?;
        tracing::info!("{} batches available", generator.num_batches());

        // ── Step 3: Preview the first batches ─────────────────────────────────
        let mut previews = Vec::with_capacity(cfg.preview_batches);
        for (i, batch) in generator.take(cfg.preview_batches).enumerate() {
            let batch = batch.with_context(|| format!("Cannot build batch {i}"))?;
            previews.push(batch.session_ids);
        }

        Ok(previews)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::fixtures::sample_dataset;

    fn config_in(dir: &tempfile::TempDir) -> LoaderConfig {
        LoaderConfig {
            data_dir:   dir.path().display().to_string(),
            batch_size: 4,
            ..LoaderConfig::default()
        }
    }

    #[test]
    fn test_phase_names() {
        assert_eq!("load_data".parse::<Phase>().unwrap(), Phase::LoadData);
        assert_eq!("test_load".parse::<Phase>().unwrap(), Phase::TestLoad);
        assert!(matches!("build_vocab".parse::<Phase>(), Err(LoaderError::InvalidPhase(_))));
    }

    #[test]
    fn test_load_data_previews_three_batches() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(&dir);
        cfg.store().save(Mode::Eval, &sample_dataset(20)).unwrap();

        let previews = LoadUseCase::new(cfg).execute(Phase::LoadData).unwrap();
        assert_eq!(previews.len(), 3);
        assert!(previews.iter().all(|ids| ids.len() == 4));
    }

    #[test]
    fn test_preview_stops_at_the_last_batch() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(&dir);
        cfg.store().save(Mode::Eval, &sample_dataset(5)).unwrap();

        let previews = LoadUseCase::new(cfg).execute(Phase::LoadData).unwrap();
        let sizes: Vec<usize> = previews.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 1]);
    }

    #[test]
    fn test_missing_split_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LoadUseCase::new(config_in(&dir)).execute(Phase::LoadData).unwrap_err();

        let not_found = err.downcast_ref::<LoaderError>();
        assert!(matches!(not_found, Some(LoaderError::NotFound { .. })), "got {err:#}");
    }

    #[test]
    fn test_test_load_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let previews = LoadUseCase::new(config_in(&dir)).execute(Phase::TestLoad).unwrap();
        assert!(previews.is_empty());
    }
}
