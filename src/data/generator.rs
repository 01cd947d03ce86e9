// ============================================================
// Layer 4 — Batch Generator
// ============================================================
// Produces the batches of one epoch, lazily, one per `next()`.
//
//   DialogueSource::load(mode)      eager, full split in memory
//       │
//       ▼
//   Shuffler::shuffle(epoch)        only when options.shuffle
//       │
//       ▼
//   contiguous chunks of batch_size (last one may be short)
//       │
//       ▼
//   DialogueBatcher::batch(chunk)   pad + encode → DialogueBatch
//
// The generator owns its copy of the dataset. It is finite and
// consumed once; building a new one reloads and reshuffles, so
// the batches are a pure function of
// (source, mode, batch_size, shuffle, epoch, seed_offset).
//
// Reference: Rust Book §13 (Iterators)

use burn::tensor::backend::Backend;
use indicatif::{ProgressBar, ProgressStyle};

use crate::data::{
    batcher::{DialogueBatch, DialogueBatcher, LabelPolicy},
    padder::Padder,
    shuffler::Shuffler,
};
use crate::domain::{DialogueDataset, DialogueSource, LoaderError, Mode, Result, SessionId};

// ─── GeneratorOptions ─────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Dialogues per batch
    pub batch_size: usize,
    /// Reorder the split before chunking it
    pub shuffle: bool,
    /// Epoch number; the shuffle seed is `epoch + seed_offset`
    pub epoch: u64,
    pub seed_offset: u64,
    /// Rounds every dialogue is padded or truncated to
    pub max_rounds: usize,
    /// Token width assumed when a batch holds no turns at all
    pub turn_width: usize,
    pub policy: LabelPolicy,
    /// Draw a progress bar on stderr while iterating
    pub show_progress: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            batch_size:    32,
            shuffle:       true,
            epoch:         0,
            seed_offset:   0,
            max_rounds:    50,
            turn_width:    64,
            policy:        LabelPolicy::Categorical,
            show_progress: false,
        }
    }
}

impl GeneratorOptions {
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    pub fn with_epoch(mut self, epoch: u64) -> Self {
        self.epoch = epoch;
        self
    }

    pub fn with_seed_offset(mut self, seed_offset: u64) -> Self {
        self.seed_offset = seed_offset;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_turn_width(mut self, turn_width: usize) -> Self {
        self.turn_width = turn_width;
        self
    }

    pub fn with_policy(mut self, policy: LabelPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }
}

// ─── BatchGenerator ───────────────────────────────────────────────────────────
pub struct BatchGenerator<B: Backend> {
    dataset:    DialogueDataset,
    batcher:    DialogueBatcher<B>,
    batch_size: usize,
    cursor:     usize,
    progress:   ProgressBar,
}

impl<B: Backend> BatchGenerator<B> {
    /// Load `mode` from `source`, shuffle it if requested, and get
    /// ready to hand out batches on `device`.
    pub fn new<S>(source: &S, mode: Mode, options: GeneratorOptions, device: B::Device) -> Result<Self>
    where
        S: DialogueSource + ?Sized,
    {
        if options.batch_size == 0 {
            return Err(LoaderError::InvalidBatchSize);
        }

        tracing::info!(
            "Using {} data generator on the {} split",
            match options.policy {
                LabelPolicy::Categorical      => "categorical",
                LabelPolicy::SequenceLabeling => "sequence-labeling",
            },
            mode,
        );

        let dataset = source.load(mode)?;
        let dataset = if options.shuffle {
            Shuffler::new(options.seed_offset).shuffle(dataset, options.epoch)?
        } else {
            dataset
        };

        let padder  = Padder::new(options.max_rounds, options.turn_width);
        let batcher = DialogueBatcher::new(device, padder, options.policy);

        let num_batches = dataset.len().div_ceil(options.batch_size);
        let progress = if options.show_progress {
            progress_bar(num_batches as u64)
        } else {
            ProgressBar::hidden()
        };

        Ok(Self {
            dataset,
            batcher,
            batch_size: options.batch_size,
            cursor: 0,
            progress,
        })
    }

    /// Batches in a run with no failures: ceil(N / batch_size)
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// Session ids in the order they will be batched
    pub fn session_order(&self) -> &[SessionId] {
        &self.dataset.session_ids
    }

    /// The (possibly shuffled) dataset being batched
    pub fn dataset(&self) -> &DialogueDataset {
        &self.dataset
    }

    fn remaining(&self) -> usize {
        self.dataset.len().saturating_sub(self.cursor).div_ceil(self.batch_size)
    }
}

impl<B: Backend> Iterator for BatchGenerator<B> {
    type Item = Result<DialogueBatch<B>>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.len();
        if self.cursor >= total {
            self.progress.finish_and_clear();
            return None;
        }

        let start = self.cursor;
        let end   = (start + self.batch_size).min(total);

        let result = self.batcher.batch(self.dataset.view(start..end));
        match &result {
            Ok(batch) => {
                self.cursor = end;
                self.progress.inc(1);
                tracing::debug!("Batch of dialogues {}..{} ready ({} rows)", start, end, batch.batch_size());
            }
            // Errors are fatal: nothing is yielded after the first one
            Err(e) => {
                self.cursor = total;
                self.progress.abandon();
                tracing::error!("Batch of dialogues {}..{} failed: {}", start, end, e);
            }
        }

        Some(result)
    }

    // A failed batch ends the stream early, so only the upper bound is exact
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining.min(1), Some(remaining))
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(
        "Processing: {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}<{eta_precise}]",
    ) {
        bar.set_style(style);
    }
    bar
}
