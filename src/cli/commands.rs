// ============================================================
// Layer 1 — CLI Arguments
// ============================================================
// The flags of the single entry point. Flag names keep their
// snake_case spelling (--data_name, --min_cnt, ...) so existing
// run scripts keep working.
//
// Every value flag is optional: a flag that is given overrides
// the config file (or the built-in defaults when there is no
// --config), a flag that is left out changes nothing.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::application::load_use_case::LoaderConfig;

#[derive(Args, Debug, Default)]
pub struct LoadArgs {
    /// What action to take: load_data or test_load
    #[arg(long, default_value = "load_data")]
    pub phase: String,

    /// JSON config file to start from
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which split to load: train, eval or test [default: eval]
    #[arg(long)]
    pub mode: Option<String>,

    /// Which dataset to load: clothes or makeup [default: clothes]
    #[arg(long = "data_name")]
    pub data_name: Option<String>,

    /// Folder holding one sub-folder per dataset [default: data/MHCH_SSA]
    #[arg(long = "data_dir")]
    pub data_dir: Option<String>,

    /// File type of the split data [default: pkl]
    #[arg(long)]
    pub form: Option<String>,

    /// Minimum word frequency the vocabulary was built with [default: 2]
    #[arg(long = "min_cnt")]
    pub min_cnt: Option<usize>,

    /// Whether the model uses pretrained embeddings [default: true]
    #[arg(long = "use_pretrain")]
    pub use_pretrain: Option<bool>,

    /// Dialogues per batch [default: 32]
    #[arg(long = "batch_size")]
    pub batch_size: Option<usize>,

    /// Epoch number used to seed the shuffle [default: 0]
    #[arg(long)]
    pub epoch: Option<u64>,

    /// Keep the dialogues in file order
    #[arg(long = "no_shuffle")]
    pub no_shuffle: bool,

    /// How many batches the load_data phase prints [default: 3]
    #[arg(long = "preview_batches")]
    pub preview_batches: Option<usize>,
}

impl LoadArgs {
    /// Apply every flag that was given on top of `cfg`.
    /// Unknown mode or dataset names are rejected here.
    pub fn apply(&self, mut cfg: LoaderConfig) -> Result<LoaderConfig> {
        if let Some(mode) = &self.mode {
            cfg.mode = mode.parse()?;
        }
        if let Some(name) = &self.data_name {
            cfg.data_name = name.parse()?;
        }
        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        if let Some(form) = &self.form {
            cfg.form = form.clone();
        }
        if let Some(min_cnt) = self.min_cnt {
            cfg.min_cnt = min_cnt;
        }
        if let Some(use_pretrain) = self.use_pretrain {
            cfg.use_pretrain = use_pretrain;
        }
        if let Some(batch_size) = self.batch_size {
            cfg.batch_size = batch_size;
        }
        if let Some(epoch) = self.epoch {
            cfg.epoch = epoch;
        }
        if self.no_shuffle {
            cfg.shuffle = false;
        }
        if let Some(preview) = self.preview_batches {
            cfg.preview_batches = preview;
        }
        Ok(cfg)
    }
}
