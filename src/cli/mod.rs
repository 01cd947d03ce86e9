// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All work is delegated to Layer 2 (application); this layer
// only builds the config, routes, and prints.
//
// Usage:
//   dialogue-batcher --phase load_data --mode eval --data_name clothes
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::LoadArgs;

use crate::application::load_use_case::{LoadUseCase, LoaderConfig, Phase};
use crate::domain::SessionId;
use crate::infra::config::load_config;

#[derive(Parser, Debug)]
#[command(
    name = "dialogue-batcher",
    version = "0.1.0",
    about = "Load a pickled dialogue dataset and preview its training batches."
)]
pub struct Cli {
    #[command(flatten)]
    pub args: LoadArgs,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let base = match &self.args.config {
            Some(path) => load_config(path)?,
            None       => LoaderConfig::default(),
        };
        let cfg   = self.args.apply(base)?;
        let phase = self.args.phase.parse::<Phase>()?;

        tracing::info!(
            "Phase '{}' on {} / {} (form={}, min_cnt={}, use_pretrain={})",
            phase, cfg.data_name, cfg.mode, cfg.form, cfg.min_cnt, cfg.use_pretrain
        );

        let previews = LoadUseCase::new(cfg).execute(phase)?;
        for ids in &previews {
            println!("{}", format_ids(ids));
        }
        Ok(())
    }
}

/// `[id1, id2, ...]`
fn format_ids(ids: &[SessionId]) -> String {
    let joined = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
