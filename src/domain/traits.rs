// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The batch generator only needs "something that can hand me a
// split of the dataset". Programming against this trait keeps
// the generator independent of where the data lives:
//
//   - DatasetStore implements DialogueSource → reads .pkl files
//   - DialogueDataset implements it too      → in-memory data
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use crate::domain::dialogue::DialogueDataset;
use crate::domain::error::Result;
use crate::domain::mode::Mode;

// ─── DialogueSource ───────────────────────────────────────────────────────────
/// Any component that can produce one split of a dialogue dataset.
pub trait DialogueSource {
    /// Load the full split for `mode`. Every call is a fresh, eager load.
    fn load(&self, mode: Mode) -> Result<DialogueDataset>;
}

/// An already loaded dataset serves the same data for every mode.
impl DialogueSource for DialogueDataset {
    fn load(&self, _mode: Mode) -> Result<DialogueDataset> {
        self.validate()?;
        Ok(self.clone())
    }
}
