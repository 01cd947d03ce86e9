// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits describing the dialogue
// corpus. Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only plain data, validation and abstractions
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The eight parallel per-dialogue sequences
pub mod dialogue;

// Closed enumerations for splits and corpora
pub mod mode;

// The library-wide error type
pub mod error;

// Core abstractions (traits) the data layer implements
pub mod traits;

pub use dialogue::{DialogueDataset, DialogueView, SessionId};
pub use error::{LoaderError, Result};
pub use mode::{DatasetName, Mode};
pub use traits::DialogueSource;
