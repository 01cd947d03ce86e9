// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to a data step:
//
//   config.rs — LoaderConfig persistence
//               Reads and writes the run configuration as
//               JSON so a load run can be reproduced from a
//               file instead of a long command line.
//
// Reference: Rust Book §7 (Modules)

/// LoaderConfig JSON loading and saving
pub mod config;
