// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the data layer for a concrete goal.
//
// Rules for this layer:
//   - No padding or encoding logic here (that's Layer 4)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The load_data smoke test and its configuration
pub mod load_use_case;
