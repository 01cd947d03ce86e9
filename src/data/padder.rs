// ============================================================
// Layer 4 — Round Padder
// ============================================================
// Brings ragged dialogues to a fixed number of rounds.
//
//   turns > max_rounds → trailing turns are dropped   ("post" truncation)
//   turns < max_rounds → 0 is appended until full      ("post" padding)
//
// Only the turn dimension is padded. Token ids inside a turn are
// already fixed-width, so the token matrix of a batch is
// [batch, max_rounds, width] where `width` comes from the data.
//
// Output element types per field:
//   token ids              → f32
//   lengths, roles, labels → i64
//
// Everything is returned flat in row-major order, ready for
// `TensorData::new(values, shape)`.

use crate::domain::{LoaderError, Result};

/// Value written into every padded position
pub const FILL: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padder {
    max_rounds:          usize,
    fallback_turn_width: usize,
}

/// Token matrices of one batch, flattened to `[batch, max_rounds, width]`
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedTurns {
    pub values: Vec<f32>,
    pub width:  usize,
}

impl Padder {
    /// `fallback_turn_width` is only used when a batch holds no turns
    /// at all, so the width cannot be read from the data.
    pub fn new(max_rounds: usize, fallback_turn_width: usize) -> Self {
        Self { max_rounds, fallback_turn_width }
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    /// Pad every row to `max_rounds`, flat `[rows.len(), max_rounds]`
    pub fn pad_rows(&self, rows: &[Vec<i64>]) -> Vec<i64> {
        let mut out = Vec::with_capacity(rows.len() * self.max_rounds);
        for row in rows {
            let kept = row.len().min(self.max_rounds);
            out.extend_from_slice(&row[..kept]);
            out.resize(out.len() + self.max_rounds - kept, FILL);
        }
        out
    }

    /// Pad the turn dimension of each dialogue's token matrix.
    ///
    /// `offset` is the index of the first dialogue in the full dataset
    /// and is only used to report where a ragged turn was found.
    pub fn pad_turn_matrices(&self, dialogues: &[Vec<Vec<i64>>], offset: usize) -> Result<PaddedTurns> {
        let width = dialogues
            .iter()
            .flatten()
            .next()
            .map_or(self.fallback_turn_width, Vec::len);

        let mut values = Vec::with_capacity(dialogues.len() * self.max_rounds * width);
        for (d, turns) in dialogues.iter().enumerate() {
            let kept = turns.len().min(self.max_rounds);

            for (t, turn) in turns[..kept].iter().enumerate() {
                if turn.len() != width {
                    return Err(LoaderError::RaggedTurn {
                        dialogue: offset + d,
                        turn:     t,
                        expected: width,
                        found:    turn.len(),
                    });
                }
                values.extend(turn.iter().map(|&id| id as f32));
            }

            values.resize(values.len() + (self.max_rounds - kept) * width, FILL as f32);
        }

        Ok(PaddedTurns { values, width })
    }
}
