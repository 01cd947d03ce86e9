// ============================================================
// Layer 3 — Dialogue Dataset Domain Type
// ============================================================
// One split (train / eval / test) of a customer-service
// corpus, held as eight parallel sequences. Entry `i` of every
// sequence describes the same dialogue:
//
//   token_ids        dialogue → turn → token id
//   turn_lengths     dialogue → token count per turn
//   dialogue_lengths true turn count per dialogue
//   session_ids      opaque key back to the source data
//   roles            dialogue → speaker role per turn
//   handoff          dialogue → 0/1 per turn      (main target)
//   sentiment        dialogue → 0/1/2 per turn    (aux target)
//   score            0/1/2 per dialogue           (aux target)
//
// The dataset is a plain value. The only "mutation" is
// `reorder`, which consumes it and hands back a permuted copy,
// so two generators can never observe each other's shuffle.
//
// Reference: Rust Book §5 (Structs), §8 (Vectors)

use std::{fmt, ops::Range};

use serde::{Deserialize, Serialize};

use crate::domain::error::{LoaderError, Result};

// ─── SessionId ────────────────────────────────────────────────────────────────
/// Opaque per-dialogue identifier. Corpora use either integer
/// or string keys, so both are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionId {
    Int(i64),
    Text(String),
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionId::Int(id)  => write!(f, "{id}"),
            SessionId::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId::Text(s.to_string())
    }
}

impl From<i64> for SessionId {
    fn from(id: i64) -> Self {
        SessionId::Int(id)
    }
}

// ─── DialogueDataset ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueDataset {
    pub token_ids:        Vec<Vec<Vec<i64>>>,
    pub turn_lengths:     Vec<Vec<i64>>,
    pub dialogue_lengths: Vec<usize>,
    pub session_ids:      Vec<SessionId>,
    pub roles:            Vec<Vec<i64>>,
    pub handoff:          Vec<Vec<i64>>,
    pub sentiment:        Vec<Vec<i64>>,
    pub score:            Vec<i64>,
}

impl DialogueDataset {
    /// Number of dialogues
    pub fn len(&self) -> usize {
        self.score.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that all eight sequences describe the same dialogues.
    ///
    /// Every sequence must hold one entry per dialogue, and the five
    /// turn-level sequences must agree on the turn count of each
    /// dialogue. A store written in the wrong order almost always
    /// trips one of these checks.
    pub fn validate(&self) -> Result<()> {
        let expected = self.token_ids.len();

        let dialogue_counts = [
            ("turn_lengths",     self.turn_lengths.len()),
            ("dialogue_lengths", self.dialogue_lengths.len()),
            ("session_ids",      self.session_ids.len()),
            ("roles",            self.roles.len()),
            ("handoff",          self.handoff.len()),
            ("sentiment",        self.sentiment.len()),
            ("score",            self.score.len()),
        ];
        for (field, found) in dialogue_counts {
            if found != expected {
                return Err(LoaderError::LengthMismatch { field, expected, found });
            }
        }

        for (dialogue, turns) in self.token_ids.iter().enumerate() {
            let expected = turns.len();
            let turn_counts = [
                ("turn_lengths", self.turn_lengths[dialogue].len()),
                ("roles",        self.roles[dialogue].len()),
                ("handoff",      self.handoff[dialogue].len()),
                ("sentiment",    self.sentiment[dialogue].len()),
            ];
            for (field, found) in turn_counts {
                if found != expected {
                    return Err(LoaderError::TurnCountMismatch {
                        dialogue,
                        field,
                        expected,
                        found,
                    });
                }
            }
        }

        Ok(())
    }

    /// Indices of dialogues whose recorded length disagrees with
    /// the number of turns actually stored.
    pub fn dialogue_length_mismatches(&self) -> Vec<usize> {
        self.dialogue_lengths
            .iter()
            .zip(&self.token_ids)
            .enumerate()
            .filter(|(_, (&len, turns))| len != turns.len())
            .map(|(i, _)| i)
            .collect()
    }

    /// Consume the dataset and return it with every sequence
    /// rearranged so that new entry `j` is old entry `order[j]`.
    pub fn reorder(self, order: &[usize]) -> Result<Self> {
        let n = self.len();
        if !is_permutation(order, n) {
            return Err(LoaderError::InvalidPermutation { expected: n, len: order.len() });
        }

        Ok(Self {
            token_ids:        permute(self.token_ids, order),
            turn_lengths:     permute(self.turn_lengths, order),
            dialogue_lengths: permute(self.dialogue_lengths, order),
            session_ids:      permute(self.session_ids, order),
            roles:            permute(self.roles, order),
            handoff:          permute(self.handoff, order),
            sentiment:        permute(self.sentiment, order),
            score:            permute(self.score, order),
        })
    }

    /// Borrow a contiguous run of dialogues across all eight sequences.
    /// The range is clamped to the dataset length.
    pub fn view(&self, range: Range<usize>) -> DialogueView<'_> {
        let end   = range.end.min(self.len());
        let start = range.start.min(end);

        DialogueView {
            offset:           start,
            token_ids:        &self.token_ids[start..end],
            turn_lengths:     &self.turn_lengths[start..end],
            dialogue_lengths: &self.dialogue_lengths[start..end],
            session_ids:      &self.session_ids[start..end],
            roles:            &self.roles[start..end],
            handoff:          &self.handoff[start..end],
            sentiment:        &self.sentiment[start..end],
            score:            &self.score[start..end],
        }
    }
}

// ─── DialogueView ─────────────────────────────────────────────────────────────
/// A borrowed chunk of a `DialogueDataset`: the raw material of one batch.
#[derive(Debug, Clone, Copy)]
pub struct DialogueView<'a> {
    /// Index of the first dialogue of this chunk in the full dataset
    pub offset:           usize,
    pub token_ids:        &'a [Vec<Vec<i64>>],
    pub turn_lengths:     &'a [Vec<i64>],
    pub dialogue_lengths: &'a [usize],
    pub session_ids:      &'a [SessionId],
    pub roles:            &'a [Vec<i64>],
    pub handoff:          &'a [Vec<i64>],
    pub sentiment:        &'a [Vec<i64>],
    pub score:            &'a [i64],
}

impl DialogueView<'_> {
    pub fn len(&self) -> usize {
        self.score.len()
    }

    pub fn is_empty(&self) -> bool {
        self.score.is_empty()
    }
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    order
        .iter()
        .all(|&i| i < n && !std::mem::replace(&mut seen[i], true))
}

fn permute<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
        .collect()
}
