// ============================================================
// Layer 4 — One-Hot Encoder
// ============================================================
// Turns integer class labels into one-hot vectors:
//
//   classes = 3,  labels [2, 0]  →  [0, 0, 1,  1, 0, 0]
//
// Output is flat with a trailing class dimension, so labels of
// shape [batch, rounds] become [batch, rounds, classes].
//
// Labels outside [0, classes) are an error, never a silent zero
// row. Padding uses 0, which is a valid class for every label
// stream here.

use crate::domain::{LoaderError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoder {
    classes: usize,
}

impl Encoder {
    pub fn new(classes: usize) -> Self {
        Self { classes }
    }

    /// One-hot encode `labels`; `field` names the stream in errors.
    pub fn encode(&self, field: &'static str, labels: &[i64]) -> Result<Vec<i64>> {
        let mut out = vec![0; labels.len() * self.classes];

        for (i, &value) in labels.iter().enumerate() {
            let class = usize::try_from(value)
                .ok()
                .filter(|&c| c < self.classes)
                .ok_or(LoaderError::LabelOutOfRange { field, value, classes: self.classes })?;
            out[i * self.classes + class] = 1;
        }

        Ok(out)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_label_gets_a_single_one() {
        let encoder = Encoder::new(3);
        let labels  = [0, 2, 1, 0];
        let out     = encoder.encode("sentiment", &labels).unwrap();

        assert_eq!(out.len(), labels.len() * 3);
        for (row, &label) in out.chunks(3).zip(&labels) {
            assert_eq!(row.iter().sum::<i64>(), 1);
            assert_eq!(row[label as usize], 1);
        }
    }

    #[test]
    fn test_binary_encoding() {
        let out = Encoder::new(2).encode("handoff", &[1, 0]).unwrap();
        assert_eq!(out, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_value_at_class_count_is_rejected() {
        let err = Encoder::new(2).encode("handoff", &[0, 2]).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::LabelOutOfRange { field: "handoff", value: 2, classes: 2 }
        ));
    }

    #[test]
    fn test_negative_value_is_rejected() {
        assert!(Encoder::new(3).encode("score", &[-1]).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(Encoder::new(3).encode("score", &[]).unwrap().is_empty());
    }
}
