// ============================================================
// Layer 4 — Dialogue Batcher
// ============================================================
// Converts one chunk of dialogues (a DialogueView) into a
// DialogueBatch of Burn tensors on the target device.
//
// Per chunk of `b` dialogues with L = max_rounds:
//
//   token_ids        Tensor<B, 3>       [b, L, width]   f32
//   turn_lengths     Tensor<B, 2, Int>  [b, L]
//   dialogue_lengths Vec<usize>         unpadded
//   session_ids      Vec<SessionId>     unpadded
//   roles            Tensor<B, 2, Int>  [b, L]
//   labels           depends on LabelPolicy:
//
//     Categorical       handoff   [b, L, 2]  one-hot
//                       sentiment [b, L, 3]  one-hot
//                       score     [b, 3]     one-hot
//
//     SequenceLabeling  handoff   [b, L]     label ids
//                       sentiment [b, L]     label ids
//                       score     Vec<i64>   raw per dialogue
//
// Padded values are flattened first, then handed to Burn with
// TensorData::new(values, shape). The batch dimension is never
// padded: a short final chunk yields a short batch.
//
// Reference: Burn Book §4 (Batcher)

use burn::tensor::{backend::Backend, Int, Tensor, TensorData};

use crate::data::{encoder::Encoder, padder::Padder};
use crate::domain::{DialogueView, Result, SessionId};

/// Handoff is binary: stay with the bot or transfer to a human
pub const HANDOFF_CLASSES: usize = 2;
/// Negative / neutral / positive
pub const SENTIMENT_CLASSES: usize = 3;
/// Satisfaction rating of the whole dialogue
pub const SCORE_CLASSES: usize = 3;

// ─── LabelPolicy ──────────────────────────────────────────────────────────────
/// How the three label streams are handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelPolicy {
    /// One-hot targets for per-round softmax outputs
    #[default]
    Categorical,
    /// Integer label ids for a structured labeling layer (e.g. a CRF)
    SequenceLabeling,
}

// ─── DialogueBatch ────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct DialogueBatch<B: Backend> {
    /// Token ids, shape: [batch_size, max_rounds, turn_width]
    pub token_ids: Tensor<B, 3>,

    /// Token count of every turn, shape: [batch_size, max_rounds]
    pub turn_lengths: Tensor<B, 2, Int>,

    /// True turn count per dialogue, used to mask padded rounds
    pub dialogue_lengths: Vec<usize>,

    /// Trace each row back to its source dialogue
    pub session_ids: Vec<SessionId>,

    /// Speaker role per turn, shape: [batch_size, max_rounds]
    pub roles: Tensor<B, 2, Int>,

    pub labels: BatchLabels<B>,
}

impl<B: Backend> DialogueBatch<B> {
    pub fn batch_size(&self) -> usize {
        self.session_ids.len()
    }
}

#[derive(Debug, Clone)]
pub enum BatchLabels<B: Backend> {
    Categorical {
        handoff:   Tensor<B, 3, Int>,
        sentiment: Tensor<B, 3, Int>,
        score:     Tensor<B, 2, Int>,
    },
    Sequence {
        handoff:   Tensor<B, 2, Int>,
        sentiment: Tensor<B, 2, Int>,
        score:     Vec<i64>,
    },
}

// ─── DialogueBatcher ──────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct DialogueBatcher<B: Backend> {
    device: B::Device,
    padder: Padder,
    policy: LabelPolicy,
}

impl<B: Backend> DialogueBatcher<B> {
    pub fn new(device: B::Device, padder: Padder, policy: LabelPolicy) -> Self {
        Self { device, padder, policy }
    }

    /// Pad, encode and stack one chunk of dialogues.
    pub fn batch(&self, view: DialogueView<'_>) -> Result<DialogueBatch<B>> {
        let size   = view.len();
        let rounds = self.padder.max_rounds();

        let tokens    = self.padder.pad_turn_matrices(view.token_ids, view.offset)?;
        let token_ids = Tensor::<B, 3>::from_data(
            TensorData::new(tokens.values, [size, rounds, tokens.width]),
            &self.device,
        );

        let turn_lengths = self.int_tensor(self.padder.pad_rows(view.turn_lengths), [size, rounds]);
        let roles        = self.int_tensor(self.padder.pad_rows(view.roles), [size, rounds]);

        let handoff   = self.padder.pad_rows(view.handoff);
        let sentiment = self.padder.pad_rows(view.sentiment);

        let labels = match self.policy {
            LabelPolicy::Categorical => {
                let handoff   = Encoder::new(HANDOFF_CLASSES).encode("handoff", &handoff)?;
                let sentiment = Encoder::new(SENTIMENT_CLASSES).encode("sentiment", &sentiment)?;
                let score     = Encoder::new(SCORE_CLASSES).encode("score", view.score)?;

                BatchLabels::Categorical {
                    handoff:   self.int_tensor(handoff, [size, rounds, HANDOFF_CLASSES]),
                    sentiment: self.int_tensor(sentiment, [size, rounds, SENTIMENT_CLASSES]),
                    score:     self.int_tensor(score, [size, SCORE_CLASSES]),
                }
            }
            LabelPolicy::SequenceLabeling => BatchLabels::Sequence {
                handoff:   self.int_tensor(handoff, [size, rounds]),
                sentiment: self.int_tensor(sentiment, [size, rounds]),
                score:     view.score.to_vec(),
            },
        };

        Ok(DialogueBatch {
            token_ids,
            turn_lengths,
            dialogue_lengths: view.dialogue_lengths.to_vec(),
            session_ids:      view.session_ids.to_vec(),
            roles,
            labels,
        })
    }

    fn int_tensor<const D: usize>(&self, values: Vec<i64>, shape: [usize; D]) -> Tensor<B, D, Int> {
        Tensor::<B, D, Int>::from_data(TensorData::new(values, shape), &self.device)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::fixtures::sample_dataset;
    use crate::domain::LoaderError;

    type TestBackend = burn::backend::NdArray;

    fn batcher(policy: LabelPolicy) -> DialogueBatcher<TestBackend> {
        DialogueBatcher::new(Default::default(), Padder::new(50, 64), policy)
    }

    fn ints<const D: usize>(t: Tensor<TestBackend, D, Int>) -> Vec<i64> {
        t.into_data().iter::<i64>().collect()
    }

    fn floats<const D: usize>(t: Tensor<TestBackend, D>) -> Vec<f32> {
        t.into_data().iter::<f32>().collect()
    }

    #[test]
    fn test_categorical_shapes() {
        let ds    = sample_dataset(4);
        let batch = batcher(LabelPolicy::Categorical).batch(ds.view(0..4)).unwrap();

        assert_eq!(batch.batch_size(), 4);
        assert_eq!(batch.token_ids.dims(), [4, 50, 3]);
        assert_eq!(batch.turn_lengths.dims(), [4, 50]);
        assert_eq!(batch.roles.dims(), [4, 50]);

        match batch.labels {
            BatchLabels::Categorical { handoff, sentiment, score } => {
                assert_eq!(handoff.dims(), [4, 50, 2]);
                assert_eq!(sentiment.dims(), [4, 50, 3]);
                assert_eq!(score.dims(), [4, 3]);
            }
            BatchLabels::Sequence { .. } => panic!("expected categorical labels"),
        }
    }

    #[test]
    fn test_one_hot_rows_sum_to_one() {
        let ds    = sample_dataset(6);
        let batch = batcher(LabelPolicy::Categorical).batch(ds.view(0..6)).unwrap();

        let BatchLabels::Categorical { handoff, sentiment, score } = batch.labels else {
            panic!("expected categorical labels");
        };

        for row in ints(sentiment.clone()).chunks(3) {
            assert_eq!(row.iter().sum::<i64>(), 1);
        }
        for row in ints(handoff).chunks(2) {
            assert_eq!(row.iter().sum::<i64>(), 1);
        }

        // dialogue 2, turn 1 has sentiment (2 + 1) % 3 = 0
        let sentiment = ints(sentiment);
        let at = (2 * 50 + 1) * 3;
        assert_eq!(&sentiment[at..at + 3], &[1, 0, 0]);

        // score of dialogue 5 is 5 % 3 = 2
        assert_eq!(&ints(score)[15..18], &[0, 0, 1]);
    }

    #[test]
    fn test_sequence_labels_stay_integers() {
        let ds    = sample_dataset(3);
        let batch = batcher(LabelPolicy::SequenceLabeling).batch(ds.view(0..3)).unwrap();

        let BatchLabels::Sequence { handoff, sentiment, score } = batch.labels else {
            panic!("expected sequence labels");
        };
        assert_eq!(handoff.dims(), [3, 50]);
        assert_eq!(score, vec![0, 1, 2]);

        // dialogue 2 has two turns with sentiment [2, 0]
        let sentiment = ints(sentiment);
        assert_eq!(&sentiment[100..102], &[2, 0]);
        assert!(sentiment[102..150].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_padding_of_inputs() {
        let ds    = sample_dataset(4);
        let batch = batcher(LabelPolicy::SequenceLabeling).batch(ds.view(0..4)).unwrap();

        // dialogue 0 has no turns → all fill; dialogue 3 has three
        let lengths = ints(batch.turn_lengths);
        assert!(lengths[..50].iter().all(|&v| v == 0));
        assert_eq!(&lengths[150..154], &[3, 3, 3, 0]);

        let tokens = floats(batch.token_ids);
        let row = 3 * 50 * 3;
        assert_eq!(&tokens[row..row + 3], &[3001.0, 3002.0, 3003.0]);
        assert!(tokens[row + 9..row + 150].iter().all(|&v| v == 0.0));

        assert_eq!(batch.dialogue_lengths, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_label_fails_categorical_only() {
        let mut ds = sample_dataset(3);
        ds.handoff[1][0] = 2;

        let err = batcher(LabelPolicy::Categorical).batch(ds.view(0..3)).unwrap_err();
        assert!(matches!(err, LoaderError::LabelOutOfRange { field: "handoff", value: 2, .. }));

        assert!(batcher(LabelPolicy::SequenceLabeling).batch(ds.view(0..3)).is_ok());
    }
}
