// ============================================================
// Layer 4 — Dataset Store
// ============================================================
// Reads one split of a dialogue corpus from disk.
//
// Layout on disk:
//   {data_dir}/
//     clothes/
//       train.pkl   eval.pkl   test.pkl   vocab.pkl
//     makeup/
//       ...
//
// Each split file is eight pickles written back to back by
// eight `pickle.dump` calls, in this fixed order:
//
//   1. token_ids         5. roles
//   2. turn_lengths      6. handoff
//   3. dialogue_lengths  7. sentiment
//   4. session_ids       8. score
//
// The format is positional and not self-describing. Every value
// must be built from plain lists, ints and strings. After all
// eight are read the dataset is validated, so a file written in
// the wrong order fails here instead of producing garbage.
//
// Reference: serde-pickle crate documentation
//            Rust Book §9 (Error Handling)

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_pickle::{DeOptions, Deserializer, SerOptions};

use crate::domain::{
    DatasetName, DialogueDataset, DialogueSource, LoaderError, Mode, Result,
};

/// Loads and saves dataset splits under `{data_dir}/{dataset}/`.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl AsRef<Path>, dataset: DatasetName) -> Self {
        Self { dir: data_dir.as_ref().join(dataset.folder()) }
    }

    /// Folder holding this dataset's files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `{data_dir}/{dataset}/{mode}.pkl`
    pub fn path_for(&self, mode: Mode) -> PathBuf {
        self.dir.join(format!("{}.pkl", mode.file_stem()))
    }

    /// Vocabulary written by the preprocessing step. Resolved for
    /// collaborators; the loader itself never opens it.
    pub fn vocab_path(&self) -> PathBuf {
        self.dir.join("vocab.pkl")
    }

    /// Write `dataset` as the split for `mode`, creating the folder if needed.
    pub fn save(&self, mode: Mode, dataset: &DialogueDataset) -> Result<()> {
        dataset.validate()?;

        std::fs::create_dir_all(&self.dir)
            .map_err(|source| LoaderError::Io { path: self.dir.clone(), source })?;

        let path = self.path_for(mode);
        let file = File::create(&path)
            .map_err(|source| LoaderError::Io { path: path.clone(), source })?;
        let mut out = BufWriter::new(file);

        write_field(&mut out, &path, "token_ids",        &dataset.token_ids)?;
        write_field(&mut out, &path, "turn_lengths",     &dataset.turn_lengths)?;
        write_field(&mut out, &path, "dialogue_lengths", &dataset.dialogue_lengths)?;
        write_field(&mut out, &path, "session_ids",      &dataset.session_ids)?;
        write_field(&mut out, &path, "roles",            &dataset.roles)?;
        write_field(&mut out, &path, "handoff",          &dataset.handoff)?;
        write_field(&mut out, &path, "sentiment",        &dataset.sentiment)?;
        write_field(&mut out, &path, "score",            &dataset.score)?;

        out.flush().map_err(|source| LoaderError::Io { path: path.clone(), source })?;

        tracing::info!("Saved {} dialogues to '{}'", dataset.len(), path.display());
        Ok(())
    }
}

impl DialogueSource for DatasetStore {
    fn load(&self, mode: Mode) -> Result<DialogueDataset> {
        let path = self.path_for(mode);
        if !path.exists() {
            return Err(LoaderError::NotFound { path });
        }

        // The file is closed when `input` drops at the end of this block
        let dataset = {
            let file = File::open(&path)
                .map_err(|source| LoaderError::Io { path: path.clone(), source })?;
            let mut input = BufReader::new(file);

            DialogueDataset {
                token_ids:        read_field(&mut input, &path, "token_ids")?,
                turn_lengths:     read_field(&mut input, &path, "turn_lengths")?,
                dialogue_lengths: read_field(&mut input, &path, "dialogue_lengths")?,
                session_ids:      read_field(&mut input, &path, "session_ids")?,
                roles:            read_field(&mut input, &path, "roles")?,
                handoff:          read_field(&mut input, &path, "handoff")?,
                sentiment:        read_field(&mut input, &path, "sentiment")?,
                score:            read_field(&mut input, &path, "score")?,
            }
        };

        dataset.validate()?;

        let mismatched = dataset.dialogue_length_mismatches();
        if !mismatched.is_empty() {
            tracing::warn!(
                "{} dialogues in '{}' record a length different from their turn count (first: {})",
                mismatched.len(),
                path.display(),
                mismatched[0],
            );
        }

        tracing::info!("Load variable from {} successfully! ({} dialogues)", path.display(), dataset.len());
        Ok(dataset)
    }
}

// ─── Field I/O ────────────────────────────────────────────────────────────────

/// Decode the next pickle in the stream.
///
/// A fresh decoder is built for every field: each `pickle.dump`
/// numbers its memo from zero, so memo state must not carry over.
/// The decoder reads through `ByteAtATime`, which keeps it from
/// buffering past the STOP opcode of its own pickle.
fn read_field<T, R>(input: &mut R, path: &Path, field: &'static str) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut de = Deserializer::new(ByteAtATime(input), DeOptions::new());
    let value = T::deserialize(&mut de)
        .map_err(|source| LoaderError::Decode { path: path.to_path_buf(), field, source })?;

    tracing::debug!("Decoded '{}' from '{}'", field, path.display());
    Ok(value)
}

fn write_field<T, W>(out: &mut W, path: &Path, field: &'static str, value: &T) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    serde_pickle::to_writer(out, value, SerOptions::new())
        .map_err(|source| LoaderError::Encode { path: path.to_path_buf(), field, source })
}

/// Reader adapter that hands out at most one byte per `read` call.
/// The underlying reader is already buffered.
struct ByteAtATime<'a, R: Read>(&'a mut R);

impl<R: Read> Read for ByteAtATime<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match buf.first_mut() {
            Some(byte) => self.0.read(std::slice::from_mut(byte)),
            None       => Ok(0),
        }
    }
}
