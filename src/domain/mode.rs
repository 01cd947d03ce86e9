// ============================================================
// Layer 3 — Dataset Split and Dataset Name
// ============================================================
// Two closed enumerations replace the free-form strings the
// loader used to branch on:
//
//   Mode        → which split to read (train / eval / test)
//   DatasetName → which corpus folder to read it from
//
// Each maps to its on-disk name through a total function, so
// once a value exists it always resolves to a path. The only
// place an unknown string can fail is `FromStr`.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::error::LoaderError;

// ─── Mode ─────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Train,
    Eval,
    Test,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Train, Mode::Eval, Mode::Test];

    /// File stem of the split inside a dataset folder, e.g. `eval` → `eval.pkl`
    pub fn file_stem(self) -> &'static str {
        match self {
            Mode::Train => "train",
            Mode::Eval  => "eval",
            Mode::Test  => "test",
        }
    }
}

impl FromStr for Mode {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Mode::Train),
            "eval"  => Ok(Mode::Eval),
            "test"  => Ok(Mode::Test),
            other   => Err(LoaderError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

// ─── DatasetName ──────────────────────────────────────────────────────────────
/// The customer-service corpora the store knows how to locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetName {
    Clothes,
    Makeup,
}

impl DatasetName {
    /// Folder name under the data directory
    pub fn folder(self) -> &'static str {
        match self {
            DatasetName::Clothes => "clothes",
            DatasetName::Makeup  => "makeup",
        }
    }
}

impl FromStr for DatasetName {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clothes" => Ok(DatasetName::Clothes),
            "makeup"  => Ok(DatasetName::Makeup),
            other     => Err(LoaderError::InvalidDataset(other.to_string())),
        }
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parses_known_names() {
        for mode in Mode::ALL {
            assert_eq!(mode.file_stem().parse::<Mode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_bogus_mode_is_rejected() {
        let err = "bogus".parse::<Mode>().unwrap_err();
        assert!(matches!(err, LoaderError::InvalidMode(ref m) if m == "bogus"));
    }

    #[test]
    fn test_mode_is_case_sensitive() {
        assert!("Train".parse::<Mode>().is_err());
    }

    #[test]
    fn test_unknown_dataset_is_rejected() {
        assert_eq!("makeup".parse::<DatasetName>().unwrap(), DatasetName::Makeup);
        let err = "normal".parse::<DatasetName>().unwrap_err();
        assert!(matches!(err, LoaderError::InvalidDataset(_)));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Mode::Eval).unwrap();
        assert_eq!(json, "\"eval\"");
        let name: DatasetName = serde_json::from_str("\"clothes\"").unwrap();
        assert_eq!(name, DatasetName::Clothes);
    }
}
