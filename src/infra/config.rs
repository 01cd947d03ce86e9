// ============================================================
// Layer 6 — Config Store
// ============================================================
// Reads and writes LoaderConfig as JSON so a load run can be
// described in a file instead of on the command line.
//
// Example config.json:
//   {
//     "data_dir":   "data/MHCH_SSA",
//     "data_name":  "makeup",
//     "mode":       "train",
//     "batch_size": 64
//   }
//
// Keys that are left out keep their LoaderConfig::default() value.
//
// Reference: Rust Book §9 (Error Handling with anyhow)

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::load_use_case::LoaderConfig;

/// Load a LoaderConfig from a JSON file.
pub fn load_config(path: impl AsRef<Path>) -> Result<LoaderConfig> {
    let path = path.as_ref();

    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

    let cfg = serde_json::from_str(&json)
        .with_context(|| format!("Invalid config in '{}'", path.display()))?;

    tracing::debug!("Loaded config from '{}'", path.display());
    Ok(cfg)
}

/// Write a LoaderConfig as pretty-printed JSON.
pub fn save_config(path: impl AsRef<Path>, cfg: &LoaderConfig) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg)?;

    fs::write(path, json)
        .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

    tracing::debug!("Saved config to '{}'", path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DatasetName, Mode};

    #[test]
    fn test_config_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cfg  = LoaderConfig {
            data_name:  DatasetName::Makeup,
            mode:       Mode::Test,
            batch_size: 16,
            ..LoaderConfig::default()
        };

        save_config(&path, &cfg).unwrap();
        assert_eq!(load_config(&path).unwrap(), cfg);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "mode": "train", "batch_size": 8 }"#).unwrap();

        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.mode, Mode::Train);
        assert_eq!(cfg.batch_size, 8);
        assert_eq!(cfg.max_rounds, 50);
        assert_eq!(cfg.data_name, DatasetName::Clothes);
    }

    #[test]
    fn test_unknown_mode_in_file_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "mode": "bogus" }"#).unwrap();

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let err = load_config("/nonexistent/config.json").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/config.json"));
    }
}
