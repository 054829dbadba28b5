//! # Configuration
//!
//! Configuration is loaded with [`confique`] from TOML files, environment
//! variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! Highest priority first:
//! 1. **Environment variables**: `SKL_SLOT`, `SKL_ASSIST_MODEL`, `GEMINI_API_KEY`.
//! 2. **Data directory**: `<data dir>/skl.toml`.
//! 3. **User config directory**: `<config dir>/skl.toml` (via `directories`).
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `slot` | `skl_database` | Storage slot holding saved records |
//! | `assist.model` | `gemini-3-flash-preview` | Text assist model |
//! | `assist.endpoint` | Gemini v1beta | API base URL |
//! | `assist.timeout_secs` | `30` | Request timeout |
//! | `assist.api_key` | unset | API key |
//! | `letterhead.*` | UPT Puskesmas Cipanas | Lines printed on the certificate |
//! | `assistants` | built-in roster | `[{ name, nip }, ...]` |

use crate::error::{Result, SklError};
use crate::roster::{default_roster, Assistant};
use crate::store::draft::DRAFT_SLOT;
use crate::store::BACKUP_SUFFIX;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILENAME: &str = "skl.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SklConfig {
    /// Storage slot holding the saved records.
    #[config(default = "skl_database", env = "SKL_SLOT")]
    pub slot: String,

    #[config(nested)]
    pub assist: AssistConfig,

    #[config(nested)]
    pub letterhead: LetterheadConfig,

    /// Replaces the built-in roster of attending midwives.
    pub assistants: Option<Vec<Assistant>>,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// Model name passed to the generateContent endpoint.
    #[config(default = "gemini-3-flash-preview", env = "SKL_ASSIST_MODEL")]
    pub model: String,

    /// API base URL.
    #[config(default = "https://generativelanguage.googleapis.com/v1beta")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[config(default = 30)]
    pub timeout_secs: u64,

    /// API key. Text assist is unavailable without one.
    #[config(env = "GEMINI_API_KEY")]
    pub api_key: Option<String>,
}

/// Issuing facility, as printed in the certificate header and footer.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LetterheadConfig {
    #[config(default = "Pemerintah Kabupaten Garut")]
    pub government: String,

    #[config(default = "Dinas Kesehatan")]
    pub department: String,

    #[config(default = "UPT Puskesmas Cipanas")]
    pub facility: String,

    #[config(default = "Jalan Cipanas No. 36 Desa Rancabango Kecamatan Tarogong Kaler Kabupaten Garut")]
    pub address: String,

    #[config(default = "Telp. 0895-1726-6700 e-mail: pkmcipanas.2016@gmail.com - 44151")]
    pub contact: String,

    /// Place of birth lines under the measurements.
    #[config(default = "Jalan Cipanas No. 36 Desa Rancabango")]
    pub street: String,

    #[config(default = "Kec. Tarogong Kaler Kab. Garut")]
    pub district: String,

    /// Place name written before the signing date.
    #[config(default = "Garut")]
    pub city: String,

    #[config(default = "Kepala UPT Puskesmas Cipanas")]
    pub head_title: String,

    #[config(default = "dr. Arie Andaryani")]
    pub head_name: String,

    #[config(default = "198301252014122001")]
    pub head_nip: String,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl Default for LetterheadConfig {
    fn default() -> Self {
        Self {
            government: "Pemerintah Kabupaten Garut".to_string(),
            department: "Dinas Kesehatan".to_string(),
            facility: "UPT Puskesmas Cipanas".to_string(),
            address: "Jalan Cipanas No. 36 Desa Rancabango Kecamatan Tarogong Kaler Kabupaten Garut"
                .to_string(),
            contact: "Telp. 0895-1726-6700 e-mail: pkmcipanas.2016@gmail.com - 44151".to_string(),
            street: "Jalan Cipanas No. 36 Desa Rancabango".to_string(),
            district: "Kec. Tarogong Kaler Kab. Garut".to_string(),
            city: "Garut".to_string(),
            head_title: "Kepala UPT Puskesmas Cipanas".to_string(),
            head_name: "dr. Arie Andaryani".to_string(),
            head_nip: "198301252014122001".to_string(),
        }
    }
}

impl Default for SklConfig {
    fn default() -> Self {
        Self {
            slot: crate::store::DEFAULT_SLOT.to_string(),
            assist: AssistConfig::default(),
            letterhead: LetterheadConfig::default(),
            assistants: None,
        }
    }
}

impl SklConfig {
    /// Loads configuration from the environment and the given files, highest
    /// priority first. Missing files are skipped.
    pub fn load(files: &[PathBuf]) -> Result<Self> {
        let mut builder = SklConfig::builder().env();
        for file in files {
            builder = builder.file(file);
        }
        let config: SklConfig = builder.load().map_err(|e| SklError::Config(e.to_string()))?;
        config.check_slot()?;
        Ok(config)
    }

    /// The record slot may not collide with the draft or a backup slot.
    fn check_slot(&self) -> Result<()> {
        if self.slot == DRAFT_SLOT || self.slot.ends_with(BACKUP_SUFFIX) {
            return Err(SklError::Config(format!(
                "slot {:?} is reserved, choose another name",
                self.slot
            )));
        }
        Ok(())
    }

    /// The configured roster, or the built-in one.
    pub fn roster(&self) -> Vec<Assistant> {
        match &self.assistants {
            Some(list) if !list.is_empty() => list.clone(),
            _ => default_roster(),
        }
    }

    /// A commented sample `skl.toml`.
    pub fn template() -> String {
        confique::toml::template::<SklConfig>(confique::toml::FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = SklConfig::default();
        assert_eq!(config.slot, "skl_database");
        assert_eq!(config.assist.timeout_secs, 30);
        assert_eq!(config.letterhead.facility, "UPT Puskesmas Cipanas");
        assert_eq!(config.roster().len(), 12);
    }

    #[test]
    fn test_load_without_files_matches_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SklConfig::load(&[dir.path().join("missing.toml")]).unwrap();
        assert_eq!(config.letterhead, LetterheadConfig::default());
        assert_eq!(config.assist.endpoint, AssistConfig::default().endpoint);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(
            &path,
            r#"
slot = "clinic_b"

[letterhead]
facility = "UPT Puskesmas Tarogong"

[[assistants]]
name = "BIDAN SATU, A.Md.Keb"
nip = "123"
"#,
        )
        .unwrap();

        let config = SklConfig::load(&[path]).unwrap();
        assert_eq!(config.letterhead.facility, "UPT Puskesmas Tarogong");
        assert_eq!(config.letterhead.city, "Garut");
        assert_eq!(config.roster(), vec![Assistant::new("BIDAN SATU, A.Md.Keb", "123")]);
    }

    #[test]
    fn test_first_file_wins() {
        let dir = tempfile::tempdir().unwrap();
        let high = dir.path().join("high.toml");
        let low = dir.path().join("low.toml");
        fs::write(&high, "[assist]\ntimeout_secs = 5\n").unwrap();
        fs::write(&low, "[assist]\ntimeout_secs = 90\nmodel = \"m-low\"\n").unwrap();

        let config = SklConfig::load(&[high, low]).unwrap();
        assert_eq!(config.assist.timeout_secs, 5);
        assert_eq!(config.assist.model, "m-low");
    }

    #[test]
    fn test_reserved_slots_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for slot in ["skl_draft", "skl_database.corrupt"] {
            let path = dir.path().join(CONFIG_FILENAME);
            fs::write(&path, format!("slot = \"{}\"\n", slot)).unwrap();
            let err = SklConfig::load(&[path]).unwrap_err();
            assert!(matches!(err, SklError::Config(_)), "{} accepted", slot);
        }
    }

    #[test]
    fn test_empty_roster_falls_back_to_default() {
        let config = SklConfig {
            assistants: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(config.roster().len(), 12);
    }

    #[test]
    fn test_serialized_config_is_valid_toml() {
        let rendered = toml::to_string(&SklConfig::default()).unwrap();
        assert!(rendered.contains("slot = \"skl_database\""));
    }

    #[test]
    fn test_template_mentions_settings() {
        let template = SklConfig::template();
        assert!(template.contains("slot"));
        assert!(template.contains("[assist]"));
    }
}
