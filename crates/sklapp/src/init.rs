//! # Context Setup
//!
//! Clients call [`initialize`] once to get an [`SklContext`]: resolved
//! directories, loaded configuration and a ready [`SklApi`] over the file
//! backend, with the draft checkpoint enabled.
//!
//! ## Data Directory
//!
//! First match wins:
//! 1. The `data_override` argument (the CLI's `--data`)
//! 2. The `SKL_DATA` environment variable
//! 3. The platform data directory from `directories`
//!
//! ## Configuration Files
//!
//! `<data dir>/skl.toml` overrides `<config dir>/skl.toml`; environment
//! variables override both. See [`crate::config`].

use crate::api::SklApi;
use crate::config::{SklConfig, CONFIG_FILENAME};
use crate::error::{Result, SklError};
use crate::store::draft::DRAFT_SLOT;
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const DATA_ENV: &str = "SKL_DATA";

#[derive(Debug, Clone)]
pub struct SklPaths {
    pub data_dir: PathBuf,
    /// Per-user config directory, when the platform has one.
    pub config_dir: Option<PathBuf>,
}

impl SklPaths {
    /// Config files in priority order, highest first.
    pub fn config_files(&self) -> Vec<PathBuf> {
        let mut files = vec![self.data_dir.join(CONFIG_FILENAME)];
        if let Some(dir) = &self.config_dir {
            files.push(dir.join(CONFIG_FILENAME));
        }
        files
    }
}

pub struct SklContext {
    pub api: SklApi<FsBackend>,
    pub config: SklConfig,
    pub paths: SklPaths,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("id", "Puskesmas Cipanas", "skl")
}

/// Picks the data directory: explicit override, then `SKL_DATA`, then the
/// platform default.
pub fn resolve_paths(data_override: Option<&Path>) -> Result<SklPaths> {
    let dirs = project_dirs();
    let config_dir = dirs.as_ref().map(|d| d.config_dir().to_path_buf());

    let data_dir = match data_override {
        Some(path) => path.to_path_buf(),
        None => match std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => dirs
                .as_ref()
                .map(|d| d.data_dir().to_path_buf())
                .ok_or_else(|| {
                    SklError::Config(format!(
                        "Could not determine a data directory; set {} or pass --data",
                        DATA_ENV
                    ))
                })?,
        },
    };

    Ok(SklPaths {
        data_dir,
        config_dir,
    })
}

pub fn initialize(data_override: Option<&Path>) -> Result<SklContext> {
    let paths = resolve_paths(data_override)?;
    let config = SklConfig::load(&paths.config_files())?;
    tracing::debug!(data_dir = %paths.data_dir.display(), slot = %config.slot, "initializing");

    let backend = FsBackend::new(&paths.data_dir);
    let api = SklApi::open(backend, config.slot.clone(), config.roster()).with_draft(DRAFT_SLOT);

    Ok(SklContext { api, config, paths })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let paths = resolve_paths(Some(dir.path())).unwrap();
        assert_eq!(paths.data_dir, dir.path());
        assert_eq!(paths.config_files()[0], dir.path().join("skl.toml"));
    }

    #[test]
    fn initialize_reads_data_dir_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "slot = \"lab_records\"\n",
        )
        .unwrap();

        let mut ctx = initialize(Some(dir.path())).unwrap();
        assert_eq!(ctx.config.slot, "lab_records");

        ctx.api.set_field("babyName", "Aisyah").unwrap();
        ctx.api.save().unwrap();
        assert!(dir.path().join("lab_records.json").exists());
    }

    #[test]
    fn initialize_on_empty_dir_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("nested");
        let ctx = initialize(Some(&data)).unwrap();
        assert!(ctx.api.records().is_empty());
        assert!(!data.exists());
    }
}
