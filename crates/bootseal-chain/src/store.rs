//! On-disk record of the boot chains used for the last successful reseal.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use bootseal_codec::to_canonical_json;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::chain::PredictableBootChains;
use crate::config::BootConfig;
use crate::error::{Result, io_error};
use crate::reseal::predictable_boot_chains_equal_for_reseal;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct BootChainsRecord {
    #[serde(default)]
    reseal_count: u64,
    #[serde(default)]
    boot_chains: PredictableBootChains,
}

/// Reads the boot chains record at `path`. A missing file reads as no chains
/// and a reseal count of zero.
pub fn read_boot_chains(path: impl AsRef<Path>) -> Result<(PredictableBootChains, u64)> {
    let path = path.as_ref();
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("no boot chains record at {}", path.display());
            return Ok((PredictableBootChains::default(), 0));
        }
        Err(err) => return Err(io_error(path, err)),
    };
    let record: BootChainsRecord = serde_json::from_slice(&bytes)?;
    Ok((record.boot_chains, record.reseal_count))
}

/// Replaces the boot chains record at `path`. The record is written to a
/// temporary file in the same directory and renamed into place once synced;
/// the temporary file is removed if any step fails.
pub fn write_boot_chains(
    chains: &PredictableBootChains,
    path: impl AsRef<Path>,
    reseal_count: u64,
) -> Result<()> {
    let path = path.as_ref();
    let record = BootChainsRecord {
        reseal_count,
        boot_chains: chains.clone(),
    };
    let bytes = to_canonical_json(&record)?;
    let digest = chains.digest()?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))?;
    tmp.write_all(&bytes).map_err(|e| io_error(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| io_error(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| io_error(path, e.error))?;

    info!(
        "recorded {} boot chain(s) at {} (reseal count {}, {})",
        chains.len(),
        path.display(),
        reseal_count,
        digest
    );
    Ok(())
}

/// Boot chains record at the location given by the configuration.
#[derive(Debug, Clone)]
pub struct BootChainsStore {
    path: PathBuf,
}

impl BootChainsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &BootConfig) -> Self {
        Self::new(config.boot_chains_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<(PredictableBootChains, u64)> {
        read_boot_chains(&self.path)
    }

    pub fn save(&self, chains: &PredictableBootChains, reseal_count: u64) -> Result<()> {
        write_boot_chains(chains, &self.path, reseal_count)
    }

    /// Records `chains` as the ones used for a completed reseal, bumping the
    /// reseal count. Returns the new count.
    pub fn record_reseal(&self, chains: &PredictableBootChains) -> Result<u64> {
        let (_, count) = self.load()?;
        let next = count + 1;
        self.save(chains, next)?;
        Ok(next)
    }

    /// Whether `current` differs from the recorded chains.
    pub fn reseal_needed(&self, current: &PredictableBootChains) -> Result<bool> {
        let (recorded, _) = self.load()?;
        let needed = !predictable_boot_chains_equal_for_reseal(&recorded, current);
        debug!(
            "boot chains {} recorded state, reseal {}",
            if needed { "differ from" } else { "match" },
            if needed { "needed" } else { "skipped" }
        );
        Ok(needed)
    }
}
