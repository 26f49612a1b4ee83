use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::BootConfig;
use crate::error::{BootChainError, Result};

/// Read-only view of the boot assets cache rooted at `<dir>`.
///
/// Entries live at `<dir>/<bootloader>/<asset-name>-<hash>`. Populating the
/// cache is done elsewhere; only existence is checked here, content is not
/// hashed again.
#[derive(Clone)]
pub struct BootAssetsCache {
    dir: PathBuf,
}

impl fmt::Debug for BootAssetsCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootAssetsCache")
            .field("dir", &self.dir)
            .finish()
    }
}

impl BootAssetsCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &BootConfig) -> Self {
        Self::new(config.boot_assets_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, bootloader: &str, name: &str, hash: &str) -> PathBuf {
        self.dir.join(trusted_asset_cache_rel_path(bootloader, name, hash))
    }

    pub fn has_entry(&self, bootloader: &str, name: &str, hash: &str) -> bool {
        self.entry_path(bootloader, name, hash).exists()
    }

    /// Path of a cached asset, failing when the file is absent.
    pub fn lookup(&self, bootloader: &str, name: &str, hash: &str) -> Result<PathBuf> {
        let path = self.entry_path(bootloader, name, hash);
        if !path.exists() {
            return Err(BootChainError::NotInCache { path });
        }
        Ok(path)
    }
}

/// Location of an asset relative to the cache root.
pub fn trusted_asset_cache_rel_path(bootloader: &str, name: &str, hash: &str) -> PathBuf {
    Path::new(bootloader).join(format!("{name}-{hash}"))
}
