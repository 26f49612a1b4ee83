use std::path::{Path, PathBuf};

/// Environment variable overriding the filesystem root.
pub const ROOT_DIR_ENV: &str = "BOOTSEAL_ROOT_DIR";

const STATE_DIR: &str = "var/lib/bootseal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootConfig {
    /// Root under which all state lives; `/` on a running system.
    pub root_dir: PathBuf,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("/"),
        }
    }
}

impl BootConfig {
    pub fn with_root(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Build BootConfig honoring `BOOTSEAL_ROOT_DIR` when set and non-empty.
    pub fn from_env() -> Self {
        Self::from_root_override(std::env::var_os(ROOT_DIR_ENV).map(PathBuf::from))
    }

    fn from_root_override(root: Option<PathBuf>) -> Self {
        match root {
            Some(root) if !root.as_os_str().is_empty() => Self::with_root(root),
            _ => Self::default(),
        }
    }

    fn state_dir(&self) -> PathBuf {
        self.root_dir.join(STATE_DIR)
    }

    /// Directory holding cached copies of trusted boot assets.
    pub fn boot_assets_dir(&self) -> PathBuf {
        self.state_dir().join("boot-assets")
    }

    /// Record of the boot chains used for the last successful reseal.
    pub fn boot_chains_file(&self) -> PathBuf {
        self.state_dir().join("device/fde/boot-chains")
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = BootConfig::default();
        assert_eq!(
            config.boot_assets_dir(),
            PathBuf::from("/var/lib/bootseal/boot-assets")
        );
        assert_eq!(
            config.boot_chains_file(),
            PathBuf::from("/var/lib/bootseal/device/fde/boot-chains")
        );
    }

    #[test]
    fn root_override() {
        let config = BootConfig::from_root_override(Some(PathBuf::from("/tmp/root")));
        assert_eq!(config.root_dir(), Path::new("/tmp/root"));
        assert_eq!(
            config.boot_assets_dir(),
            PathBuf::from("/tmp/root/var/lib/bootseal/boot-assets")
        );
        assert_eq!(
            BootConfig::from_root_override(Some(PathBuf::new())),
            BootConfig::default()
        );
        assert_eq!(BootConfig::from_root_override(None), BootConfig::default());
    }
}
