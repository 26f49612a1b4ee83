use std::io;
use std::path::PathBuf;

use bootseal_codec::CodecError;
use thiserror::Error;

use crate::bootloader::Role;
use crate::modeenv::ModeenvError;

pub type Result<T> = std::result::Result<T, BootChainError>;

#[derive(Debug, Error)]
pub enum BootChainError {
    #[error("internal error: no bootloader name for boot asset role \"{0}\"")]
    NoBootloaderForRole(Role),
    #[error("file {} not found in boot assets cache", path.display())]
    NotInCache { path: PathBuf },
    #[error("internal error: boot asset \"{name}\" with role \"{role}\" has no hashes")]
    NoAssetHashes { role: Role, name: String },
    #[error("internal error: no kernel boot file set for boot chain with kernel \"{kernel}\"")]
    MissingKernelBootFile { kernel: String },
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot decode boot chains: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("modeenv error: {0}")]
    Modeenv(#[from] ModeenvError),
}

impl BootChainError {
    /// Whether the error points at a caller or setup bug rather than system state.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            BootChainError::NoBootloaderForRole(_)
                | BootChainError::NoAssetHashes { .. }
                | BootChainError::MissingKernelBootFile { .. }
        )
    }
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> BootChainError {
    BootChainError::Io {
        path: path.into(),
        source: err,
    }
}
