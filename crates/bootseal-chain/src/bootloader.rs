//! Bootloader-facing vocabulary: asset roles, boot file descriptors, and the
//! per-role bootloader names used as cache namespaces.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Boot stage a bootloader (and therefore its assets) serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A single bootloader handling both recovery and run mode.
    #[default]
    #[serde(rename = "")]
    Sole,
    #[serde(rename = "recovery")]
    Recovery,
    #[serde(rename = "run-mode")]
    RunMode,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Sole => "",
            Role::Recovery => "recovery",
            Role::RunMode => "run-mode",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Roles order by their serialized names.
impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A file that executes at some boot stage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BootFile {
    /// Snap carrying the file; empty for files served from the assets cache.
    pub snap: String,
    pub path: PathBuf,
    pub role: Role,
}

impl BootFile {
    pub fn new(snap: impl Into<String>, path: impl Into<PathBuf>, role: Role) -> Self {
        Self {
            snap: snap.into(),
            path: path.into(),
            role,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for BootFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.snap.is_empty() {
            write!(f, "{} ({})", self.path.display(), self.role)
        } else {
            write!(f, "{}:{} ({})", self.snap, self.path.display(), self.role)
        }
    }
}

/// Bootloader name registered for each role. The name doubles as the
/// namespace of that bootloader's entries in the boot assets cache.
pub type Bootloaders = HashMap<Role, String>;
