//! Expansion of boot assets into the trees of files a sealing policy must
//! authorize.

use log::debug;

use crate::asset::BootAsset;
use crate::bootloader::{BootFile, Bootloaders};
use crate::cache::BootAssetsCache;
use crate::error::{BootChainError, Result};

/// One file that may execute at some boot stage, followed by every file that
/// may execute right after it. A node without children is the kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadChain {
    pub boot_file: BootFile,
    pub next: Vec<LoadChain>,
}

impl LoadChain {
    pub fn new(boot_file: BootFile) -> Self {
        Self {
            boot_file,
            next: Vec::new(),
        }
    }

    pub fn with_next(boot_file: BootFile, next: Vec<LoadChain>) -> Self {
        Self { boot_file, next }
    }

    pub fn is_leaf(&self) -> bool {
        self.next.is_empty()
    }

    /// Number of complete boot paths through this node.
    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.next.iter().map(LoadChain::leaf_count).sum()
        }
    }

    /// Every complete path from this node down to a kernel.
    pub fn paths(&self) -> Vec<Vec<&BootFile>> {
        if self.is_leaf() {
            return vec![vec![&self.boot_file]];
        }
        let mut paths = Vec::with_capacity(self.leaf_count());
        for child in &self.next {
            for tail in child.paths() {
                let mut path = Vec::with_capacity(tail.len() + 1);
                path.push(&self.boot_file);
                path.extend(tail);
                paths.push(path);
            }
        }
        paths
    }
}

/// Expands `assets`, given in load order, into load chains ending in
/// `kernel_boot_file`.
///
/// Every hash of an asset becomes its own branch and the expansion of the
/// remaining assets is attached under each of them. Hashes keep the order the
/// caller supplied. Each file is resolved in the cache namespace of the
/// bootloader registered for the asset's role. Any failure aborts the whole
/// expansion.
pub fn boot_assets_to_load_chains(
    assets: &[BootAsset],
    kernel_boot_file: &BootFile,
    bootloaders: &Bootloaders,
    cache: &BootAssetsCache,
) -> Result<Vec<LoadChain>> {
    expand(assets, 0, kernel_boot_file, bootloaders, cache)
}

fn expand(
    assets: &[BootAsset],
    idx: usize,
    kernel_boot_file: &BootFile,
    bootloaders: &Bootloaders,
    cache: &BootAssetsCache,
) -> Result<Vec<LoadChain>> {
    let Some(asset) = assets.get(idx) else {
        return Ok(vec![LoadChain::new(kernel_boot_file.clone())]);
    };

    // An empty name would resolve files at the cache root.
    let bootloader = bootloaders
        .get(&asset.role)
        .filter(|name| !name.is_empty())
        .ok_or(BootChainError::NoBootloaderForRole(asset.role))?;
    if asset.hashes.is_empty() {
        return Err(BootChainError::NoAssetHashes {
            role: asset.role,
            name: asset.name.clone(),
        });
    }

    let boot_files = asset
        .hashes
        .iter()
        .map(|hash| {
            let path = cache.lookup(bootloader, &asset.name, hash)?;
            Ok(BootFile::new("", path, asset.role))
        })
        .collect::<Result<Vec<_>>>()?;

    let next = expand(assets, idx + 1, kernel_boot_file, bootloaders, cache)?;
    debug!(
        "boot asset {} ({}) expands into {} branch(es) over {} subsequent path(s)",
        asset.name,
        asset.role,
        boot_files.len(),
        next.iter().map(LoadChain::leaf_count).sum::<usize>()
    );

    Ok(boot_files
        .into_iter()
        .map(|boot_file| LoadChain::with_next(boot_file, next.clone()))
        .collect())
}
