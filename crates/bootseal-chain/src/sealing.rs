use log::debug;

use crate::bootloader::Bootloaders;
use crate::cache::BootAssetsCache;
use crate::chain::BootChain;
use crate::error::{BootChainError, Result};
use crate::loadchain::{LoadChain, boot_assets_to_load_chains};
use crate::model::ModelRef;

/// Everything the sealing backend needs to authorize boots of one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealingParams {
    pub brand_id: String,
    pub model: String,
    pub grade: String,
    pub model_sign_key_id: String,
    pub model_identity: Option<ModelRef>,
    /// Roots of the load chains of every scenario of this model.
    pub load_chains: Vec<LoadChain>,
    /// Sorted, de-duplicated kernel command lines across those scenarios.
    pub kernel_cmdlines: Vec<String>,
}

impl SealingParams {
    fn matches(&self, chain: &BootChain) -> bool {
        self.brand_id == chain.brand_id
            && self.model == chain.model
            && self.grade == chain.grade
            && self.model_sign_key_id == chain.model_sign_key_id
    }
}

/// Expands every chain and groups the results by model.
///
/// Chains must list their assets in load order, so callers pass the raw
/// chains rather than their canonical form. Groups keep the order in which
/// their model first appears.
pub fn sealing_params(
    chains: &[BootChain],
    bootloaders: &Bootloaders,
    cache: &BootAssetsCache,
) -> Result<Vec<SealingParams>> {
    let mut params: Vec<SealingParams> = Vec::new();
    for chain in chains {
        let kernel_boot_file =
            chain
                .kernel_boot_file
                .as_ref()
                .ok_or_else(|| BootChainError::MissingKernelBootFile {
                    kernel: chain.kernel.clone(),
                })?;
        let load_chains =
            boot_assets_to_load_chains(&chain.asset_chain, kernel_boot_file, bootloaders, cache)?;

        match params.iter_mut().find(|p| p.matches(chain)) {
            Some(existing) => {
                existing.load_chains.extend(load_chains);
                existing
                    .kernel_cmdlines
                    .extend(chain.kernel_cmdlines.iter().cloned());
                existing.kernel_cmdlines.sort();
                existing.kernel_cmdlines.dedup();
                if existing.model_identity.is_none() {
                    existing.model_identity = chain.model_identity.clone();
                }
            }
            None => {
                let mut kernel_cmdlines = chain.kernel_cmdlines.clone();
                kernel_cmdlines.sort();
                kernel_cmdlines.dedup();
                params.push(SealingParams {
                    brand_id: chain.brand_id.clone(),
                    model: chain.model.clone(),
                    grade: chain.grade.clone(),
                    model_sign_key_id: chain.model_sign_key_id.clone(),
                    model_identity: chain.model_identity.clone(),
                    load_chains,
                    kernel_cmdlines,
                });
            }
        }
    }
    debug!(
        "prepared sealing parameters for {} model(s) from {} boot chain(s)",
        params.len(),
        chains.len()
    );
    Ok(params)
}
