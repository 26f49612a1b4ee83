//! Boot chains of a sealed device: canonical forms, reseal decisions, and load chains expanded against the trusted boot assets cache.

pub mod asset;
pub mod bootloader;
pub mod cache;
pub mod chain;
pub mod config;
pub mod error;
pub mod loadchain;
pub mod modeenv;
pub mod model;
pub mod reseal;
pub mod sealing;
pub mod store;

pub use asset::{BootAsset, PredictableBootAsset, to_predictable_boot_asset};
pub use bootloader::{BootFile, Bootloaders, Role};
pub use cache::{BootAssetsCache, trusted_asset_cache_rel_path};
pub use chain::{
    BootChain, PredictableBootChain, PredictableBootChains, to_predictable_boot_chain,
    to_predictable_boot_chains,
};
pub use config::BootConfig;
pub use error::{BootChainError, Result};
pub use loadchain::{LoadChain, boot_assets_to_load_chains};
pub use modeenv::{BootAssetsMap, ModeenvError, ModeenvModel, ModeenvValue, marshal_modeenv_entry};
pub use model::{ModelIdentity, ModelRef};
pub use reseal::{
    predictable_boot_chains_equal_for_reseal, predictable_boot_chains_equal_for_reseal_serialized,
};
pub use sealing::{SealingParams, sealing_params};
pub use store::{BootChainsStore, read_boot_chains, write_boot_chains};
