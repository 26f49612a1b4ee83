//! Shared fixtures for the integration tests.
//!
//! Each test file compiles this module on its own, so not every helper is used everywhere.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use bootseal_chain::{
    BootAsset, BootChain, BootConfig, BootFile, Bootloaders, ModelIdentity, ModelRef, Role,
    trusted_asset_cache_rel_path,
};

#[derive(Debug)]
pub struct TestModel {
    pub brand_id: String,
    pub model: String,
    pub grade: String,
    pub sign_key_id: String,
}

impl ModelIdentity for TestModel {
    fn brand_id(&self) -> &str {
        &self.brand_id
    }
    fn model(&self) -> &str {
        &self.model
    }
    fn grade(&self) -> &str {
        &self.grade
    }
    fn sign_key_id(&self) -> &str {
        &self.sign_key_id
    }
}

pub fn test_model(model: &str) -> ModelRef {
    ModelRef::from(Arc::new(TestModel {
        brand_id: "mybrand".into(),
        model: model.into(),
        grade: "signed".into(),
        sign_key_id: "my-key-id".into(),
    }))
}

pub fn bootloaders() -> Bootloaders {
    Bootloaders::from([
        (Role::Recovery, "grub-recovery".to_string()),
        (Role::RunMode, "grub".to_string()),
    ])
}

/// Creates empty cache entries for every asset hash under the config's cache
/// root.
pub fn populate_cache(config: &BootConfig, bootloaders: &Bootloaders, assets: &[BootAsset]) {
    let root = config.boot_assets_dir();
    for asset in assets {
        let bootloader = &bootloaders[&asset.role];
        for hash in &asset.hashes {
            let path = root.join(trusted_asset_cache_rel_path(bootloader, &asset.name, hash));
            write_empty(&path);
        }
    }
}

fn write_empty(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

/// A chain filled in the way a boot manager assembles it from a model, its
/// boot assets and a kernel.
pub fn boot_chain(
    model: &ModelRef,
    assets: Vec<BootAsset>,
    kernel_revision: &str,
    cmdlines: &[&str],
) -> BootChain {
    let identity = model.identity();
    BootChain {
        brand_id: identity.brand_id().to_string(),
        model: identity.model().to_string(),
        grade: identity.grade().to_string(),
        model_sign_key_id: identity.sign_key_id().to_string(),
        asset_chain: assets,
        kernel: "pc-kernel".into(),
        kernel_revision: kernel_revision.into(),
        kernel_cmdlines: cmdlines.iter().map(|c| c.to_string()).collect(),
        model_identity: Some(model.clone()),
        kernel_boot_file: Some(BootFile::new(
            format!("pc-kernel_{kernel_revision}.snap"),
            "kernel.efi",
            Role::RunMode,
        )),
    }
}
