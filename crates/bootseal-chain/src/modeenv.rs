//! Value encoding for entries of the modeenv key/value file.
//!
//! Each entry is written as `key=value` on its own line. Empty values are
//! omitted entirely, so reading a missing key yields the type's empty value.

use std::collections::BTreeMap;
use std::io::Write;

use thiserror::Error;

use crate::asset::BootAsset;
use crate::bootloader::Role;

#[derive(Debug, Error)]
pub enum ModeenvError {
    #[error("cannot write modeenv entry {key:?}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot encode modeenv value as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot find expected boot asset {0} in modeenv")]
    MissingBootAsset(String),
}

/// A type that can be stored as the value of a modeenv entry.
pub trait ModeenvValue: Sized {
    /// Encodes the value. `None` means the entry is left out of the file.
    fn marshal_modeenv_value(&self) -> Result<Option<String>, ModeenvError>;

    /// Decodes a value; an absent entry is passed as the empty string.
    fn unmarshal_modeenv_value(value: &str) -> Result<Self, ModeenvError>;
}

impl ModeenvValue for String {
    fn marshal_modeenv_value(&self) -> Result<Option<String>, ModeenvError> {
        Ok((!self.is_empty()).then(|| self.clone()))
    }

    fn unmarshal_modeenv_value(value: &str) -> Result<Self, ModeenvError> {
        Ok(value.to_string())
    }
}

/// Comma separated; empty items are dropped when reading.
impl ModeenvValue for Vec<String> {
    fn marshal_modeenv_value(&self) -> Result<Option<String>, ModeenvError> {
        Ok((!self.is_empty()).then(|| self.join(",")))
    }

    fn unmarshal_modeenv_value(value: &str) -> Result<Self, ModeenvError> {
        Ok(value
            .split(',')
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Brand and model of a device, stored as `brand/model`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeenvModel {
    pub brand_id: String,
    pub model: String,
}

impl ModeenvModel {
    pub fn new(brand_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            brand_id: brand_id.into(),
            model: model.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.brand_id.is_empty() && self.model.is_empty()
    }
}

impl ModeenvValue for ModeenvModel {
    fn marshal_modeenv_value(&self) -> Result<Option<String>, ModeenvError> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("{}/{}", self.brand_id, self.model)))
    }

    // Anything but a non-empty `brand/model` pair reads as no model.
    fn unmarshal_modeenv_value(value: &str) -> Result<Self, ModeenvError> {
        match value.split_once('/') {
            Some((brand_id, model)) if !brand_id.is_empty() && !model.is_empty() => {
                Ok(ModeenvModel::new(brand_id, model))
            }
            _ => Ok(ModeenvModel::default()),
        }
    }
}

/// Trusted hashes of boot assets, keyed by asset name, stored as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootAssetsMap(pub BTreeMap<String, Vec<String>>);

impl BootAssetsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, hashes: Vec<String>) {
        self.0.insert(name.into(), hashes);
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Boot assets for `names`, given in the order the bootloader loads
    /// them, each carrying the hashes recorded for it.
    pub fn boot_assets(&self, role: Role, names: &[&str]) -> Result<Vec<BootAsset>, ModeenvError> {
        names
            .iter()
            .map(|name| {
                let hashes = self
                    .0
                    .get(*name)
                    .ok_or_else(|| ModeenvError::MissingBootAsset(name.to_string()))?;
                Ok(BootAsset {
                    role,
                    name: name.to_string(),
                    hashes: hashes.clone(),
                })
            })
            .collect()
    }
}

impl ModeenvValue for BootAssetsMap {
    fn marshal_modeenv_value(&self) -> Result<Option<String>, ModeenvError> {
        if self.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::to_string(&self.0)?))
    }

    fn unmarshal_modeenv_value(value: &str) -> Result<Self, ModeenvError> {
        if value.is_empty() {
            return Ok(BootAssetsMap::default());
        }
        let map: Option<BTreeMap<String, Vec<String>>> = serde_json::from_str(value)?;
        Ok(BootAssetsMap(map.unwrap_or_default()))
    }
}

/// Writes `key=value` followed by a newline, or nothing when the value is
/// empty.
pub fn marshal_modeenv_entry<W: Write, V: ModeenvValue>(
    out: &mut W,
    key: &str,
    value: &V,
) -> Result<(), ModeenvError> {
    let Some(encoded) = value.marshal_modeenv_value()? else {
        return Ok(());
    };
    writeln!(out, "{key}={encoded}").map_err(|source| ModeenvError::Write {
        key: key.to_string(),
        source,
    })
}
