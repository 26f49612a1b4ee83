use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::ops::Deref;

use crate::asset::{BootAsset, cmp_length_first, null_as_empty};
use crate::bootloader::BootFile;
use crate::model::ModelRef;

/// Everything that may boot in one scenario (run mode, or a given recovery
/// system) on one device model.
///
/// The model handle and the kernel boot file are carried alongside the chain
/// for later pipeline stages but are never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BootChain {
    pub brand_id: String,
    pub model: String,
    pub grade: String,
    pub model_sign_key_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub asset_chain: Vec<BootAsset>,
    pub kernel: String,
    pub kernel_revision: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub kernel_cmdlines: Vec<String>,

    /// Resolved model the identity fields were taken from.
    #[serde(skip)]
    pub model_identity: Option<ModelRef>,
    /// Kernel file ending every load chain of this scenario.
    #[serde(skip)]
    pub kernel_boot_file: Option<BootFile>,
}

impl BootChain {
    /// Copy of the chain with hashes, assets and kernel command lines sorted.
    pub fn to_predictable(&self) -> PredictableBootChain {
        let mut chain = self.clone();
        chain.asset_chain = self
            .asset_chain
            .iter()
            .map(|asset| asset.to_predictable().into_inner())
            .collect();
        chain.asset_chain.sort();
        chain.kernel_cmdlines.sort();
        PredictableBootChain(chain)
    }

    fn model_key(&self) -> (&str, &str, &str, &str) {
        (
            &self.brand_id,
            &self.model,
            &self.grade,
            &self.model_sign_key_id,
        )
    }

    /// Whether two chains agree on every serialized field.
    pub(crate) fn same_serialized_fields(&self, other: &BootChain) -> bool {
        self.model_key() == other.model_key()
            && self.asset_chain == other.asset_chain
            && self.kernel == other.kernel
            && self.kernel_revision == other.kernel_revision
            && self.kernel_cmdlines == other.kernel_cmdlines
    }
}

/// Order of canonical chains: model identity, assets, kernel, kernel revision,
/// kernel command lines. Lists compare by length first. The auxiliary
/// associations take no part.
fn cmp_predictable(a: &BootChain, b: &BootChain) -> Ordering {
    a.model_key()
        .cmp(&b.model_key())
        .then_with(|| cmp_length_first(&a.asset_chain, &b.asset_chain))
        .then_with(|| a.kernel.cmp(&b.kernel))
        .then_with(|| a.kernel_revision.cmp(&b.kernel_revision))
        .then_with(|| cmp_length_first(&a.kernel_cmdlines, &b.kernel_cmdlines))
}

/// A boot chain in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PredictableBootChain(BootChain);

impl PredictableBootChain {
    pub fn into_inner(self) -> BootChain {
        self.0
    }
}

impl Deref for PredictableBootChain {
    type Target = BootChain;

    fn deref(&self) -> &BootChain {
        &self.0
    }
}

impl AsRef<BootChain> for PredictableBootChain {
    fn as_ref(&self) -> &BootChain {
        &self.0
    }
}

pub fn to_predictable_boot_chain(chain: Option<&BootChain>) -> Option<PredictableBootChain> {
    chain.map(BootChain::to_predictable)
}

/// A sorted collection of canonical boot chains, as compared and persisted
/// when deciding whether to reseal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictableBootChains(Vec<PredictableBootChain>);

impl PredictableBootChains {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BootChain> {
        self.0.iter().map(|chain| &chain.0)
    }

    pub fn into_inner(self) -> Vec<BootChain> {
        self.0.into_iter().map(PredictableBootChain::into_inner).collect()
    }
}

impl Deref for PredictableBootChains {
    type Target = [PredictableBootChain];

    fn deref(&self) -> &[PredictableBootChain] {
        &self.0
    }
}

pub fn to_predictable_boot_chains(chains: &[BootChain]) -> PredictableBootChains {
    let mut predictable: Vec<PredictableBootChain> =
        chains.iter().map(BootChain::to_predictable).collect();
    predictable.sort_by(|a, b| cmp_predictable(a, b));
    PredictableBootChains(predictable)
}

impl Serialize for PredictableBootChains {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

// Records read back from disk are canonicalized again so the wrapper's
// invariant never depends on the file contents.
impl<'de> Deserialize<'de> for PredictableBootChains {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let chains: Vec<BootChain> = null_as_empty(deserializer)?;
        Ok(to_predictable_boot_chains(&chains))
    }
}
