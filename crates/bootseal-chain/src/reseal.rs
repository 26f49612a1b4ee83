//! Deciding whether a change of boot chains requires resealing.

use bootseal_codec::{CodecError, Digest, to_canonical_json};
use log::{debug, warn};

use crate::chain::PredictableBootChains;

/// Whether two canonical collections describe the same boot chains.
///
/// Only serialized fields take part; model handles and kernel boot files are
/// ignored. The inputs are compared as they are and never sorted again.
pub fn predictable_boot_chains_equal_for_reseal(
    a: &PredictableBootChains,
    b: &PredictableBootChains,
) -> bool {
    let equal = a.len() == b.len()
        && a.iter()
            .zip(b.iter())
            .all(|(one, other)| one.same_serialized_fields(other));
    debug!(
        "boot chains equal for reseal: {equal} ({} vs {} chain(s))",
        a.len(),
        b.len()
    );
    equal
}

/// Same verdict as [`predictable_boot_chains_equal_for_reseal`], computed by
/// comparing canonical encodings. A value that cannot be encoded compares
/// unequal.
pub fn predictable_boot_chains_equal_for_reseal_serialized(
    a: &PredictableBootChains,
    b: &PredictableBootChains,
) -> bool {
    match (to_canonical_json(a), to_canonical_json(b)) {
        (Ok(one), Ok(other)) => one == other,
        (Err(err), _) | (_, Err(err)) => {
            warn!("cannot encode boot chains for comparison: {err}");
            false
        }
    }
}

impl PredictableBootChains {
    /// Digest of the canonical encoding, identifying a boot policy in logs.
    pub fn digest(&self) -> Result<Digest, CodecError> {
        Digest::of_json(self)
    }

    pub fn equal_for_reseal(&self, other: &PredictableBootChains) -> bool {
        predictable_boot_chains_equal_for_reseal(self, other)
    }
}
