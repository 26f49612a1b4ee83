//! Canonical JSON encoding and stable SHA-256 digests for persisted boot policy records.
//!
//! Struct fields are emitted in declaration order and maps must be ordered
//! (`BTreeMap`), so two equal values always encode to the same bytes.

use serde::Serialize;
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Prefix for rendered digests (e.g. `sha256:deadbeef...`).
pub const DIGEST_PREFIX: &str = "sha256:";

/// Serialize a value into its canonical compact JSON bytes.
pub fn to_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(256);
    write_canonical_json(value, &mut buf)?;
    Ok(buf)
}

/// Serialize a value into an arbitrary writer using the canonical settings.
pub fn write_canonical_json<T, W>(value: &T, writer: W) -> Result<(), CodecError>
where
    T: Serialize + ?Sized,
    W: std::io::Write,
{
    let mut serializer = serde_json::Serializer::new(writer);
    value.serialize(&mut serializer)?;
    Ok(())
}

/// SHA-256 digest of a canonical encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Digest of a value's canonical JSON encoding.
    pub fn of_json<T: Serialize + ?Sized>(value: &T) -> Result<Self, CodecError> {
        Ok(Self::of_bytes(&to_canonical_json(value)?))
    }

    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&hasher.finalize());
        Digest(arr)
    }

    /// Render the digest as a `sha256:...` hex string.
    pub fn to_hex(&self) -> String {
        format!("{DIGEST_PREFIX}{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when a value cannot be encoded.
#[derive(Debug, thiserror::Error)]
#[error("cannot encode canonical JSON: {0}")]
pub struct CodecError(#[from] serde_json::Error);
