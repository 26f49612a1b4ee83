use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::ops::Deref;

use crate::bootloader::Role;

/// One binary of a boot chain. More than one hash means the asset is being
/// updated and both the old and the new content may be booted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BootAsset {
    pub role: Role,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hashes: Vec<String>,
}

impl BootAsset {
    pub fn new(role: Role, name: impl Into<String>, hashes: &[&str]) -> Self {
        Self {
            role,
            name: name.into(),
            hashes: hashes.iter().map(|h| h.to_string()).collect(),
        }
    }

    /// Copy of the asset with its hashes sorted.
    pub fn to_predictable(&self) -> PredictableBootAsset {
        let mut asset = self.clone();
        asset.hashes.sort();
        PredictableBootAsset(asset)
    }
}

/// Assets order by role, then name, then number of hashes, then the hashes
/// themselves in list order.
impl Ord for BootAsset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.role
            .cmp(&other.role)
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| cmp_length_first(&self.hashes, &other.hashes))
    }
}

impl PartialOrd for BootAsset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reads a JSON `null` list as empty; older records wrote unset lists that way.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Compares sequences by length, then element by element.
pub(crate) fn cmp_length_first<T: Ord>(a: &[T], b: &[T]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// A boot asset whose hash list is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PredictableBootAsset(BootAsset);

impl PredictableBootAsset {
    pub fn into_inner(self) -> BootAsset {
        self.0
    }
}

impl Deref for PredictableBootAsset {
    type Target = BootAsset;

    fn deref(&self) -> &BootAsset {
        &self.0
    }
}

impl AsRef<BootAsset> for PredictableBootAsset {
    fn as_ref(&self) -> &BootAsset {
        &self.0
    }
}

pub fn to_predictable_boot_asset(asset: Option<&BootAsset>) -> Option<PredictableBootAsset> {
    asset.map(BootAsset::to_predictable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ba(role: Role, name: &str, hashes: &[&str]) -> BootAsset {
        BootAsset::new(role, name, hashes)
    }

    fn sorted(mut assets: Vec<BootAsset>) -> Vec<BootAsset> {
        assets.sort();
        assets
    }

    #[test]
    fn sort_by_role() {
        let d = vec![
            ba(Role::RunMode, "1ist", &["b", "c"]),
            ba(Role::Recovery, "1ist", &["b", "c"]),
        ];
        assert_eq!(
            sorted(d),
            vec![
                ba(Role::Recovery, "1ist", &["b", "c"]),
                ba(Role::RunMode, "1ist", &["b", "c"]),
            ]
        );
    }

    #[test]
    fn sort_by_name() {
        let d = vec![
            ba(Role::Recovery, "shim", &["d", "e"]),
            ba(Role::Recovery, "loader", &["d", "e"]),
        ];
        assert_eq!(
            sorted(d),
            vec![
                ba(Role::Recovery, "loader", &["d", "e"]),
                ba(Role::Recovery, "shim", &["d", "e"]),
            ]
        );
    }

    #[test]
    fn shorter_hash_list_first() {
        let d = vec![
            ba(Role::RunMode, "1ist", &["a", "f"]),
            ba(Role::RunMode, "1ist", &["d"]),
        ];
        assert_eq!(
            sorted(d),
            vec![
                ba(Role::RunMode, "1ist", &["d"]),
                ba(Role::RunMode, "1ist", &["a", "f"]),
            ]
        );
    }

    #[test]
    fn hash_entries_break_ties() {
        let d = vec![
            ba(Role::RunMode, "1ist", &["b", "d"]),
            ba(Role::RunMode, "1ist", &["b", "c"]),
        ];
        assert_eq!(
            sorted(d),
            vec![
                ba(Role::RunMode, "1ist", &["b", "c"]),
                ba(Role::RunMode, "1ist", &["b", "d"]),
            ]
        );
    }

    #[test]
    fn role_dominates_name() {
        assert!(ba(Role::RunMode, "loader", &["z"]) > ba(Role::Recovery, "loader", &["z"]));
        assert!(ba(Role::RunMode, "a", &["z"]) > ba(Role::Recovery, "z", &["z"]));
    }

    #[test]
    fn mixed_list_and_resort() {
        let d = vec![
            ba(Role::RunMode, "loader", &["z"]),
            ba(Role::Recovery, "shim", &["b"]),
            ba(Role::RunMode, "loader", &["c", "d"]),
            ba(Role::RunMode, "1oader", &["d", "e"]),
            ba(Role::Recovery, "loader", &["d", "e"]),
            ba(Role::RunMode, "0oader", &["x", "z"]),
        ];
        let expected = vec![
            ba(Role::Recovery, "loader", &["d", "e"]),
            ba(Role::Recovery, "shim", &["b"]),
            ba(Role::RunMode, "0oader", &["x", "z"]),
            ba(Role::RunMode, "1oader", &["d", "e"]),
            ba(Role::RunMode, "loader", &["z"]),
            ba(Role::RunMode, "loader", &["c", "d"]),
        ];
        let once = sorted(d);
        assert_eq!(once, expected);
        assert_eq!(sorted(once), expected);
    }

    #[test]
    fn identical_entries_are_kept() {
        let d = vec![
            ba(Role::RunMode, "loader", &["x", "z"]),
            ba(Role::RunMode, "loader", &["x", "z"]),
        ];
        assert_eq!(sorted(d.clone()), d);
    }

    #[test]
    fn predictable_sorts_hashes_without_touching_input() {
        let original = ba(Role::RunMode, "list", &["b", "a"]);
        let pred = original.to_predictable();
        assert_eq!(*pred, ba(Role::RunMode, "list", &["a", "b"]));
        assert_eq!(original, ba(Role::RunMode, "list", &["b", "a"]));

        let again = pred.to_predictable();
        assert_eq!(again, pred);
    }

    #[test]
    fn predictable_of_none_is_none() {
        assert_eq!(to_predictable_boot_asset(None), None);
        let asset = ba(Role::Recovery, "shim", &["2", "1"]);
        let pred = to_predictable_boot_asset(Some(&asset)).expect("some");
        assert_eq!(pred.into_inner().hashes, vec!["1", "2"]);
    }
}
