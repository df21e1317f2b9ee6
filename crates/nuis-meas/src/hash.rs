use ::serde::Serialize;
use nuis_core::NuisError;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// Hex sha256 digest of the canonical JSON encoding of `value`.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, NuisError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(bytes);
    Ok(format!("{:x}", digest))
}

/// Rounds to the nine-decimal precision used in hashed reports.
pub fn round_f64(value: f64) -> f64 {
    let scaled = (value * 1e9).round();
    scaled / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn hash_ignores_map_insertion_order() {
        let mut first = HashMap::new();
        first.insert("b", 2);
        first.insert("a", 1);
        let mut second = HashMap::new();
        second.insert("a", 1);
        second.insert("b", 2);
        assert_eq!(
            stable_hash_string(&first).unwrap(),
            stable_hash_string(&second).unwrap()
        );
    }

    #[test]
    fn rounding_trims_noise() {
        assert_eq!(round_f64(0.1 + 0.2), 0.3);
    }
}
