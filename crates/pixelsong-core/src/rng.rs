//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random draw in the pipeline (template choice, transposition, scale
//! selection) goes through a generator handed in by the caller. This module
//! provides the seeded generators used by the CLI and tests so that a run can
//! be reproduced from a single base seed.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives the seed used for the `index`-th image of a run.
///
/// Each image gets an independent stream so that concurrent sonification calls
/// never share generator state.
pub fn derive_image_seed(base_seed: u32, index: u32) -> u32 {
    let mut input = Vec::with_capacity(8);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&index.to_le_bytes());
    truncate_hash(&input)
}

/// Derives a seed for a named component (e.g. `"scale-pool"`) from the base seed.
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    truncate_hash(&input)
}

/// Creates the RNG for the `index`-th image of a run.
pub fn create_image_rng(base_seed: u32, index: u32) -> Pcg32 {
    create_rng(derive_image_seed(base_seed, index))
}

/// BLAKE3 hash truncated to its first 4 bytes, little-endian.
fn truncate_hash(input: &[u8]) -> u32 {
    let hash = blake3::hash(input);
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&hash.as_bytes()[..4]);
    u32::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_rng_determinism() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(42);

        let values1: Vec<u32> = (0..100).map(|_| rng1.gen_range(0..12)).collect();
        let values2: Vec<u32> = (0..100).map(|_| rng2.gen_range(0..12)).collect();

        assert_eq!(values1, values2);
    }

    #[test]
    fn test_different_seeds_produce_different_sequences() {
        let mut rng1 = create_rng(42);
        let mut rng2 = create_rng(43);

        let values1: Vec<f32> = (0..10).map(|_| rng1.gen()).collect();
        let values2: Vec<f32> = (0..10).map(|_| rng2.gen()).collect();

        assert_ne!(values1, values2);
    }

    #[test]
    fn test_image_seed_derivation_consistency() {
        let base = 42u32;

        let seed_a = derive_image_seed(base, 0);
        let seed_b = derive_image_seed(base, 0);
        assert_eq!(seed_a, seed_b);

        let seed_1 = derive_image_seed(base, 1);
        assert_ne!(seed_a, seed_1);
    }

    #[test]
    fn test_component_seed_derivation() {
        let base = 42u32;

        let pool = derive_component_seed(base, "scale-pool");
        let other = derive_component_seed(base, "selection");
        assert_ne!(pool, other);
        assert_eq!(pool, derive_component_seed(base, "scale-pool"));
    }

    #[test]
    fn test_image_rng_independence() {
        let mut rng0 = create_image_rng(7, 0);
        let mut rng1 = create_image_rng(7, 1);

        let values0: Vec<u64> = (0..10).map(|_| rng0.gen()).collect();
        let values1: Vec<u64> = (0..10).map(|_| rng1.gen()).collect();

        assert_ne!(values0, values1);
    }
}
