//! Sample input generation.
//!
//! When compression is run without an input file, we generate a sample with
//! interesting compression characteristics: a mix of repetitive, text-like,
//! and incompressible sections. The generator is seeded, so the same seed
//! always produces the same bytes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `size_bytes` of sample data with mixed compressibility.
pub fn generate_sample_data(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    let mut remaining = size_bytes;
    while remaining > 0 {
        let section = remaining.min(4096);

        match rng.gen_range(0..10u8) {
            // 30% highly compressible: runs of one byte
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }

            // 40% moderately compressible: small text-like alphabet
            3..=6 => {
                let alphabet = b"etaoin shrdlu.,!\n";
                for _ in 0..section {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }

            // 20% structured: short repeating pattern
            7..=8 => {
                let pattern_len = rng.gen_range(2..=16);
                let pattern: Vec<u8> = (0..pattern_len).map(|_| rng.gen()).collect();
                for i in 0..section {
                    data.push(pattern[i % pattern_len]);
                }
            }

            // 10% incompressible: random bytes
            _ => {
                for _ in 0..section {
                    data.push(rng.gen());
                }
            }
        }

        remaining -= section;
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_size() {
        for size in [0, 1, 4096, 10_000] {
            assert_eq!(generate_sample_data(1, size).len(), size);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(generate_sample_data(42, 8192), generate_sample_data(42, 8192));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(generate_sample_data(1, 8192), generate_sample_data(2, 8192));
    }
}
