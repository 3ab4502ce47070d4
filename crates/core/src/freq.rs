//! Byte frequency analysis.
//!
//! A `FrequencyTable` counts occurrences of each byte value in an input
//! buffer. It is built once per compression and never mutated afterward.
//!
//! # Invariants
//! - sum of all counts equals the input length
//! - symbols that never occur are absent from iteration

/// Occurrence counts for each byte value in one input.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    counts: [u64; 256],
    total: u64,
}

impl FrequencyTable {
    /// Count every byte of `input`. O(n) time, fixed space.
    pub fn from_bytes(input: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in input {
            counts[byte as usize] += 1;
        }
        Self {
            counts,
            total: input.len() as u64,
        }
    }

    /// Occurrences of `symbol`, zero if absent.
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Sum of all counts (the input length).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when the input was empty.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate `(symbol, count)` pairs for present symbols, in ascending
    /// symbol order. The ordering is what makes tree construction
    /// reproducible across runs.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }
}
