//! Byte-count statistics for one compress or decompress run.
//!
//! Collected by the caller from the sizes it already knows; nothing here
//! inspects the artifact. Single-threaded, updated once per run.

use std::fmt;

/// Sizes observed during one operation.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    /// Bytes read from the input file
    pub input_bytes: u64,

    /// Bytes written to the output file
    pub output_bytes: u64,
}

impl RunStats {
    /// Record the sizes of one completed run.
    pub fn new(input_bytes: u64, output_bytes: u64) -> Self {
        Self {
            input_bytes,
            output_bytes,
        }
    }

    /// Output size over input size. Zero-length input reports 0.0.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            0.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input size:  {} bytes", self.input_bytes)?;
        writeln!(f, "Output size: {} bytes", self.output_bytes)?;
        write!(f, "Ratio:       {:.3}", self.ratio())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let stats = RunStats::new(1000, 400);
        assert!((stats.ratio() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_ratio_is_zero() {
        assert_eq!(RunStats::new(0, 21).ratio(), 0.0);
    }

    #[test]
    fn test_display_mentions_sizes() {
        let text = RunStats::new(10, 5).to_string();
        assert!(text.contains("10 bytes"));
        assert!(text.contains("5 bytes"));
    }
}
