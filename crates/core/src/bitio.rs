//! Bit-level packing and unpacking.
//!
//! `BitWriter` packs an ordered sequence of bits into bytes, MSB-first
//! within each byte, padding the final partial byte with trailing zeros.
//! `BitReader` reverses the packing; because padding bits are
//! indistinguishable from data, the caller must carry the exact bit count
//! out of band (the artifact format stores it explicitly).
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! let bit_len = writer.bit_len();
//! let bytes = writer.finish();           // 10100000
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(bit_len, 3);
//! ```

use crate::error::{BitIoError, Result};

/// Packs bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `pending_count` is always < 8; a full accumulator is flushed eagerly
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Partial byte being assembled, MSB-aligned
    pending: u8,
    /// Number of valid bits in `pending` (0-7)
    pending_count: u8,
}

impl BitWriter {
    /// Create a writer with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.pending |= 1 << (7 - self.pending_count);
        }
        self.pending_count += 1;
        if self.pending_count == 8 {
            self.bytes.push(self.pending);
            self.pending = 0;
            self.pending_count = 0;
        }
    }

    /// Append the lowest `count` bits of `value`, most significant first.
    ///
    /// Writing value=0b101 with count=3 appends the bits 1, 0, 1.
    ///
    /// # Errors
    /// `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        for i in (0..count).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
        Ok(())
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> u64 {
        self.bytes.len() as u64 * 8 + self.pending_count as u64
    }

    /// Finish writing and return the packed bytes.
    ///
    /// A final partial byte is flushed with its unused low bits left as
    /// zeros. Consumes the writer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.pending_count > 0 {
            self.bytes.push(self.pending);
        }
        self.bytes
    }
}

/// Unpacks bits MSB-first from a byte buffer.
///
/// The reader itself cannot tell data bits from padding; it reports
/// `UnexpectedEof` only when asked to read past the physical end of the
/// buffer. Callers enforce the logical bit length.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Next bit to read (0 = MSB of first byte)
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Read one bit.
    ///
    /// # Errors
    /// `BitIoError::UnexpectedEof` past the end of the buffer.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = self
            .data
            .get(self.cursor / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = (byte >> (7 - self.cursor % 8)) & 1 == 1;
        self.cursor += 1;
        Ok(bit)
    }

    /// Read `count` bits into the low end of a u64, first bit most
    /// significant.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if fewer than `count` bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }
        let mut value = 0u64;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u64;
        }
        Ok(value)
    }

    /// Number of bits left before the physical end of the buffer.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.cursor
    }

    /// Current bit position from the start of the buffer.
    pub fn position(&self) -> usize {
        self.cursor
    }
}
