//! Compression and decompression orchestration.
//!
//! One compress or decompress call owns its frequency table, tree, codebook,
//! and buffers exclusively; nothing persists between calls. The whole input
//! is in memory before encoding begins and the whole artifact is assembled
//! before it is written.
//!
//! # Artifact Format
//!
//! ```text
//! +-------------------+
//! | Magic (4 bytes)   |  0x48 0x55 0x46 0x31 ("HUF1")
//! +-------------------+
//! | tree tokens       |  preorder stream, self-delimiting (treecodec)
//! | (variable)        |  a single empty marker for zero-length input
//! +-------------------+
//! | delimiter (1)     |  0xFF, disjoint from the tree marker alphabet
//! +-------------------+
//! | raw_len (8)       |  u64 little-endian original byte count
//! +-------------------+
//! | bit_len (8)       |  u64 little-endian exact payload bit length
//! +-------------------+
//! | payload           |  ceil(bit_len / 8) bytes, MSB-first, zero padded
//! | (variable)        |
//! +-------------------+
//! ```
//!
//! `bit_len` is what separates real data from padding: the decoder consumes
//! exactly that many bits and refuses artifacts where the payload byte
//! count disagrees with it. Decoding "until the bytes run out" is not an
//! option, because padding bits can coincidentally complete a valid code
//! path.

use crate::bitio::{BitReader, BitWriter};
use crate::codebook::CodeBook;
use crate::error::{DecodeError, FormatError, Result};
use crate::freq::FrequencyTable;
use crate::tree::{HuffmanTree, Node};
use crate::treecodec;

/// Magic number for compressed artifacts: "HUF1"
pub const MAGIC: [u8; 4] = [0x48, 0x55, 0x46, 0x31];

/// Separates the tree stream from the length fields. Never a valid marker.
pub const DELIMITER: u8 = 0xFF;

/// Fixed bytes after the tree stream: delimiter + raw_len + bit_len.
const TRAILER_FIXED: usize = 1 + 8 + 8;

/// Compress `input` into a self-contained artifact.
///
/// Zero-length input is not an error; it produces the minimal artifact
/// (empty tree marker, both lengths zero, no payload).
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let freqs = FrequencyTable::from_bytes(input);
    let tree = HuffmanTree::from_frequencies(&freqs);

    let mut writer = BitWriter::new();
    if let Some(ref tree) = tree {
        let codebook = CodeBook::from_tree(tree)?;
        for &byte in input {
            let code = codebook
                .code(byte)
                .expect("every input byte is in the frequency table");
            writer.write_bits(code.bits, code.len as usize)?;
        }
    }
    let bit_len = writer.bit_len();
    let payload = writer.finish();

    let mut artifact = Vec::with_capacity(4 + TRAILER_FIXED + payload.len() + 64);
    artifact.extend_from_slice(&MAGIC);
    treecodec::encode_tree(tree.as_ref(), &mut artifact);
    artifact.push(DELIMITER);
    artifact.extend_from_slice(&(input.len() as u64).to_le_bytes());
    artifact.extend_from_slice(&bit_len.to_le_bytes());
    artifact.extend_from_slice(&payload);

    Ok(artifact)
}

/// Decompress an artifact produced by [`compress`].
///
/// # Errors
/// - `FormatError` for a bad magic number, missing delimiter, truncated
///   header, or a payload that disagrees with the declared bit length
/// - `TreeError` for a corrupt tree stream
/// - `DecodeError` when the bit walk cannot produce exactly the declared
///   symbol count from exactly the declared bits
pub fn decompress(artifact: &[u8]) -> Result<Vec<u8>> {
    // Magic.
    if artifact.len() < 4 {
        return Err(FormatError::TruncatedHeader {
            required: 4,
            actual: artifact.len(),
        }
        .into());
    }
    let magic: [u8; 4] = artifact[0..4].try_into().expect("length checked");
    if magic != MAGIC {
        return Err(FormatError::InvalidMagic {
            expected: MAGIC,
            actual: magic,
        }
        .into());
    }

    // Tree stream, then the fixed trailer.
    let (tree, tree_len) = treecodec::decode_tree(&artifact[4..])?;
    let trailer = &artifact[4 + tree_len..];
    if trailer.len() < TRAILER_FIXED {
        return Err(FormatError::TruncatedHeader {
            required: 4 + tree_len + TRAILER_FIXED,
            actual: artifact.len(),
        }
        .into());
    }
    if trailer[0] != DELIMITER {
        return Err(FormatError::MissingDelimiter {
            expected: DELIMITER,
            found: trailer[0],
        }
        .into());
    }
    let raw_len = u64::from_le_bytes(trailer[1..9].try_into().expect("length checked"));
    let bit_len = u64::from_le_bytes(trailer[9..17].try_into().expect("length checked"));
    let payload = &trailer[TRAILER_FIXED..];

    let expected_bytes = (bit_len as usize).div_ceil(8);
    if payload.len() != expected_bytes {
        return Err(FormatError::PayloadLengthMismatch {
            expected: expected_bytes,
            actual: payload.len(),
        }
        .into());
    }

    let tree = match tree {
        Some(tree) => tree,
        None => {
            if raw_len != 0 {
                return Err(FormatError::EmptyTreeWithData { raw_len }.into());
            }
            if bit_len != 0 {
                return Err(FormatError::PayloadLengthMismatch {
                    expected: 0,
                    actual: payload.len(),
                }
                .into());
            }
            return Ok(Vec::new());
        }
    };

    // Every code is at least one bit (the tree root is a branch), so a
    // symbol count beyond the bit count is unsatisfiable. Checked before
    // the output buffer is sized from raw_len.
    if raw_len > bit_len {
        return Err(FormatError::ImpossibleSymbolCount { raw_len, bit_len }.into());
    }

    decode_payload(&tree, payload, raw_len, bit_len)
}

/// Walk the tree over the payload bits, emitting one symbol per completed
/// root-to-leaf path, until `raw_len` symbols exist.
fn decode_payload(
    tree: &HuffmanTree,
    payload: &[u8],
    raw_len: u64,
    bit_len: u64,
) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(raw_len as usize);
    let mut reader = BitReader::new(payload);
    let mut consumed = 0u64;

    while (output.len() as u64) < raw_len {
        let mut node = tree.root();
        loop {
            match node {
                Node::Leaf { symbol } => {
                    output.push(*symbol);
                    break;
                }
                Node::Branch { left, right } => {
                    if consumed == bit_len {
                        return Err(DecodeError::OutOfBits {
                            produced: output.len(),
                            expected: raw_len as usize,
                        }
                        .into());
                    }
                    consumed += 1;
                    node = if reader.read_bit()? {
                        right.as_ref()
                    } else {
                        left.as_ref()
                    };
                }
            }
        }
    }

    // Padding is stripped by bit_len; anything declared beyond the last
    // symbol means the length fields lie.
    if consumed != bit_len {
        return Err(DecodeError::TrailingBits {
            consumed,
            declared: bit_len,
        }
        .into());
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_round_trip_text() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let artifact = compress(input).unwrap();
        assert_eq!(decompress(&artifact).unwrap(), input);
    }

    #[test]
    fn test_round_trip_empty() {
        let artifact = compress(b"").unwrap();
        // magic + empty marker + delimiter + two zero u64s, no payload
        assert_eq!(artifact.len(), 4 + 1 + TRAILER_FIXED);
        assert_eq!(decompress(&artifact).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_round_trip_single_repeated_symbol() {
        let input = vec![0x41u8; 1000];
        let artifact = compress(&input).unwrap();
        assert_eq!(decompress(&artifact).unwrap(), input);
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut artifact = compress(b"data").unwrap();
        artifact[0] = b'X';
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Format(FormatError::InvalidMagic { .. }))
        ));
    }

    /// Payload length recovered by re-parsing the tree stream.
    fn payload_len(artifact: &[u8]) -> usize {
        let (_, tree_len) = treecodec::decode_tree(&artifact[4..]).unwrap();
        artifact.len() - 4 - tree_len - TRAILER_FIXED
    }

    #[test]
    fn test_missing_delimiter_rejected() {
        let mut artifact = compress(b"delimiter check").unwrap();
        let delim_at = artifact.len() - payload_len(&artifact) - TRAILER_FIXED;
        assert_eq!(artifact[delim_at], DELIMITER);
        artifact[delim_at] = 0x7E;
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Format(FormatError::MissingDelimiter { found: 0x7E, .. }))
        ));
    }

    #[test]
    fn test_truncated_artifact_rejected() {
        let artifact = compress(b"truncate me").unwrap();
        let truncated = &artifact[..artifact.len() - 1];
        assert!(matches!(
            decompress(truncated),
            Err(Error::Format(FormatError::PayloadLengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_unconsumed_declared_bits_rejected() {
        // Shrink the symbol count so the walk finishes with declared bits
        // left over.
        let input = vec![b'a'; 16]; // single symbol: 16 one-bit codes, 2 payload bytes
        let mut artifact = compress(&input).unwrap();
        let raw_len_at = artifact.len() - 2 - 16;
        artifact[raw_len_at..raw_len_at + 8].copy_from_slice(&15u64.to_le_bytes());
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Decode(DecodeError::TrailingBits {
                consumed: 15,
                declared: 16
            }))
        ));
    }

    #[test]
    fn test_bits_exhausted_mid_walk_rejected() {
        // a:2 b:1 c:1 -> 6 payload bits for 4 symbols. Declaring a fifth
        // symbol stays within the bit budget but strands the walk mid-code.
        let input = b"aabc";
        let mut artifact = compress(input).unwrap();
        let raw_len_at = artifact.len() - 1 - 16;
        artifact[raw_len_at..raw_len_at + 8].copy_from_slice(&5u64.to_le_bytes());
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Decode(DecodeError::OutOfBits {
                produced: 4,
                expected: 5
            }))
        ));
    }

    #[test]
    fn test_symbol_count_beyond_bit_budget_rejected() {
        // An absurd declared byte count must surface an error before any
        // output buffer is sized from it.
        let input = vec![b'a'; 16]; // bit_len = 16
        let mut artifact = compress(&input).unwrap();
        let raw_len_at = artifact.len() - 2 - 16;
        artifact[raw_len_at..raw_len_at + 8].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Format(FormatError::ImpossibleSymbolCount {
                raw_len: u64::MAX,
                bit_len: 16
            }))
        ));
    }

    #[test]
    fn test_leaf_rooted_artifact_rejected() {
        // A leaf-rooted tree stream would let zero declared bits "decode"
        // to any number of fabricated symbols.
        let mut artifact = Vec::new();
        artifact.extend_from_slice(&MAGIC);
        artifact.extend_from_slice(&[treecodec::MARKER_LEAF, b'a']);
        artifact.push(DELIMITER);
        artifact.extend_from_slice(&5u64.to_le_bytes()); // raw_len
        artifact.extend_from_slice(&0u64.to_le_bytes()); // bit_len
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Tree(crate::error::TreeError::LeafRoot))
        ));
    }

    #[test]
    fn test_empty_tree_with_data_rejected() {
        let mut artifact = compress(b"").unwrap();
        let raw_len_at = 4 + 1 + 1;
        artifact[raw_len_at..raw_len_at + 8].copy_from_slice(&3u64.to_le_bytes());
        assert!(matches!(
            decompress(&artifact),
            Err(Error::Format(FormatError::EmptyTreeWithData { raw_len: 3 }))
        ));
    }

    #[test]
    fn test_skewed_input_actually_compresses() {
        // Payload bits must undercut 8 bits per symbol for skewed input.
        let input = b"aaaaaaaaab";
        let artifact = compress(input).unwrap();
        let bit_len_at = artifact.len() - payload_len(&artifact) - 8;
        let bit_len = u64::from_le_bytes(artifact[bit_len_at..][..8].try_into().unwrap());
        assert!(bit_len < 8 * input.len() as u64);
    }
}
