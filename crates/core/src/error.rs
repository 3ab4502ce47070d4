//! Error types for the huffpack compressor.
//!
//! All operations return structured errors rather than panicking.
//! Corruption is never transient, so nothing here is retryable; callers
//! abort the current file operation and report the message.

use thiserror::Error;

/// Top-level error type for all compression and decompression operations.
///
/// Each variant corresponds to a specific failure domain:
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - Tree: malformed or truncated serialized Huffman tree
/// - Format: artifact header/delimiter/length inconsistencies
/// - Decode: the bit walk cannot terminate validly
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// Serialized tree is corrupt or truncated
    #[error("corrupt tree: {0}")]
    Tree(#[from] TreeError),

    /// Artifact format violation (magic, delimiter, length fields)
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Decoding walk failed to terminate on a symbol boundary
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Requested more bits than a single u64 can carry
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Errors while decoding a serialized Huffman tree.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Token stream ended before the tree was complete
    #[error("serialized tree is truncated")]
    Truncated,

    /// A byte that is neither the branch, leaf, nor empty marker
    #[error("invalid tree marker {marker:#04x} at offset {offset}")]
    InvalidMarker { marker: u8, offset: usize },

    /// Tree nesting exceeds the structural maximum
    #[error("tree depth {depth} exceeds maximum {max}")]
    TooDeep { depth: usize, max: usize },

    /// Stream roots the tree at a leaf, which would assign a zero-bit code
    #[error("root of serialized tree is a leaf")]
    LeafRoot,
}

/// Artifact format errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid magic number at the start of the artifact
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: [u8; 4] },

    /// Artifact is too short to contain the fixed-size fields
    #[error("truncated header: need at least {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    /// The byte after the tree stream is not the delimiter
    #[error("missing delimiter: expected {expected:#04x}, found {found:#04x}")]
    MissingDelimiter { expected: u8, found: u8 },

    /// Payload length disagrees with the declared bit length
    #[error("payload length mismatch: bit length implies {expected} bytes, got {actual}")]
    PayloadLengthMismatch { expected: usize, actual: usize },

    /// Empty-tree marker paired with a nonzero byte count
    #[error("empty tree marker but declared byte count is {raw_len}")]
    EmptyTreeWithData { raw_len: u64 },

    /// Declared symbol count cannot fit in the declared bits
    #[error("declared byte count {raw_len} cannot fit in {bit_len} declared bits")]
    ImpossibleSymbolCount { raw_len: u64, bit_len: u64 },

    /// Two leaves map to one code (internal invariant violation)
    #[error("duplicate code {bits:#b} of length {len}")]
    DuplicateCode { bits: u64, len: u8 },

    /// Code length exceeds the 64-bit code word
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: usize },
}

/// Errors during the decoding bit walk.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Declared bit length ran out mid-code
    #[error("bit stream exhausted after {produced} of {expected} symbols")]
    OutOfBits { produced: usize, expected: usize },

    /// All symbols produced but declared bits remain unconsumed
    #[error("decoded all symbols at bit {consumed} but {declared} bits were declared")]
    TrailingBits { consumed: u64, declared: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
