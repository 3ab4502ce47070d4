//! huffpack-core: lossless byte-stream compression with Huffman coding
//!
//! This library builds a prefix-free binary code from the byte frequencies
//! of an input, packs the coded bits into a self-contained artifact with
//! the code tree serialized alongside, and reverses the process exactly.
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `freq`: byte frequency analysis
//! - `tree`: Huffman tree construction with a pinned tie-break
//! - `codebook`: symbol/code mappings derived from the tree
//! - `treecodec`: self-delimiting preorder tree serialization
//! - `bitio`: MSB-first bit packing and unpacking
//! - `engine`: compress/decompress orchestration and the artifact format
//! - `stats`: byte-count reporting
//!
//! # Design Principles
//!
//! - **No panics**: malformed artifacts produce structured errors
//! - **Deterministic**: equal inputs always produce identical artifacts
//! - **Fail fast**: corruption aborts the operation; no partial output is
//!   ever passed off as valid
//! - **Call-scoped state**: trees, codebooks, and buffers live for one
//!   call and are discarded

pub mod bitio;
pub mod codebook;
pub mod engine;
pub mod error;
pub mod freq;
pub mod stats;
pub mod tree;
pub mod treecodec;

// Re-export commonly used types
pub use engine::{compress, decompress};
pub use error::{Error, Result};
