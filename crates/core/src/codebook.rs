//! Code derivation from a Huffman tree.
//!
//! A depth-first walk assigns every leaf the bit string spelled by its path
//! from the root: 0 for each left edge, 1 for each right edge. Because
//! symbols live only at leaves, the resulting code set is prefix-free.
//!
//! The same walk fills the inverse mapping used to answer "which symbol
//! does this code spell". Decoding proper walks the tree bit by bit (see
//! the engine); the inverse map exists for symmetry checks and as the
//! structural invariant: two leaves producing one code means the tree is
//! broken.

use std::collections::HashMap;

use crate::error::{FormatError, Result};
use crate::tree::{HuffmanTree, Node};

/// A prefix code word: up to 64 bits, first bit in the most significant
/// position of the low `len` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    /// The code bits, right-aligned
    pub bits: u64,
    /// Number of valid bits, always >= 1
    pub len: u8,
}

/// Symbol -> code and code -> symbol mappings for one tree.
#[derive(Debug, Clone)]
pub struct CodeBook {
    /// Forward mapping, indexed by symbol
    codes: [Option<Code>; 256],
    /// Inverse mapping, one entry per leaf
    symbols: HashMap<Code, u8>,
}

impl CodeBook {
    /// Derive both mappings from `tree` in one walk.
    ///
    /// For the duplicate-leaf tree produced by a single-symbol alphabet the
    /// leftmost leaf wins the forward mapping, so the sole symbol encodes
    /// as "0".
    ///
    /// # Errors
    /// - `FormatError::CodeTooLong` if any leaf sits deeper than 64 levels
    /// - `FormatError::DuplicateCode` if two leaves spell the same code
    pub fn from_tree(tree: &HuffmanTree) -> Result<Self> {
        let mut book = Self {
            codes: [None; 256],
            symbols: HashMap::new(),
        };
        book.walk(tree.root(), 0, 0)?;
        Ok(book)
    }

    fn walk(&mut self, node: &Node, bits: u64, len: u8) -> Result<()> {
        match node {
            Node::Leaf { symbol } => {
                let code = Code { bits, len };
                if self.symbols.insert(code, *symbol).is_some() {
                    return Err(FormatError::DuplicateCode {
                        bits: code.bits,
                        len: code.len,
                    }
                    .into());
                }
                // First (leftmost) leaf for a symbol wins.
                if self.codes[*symbol as usize].is_none() {
                    self.codes[*symbol as usize] = Some(code);
                }
                Ok(())
            }
            Node::Branch { left, right } => {
                if len >= 64 {
                    return Err(FormatError::CodeTooLong {
                        length: len as usize + 1,
                    }
                    .into());
                }
                self.walk(left, bits << 1, len + 1)?;
                self.walk(right, (bits << 1) | 1, len + 1)
            }
        }
    }

    /// The code for `symbol`, if it appears in the tree.
    pub fn code(&self, symbol: u8) -> Option<Code> {
        self.codes[symbol as usize]
    }

    /// The symbol a complete code word spells, if any.
    pub fn symbol(&self, code: Code) -> Option<u8> {
        self.symbols.get(&code).copied()
    }

    /// Iterate `(symbol, code)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.map(|c| (symbol as u8, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::FrequencyTable;

    fn book_for(input: &[u8]) -> CodeBook {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(input))
            .expect("non-empty input");
        CodeBook::from_tree(&tree).expect("valid tree")
    }

    fn is_prefix(short: Code, long: Code) -> bool {
        short.len < long.len && (long.bits >> (long.len - short.len)) == short.bits
    }

    #[test]
    fn test_every_code_nonempty() {
        let book = book_for(b"the quick brown fox");
        for (_, code) in book.iter() {
            assert!(code.len >= 1);
        }
    }

    #[test]
    fn test_prefix_free() {
        let book = book_for(b"abracadabra alakazam");
        let codes: Vec<Code> = book.iter().map(|(_, c)| c).collect();
        for (i, &a) in codes.iter().enumerate() {
            for &b in codes.iter().skip(i + 1) {
                assert!(!is_prefix(a, b) && !is_prefix(b, a), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn test_inverse_agrees_with_forward() {
        let book = book_for(b"mississippi");
        for (symbol, code) in book.iter() {
            assert_eq!(book.symbol(code), Some(symbol));
        }
    }

    #[test]
    fn test_single_symbol_gets_one_bit_zero() {
        let book = book_for(b"AAAAAAAA");
        let code = book.code(b'A').unwrap();
        assert_eq!((code.bits, code.len), (0, 1));
        assert_eq!(book.code(b'B'), None);
    }

    #[test]
    fn test_absent_symbol_has_no_code() {
        let book = book_for(b"xy");
        assert!(book.code(b'z').is_none());
    }

    #[test]
    fn test_skewed_lengths() {
        // a:5 b:2 c:1 d:1 -> lengths 1, 2, 3, 3
        let book = book_for(b"aaaaabbcd");
        let lengths: Vec<(u8, u8)> = book.iter().map(|(s, c)| (s, c.len)).collect();
        assert_eq!(lengths, vec![(b'a', 1), (b'b', 2), (b'c', 3), (b'd', 3)]);
    }
}
