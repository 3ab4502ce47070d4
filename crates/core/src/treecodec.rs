//! Serialized tree token stream.
//!
//! The tree travels inside the artifact as a preorder token stream:
//!
//! ```text
//! branch := 0x00 <left> <right>
//! leaf   := 0x01 <symbol byte>
//! empty  := 0x02             (whole stream; zero-length input only)
//! ```
//!
//! The stream is self-delimiting: each marker determines how many more
//! tokens follow, so no length prefix is needed and the decoder knows
//! exactly where the stream ends. The symbol byte after a leaf marker is
//! raw and unrestricted; only marker positions are compared against the
//! marker alphabet, which keeps the artifact delimiter (0xFF) provably
//! disjoint from anything the tree stream can put in a marker position.
//!
//! Decoding guards its recursion depth: a 256-symbol alphabet bounds real
//! trees at depth 255, so anything deeper is corrupt by construction.

use crate::error::{Result, TreeError};
use crate::tree::{HuffmanTree, Node};

/// Marker for an interior node, followed by its two subtrees.
pub const MARKER_BRANCH: u8 = 0x00;
/// Marker for a leaf, followed by one raw symbol byte.
pub const MARKER_LEAF: u8 = 0x01;
/// Marker for the empty tree (zero-length input).
pub const MARKER_EMPTY: u8 = 0x02;

/// Maximum nesting the decoder accepts.
pub const MAX_DEPTH: usize = 256;

/// Append the preorder token stream for `tree` to `out`.
///
/// `None` stands for the empty tree and emits the single empty marker.
pub fn encode_tree(tree: Option<&HuffmanTree>, out: &mut Vec<u8>) {
    match tree {
        Some(tree) => encode_node(tree.root(), out),
        None => out.push(MARKER_EMPTY),
    }
}

fn encode_node(node: &Node, out: &mut Vec<u8>) {
    match node {
        Node::Leaf { symbol } => {
            out.push(MARKER_LEAF);
            out.push(*symbol);
        }
        Node::Branch { left, right } => {
            out.push(MARKER_BRANCH);
            encode_node(left, out);
            encode_node(right, out);
        }
    }
}

/// Decode a token stream from the start of `bytes`.
///
/// Returns the tree (`None` for the empty marker) and the number of bytes
/// the stream occupied, so the caller can continue parsing after it.
///
/// The root of a non-empty stream must be a branch: a leaf at the root
/// would assign its symbol the zero-bit code, and no encoder emits such a
/// tree (single-symbol inputs are wrapped in a synthetic branch).
///
/// # Errors
/// - `TreeError::Truncated` if the stream ends mid-tree
/// - `TreeError::InvalidMarker` for an unknown marker byte
/// - `TreeError::TooDeep` past [`MAX_DEPTH`] levels of nesting
/// - `TreeError::LeafRoot` if the stream roots the tree at a leaf
pub fn decode_tree(bytes: &[u8]) -> Result<(Option<HuffmanTree>, usize)> {
    match bytes.first() {
        None => Err(TreeError::Truncated.into()),
        Some(&MARKER_EMPTY) => Ok((None, 1)),
        Some(_) => {
            let mut offset = 0;
            let root = decode_node(bytes, &mut offset, 0)?;
            if root.is_leaf() {
                return Err(TreeError::LeafRoot.into());
            }
            Ok((Some(HuffmanTree::from_root(root)), offset))
        }
    }
}

fn decode_node(bytes: &[u8], offset: &mut usize, depth: usize) -> Result<Node> {
    if depth > MAX_DEPTH {
        return Err(TreeError::TooDeep {
            depth,
            max: MAX_DEPTH,
        }
        .into());
    }
    let marker = *bytes.get(*offset).ok_or(TreeError::Truncated)?;
    *offset += 1;
    match marker {
        MARKER_LEAF => {
            let symbol = *bytes.get(*offset).ok_or(TreeError::Truncated)?;
            *offset += 1;
            Ok(Node::Leaf { symbol })
        }
        MARKER_BRANCH => {
            let left = decode_node(bytes, offset, depth + 1)?;
            let right = decode_node(bytes, offset, depth + 1)?;
            Ok(Node::Branch {
                left: Box::new(left),
                right: Box::new(right),
            })
        }
        other => Err(TreeError::InvalidMarker {
            marker: other,
            offset: *offset - 1,
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::freq::FrequencyTable;

    fn tree_for(input: &[u8]) -> HuffmanTree {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(input))
            .expect("non-empty input")
    }

    #[test]
    fn test_round_trip_preserves_shape() {
        let tree = tree_for(b"aaaaabbcd");
        let mut stream = Vec::new();
        encode_tree(Some(&tree), &mut stream);

        let (decoded, consumed) = decode_tree(&stream).unwrap();
        assert_eq!(consumed, stream.len());
        assert_eq!(decoded.unwrap(), tree);
    }

    #[test]
    fn test_consumed_stops_at_stream_end() {
        let tree = tree_for(b"ab");
        let mut stream = Vec::new();
        encode_tree(Some(&tree), &mut stream);
        let tree_len = stream.len();

        // Trailing bytes after the stream must not be consumed.
        stream.extend_from_slice(&[0xFF, 0xAB, 0xCD]);
        let (_, consumed) = decode_tree(&stream).unwrap();
        assert_eq!(consumed, tree_len);
    }

    #[test]
    fn test_leaf_symbols_may_collide_with_markers() {
        // Symbols 0x00, 0x01, 0x02 are raw bytes after a leaf marker and
        // must never be mistaken for markers.
        let input = [0x00, 0x00, 0x01, 0x02, 0x02, 0x02];
        let tree = tree_for(&input);
        let mut stream = Vec::new();
        encode_tree(Some(&tree), &mut stream);

        let (decoded, _) = decode_tree(&stream).unwrap();
        assert_eq!(decoded.unwrap(), tree);
    }

    #[test]
    fn test_empty_marker() {
        let mut stream = Vec::new();
        encode_tree(None, &mut stream);
        assert_eq!(stream, vec![MARKER_EMPTY]);

        let (tree, consumed) = decode_tree(&stream).unwrap();
        assert!(tree.is_none());
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_truncated_stream_rejected() {
        let tree = tree_for(b"hello world");
        let mut stream = Vec::new();
        encode_tree(Some(&tree), &mut stream);

        for cut in 0..stream.len() {
            let result = decode_tree(&stream[..cut]);
            match cut {
                0 => assert!(matches!(result, Err(Error::Tree(TreeError::Truncated)))),
                _ => assert!(result.is_err(), "truncation at {cut} must fail"),
            }
        }
    }

    #[test]
    fn test_invalid_marker_rejected() {
        let stream = [MARKER_BRANCH, 0x7F, b'x'];
        let result = decode_tree(&stream);
        assert!(matches!(
            result,
            Err(Error::Tree(TreeError::InvalidMarker {
                marker: 0x7F,
                offset: 1
            }))
        ));
    }

    #[test]
    fn test_leaf_root_rejected() {
        // `0x01 <sym>` alone is a well-formed token pair but an invalid
        // tree: its symbol would get a zero-bit code.
        let stream = [MARKER_LEAF, b'a'];
        assert!(matches!(
            decode_tree(&stream),
            Err(Error::Tree(TreeError::LeafRoot))
        ));
    }

    #[test]
    fn test_depth_guard() {
        // A stream of nothing but branch markers nests past any real tree.
        let stream = vec![MARKER_BRANCH; MAX_DEPTH + 8];
        let result = decode_tree(&stream);
        assert!(matches!(result, Err(Error::Tree(TreeError::TooDeep { .. }))));
    }
}
