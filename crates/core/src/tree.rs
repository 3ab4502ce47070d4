//! Huffman tree construction.
//!
//! Builds a prefix-code tree from a frequency table with the classic greedy
//! algorithm: a min-priority queue ordered by weight, repeatedly merging the
//! two lightest nodes until one root remains.
//!
//! # Tie-break rule
//!
//! Equal weights are ordered by a monotonically increasing sequence number:
//! leaves enter the queue in ascending symbol order and are numbered as they
//! are inserted, and every merged branch takes the next number. The queue is
//! therefore FIFO among equal weights, which pins down exactly one of the
//! many equally optimal trees and makes repeated runs (and the serialized
//! tree) reproducible.
//!
//! # Single-symbol inputs
//!
//! With one distinct symbol the merge loop never runs and the sole leaf
//! would sit at the root with an empty code, which cannot be encoded or
//! decoded. Construction wraps that leaf in a synthetic branch whose right
//! child duplicates the same symbol, so the symbol gets the one-bit code
//! "0".

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::freq::FrequencyTable;

/// A node of the prefix-code tree.
///
/// Weight is a construction-time attribute only; the finished tree carries
/// just its shape and leaf symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Terminal node owning one symbol
    Leaf { symbol: u8 },
    /// Interior node owning exactly two children
    Branch { left: Box<Node>, right: Box<Node> },
}

impl Node {
    /// True for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    /// Number of leaves beneath (and including) this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Branch { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }
}

/// An immutable Huffman tree rooted at a branch node.
///
/// Every tree produced by [`HuffmanTree::from_frequencies`] has a branch at
/// the root, so every leaf sits at depth >= 1 and every code has at least
/// one bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: Node,
}

/// Queue entry during construction. Ordered by (weight, seq) so that equal
/// weights resolve in insertion order.
struct QueueEntry {
    weight: u64,
    seq: u64,
    node: Node,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

impl HuffmanTree {
    /// Build the tree for a non-empty frequency table.
    ///
    /// Returns `None` for an empty table; the caller handles zero-length
    /// input as its own artifact shape rather than as a degenerate tree.
    pub fn from_frequencies(freqs: &FrequencyTable) -> Option<Self> {
        if freqs.is_empty() {
            return None;
        }

        let mut seq = 0u64;
        let mut queue: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();
        for (symbol, weight) in freqs.iter() {
            queue.push(Reverse(QueueEntry {
                weight,
                seq,
                node: Node::Leaf { symbol },
            }));
            seq += 1;
        }

        if queue.len() == 1 {
            // Sole symbol: wrap in a synthetic branch so its code is "0",
            // never the empty string.
            let Reverse(entry) = queue.pop().expect("queue has one entry");
            let symbol = match entry.node {
                Node::Leaf { symbol } => symbol,
                Node::Branch { .. } => unreachable!("only leaves were inserted"),
            };
            return Some(Self {
                root: Node::Branch {
                    left: Box::new(Node::Leaf { symbol }),
                    right: Box::new(Node::Leaf { symbol }),
                },
            });
        }

        while queue.len() > 1 {
            // First extracted becomes the left child.
            let Reverse(a) = queue.pop().expect("len > 1");
            let Reverse(b) = queue.pop().expect("len > 1");
            queue.push(Reverse(QueueEntry {
                weight: a.weight + b.weight,
                seq,
                node: Node::Branch {
                    left: Box::new(a.node),
                    right: Box::new(b.node),
                },
            }));
            seq += 1;
        }

        let Reverse(root_entry) = queue.pop().expect("one node remains");
        Some(Self {
            root: root_entry.node,
        })
    }

    /// Assemble a tree from an already-validated root.
    ///
    /// Used by tree deserialization; construction from frequencies is the
    /// normal path.
    pub(crate) fn from_root(root: Node) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }
}
