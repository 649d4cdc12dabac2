//! Huffman tree construction with the two-queue merge.
//!
//! # Algorithm
//!
//! Leaves enter a `source` queue in sorted-list order; merged nodes are
//! appended to a `target` queue. Each step removes the two lightest fronts:
//!
//! - if one queue is empty, take from the other
//! - otherwise take from `source` when its front probability is `<=` the
//!   front of `target`, else from `target`
//!
//! The first node taken becomes the left child, the second the right child.
//! Within each queue nodes leave in arrival order, so the tie-break fully
//! determines the shape: the same sorted list always yields the same tree.
//! Decoding relies on this to rebuild the encoder's tree from the same
//! statistics.

use crate::error::{HuffmanError, Result};
use crate::frequency::{display_symbol, SortedFrequencyList};
use log::debug;
use std::collections::VecDeque;
use std::fmt::Write;

/// A node of a strict binary tree: leaves carry symbols, internal nodes have
/// exactly two children.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Leaf {
        symbol: u8,
        probability: f64,
    },
    Internal {
        probability: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(symbol: u8, probability: f64) -> Self {
        TreeNode::Leaf {
            symbol,
            probability,
        }
    }

    /// Merge two nodes under a new parent whose probability is their sum.
    pub fn merge(left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal {
            probability: left.probability() + right.probability(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn probability(&self) -> f64 {
        match self {
            TreeNode::Leaf { probability, .. } | TreeNode::Internal { probability, .. } => {
                *probability
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// The symbol of a leaf; `None` for internal nodes.
    pub fn symbol(&self) -> Option<u8> {
        match self {
            TreeNode::Leaf { symbol, .. } => Some(*symbol),
            TreeNode::Internal { .. } => None,
        }
    }

    /// The `(left, right)` children of an internal node; `None` for leaves.
    pub fn children(&self) -> Option<(&TreeNode, &TreeNode)> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { left, right, .. } => Some((left.as_ref(), right.as_ref())),
        }
    }
}

/// A Huffman tree built from a [`SortedFrequencyList`].
///
/// A sorted list always has at least two records, so the root is always
/// internal. It is stored as its two branches, which makes a leaf root
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct HuffmanTree {
    probability: f64,
    left: Box<TreeNode>,
    right: Box<TreeNode>,
}

impl HuffmanTree {
    /// Build the tree with the two-queue merge.
    ///
    /// # Errors
    /// Returns `HuffmanError::InvalidFrequencyList` if fewer than two nodes
    /// can be merged, which a [`SortedFrequencyList`] never allows.
    pub fn build(list: &SortedFrequencyList) -> Result<Self> {
        let mut source: VecDeque<TreeNode> = list
            .iter()
            .map(|r| TreeNode::leaf(r.symbol, r.probability))
            .collect();
        let mut target: VecDeque<TreeNode> = VecDeque::with_capacity(list.len());

        loop {
            let (Some(left), Some(right)) = (
                take_lightest(&mut source, &mut target),
                take_lightest(&mut source, &mut target),
            ) else {
                return Err(HuffmanError::InvalidFrequencyList("fewer than two records").into());
            };

            // The last merge is the root
            if source.is_empty() && target.is_empty() {
                let tree = Self {
                    probability: left.probability() + right.probability(),
                    left: Box::new(left),
                    right: Box::new(right),
                };
                debug!(
                    "built tree with {} leaves, depth {}",
                    tree.leaf_count(),
                    tree.depth()
                );
                return Ok(tree);
            }
            target.push_back(TreeNode::merge(left, right));
        }
    }

    /// Total probability under the root.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// The root's `(left, right)` branches.
    pub fn branches(&self) -> (&TreeNode, &TreeNode) {
        (self.left.as_ref(), self.right.as_ref())
    }

    /// Number of leaves (symbols) in the tree.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.right.as_ref(), 1usize), (self.left.as_ref(), 1)];
        while let Some((node, depth)) = stack.pop() {
            match node.children() {
                Some((left, right)) => {
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
                None => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Leaves as `(symbol, probability)`, left to right.
    pub fn leaves(&self) -> Vec<(u8, f64)> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.right.as_ref(), self.left.as_ref()];
        while let Some(node) = stack.pop() {
            match node {
                TreeNode::Leaf {
                    symbol,
                    probability,
                } => leaves.push((*symbol, *probability)),
                TreeNode::Internal { left, right, .. } => {
                    stack.push(right.as_ref());
                    stack.push(left.as_ref());
                }
            }
        }
        leaves
    }

    /// Indented dump of the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "root -> internal [p={:.6}]", self.probability);

        let mut stack = vec![(self.right.as_ref(), 1usize, "1"), (self.left.as_ref(), 1, "0")];
        while let Some((node, depth, label)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match node {
                TreeNode::Leaf {
                    symbol,
                    probability,
                } => {
                    let _ = writeln!(
                        out,
                        "{indent}{label} -> leaf {} [p={probability:.6}]",
                        display_symbol(*symbol)
                    );
                }
                TreeNode::Internal {
                    probability,
                    left,
                    right,
                } => {
                    let _ = writeln!(out, "{indent}{label} -> internal [p={probability:.6}]");
                    stack.push((right.as_ref(), depth + 1, "1"));
                    stack.push((left.as_ref(), depth + 1, "0"));
                }
            }
        }
        out
    }
}

/// Remove the lightest front node across both queues, preferring `source` on ties.
fn take_lightest(
    source: &mut VecDeque<TreeNode>,
    target: &mut VecDeque<TreeNode>,
) -> Option<TreeNode> {
    let from_source = match (source.front(), target.front()) {
        (Some(s), Some(t)) => s.probability() <= t.probability(),
        (Some(_), None) => true,
        (None, _) => false,
    };
    if from_source {
        source.pop_front()
    } else {
        target.pop_front()
    }
}
