//! Tree-walking decoder.
//!
//! A cursor starts at the root and follows one branch per bit: left on 0,
//! right on 1. Landing on a leaf emits its symbol and resets the cursor to
//! the root's branches. A well-formed payload ends exactly on a leaf.

use crate::bitio::{unpack, BitBuffer};
use crate::error::{BitIoError, MalformedStreamError, Result};
use crate::tree::{HuffmanTree, TreeNode};
use log::debug;

/// Decode a payload bit sequence against `tree`.
///
/// # Errors
/// - `BitIoError::InvalidBit` if an element is not 0 or 1
/// - `MalformedStreamError::Truncated` if the bits run out between the root
///   and a leaf
pub fn decode_bits(bits: &BitBuffer, tree: &HuffmanTree) -> Result<Vec<u8>> {
    let root = tree.branches();
    let mut output = Vec::new();
    let mut branches = root;
    let mut walked = 0usize;

    for (position, bit) in bits.iter().enumerate() {
        let next = match bit {
            0 => branches.0,
            1 => branches.1,
            value => return Err(BitIoError::InvalidBit { position, value }.into()),
        };
        walked += 1;

        match next {
            TreeNode::Leaf { symbol, .. } => {
                output.push(*symbol);
                branches = root;
                walked = 0;
            }
            TreeNode::Internal { left, right, .. } => {
                branches = (left.as_ref(), right.as_ref());
            }
        }
    }

    if walked > 0 {
        return Err(MalformedStreamError::Truncated {
            trailing_bits: walked,
        }
        .into());
    }

    debug!("decoded {} bits into {} symbols", bits.len(), output.len());
    Ok(output)
}

/// Unpack encoded bytes and decode them against `tree`.
pub fn decode(bytes: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>> {
    let bits = unpack(bytes)?;
    decode_bits(&bits, tree)
}
