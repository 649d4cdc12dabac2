//! huffcode-core: Huffman text compression
//!
//! This library derives a prefix-free code from the symbol frequencies of a
//! text, packs the coded text into sentinel-padded bytes and reverses the
//! process losslessly.
//!
//! # Architecture
//!
//! Leaf-first:
//! - `alphabet`: the fixed symbol range (default 7-bit ASCII)
//! - `source`: input/output capabilities (next symbol, file bytes)
//! - `frequency`: symbol counts normalized into a sorted frequency list
//! - `tree`: two-queue merge into a strict binary tree
//! - `table`: per-symbol codes read off the tree
//! - `bitio`: bit buffers, MSB-first bit I/O and the padded wire format
//! - `decoder`: bit-by-bit tree walk back to text
//! - `codec`: the encode/decode capabilities tying it together
//! - `stats`: observable compression statistics
//!
//! # Data Flow
//!
//! ```text
//! encode: text -> frequency -> tree -> table -> bits -> pack -> bytes
//! decode: bytes -> unpack -> bits -> decoder (same tree) -> text
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: All errors are structured and recoverable
//! - **Deterministic**: The same text always yields the same tree, so a
//!   decoder can rebuild it independently
//! - **No recursion**: Tree walks use explicit stacks, so deep trees from
//!   skewed distributions are safe

pub mod alphabet;
pub mod bitio;
pub mod codec;
pub mod decoder;
pub mod error;
pub mod frequency;
pub mod source;
pub mod stats;
pub mod table;
pub mod tree;

// Re-export commonly used types
pub use alphabet::Alphabet;
pub use bitio::BitBuffer;
pub use codec::{decode, encode, encode_file, Encoded, HuffmanCodec};
pub use error::{Error, Result};
pub use frequency::{SortedFrequencyList, SymbolFrequency};
pub use stats::CompressionStats;
pub use table::CodeTable;
pub use tree::{HuffmanTree, TreeNode};
