//! Code table: one optional bit string per alphabet symbol.
//!
//! Codes are read off the tree: `0` for every left branch, `1` for every right
//! branch, from the root down to the symbol's leaf. The root is always
//! internal, so every code has at least one bit. Codes are prefix-free by
//! construction since only leaves receive one.

use crate::alphabet::Alphabet;
use crate::bitio::BitBuffer;
use crate::error::{HuffmanError, Result};
use crate::frequency::display_symbol;
use crate::tree::{HuffmanTree, TreeNode};
use log::debug;

/// Symbol-indexed codes for one tree. Symbols absent from the tree have no code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Vec<Option<BitBuffer>>,
}

impl CodeTable {
    /// Walk `tree` and assign a code to every leaf.
    ///
    /// # Errors
    /// Returns `HuffmanError::SymbolOutOfRange` if a leaf symbol does not fit
    /// in `alphabet`.
    pub fn build(tree: &HuffmanTree, alphabet: Alphabet) -> Result<Self> {
        let mut codes: Vec<Option<BitBuffer>> = vec![None; alphabet.size()];

        let (left, right) = tree.branches();
        let mut stack: Vec<(&TreeNode, BitBuffer)> = vec![
            (right, BitBuffer::from_iter([true])),
            (left, BitBuffer::from_iter([false])),
        ];

        while let Some((node, prefix)) = stack.pop() {
            match node {
                TreeNode::Leaf { symbol, .. } => {
                    alphabet.check(*symbol)?;
                    codes[*symbol as usize] = Some(prefix);
                }
                TreeNode::Internal { left, right, .. } => {
                    let mut right_code = prefix.clone();
                    right_code.push(true);
                    let mut left_code = prefix;
                    left_code.push(false);
                    stack.push((right.as_ref(), right_code));
                    stack.push((left.as_ref(), left_code));
                }
            }
        }

        let table = Self { codes };
        debug!("assigned {} codes", table.assigned().count());
        Ok(table)
    }

    /// The code for `symbol`, if it has one.
    pub fn get(&self, symbol: u8) -> Option<&BitBuffer> {
        self.codes.get(symbol as usize).and_then(Option::as_ref)
    }

    /// Number of entries (the alphabet size).
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Symbols with a code, in ascending symbol order.
    pub fn assigned(&self) -> impl Iterator<Item = (u8, &BitBuffer)> {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|c| (symbol as u8, c)))
    }

    /// Concatenate the codes of `symbols` in input order.
    ///
    /// # Errors
    /// Returns `HuffmanError::UnknownSymbol` for a symbol without a code.
    pub fn encode_symbols(&self, symbols: &[u8]) -> Result<BitBuffer> {
        let mut bits = BitBuffer::new();
        for &symbol in symbols {
            let code = self
                .get(symbol)
                .ok_or(HuffmanError::UnknownSymbol { symbol })?;
            bits.extend_from(code);
        }
        Ok(bits)
    }

    /// One `symbol: code` line per assigned symbol.
    pub fn render(&self) -> String {
        self.assigned()
            .map(|(symbol, code)| format!("{}: {}\n", display_symbol(symbol), code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frequency::analyze_bytes;

    fn table_for(text: &[u8]) -> CodeTable {
        let list = analyze_bytes(text, Alphabet::ascii()).unwrap();
        let tree = HuffmanTree::build(&list).unwrap();
        CodeTable::build(&tree, Alphabet::ascii()).unwrap()
    }

    fn code(table: &CodeTable, symbol: u8) -> String {
        table.get(symbol).unwrap().to_string()
    }

    #[test]
    fn test_three_symbol_codes() {
        let table = table_for(b"aaabbbbcc");
        assert_eq!(code(&table, b'b'), "0");
        assert_eq!(code(&table, b'c'), "10");
        assert_eq!(code(&table, b'a'), "11");
        assert_eq!(table.len(), 128);
        assert_eq!(table.assigned().count(), 3);
        assert!(table.get(b'z').is_none());
    }

    #[test]
    fn test_single_symbol_code_length() {
        let table = table_for(b"aaaa");
        assert_eq!(code(&table, b'a'), "1");
        assert_eq!(code(&table, b'b'), "0");
    }

    #[test]
    fn test_two_symbols() {
        let table = table_for(b"ab");
        assert_eq!(code(&table, b'a'), "0");
        assert_eq!(code(&table, b'b'), "1");
    }

    #[test]
    fn test_prefix_free() {
        let table = table_for(b"it was the best of times, it was the worst of times");
        let codes: Vec<&BitBuffer> = table.assigned().map(|(_, c)| c).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!a.is_prefix_of(b), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn test_encode_symbols() {
        let table = table_for(b"aaabbbbcc");
        let bits = table.encode_symbols(b"abc").unwrap();
        assert_eq!(bits.to_string(), "11010");
    }

    #[test]
    fn test_unknown_symbol() {
        let table = table_for(b"abc");
        assert!(matches!(
            table.encode_symbols(b"abz"),
            Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'z' }))
        ));
    }

    #[test]
    fn test_leaf_outside_alphabet() {
        let list = analyze_bytes(b"xyz", Alphabet::ascii()).unwrap();
        let tree = HuffmanTree::build(&list).unwrap();
        let small = Alphabet::new(16).unwrap();
        assert!(matches!(
            CodeTable::build(&tree, small),
            Err(Error::Huffman(HuffmanError::SymbolOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_render() {
        assert_eq!(table_for(b"ab").render(), "'a': 0\n'b': 1\n");
    }
}
