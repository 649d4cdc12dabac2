//! The fixed symbol space shared by the analyzer, the code table and the codec.
//!
//! Symbols are single bytes drawn from `0..size`. The default is the 128-entry
//! 7-bit ASCII alphabet; any size in `2..=256` is accepted.

use crate::error::{Error, HuffmanError, Result};

/// Default alphabet size (7-bit ASCII)
pub const ASCII_SIZE: usize = 128;

/// Largest alphabet a one-byte symbol can address
pub const MAX_SIZE: usize = 256;

/// A contiguous symbol range `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet {
    size: usize,
}

impl Alphabet {
    /// Create an alphabet of `size` symbols.
    ///
    /// # Errors
    /// Returns `Error::Config` unless `2 <= size <= 256`.
    pub fn new(size: usize) -> Result<Self> {
        if !(2..=MAX_SIZE).contains(&size) {
            return Err(Error::Config(format!(
                "alphabet size must be between 2 and {MAX_SIZE}, got {size}"
            )));
        }
        Ok(Self { size })
    }

    /// The 128-symbol ASCII alphabet.
    pub const fn ascii() -> Self {
        Self { size: ASCII_SIZE }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, symbol: u8) -> bool {
        (symbol as usize) < self.size
    }

    /// Reject symbols outside the alphabet.
    pub fn check(&self, symbol: u8) -> Result<()> {
        if self.contains(symbol) {
            Ok(())
        } else {
            Err(HuffmanError::SymbolOutOfRange {
                symbol,
                alphabet_size: self.size,
            }
            .into())
        }
    }

    /// The symbol after `symbol`, wrapping from the top of the range to 0.
    pub fn successor(&self, symbol: u8) -> u8 {
        ((symbol as usize + 1) % self.size) as u8
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::ascii()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_bounds() {
        assert!(Alphabet::new(1).is_err());
        assert!(Alphabet::new(257).is_err());
        assert_eq!(Alphabet::new(2).unwrap().size(), 2);
        assert_eq!(Alphabet::new(256).unwrap().size(), 256);
    }

    #[test]
    fn test_successor_wraps() {
        let ascii = Alphabet::ascii();
        assert_eq!(ascii.successor(b'a'), b'b');
        assert_eq!(ascii.successor(127), 0);

        let full = Alphabet::new(256).unwrap();
        assert_eq!(full.successor(255), 0);
    }

    #[test]
    fn test_check() {
        let ascii = Alphabet::ascii();
        assert!(ascii.check(127).is_ok());
        assert!(matches!(
            ascii.check(200),
            Err(Error::Huffman(HuffmanError::SymbolOutOfRange { symbol: 200, alphabet_size: 128 }))
        ));
    }
}
