//! Error types for the huffcode system.
//!
//! All operations return structured errors rather than panicking.
//! Nothing is retried: every operation is local and deterministic, so a
//! retry would only reproduce the same failure.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a specific failure domain:
/// - Empty input: nothing to analyze
/// - Bit I/O: a bit sequence holds something other than 0 or 1
/// - Malformed stream: the encoded bytes cannot be decoded completely
/// - Huffman: symbol/alphabet mismatches while building or using a code
/// - I/O: reading the input or writing the output failed
#[derive(Debug, Error)]
pub enum Error {
    /// The input source yielded no symbols before frequency analysis
    #[error("empty input: no symbols to analyze")]
    EmptyInput,

    /// Bit I/O operation failed (e.g., a value other than 0 or 1)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// The encoded stream is corrupt or truncated
    #[error("malformed stream: {0}")]
    MalformedStream(#[from] MalformedStreamError),

    /// Huffman codec error (e.g., symbol outside the alphabet)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// File I/O error. A failed write may leave a partial output file behind.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Bit-level I/O errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitIoError {
    /// An element of a bit sequence is neither 0 nor 1
    #[error("invalid bit value {value} at position {position}")]
    InvalidBit { position: usize, value: u8 },

    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (more than 64 bits in one call)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Encoded stream errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedStreamError {
    /// Zero bytes: even an empty payload carries one padding byte
    #[error("encoded stream is empty")]
    Empty,

    /// The first byte has no sentinel one-bit ending the padding
    #[error("no padding sentinel in first byte {first_byte:#010b}")]
    MissingSentinel { first_byte: u8 },

    /// Bits ran out while the decoder was between the root and a leaf
    #[error("payload truncated: {trailing_bits} bits left without reaching a leaf")]
    Truncated { trailing_bits: usize },
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// A symbol lies outside the configured alphabet
    #[error("symbol {symbol} outside alphabet of size {alphabet_size}")]
    SymbolOutOfRange { symbol: u8, alphabet_size: usize },

    /// A symbol has no code in the table (it never occurred in the analyzed text)
    #[error("symbol {symbol} has no code in the encoding table")]
    UnknownSymbol { symbol: u8 },

    /// A frequency list that violates the sorted-list invariants
    #[error("invalid frequency list: {0}")]
    InvalidFrequencyList(&'static str),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err: Error = BitIoError::InvalidBit { position: 3, value: 7 }.into();
        assert_eq!(err.to_string(), "bit I/O error: invalid bit value 7 at position 3");

        let err: Error = MalformedStreamError::MissingSentinel { first_byte: 0 }.into();
        assert_eq!(
            err.to_string(),
            "malformed stream: no padding sentinel in first byte 0b00000000"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
