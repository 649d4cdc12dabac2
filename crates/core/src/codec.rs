//! Encode and decode capabilities.
//!
//! [`HuffmanCodec`] owns everything derived from one text: its frequency list,
//! tree and code table. They are built once and dropped with the codec.
//!
//! The encoded bytes carry no tree. A decoder needs the same tree, which it
//! can rebuild from the same text statistics: tree construction is
//! deterministic, so analyzing the same text yields an identical tree.
//!
//! # Example
//! ```
//! use huffcode_core::{Alphabet, HuffmanCodec};
//!
//! let text = b"aaabbbbcc";
//! let codec = HuffmanCodec::from_bytes(text, Alphabet::ascii()).unwrap();
//! let encoded = codec.encode(text).unwrap();
//! assert_eq!(codec.decode(&encoded).unwrap(), text);
//! ```

use crate::alphabet::Alphabet;
use crate::bitio::pack;
use crate::decoder;
use crate::error::Result;
use crate::frequency::{analyze, SortedFrequencyList};
use crate::source::{read_all, read_bytes, write_bytes, ReaderSource, SliceSource, SymbolSource};
use crate::stats::CompressionStats;
use crate::table::CodeTable;
use crate::tree::HuffmanTree;
use log::{debug, info};
use std::path::Path;

/// Frequency list, tree and code table derived from one text.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    alphabet: Alphabet,
    frequencies: SortedFrequencyList,
    tree: HuffmanTree,
    table: CodeTable,
}

impl HuffmanCodec {
    /// Derive a codec from the symbol statistics of `source`.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if the source yields nothing
    /// - `HuffmanError::SymbolOutOfRange` for symbols outside `alphabet`
    /// - `Error::Io` if reading the source fails
    pub fn from_source<S: SymbolSource + ?Sized>(
        source: &mut S,
        alphabet: Alphabet,
    ) -> Result<Self> {
        Self::from_frequencies(analyze(source, alphabet)?, alphabet)
    }

    /// Derive a codec from an in-memory text.
    pub fn from_bytes(text: &[u8], alphabet: Alphabet) -> Result<Self> {
        Self::from_source(&mut SliceSource::new(text), alphabet)
    }

    /// Derive a codec from the text stored at `path`.
    pub fn from_path(path: &Path, alphabet: Alphabet) -> Result<Self> {
        Self::from_source(&mut ReaderSource::open(path)?, alphabet)
    }

    /// Build the tree and code table for an existing frequency list.
    pub fn from_frequencies(frequencies: SortedFrequencyList, alphabet: Alphabet) -> Result<Self> {
        let tree = HuffmanTree::build(&frequencies)?;
        let table = CodeTable::build(&tree, alphabet)?;
        Ok(Self {
            alphabet,
            frequencies,
            tree,
            table,
        })
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    pub fn frequencies(&self) -> &SortedFrequencyList {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    /// Encode `symbols` into padded bytes.
    ///
    /// # Errors
    /// Returns `HuffmanError::UnknownSymbol` for symbols this codec has no code for.
    pub fn encode(&self, symbols: &[u8]) -> Result<Vec<u8>> {
        let bits = self.table.encode_symbols(symbols)?;
        pack(bits.as_slice())
    }

    /// Encode `symbols` and report what it cost.
    pub fn encode_with_stats(&self, symbols: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let mut stats = CompressionStats::new();
        stats.record_code(&self.frequencies, &self.tree, &self.table);

        let bits = self.table.encode_symbols(symbols)?;
        let bytes = pack(bits.as_slice())?;
        stats.record_output(symbols.len(), bits.len());
        stats.complete();

        debug_assert_eq!(stats.encoded_bytes, bytes.len() as u64);
        Ok((bytes, stats))
    }

    /// Decode padded bytes produced by a codec with the same tree.
    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        decoder::decode(bytes, &self.tree)
    }

    /// Decode the file at `encoded` and write the text to `output`.
    ///
    /// Returns the number of symbols written.
    pub fn decode_file(&self, encoded: &Path, output: &Path) -> Result<usize> {
        let bytes = read_bytes(encoded)?;
        let text = self.decode(&bytes)?;
        write_bytes(output, &text)?;
        info!(
            "decoded {} bytes from {} into {} symbols at {}",
            bytes.len(),
            encoded.display(),
            text.len(),
            output.display()
        );
        Ok(text.len())
    }
}

/// Result of [`encode`]: the bytes plus the tree needed to decode them.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    pub tree: HuffmanTree,
}

/// Read all of `source`, derive its code and encode it.
pub fn encode<S: SymbolSource + ?Sized>(source: &mut S, alphabet: Alphabet) -> Result<Encoded> {
    let text = read_all(source)?;
    let codec = HuffmanCodec::from_bytes(&text, alphabet)?;
    let bytes = codec.encode(&text)?;
    debug!("encoded {} symbols into {} bytes", text.len(), bytes.len());
    Ok(Encoded {
        bytes,
        tree: codec.tree,
    })
}

/// Decode bytes with the tree they were encoded with.
pub fn decode(bytes: &[u8], tree: &HuffmanTree) -> Result<Vec<u8>> {
    decoder::decode(bytes, tree)
}

/// Encode the text file at `input` into `output`.
///
/// The input is read completely before anything is written. If writing fails
/// partway, `output` may be left partially written.
pub fn encode_file(
    input: &Path,
    output: &Path,
    alphabet: Alphabet,
) -> Result<(HuffmanCodec, CompressionStats)> {
    let text = read_bytes(input)?;
    let codec = HuffmanCodec::from_bytes(&text, alphabet)?;
    let (bytes, stats) = codec.encode_with_stats(&text)?;
    write_bytes(output, &bytes)?;
    info!(
        "encoded {} ({} symbols) into {} ({} bytes)",
        input.display(),
        text.len(),
        output.display(),
        bytes.len()
    );
    Ok((codec, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, HuffmanError};

    #[test]
    fn test_round_trip() {
        let text = b"hello world! this is a test.";
        let codec = HuffmanCodec::from_bytes(text, Alphabet::ascii()).unwrap();
        let encoded = codec.encode(text).unwrap();
        assert_eq!(codec.decode(&encoded).unwrap(), text);
    }

    #[test]
    fn test_free_functions() {
        let text = b"aaabbbbcc";
        let encoded = encode(&mut SliceSource::new(text), Alphabet::ascii()).unwrap();
        // b=0 (4 bits), c=10 (4 bits), a=11 (6 bits): 14 bits + 2 padding
        assert_eq!(encoded.bytes.len(), 2);
        assert_eq!(encoded.tree.leaf_count(), 3);
        assert_eq!(decode(&encoded.bytes, &encoded.tree).unwrap(), text);
    }

    #[test]
    fn test_encode_with_stats() {
        let text = b"aaabbbbcc";
        let codec = HuffmanCodec::from_bytes(text, Alphabet::ascii()).unwrap();
        let (bytes, stats) = codec.encode_with_stats(text).unwrap();

        assert_eq!(bytes.len(), 2);
        assert_eq!(stats.input_symbols, 9);
        assert_eq!(stats.distinct_symbols, 3);
        assert_eq!(stats.payload_bits, 14);
        assert_eq!(stats.padding_bits, 2);
        assert_eq!(stats.encoded_bytes, 2);
        assert!(stats.end_time.is_some());
    }

    #[test]
    fn test_empty_text() {
        assert!(matches!(
            HuffmanCodec::from_bytes(b"", Alphabet::ascii()),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_encode_foreign_text() {
        let codec = HuffmanCodec::from_bytes(b"abc", Alphabet::ascii()).unwrap();
        assert!(matches!(
            codec.encode(b"abcd"),
            Err(Error::Huffman(HuffmanError::UnknownSymbol { symbol: b'd' }))
        ));
    }

    #[test]
    fn test_file_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.txt");
        let encoded = dir.path().join("encoded.bin");
        let decoded = dir.path().join("decoded.txt");

        let text = b"She sells sea shells by the sea shore.\n";
        std::fs::write(&input, text).unwrap();

        let (codec, stats) = encode_file(&input, &encoded, Alphabet::ascii()).unwrap();
        assert_eq!(std::fs::metadata(&encoded).unwrap().len(), stats.encoded_bytes);

        // rebuild the tree independently from the same text
        let rebuilt = HuffmanCodec::from_path(&input, Alphabet::ascii()).unwrap();
        assert_eq!(rebuilt.tree(), codec.tree());

        let written = rebuilt.decode_file(&encoded, &decoded).unwrap();
        assert_eq!(written, text.len());
        assert_eq!(std::fs::read(&decoded).unwrap(), text);
    }

    #[test]
    fn test_missing_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_file(
            &dir.path().join("absent.txt"),
            &dir.path().join("out.bin"),
            Alphabet::ascii(),
        );
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
