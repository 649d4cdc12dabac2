//! Input and output capabilities consumed by the codec.
//!
//! The codec only needs three things from the outside world:
//! - the next character of the input ([`SymbolSource`])
//! - the raw bytes of an encoded file ([`read_bytes`])
//! - somewhere to write bytes ([`write_bytes`])
//!
//! File handles are opened inside each call and dropped before it returns,
//! whether it succeeds or fails. A write that fails midway can leave a partial
//! file on disk; it is not rolled back.

use crate::error::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A source of input symbols, consumed one at a time.
pub trait SymbolSource {
    /// Return the next symbol, or `None` once the input is exhausted.
    fn next_symbol(&mut self) -> Result<Option<u8>>;
}

/// Symbols from an in-memory byte slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }
}

impl SymbolSource for SliceSource<'_> {
    fn next_symbol(&mut self) -> Result<Option<u8>> {
        let symbol = self.data.get(self.position).copied();
        if symbol.is_some() {
            self.position += 1;
        }
        Ok(symbol)
    }
}

/// Symbols from any reader, one byte per symbol.
pub struct ReaderSource<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }
}

impl ReaderSource<File> {
    /// Open a text file as a symbol source.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> SymbolSource for ReaderSource<R> {
    fn next_symbol(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Drain a source into memory. Encoding needs two passes over the text, so the
/// whole input is materialized first.
pub fn read_all<S: SymbolSource + ?Sized>(source: &mut S) -> Result<Vec<u8>> {
    let mut symbols = Vec::new();
    while let Some(symbol) = source.next_symbol()? {
        symbols.push(symbol);
    }
    Ok(symbols)
}

/// Read the raw bytes of a file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Write bytes to a file, creating or truncating it.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
