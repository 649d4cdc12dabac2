//! Bit-level I/O and the padded wire format.
//!
//! [`BitBuffer`] holds a bit sequence independent of byte boundaries.
//! [`BitWriter`] and [`BitReader`] move bits in and out of bytes, MSB-first.
//! [`pack`] and [`unpack`] implement the encoded file layout.
//!
//! # Padding Rules
//!
//! ```text
//! +---------------------------+----------------------------------+
//! | padding: (p-1) zeros, 1   | payload: concatenated codes      |
//! +---------------------------+----------------------------------+
//!   p = 8 - (payload_bits % 8), so 1 <= p <= 8
//! ```
//!
//! The padding always exists: a payload that is already byte-aligned gets a
//! whole extra byte `00000001`. When reading, everything up to and including
//! the first one-bit of the first byte is discarded.
//!
//! # Example
//! ```
//! use huffcode_core::bitio::{pack, unpack, BitBuffer};
//!
//! let bits: BitBuffer = "10110".parse().unwrap();
//! let bytes = pack(bits.as_slice()).unwrap();
//! assert_eq!(bytes, vec![0b0011_0110]);
//! assert_eq!(unpack(&bytes).unwrap(), bits);
//! ```

use crate::error::{BitIoError, Error, MalformedStreamError, Result};
use log::trace;
use std::fmt;
use std::str::FromStr;

/// An ordered sequence of bits, one element per bit.
///
/// Elements are expected to be 0 or 1. Buffers built with [`BitBuffer::push`],
/// `FromStr` or `FromIterator<bool>` always are; [`BitBuffer::from_raw`] takes
/// values unchecked and leaves validation to [`pack`] and the decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    bits: Vec<u8>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self { bits: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Wrap raw bit values without checking them.
    pub fn from_raw(bits: Vec<u8>) -> Self {
        Self { bits }
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit as u8);
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitBuffer) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.bits.iter().copied()
    }

    /// True if `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitBuffer) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().map(|b| b as u8).collect(),
        }
    }
}

impl FromStr for BitBuffer {
    type Err = Error;

    /// Parse a string of `0` and `1` characters.
    fn from_str(s: &str) -> Result<Self> {
        s.bytes()
            .enumerate()
            .map(|(position, c)| match c {
                b'0' => Ok(false),
                b'1' => Ok(true),
                other => Err(Error::from(BitIoError::InvalidBit {
                    position,
                    value: other,
                })),
            })
            .collect()
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            match bit {
                0 => f.write_str("0")?,
                1 => f.write_str("1")?,
                other => write!(f, "<{other}>")?,
            }
        }
        Ok(())
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// Accumulates bits in a buffer and flushes complete bytes to the output.
/// When finished, pads the final partial byte with zeros.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer expecting roughly `bytes` bytes of output.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        if bit {
            self.bit_buffer |= 0x80 >> self.bit_count;
        }
        self.bit_count += 1;

        if self.bit_count == 8 {
            self.bytes.push(self.bit_buffer);
            self.bit_buffer = 0;
            self.bit_count = 0;
        }
    }

    /// Write the lowest `count` bits of `value`, MSB-first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        for shift in (0..count).rev() {
            self.write_bit((value >> shift) & 1 == 1);
        }
        Ok(())
    }

    /// Finish writing and return the output bytes, zero-filling a partial final byte.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
        }
        self.bytes
    }

    /// Return the total number of bits written (including partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `data.len() * 8`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_position: 0,
        }
    }

    /// Read a single bit.
    ///
    /// # Errors
    /// Returns `BitIoError::UnexpectedEof` once the data is exhausted.
    pub fn read_bit(&mut self) -> Result<bool> {
        let byte = *self
            .data
            .get(self.bit_position / 8)
            .ok_or(BitIoError::UnexpectedEof)?;
        let bit = (byte >> (7 - self.bit_position % 8)) & 1 == 1;
        self.bit_position += 1;
        Ok(bit)
    }

    /// Read up to 64 bits, MSB-first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        for _ in 0..count {
            result = (result << 1) | self.read_bit()? as u64;
        }
        Ok(result)
    }

    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.data.len() * 8
    }
}

/// Number of padding bits (zeros plus sentinel) placed before a payload of
/// `payload_bits` bits. Always in `1..=8`.
pub fn padding_for(payload_bits: usize) -> usize {
    8 - payload_bits % 8
}

/// Pack a bit sequence into sentinel-padded bytes.
///
/// # Errors
/// Returns `BitIoError::InvalidBit` if any element is not 0 or 1. Validation
/// runs before any output is produced.
pub fn pack(bits: &[u8]) -> Result<Vec<u8>> {
    if let Some((position, &value)) = bits.iter().enumerate().find(|(_, b)| **b > 1) {
        return Err(BitIoError::InvalidBit { position, value }.into());
    }

    let padding = padding_for(bits.len());
    let mut writer = BitWriter::with_capacity((bits.len() + padding) / 8);

    // (padding - 1) zeros followed by the sentinel
    writer.write_bits(1, padding)?;
    for &bit in bits {
        writer.write_bit(bit == 1);
    }

    debug_assert_eq!(writer.bit_len() % 8, 0);
    trace!("packed {} payload bits with {} padding bits", bits.len(), padding);
    Ok(writer.finish())
}

/// Unpack sentinel-padded bytes into the payload bit sequence.
///
/// # Errors
/// - `MalformedStreamError::Empty` for zero bytes
/// - `MalformedStreamError::MissingSentinel` if the first byte is all zeros
pub fn unpack(bytes: &[u8]) -> Result<BitBuffer> {
    let first_byte = *bytes.first().ok_or(MalformedStreamError::Empty)?;
    if first_byte == 0 {
        return Err(MalformedStreamError::MissingSentinel { first_byte }.into());
    }

    // Zeros plus the sentinel
    let padding = first_byte.leading_zeros() as usize + 1;
    let mut reader = BitReader::new(bytes);
    reader.read_bits(padding)?;

    let mut bits = BitBuffer::with_capacity(reader.bits_remaining());
    while !reader.is_empty() {
        bits.push(reader.read_bit()?);
    }

    trace!("unpacked {} payload bits after {} padding bits", bits.len(), padding);
    Ok(bits)
}
