//! Compression statistics for one encode.
//!
//! Collected by the codec while encoding and printed by the driver:
//! - sizes (symbols in, bytes out, payload and padding bits)
//! - code quality (average code length against the Shannon entropy)
//! - timing
//!
//! The struct is plain data, filled in single-threaded by the caller.

use crate::bitio::padding_for;
use crate::frequency::SortedFrequencyList;
use crate::table::CodeTable;
use crate::tree::HuffmanTree;
use std::time::{Duration, Instant};

/// Sizes, code quality and timing of one encode.
#[derive(Debug, Clone)]
pub struct CompressionStats {
    // === Timing ===
    /// When encoding started
    pub start_time: Instant,

    /// When encoding ended (set on completion)
    pub end_time: Option<Instant>,

    // === Input ===
    /// Symbols read from the input
    pub input_symbols: u64,

    /// Distinct symbols with a code (including a synthetic partner)
    pub distinct_symbols: usize,

    // === Output ===
    /// Bits of concatenated codes
    pub payload_bits: u64,

    /// Zero bits plus sentinel in front of the payload (1-8)
    pub padding_bits: u64,

    /// Bytes of encoded output
    pub encoded_bytes: u64,

    // === Code ===
    /// Longest code length
    pub tree_depth: usize,

    /// Shannon entropy of the input distribution, bits per symbol
    pub entropy_bits: f64,
}

impl CompressionStats {
    /// Create empty stats with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            input_symbols: 0,
            distinct_symbols: 0,
            payload_bits: 0,
            padding_bits: 0,
            encoded_bytes: 0,
            tree_depth: 0,
            entropy_bits: 0.0,
        }
    }

    /// Fill in everything known once the code table exists.
    pub fn record_code(
        &mut self,
        frequencies: &SortedFrequencyList,
        tree: &HuffmanTree,
        table: &CodeTable,
    ) {
        self.distinct_symbols = table.assigned().count();
        self.tree_depth = tree.depth();
        self.entropy_bits = frequencies
            .iter()
            .filter(|r| r.probability > 0.0)
            .map(|r| -r.probability * r.probability.log2())
            .sum();
    }

    /// Fill in the output sizes for a payload of `payload_bits` bits.
    pub fn record_output(&mut self, input_symbols: usize, payload_bits: usize) {
        let padding = padding_for(payload_bits);
        self.input_symbols = input_symbols as u64;
        self.payload_bits = payload_bits as u64;
        self.padding_bits = padding as u64;
        self.encoded_bytes = ((payload_bits + padding) / 8) as u64;
    }

    /// Mark encoding as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Encoded bytes per input byte. Returns 0.0 for empty input.
    pub fn compression_ratio(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.encoded_bytes as f64 / self.input_symbols as f64
        }
    }

    /// Payload bits per input symbol.
    pub fn average_code_length(&self) -> f64 {
        if self.input_symbols == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.input_symbols as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Compression Summary ===");
        println!("Duration: {} ms", self.duration().as_millis());
        println!();
        println!("Input:  {} symbols ({} distinct)", self.input_symbols, self.distinct_symbols);
        println!(
            "Output: {} bytes ({} payload bits + {} padding bits)",
            self.encoded_bytes, self.payload_bits, self.padding_bits
        );
        println!("Ratio: {:.1}%", self.compression_ratio() * 100.0);
        println!();
        println!("=== Code ===");
        println!("Longest code: {} bits", self.tree_depth);
        println!("Average code length: {:.3} bits/symbol", self.average_code_length());
        println!("Entropy: {:.3} bits/symbol", self.entropy_bits);
        println!();
    }

    /// Export stats as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_ms={}\n\
             input_symbols={}\n\
             distinct_symbols={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             encoded_bytes={}\n\
             compression_ratio={:.4}\n\
             average_code_length={:.4}\n\
             entropy_bits={:.4}\n",
            self.duration().as_millis(),
            self.input_symbols,
            self.distinct_symbols,
            self.payload_bits,
            self.padding_bits,
            self.encoded_bytes,
            self.compression_ratio(),
            self.average_code_length(),
            self.entropy_bits,
        )
    }
}

impl Default for CompressionStats {
    fn default() -> Self {
        Self::new()
    }
}
