//! Symbol frequency analysis.
//!
//! Counts every symbol of the input, normalizes the counts into
//! probabilities and produces a [`SortedFrequencyList`]: ascending by
//! probability, ties broken by ascending symbol.
//!
//! # Single-symbol input
//!
//! A tree needs at least two leaves to give every symbol a non-empty code.
//! When only one distinct symbol occurs, the symbol following it in the
//! alphabet (wrapping to 0 at the top) is added with probability 0.

use crate::alphabet::Alphabet;
use crate::error::{Error, HuffmanError, Result};
use crate::source::{SliceSource, SymbolSource};
use log::debug;
use std::cmp::Ordering;

/// A symbol and its share of the input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolFrequency {
    pub symbol: u8,
    pub probability: f64,
}

impl SymbolFrequency {
    pub fn new(symbol: u8, probability: f64) -> Self {
        Self {
            symbol,
            probability,
        }
    }

    /// Sort order of the frequency list: probability, then symbol.
    fn sort_order(&self, other: &Self) -> Ordering {
        self.probability
            .total_cmp(&other.probability)
            .then(self.symbol.cmp(&other.symbol))
    }
}

/// Frequency records sorted ascending by probability, then by symbol.
///
/// # Invariants
/// - at least two records
/// - no symbol appears twice
/// - every probability lies in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct SortedFrequencyList {
    records: Vec<SymbolFrequency>,
}

impl SortedFrequencyList {
    /// Build a list from existing records, sorting them and checking the invariants.
    ///
    /// # Errors
    /// Returns `HuffmanError::InvalidFrequencyList` on fewer than two records,
    /// duplicate symbols or probabilities outside `[0, 1]`.
    pub fn from_records(mut records: Vec<SymbolFrequency>) -> Result<Self> {
        if records.len() < 2 {
            return Err(HuffmanError::InvalidFrequencyList("fewer than two records").into());
        }
        if records
            .iter()
            .any(|r| !(0.0..=1.0).contains(&r.probability))
        {
            return Err(HuffmanError::InvalidFrequencyList("probability outside [0, 1]").into());
        }

        let mut symbols: Vec<u8> = records.iter().map(|r| r.symbol).collect();
        symbols.sort_unstable();
        if symbols.windows(2).any(|w| w[0] == w[1]) {
            return Err(HuffmanError::InvalidFrequencyList("duplicate symbol").into());
        }

        records.sort_by(SymbolFrequency::sort_order);
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SymbolFrequency> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolFrequency> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[SymbolFrequency] {
        &self.records
    }

    /// Render as one `symbol probability` line per record.
    pub fn render(&self) -> String {
        self.records
            .iter()
            .map(|r| format!("{} {:.6}\n", display_symbol(r.symbol), r.probability))
            .collect()
    }
}

/// Running symbol counts for one input.
#[derive(Debug, Clone)]
pub struct FrequencyAnalyzer {
    alphabet: Alphabet,
    counts: Vec<u64>,
    total: u64,
}

impl FrequencyAnalyzer {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            counts: vec![0; alphabet.size()],
            total: 0,
        }
    }

    /// Count one occurrence of `symbol`.
    ///
    /// # Errors
    /// Returns `HuffmanError::SymbolOutOfRange` if the symbol is not in the alphabet.
    pub fn observe(&mut self, symbol: u8) -> Result<()> {
        self.alphabet.check(symbol)?;
        self.counts[symbol as usize] += 1;
        self.total += 1;
        Ok(())
    }

    /// Number of symbols observed so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct symbols observed so far.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Normalize the counts and produce the sorted list.
    ///
    /// # Errors
    /// Returns `Error::EmptyInput` if nothing was observed.
    pub fn finish(self) -> Result<SortedFrequencyList> {
        if self.total == 0 {
            return Err(Error::EmptyInput);
        }

        let total = self.total as f64;
        let mut records: Vec<SymbolFrequency> = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, &count)| SymbolFrequency::new(symbol as u8, count as f64 / total))
            .collect();

        if records.len() == 1 {
            let only = records[0];
            let synthetic = self.alphabet.successor(only.symbol);
            debug!(
                "single distinct symbol {}, adding synthetic {}",
                only.symbol, synthetic
            );
            records.push(SymbolFrequency::new(synthetic, 0.0));
        }

        records.sort_by(SymbolFrequency::sort_order);
        debug!(
            "analyzed {} symbols, {} frequency records",
            self.total,
            records.len()
        );

        Ok(SortedFrequencyList { records })
    }
}

/// Run a [`FrequencyAnalyzer`] over every symbol of `source`.
pub fn analyze<S: SymbolSource + ?Sized>(
    source: &mut S,
    alphabet: Alphabet,
) -> Result<SortedFrequencyList> {
    let mut analyzer = FrequencyAnalyzer::new(alphabet);
    while let Some(symbol) = source.next_symbol()? {
        analyzer.observe(symbol)?;
    }
    analyzer.finish()
}

/// Analyze an in-memory text.
pub fn analyze_bytes(text: &[u8], alphabet: Alphabet) -> Result<SortedFrequencyList> {
    analyze(&mut SliceSource::new(text), alphabet)
}

/// Printable form of a symbol for diagnostics.
pub(crate) fn display_symbol(symbol: u8) -> String {
    match symbol {
        b' ' => "' '".to_string(),
        0x21..=0x7E => format!("'{}'", symbol as char),
        _ => format!("{symbol:#04x}"),
    }
}
