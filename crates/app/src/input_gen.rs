//! Sample text generation.
//!
//! When no input file is specified, we generate a sample text with uneven
//! symbol frequencies so the code lengths differ visibly.
//!
//! # Design
//!
//! Generated text mixes:
//! - runs of a single symbol (very skewed frequencies)
//! - text-like sections drawn from a small letter set
//! - short repeating patterns
//! - uniformly random symbols from the whole alphabet
//!
//! Every generated symbol lies inside the configured alphabet.

use huffcode_core::Alphabet;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Letters used for text-like sections, most frequent first.
const TEXT_SYMBOLS: &[u8] = b"etaoin shrdlu.\n";

/// Generate a sample text of exactly `size_bytes` symbols from `alphabet`.
pub fn generate_sample_text(seed: u64, size_bytes: usize, alphabet: Alphabet) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);
    let top = alphabet.size();

    // Text-like letters that fit in the alphabet, or the low symbols if none do
    let letters: Vec<u8> = TEXT_SYMBOLS
        .iter()
        .copied()
        .filter(|&b| alphabet.contains(b))
        .collect();
    let letters = if letters.is_empty() {
        (0..top.min(16)).map(|s| s as u8).collect()
    } else {
        letters
    };

    while data.len() < size_bytes {
        let chunk_size = (size_bytes - data.len()).min(rng.gen_range(64..=4096));

        match rng.gen_range(0..10u8) {
            // 20% runs of one symbol
            0..=1 => {
                let symbol = rng.gen_range(0..top) as u8;
                data.extend(std::iter::repeat(symbol).take(chunk_size));
            }

            // 50% text-like, skewed toward the front of the letter set
            2..=6 => {
                for _ in 0..chunk_size {
                    let a = rng.gen_range(0..letters.len());
                    let b = rng.gen_range(0..letters.len());
                    data.push(letters[a.min(b)]);
                }
            }

            // 20% repeating patterns
            7..=8 => {
                let pattern = generate_pattern(&mut rng, top);
                data.extend(pattern.iter().cycle().take(chunk_size));
            }

            // 10% uniform over the alphabet
            _ => {
                for _ in 0..chunk_size {
                    data.push(rng.gen_range(0..top) as u8);
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}

/// Generate a short pattern of in-alphabet symbols.
fn generate_pattern(rng: &mut ChaCha8Rng, top: usize) -> Vec<u8> {
    let pattern_len = rng.gen_range(2..=16);
    (0..pattern_len).map(|_| rng.gen_range(0..top) as u8).collect()
}
