//! Configuration for the huffcode application.
//!
//! Handles parsing command-line arguments and generating sensible defaults.
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: without `--in` it generates a
//! sample text from a seed, and the seed is printed so runs are reproducible.

use huffcode_core::alphabet::{Alphabet, ASCII_SIZE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};

/// Complete configuration for one encode/decode run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Files ===
    /// Input text path (None = generate sample)
    pub input_file: Option<PathBuf>,

    /// Encoded output path
    pub encoded_file: PathBuf,

    /// Decoded output path
    pub decoded_file: PathBuf,

    // === Sample generation ===
    /// Seed for the generated sample
    pub seed: u64,

    /// Size of the generated sample in bytes
    pub sample_bytes: usize,

    // === Codec ===
    /// Symbol alphabet
    pub alphabet: Alphabet,

    // === Behavior ===
    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to print the sorted frequency list
    pub print_frequencies: bool,

    /// Whether to print the Huffman tree
    pub print_tree: bool,

    /// Whether to print the code table
    pub print_codes: bool,

    /// Whether to print the compression summary
    pub print_stats: bool,
}

/// What the command line asked for.
#[derive(Debug, Clone)]
pub enum Command {
    Run(Config),
    Help,
}

impl Config {
    /// Parse configuration from command-line arguments (program name excluded).
    ///
    /// If no seed is given, one is drawn from the clock; the sample size then
    /// defaults to a random size derived from that seed.
    pub fn from_args(args: &[String]) -> Result<Command, String> {
        let mut input_file: Option<PathBuf> = None;
        let mut encoded_file: Option<PathBuf> = None;
        let mut decoded_file: Option<PathBuf> = None;
        let mut seed: Option<u64> = None;
        let mut sample_bytes: Option<usize> = None;
        let mut alphabet_size: usize = ASCII_SIZE;
        let mut print_config = false;
        let mut print_frequencies = false;
        let mut print_tree = false;
        let mut print_codes = false;
        let mut print_stats = true;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--in" => {
                    input_file = Some(PathBuf::from(value_of(args, &mut i, "a path")?));
                }
                "--out" => {
                    encoded_file = Some(PathBuf::from(value_of(args, &mut i, "a path")?));
                }
                "--decoded" => {
                    decoded_file = Some(PathBuf::from(value_of(args, &mut i, "a path")?));
                }
                "--seed" => {
                    seed = Some(
                        value_of(args, &mut i, "a number")?
                            .parse()
                            .map_err(|_| "invalid seed")?,
                    );
                }
                "--sample-bytes" => {
                    sample_bytes = Some(
                        value_of(args, &mut i, "a number")?
                            .parse()
                            .map_err(|_| "invalid sample-bytes")?,
                    );
                }
                "--alphabet-size" => {
                    alphabet_size = value_of(args, &mut i, "a number")?
                        .parse()
                        .map_err(|_| "invalid alphabet-size")?;
                }
                "--print-config" => print_config = true,
                "--print-frequencies" => print_frequencies = true,
                "--print-tree" => print_tree = true,
                "--print-codes" => print_codes = true,
                "--no-stats" => print_stats = false,
                "--help" | "-h" => return Ok(Command::Help),
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
            i += 1;
        }

        let alphabet = Alphabet::new(alphabet_size).map_err(|e| e.to_string())?;

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        // Default outputs never land on a path already in use
        let encoded_file = encoded_file.unwrap_or_else(|| match &input_file {
            Some(path) => unused_path(path.with_extension("huff"), ".huff", &[path.as_path()]),
            None => PathBuf::from("./sample.huff"),
        });
        let decoded_file = decoded_file.unwrap_or_else(|| {
            let mut taken = vec![encoded_file.as_path()];
            taken.extend(input_file.as_deref());
            unused_path(encoded_file.with_extension("decoded.txt"), ".decoded.txt", &taken)
        });

        if input_file.as_ref() == Some(&encoded_file) {
            return Err(format!(
                "encoded file {} would overwrite the input",
                encoded_file.display()
            ));
        }
        if input_file.as_ref() == Some(&decoded_file) {
            return Err(format!(
                "decoded file {} would overwrite the input",
                decoded_file.display()
            ));
        }
        if encoded_file == decoded_file {
            return Err(format!(
                "encoded and decoded files are both {}",
                encoded_file.display()
            ));
        }

        Ok(Command::Run(Config {
            input_file,
            encoded_file,
            decoded_file,
            seed,
            sample_bytes: sample_bytes.unwrap_or_else(|| rng.gen_range(1024..=65536)),
            alphabet,
            print_config,
            print_frequencies,
            print_tree,
            print_codes,
            print_stats,
        }))
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        match &self.input_file {
            Some(path) => println!("Input file:   {}", path.display()),
            None => println!(
                "Input file:   (generate {} byte sample, seed {})",
                self.sample_bytes, self.seed
            ),
        }
        println!("Encoded file: {}", self.encoded_file.display());
        println!("Decoded file: {}", self.decoded_file.display());
        println!("Alphabet size: {}", self.alphabet.size());
        println!();
    }
}

/// Advance past a flag and return its value.
fn value_of<'a>(args: &'a [String], i: &mut usize, what: &str) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires {what}"))
}

/// Append `suffix` to `candidate` until it differs from every path in `taken`.
fn unused_path(candidate: PathBuf, suffix: &str, taken: &[&Path]) -> PathBuf {
    let mut path = candidate;
    while taken.contains(&path.as_path()) {
        let mut name = path.into_os_string();
        name.push(suffix);
        path = PathBuf::from(name);
    }
    path
}

pub fn print_help() {
    println!("huffcode: Huffman text compressor");
    println!();
    println!("USAGE:");
    println!("    huffcode [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --in <PATH>             Input text file (default: generate sample)");
    println!("    --out <PATH>            Encoded file (default: <input>.huff or ./sample.huff)");
    println!("    --decoded <PATH>        Decoded file (default: <encoded>.decoded.txt)");
    println!("                            Default paths never overwrite the input");
    println!("    --seed <N>              Seed for the generated sample");
    println!("    --sample-bytes <N>      Generated sample size (default: random 1024-65536)");
    println!("    --alphabet-size <N>     Symbol alphabet size, 2-256 (default: 128)");
    println!();
    println!("    --print-config          Print resolved configuration");
    println!("    --print-frequencies     Print the sorted frequency list");
    println!("    --print-tree            Print the Huffman tree");
    println!("    --print-codes           Print the code table");
    println!("    --no-stats              Don't print the compression summary");
    println!("    --help, -h              Print this help");
    println!();
    println!("Set RUST_LOG=debug for stage-by-stage logging.");
    println!();
    println!("EXAMPLES:");
    println!("    huffcode                                  # Compress a random sample");
    println!("    huffcode --seed 42                        # Deterministic sample");
    println!("    huffcode --in notes.txt --print-codes     # Compress a file, show codes");
    println!();
}
