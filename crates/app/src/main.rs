//! huffcode: compress a text file with Huffman coding, decode it back and
//! verify the round trip.
//!
//! Pipeline:
//! 1. Read the input text (or generate a seeded sample)
//! 2. Analyze frequencies, build the tree and code table
//! 3. Encode and write the padded bitstream
//! 4. Read the encoded bytes back, rebuild the tree from the same text
//!    statistics and decode
//! 5. Write the decoded text and compare it with the input

mod config;
mod input_gen;

use config::{Command, Config};
use huffcode_core::source::{read_bytes, write_bytes};
use huffcode_core::HuffmanCodec;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            config::print_help();
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("run with --help for usage");
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("run failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the pipeline. Returns whether the decoded text matched the input.
fn run(config: &Config) -> huffcode_core::Result<bool> {
    if config.print_config {
        config.print();
    }

    let text = match &config.input_file {
        Some(path) => read_bytes(path)?,
        None => {
            info!(
                "generating {} byte sample with seed {}",
                config.sample_bytes, config.seed
            );
            input_gen::generate_sample_text(config.seed, config.sample_bytes, config.alphabet)
        }
    };

    // Encode
    let encoder = HuffmanCodec::from_bytes(&text, config.alphabet)?;
    if config.print_frequencies {
        println!("=== Sorted Frequencies ===");
        print!("{}", encoder.frequencies().render());
        println!();
    }
    if config.print_tree {
        println!("=== Huffman Tree ===");
        print!("{}", encoder.tree().render());
        println!();
    }
    if config.print_codes {
        println!("=== Codes ===");
        print!("{}", encoder.table().render());
        println!();
    }

    let (encoded, stats) = encoder.encode_with_stats(&text)?;
    write_bytes(&config.encoded_file, &encoded)?;
    info!(
        "wrote {} encoded bytes to {}",
        encoded.len(),
        config.encoded_file.display()
    );

    // Decode with a tree rebuilt from the same statistics
    let decoder = HuffmanCodec::from_bytes(&text, config.alphabet)?;
    let written = decoder.decode_file(&config.encoded_file, &config.decoded_file)?;

    if config.print_stats {
        stats.print_summary();
    }

    let decoded = read_bytes(&config.decoded_file)?;
    let matched = decoded == text;
    if matched {
        println!(
            "✓ Round trip verified: {} symbols -> {} bytes -> {} symbols",
            text.len(),
            encoded.len(),
            written
        );
    } else {
        println!(
            "✗ Round trip mismatch: input {} symbols, decoded {}",
            text.len(),
            decoded.len()
        );
    }
    Ok(matched)
}
