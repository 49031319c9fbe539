use std::env;
use token_huffman::{decompress_file, DocumentCompressor, DriverConfig};

/// Compresses a document into a code/bit report, then decodes it again.
///
/// Usage: cargo run --example compress_document [input] [output]
fn main() {
    let args: Vec<String> = env::args().collect();

    let mut config = DriverConfig::default();
    if let Some(input) = args.get(1) {
        config = config.with_input(input);
    }
    if let Some(output) = args.get(2) {
        config = config.with_output(output);
    }

    let compressor = DocumentCompressor::new(config.clone());
    let summary = match compressor.compress_file() {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!(
                "Failed to compress \"{}\": {}",
                config.input_path.display(),
                err
            );
            std::process::exit(1);
        }
    };

    println!("=== Statistics ===");
    println!("Blocks: {}", summary.blocks);
    println!("Tokens: {}", summary.tokens);
    println!("Encoded bits: {}", summary.encoded_bits);
    println!("Report written to {}", config.output_path.display());

    // Verify by decoding the report
    match decompress_file(&config.output_path) {
        Ok(blocks) => {
            let tokens: usize = blocks.iter().map(Vec::len).sum();
            println!("Decoded {} blocks, {} tokens", blocks.len(), tokens);
            if tokens != summary.tokens {
                eprintln!("Token count mismatch: wrote {}, read {}", summary.tokens, tokens);
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("Failed to decode report: {}", err);
            std::process::exit(1);
        }
    }
}
