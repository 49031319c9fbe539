//! Integration tests for the file driver: document -> report -> tokens.

use std::fs;
use token_huffman::{
    decompress_file, split_blocks, tokenize, DocumentCompressor, DriverConfig, Error,
};

const DOCUMENT: &str = "\
It was the best of times, it was the worst of times.
It was the age of wisdom; it was the age of foolishness!

Cat cat CAT.

   \t

the end";

#[test]
fn test_compress_then_decompress_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.dat");
    let output = dir.path().join("nested").join("output.dat");
    fs::write(&input, DOCUMENT).unwrap();

    let config = DriverConfig::default()
        .with_input(&input)
        .with_output(&output);
    let summary = DocumentCompressor::new(config).compress_file().unwrap();

    let blocks = split_blocks(DOCUMENT);
    assert_eq!(summary.blocks, blocks.len());
    assert_eq!(
        summary.tokens,
        blocks.iter().map(|b| tokenize(b).len()).sum::<usize>()
    );

    let decoded = decompress_file(&output).unwrap();
    let expected: Vec<Vec<String>> = blocks.into_iter().map(tokenize).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_report_contents() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.dat");
    let output = dir.path().join("output.dat");
    fs::write(&input, "cat cat cat\n\na a a b").unwrap();

    let config = DriverConfig::default()
        .with_input(&input)
        .with_output(&output);
    DocumentCompressor::new(config).compress_file().unwrap();

    let report = fs::read_to_string(&output).unwrap();
    assert!(report.starts_with("--- BLOCK ---\n[CODES]\ncat:0\n[ENCODED]\n000\n\n"));
    assert_eq!(report.matches("--- BLOCK ---").count(), 2);
}

#[test]
fn test_previous_report_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.dat");
    let output = dir.path().join("output.dat");
    fs::write(&input, "one two").unwrap();
    fs::write(&output, "stale contents that are much longer than the report").unwrap();

    let config = DriverConfig::default()
        .with_input(&input)
        .with_output(&output);
    DocumentCompressor::new(config).compress_file().unwrap();

    let report = fs::read_to_string(&output).unwrap();
    assert!(!report.contains("stale"));
    assert_eq!(decompress_file(&output).unwrap(), vec![vec!["one", "two"]]);
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = DriverConfig::default()
        .with_input(dir.path().join("absent.dat"))
        .with_output(dir.path().join("output.dat"));

    let err = DocumentCompressor::new(config).compress_file().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_corrupted_report_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.dat");
    fs::write(&path, "--- BLOCK ---\n[CODES]\na:0\nb:1\n[ENCODED]\n01x\n").unwrap();

    let err = decompress_file(&path).unwrap_err();
    assert!(matches!(err, Error::Huffman(_)));
}
