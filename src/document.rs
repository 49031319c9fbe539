//! Document driver: splits a document into blocks, encodes every block on
//! its own and writes or reads the report file.
//!
//! This is the only part of the crate that logs.

use crate::block::BlockAnalysis;
use crate::config::DriverConfig;
use crate::decoder::decode;
use crate::error::Result;
use crate::report::{parse_report, write_section};
use crate::tokenizer::Token;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// Two or more consecutive line breaks separate blocks.
static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\r?\n){2,}").unwrap());

/// Splits a document into blocks on blank lines, dropping empty blocks.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLOCK_SEPARATOR
        .split(text)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Totals over a processed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    /// Number of blocks written
    pub blocks: usize,
    /// Tokens across all blocks
    pub tokens: usize,
    /// Encoded bits across all blocks
    pub encoded_bits: usize,
}

impl DocumentSummary {
    fn from_analyses(analyses: &[BlockAnalysis]) -> Self {
        analyses.iter().fold(Self::default(), |mut summary, analysis| {
            summary.blocks += 1;
            summary.tokens += analysis.tokens().len();
            summary.encoded_bits += analysis.encoded().len();
            summary
        })
    }
}

/// Encodes documents block by block according to a [`DriverConfig`].
#[derive(Debug, Clone, Default)]
pub struct DocumentCompressor {
    config: DriverConfig,
}

impl DocumentCompressor {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Analyzes every block of `text` independently, in document order.
    pub fn process(&self, text: &str) -> Result<Vec<BlockAnalysis>> {
        split_blocks(text)
            .into_iter()
            .enumerate()
            .map(|(index, block)| -> Result<BlockAnalysis> {
                let analysis = BlockAnalysis::analyze(block)?;
                self.log_block(index, &analysis);
                Ok(analysis)
            })
            .collect()
    }

    fn log_block(&self, index: usize, analysis: &BlockAnalysis) {
        let stats = analysis.stats();
        info!(
            block = index,
            tokens = stats.token_count,
            distinct = stats.distinct_tokens,
            bits = stats.encoded_bits,
            "encoded block"
        );

        if self.config.log_frequencies {
            for (token, count) in analysis.frequencies().sorted_desc() {
                debug!(block = index, token, count, "frequency");
            }
        }

        let codes: Vec<String> = analysis.codes().lines().collect();
        debug!(block = index, codes = ?codes, "generated codes");
        debug!(
            block = index,
            preview = %analysis.encoded().preview(self.config.preview_chars),
            "encoded bits"
        );
    }

    /// Renders the report for already analyzed blocks.
    pub fn render_report(analyses: &[BlockAnalysis]) -> String {
        let mut buf = Vec::new();
        for analysis in analyses {
            // Writing into a Vec cannot fail.
            let _ = write_section(&mut buf, analysis.codes(), analysis.encoded());
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Reads the configured input, encodes it and writes the report.
    ///
    /// The output's parent directory is created if missing and any previous
    /// report is replaced.
    pub fn compress_file(&self) -> Result<DocumentSummary> {
        let input = fs::read_to_string(&self.config.input_path)?;
        let analyses = self.process(&input)?;

        let output = &self.config.output_path;
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(output)?);
        for analysis in &analyses {
            write_section(&mut writer, analysis.codes(), analysis.encoded())?;
        }
        writer.flush()?;

        let summary = DocumentSummary::from_analyses(&analyses);
        info!(
            input = %self.config.input_path.display(),
            output = %output.display(),
            blocks = summary.blocks,
            tokens = summary.tokens,
            bits = summary.encoded_bits,
            "document compressed"
        );
        Ok(summary)
    }
}

/// Analyzes every block of `text` with the default configuration.
pub fn process_document(text: &str) -> Result<Vec<BlockAnalysis>> {
    DocumentCompressor::default().process(text)
}

/// Decodes every section of a report back into its token sequence.
pub fn decompress_report(text: &str) -> Result<Vec<Vec<Token>>> {
    parse_report(text)?
        .iter()
        .map(|section| -> Result<Vec<Token>> {
            Ok(decode(&section.encoded, &section.codes)?)
        })
        .collect()
}

/// Reads a report file and decodes every section.
pub fn decompress_file(path: impl AsRef<Path>) -> Result<Vec<Vec<Token>>> {
    let text = fs::read_to_string(path)?;
    let blocks = decompress_report(&text)?;
    debug!(blocks = blocks.len(), "report decoded");
    Ok(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, HuffmanError};
    use crate::tokenizer::tokenize;

    const DOCUMENT: &str = "The cat sat on the mat.\nThe cat was happy!\n\n\
                            A dog, a dog; a DOG?\r\n\r\nlone";

    #[test]
    fn test_split_blocks() {
        let blocks = split_blocks(DOCUMENT);
        assert_eq!(
            blocks,
            vec![
                "The cat sat on the mat.\nThe cat was happy!",
                "A dog, a dog; a DOG?",
                "lone"
            ]
        );
    }

    #[test]
    fn test_split_single_newline_stays() {
        assert_eq!(split_blocks("a\nb"), vec!["a\nb"]);
        assert_eq!(split_blocks("\n\nx\n\n\n\ny\n\n"), vec!["x", "y"]);
        assert!(split_blocks("").is_empty());
    }

    #[test]
    fn test_blocks_are_independent() {
        let analyses = process_document(DOCUMENT).unwrap();
        assert_eq!(analyses.len(), 3);
        assert_eq!(analyses[1].frequencies().get("dog"), Some(3));
        assert_eq!(analyses[1].frequencies().get("cat"), None);
        assert_eq!(analyses[2].codes().get("lone"), Some("0"));
    }

    #[test]
    fn test_report_roundtrip() {
        let analyses = process_document(DOCUMENT).unwrap();
        let report = DocumentCompressor::render_report(&analyses);
        let decoded = decompress_report(&report).unwrap();

        let expected: Vec<Vec<Token>> = split_blocks(DOCUMENT)
            .into_iter()
            .map(tokenize)
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_corrupted_bits_fail_closed() {
        let report = "--- BLOCK ---\n[CODES]\na:0\nb:10\nc:11\n[ENCODED]\n01\n";
        let err = decompress_report(report).unwrap_err();
        assert!(matches!(
            err,
            Error::Huffman(HuffmanError::MalformedEncoding { .. })
        ));
    }

    #[test]
    fn test_summary() {
        let analyses = process_document("a b\n\nc c c").unwrap();
        let summary = DocumentSummary::from_analyses(&analyses);
        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.tokens, 5);
        assert_eq!(summary.encoded_bits, 5);
    }
}
