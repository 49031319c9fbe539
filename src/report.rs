//! Human-readable report format for encoded blocks.
//!
//! Each block becomes one section:
//!
//! ```text
//! --- BLOCK ---
//! [CODES]
//! cat:0
//! dog:1
//! [ENCODED]
//! 0010
//!
//! ```
//!
//! Bits are stored one character each, unpacked. Tokens never contain
//! whitespace but may contain `:`, so a code line splits at its last colon.

use crate::codes::CodeTable;
use crate::encoder::EncodedBlock;
use crate::error::{Error, Result};
use std::io::{self, Write};

pub const BLOCK_HEADER: &str = "--- BLOCK ---";
pub const CODES_HEADER: &str = "[CODES]";
pub const ENCODED_HEADER: &str = "[ENCODED]";

/// One parsed report section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub codes: CodeTable,
    pub encoded: EncodedBlock,
}

/// Writes one block's section.
pub fn write_section<W: Write>(
    out: &mut W,
    codes: &CodeTable,
    encoded: &EncodedBlock,
) -> io::Result<()> {
    writeln!(out, "{BLOCK_HEADER}")?;
    writeln!(out, "{CODES_HEADER}")?;
    for line in codes.lines() {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{ENCODED_HEADER}")?;
    writeln!(out, "{encoded}")?;
    writeln!(out)
}

/// Renders one block's section to a string.
pub fn render_section(codes: &CodeTable, encoded: &EncodedBlock) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_section(&mut buf, codes, encoded);
    String::from_utf8_lossy(&buf).into_owned()
}

fn report_error(line: usize, message: impl Into<String>) -> Error {
    Error::Report {
        line,
        message: message.into(),
    }
}

/// Parses every section of a report.
///
/// # Errors
///
/// `Error::Report` with the offending line number if a header is missing, a
/// code line has no `:`, or a section's code table is invalid.
pub fn parse_report(text: &str) -> Result<Vec<ReportSection>> {
    let mut sections = Vec::new();
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .peekable();

    while let Some((start, line)) = lines.next() {
        if line.trim().is_empty() {
            continue;
        }
        if line != BLOCK_HEADER {
            return Err(report_error(
                start,
                format!("expected {BLOCK_HEADER:?}, found {line:?}"),
            ));
        }

        match lines.next() {
            Some((_, CODES_HEADER)) => {}
            Some((number, other)) => {
                return Err(report_error(
                    number,
                    format!("expected {CODES_HEADER:?}, found {other:?}"),
                ))
            }
            None => return Err(report_error(start, "section ends before [CODES]")),
        }

        let mut pairs = Vec::new();
        let mut closed = false;
        for (number, line) in lines.by_ref() {
            if line == ENCODED_HEADER {
                closed = true;
                break;
            }
            let (token, code) = line
                .rsplit_once(':')
                .ok_or_else(|| report_error(number, format!("expected token:bits, found {line:?}")))?;
            pairs.push((token.to_string(), code.to_string()));
        }
        if !closed {
            return Err(report_error(start, "section ends before [ENCODED]"));
        }

        // An empty block leaves a blank line where the bits would be.
        let bits = match lines.peek() {
            Some(&(_, line)) if line != BLOCK_HEADER => line,
            _ => "",
        };
        if !bits.is_empty() {
            lines.next();
        }

        let codes =
            CodeTable::from_pairs(pairs).map_err(|err| report_error(start, err.to_string()))?;
        sections.push(ReportSection {
            codes,
            encoded: EncodedBlock::from_bits(bits),
        });
    }

    Ok(sections)
}
