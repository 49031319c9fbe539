//! Error types for the token Huffman coder.
//!
//! Tokenizing, counting, tree building and code generation never fail.
//! Encoding fails only on an internal inconsistency, decoding validates its
//! input and fails closed, and the document driver adds I/O and report
//! parsing failures on top.

use std::fmt;
use thiserror::Error;

/// Errors raised by the coding engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuffmanError {
    /// A token has no entry in the code table it is being encoded with.
    ///
    /// Unreachable when the table was built from the same token sequence.
    #[error("internal consistency error: token {token:?} has no code")]
    InternalConsistency { token: String },

    /// The bit stream does not split into complete codes of the table.
    #[error("malformed encoding at bit {position}: {kind}")]
    MalformedEncoding { position: usize, kind: MalformedKind },

    /// The code table cannot be used for decoding.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(CodeTableDefect),
}

/// The way an encoded bit stream went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedKind {
    /// A character other than `'0'` or `'1'`.
    InvalidBit(char),
    /// The current node has no child for this bit.
    MissingChild,
    /// The stream ended part way through a code.
    TruncatedCode,
}

impl fmt::Display for MalformedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedKind::InvalidBit(c) => write!(f, "invalid bit character {c:?}"),
            MalformedKind::MissingChild => write!(f, "no code continues with this bit"),
            MalformedKind::TruncatedCode => write!(f, "stream ends inside a code"),
        }
    }
}

/// Why a code table was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeTableDefect {
    /// A token was mapped to the empty bitstring.
    EmptyCode { token: String },
    /// A code contains something other than `'0'` and `'1'`.
    NonBinaryCode { token: String, code: String },
    /// One token's code is a prefix of (or equal to) another's.
    PrefixConflict { token: String, other: String },
    /// The same token appears twice.
    DuplicateToken { token: String },
}

impl fmt::Display for CodeTableDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodeTableDefect::EmptyCode { token } => write!(f, "token {token:?} has an empty code"),
            CodeTableDefect::NonBinaryCode { token, code } => {
                write!(f, "token {token:?} has non-binary code {code:?}")
            }
            CodeTableDefect::PrefixConflict { token, other } => {
                write!(f, "codes of {token:?} and {other:?} are not prefix-free")
            }
            CodeTableDefect::DuplicateToken { token } => {
                write!(f, "token {token:?} appears more than once")
            }
        }
    }
}

impl From<CodeTableDefect> for HuffmanError {
    fn from(defect: CodeTableDefect) -> Self {
        HuffmanError::InvalidCodeTable(defect)
    }
}

/// Top-level error for document processing.
#[derive(Debug, Error)]
pub enum Error {
    /// Coding engine failure
    #[error("huffman error: {0}")]
    Huffman(#[from] HuffmanError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A report file could not be parsed
    #[error("report line {line}: {message}")]
    Report { line: usize, message: String },
}

/// Type alias for Result with the driver's Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = HuffmanError::MalformedEncoding {
            position: 7,
            kind: MalformedKind::TruncatedCode,
        };
        assert_eq!(
            err.to_string(),
            "malformed encoding at bit 7: stream ends inside a code"
        );
    }

    #[test]
    fn test_defect_converts() {
        let err: HuffmanError = CodeTableDefect::EmptyCode {
            token: "cat".into(),
        }
        .into();
        assert!(matches!(err, HuffmanError::InvalidCodeTable(_)));
        assert!(err.to_string().contains("\"cat\""));
    }

    #[test]
    fn test_huffman_error_lifts_into_error() {
        let err: Error = HuffmanError::InternalConsistency {
            token: "dog".into(),
        }
        .into();
        assert!(matches!(err, Error::Huffman(_)));
    }
}
