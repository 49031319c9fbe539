//! # token-huffman - Word-level Huffman Coding
//!
//! Assigns prefix-free binary codes to the words of a text block so that
//! frequent words get shorter codes.
//!
//! The pipeline for one block is:
//! 1. **Tokenize**: split on whitespace, lower-case, strip `. , ! ? ;`
//! 2. **Count**: build a [`FrequencyTable`] in first-seen order
//! 3. **Build**: merge the two lightest nodes into a [`HuffmanTree`]
//!    (ties go to the node that arrived first)
//! 4. **Assign**: walk the tree into a [`CodeTable`], `0` left and `1` right
//! 5. **Encode**: concatenate the codes into an [`EncodedBlock`]
//!
//! [`decode`] reverses step 5 given the code table (or the tree).
//!
//! ## Example
//!
//! ```
//! use token_huffman::{analyze, decode};
//!
//! let block = analyze("the cat and the dog and the bird").unwrap();
//! assert_eq!(block.frequencies().get("the"), Some(3));
//! assert!(block.codes().is_prefix_free());
//!
//! let tokens = decode(block.encoded(), block.codes()).unwrap();
//! assert_eq!(tokens, block.tokens());
//! ```
//!
//! Codes and encoded bits are kept as `'0'`/`'1'` characters rather than
//! packed bytes; the [`report`] module reads and writes them in that form.
//! Every block is independent: no tree or table is shared between blocks.

mod block;
mod codes;
mod config;
mod decoder;
mod document;
mod encoder;
mod error;
mod frequency;
pub mod report;
mod tokenizer;
mod tree;


pub use block::{analyze, BlockAnalysis, BlockStats};
pub use codes::CodeTable;
pub use config::DriverConfig;
pub use decoder::{decode, decode_with_tree};
pub use document::{
    decompress_file, decompress_report, process_document, split_blocks, DocumentCompressor,
    DocumentSummary,
};
pub use encoder::{encode, EncodedBlock};
pub use error::{CodeTableDefect, Error, HuffmanError, MalformedKind, Result};
pub use frequency::FrequencyTable;
pub use tokenizer::{normalize, tokenize, tokens, Token, STRIPPED_PUNCTUATION};
pub use tree::{HuffmanTree, Node};
