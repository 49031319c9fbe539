use crate::codes::CodeTable;
use crate::decoder::decode_with_tree;
use crate::encoder::{encode, EncodedBlock};
use crate::error::HuffmanError;
use crate::frequency::FrequencyTable;
use crate::tokenizer::{tokenize, Token};
use crate::tree::HuffmanTree;

/// Everything the coder derives from one text block.
///
/// Each block is processed on its own: nothing here is shared with or
/// reused by another block.
#[derive(Debug, Clone)]
pub struct BlockAnalysis {
    tokens: Vec<Token>,
    frequencies: FrequencyTable,
    tree: HuffmanTree,
    codes: CodeTable,
    encoded: EncodedBlock,
}

impl BlockAnalysis {
    /// Runs tokenize, count, build, assign and encode over `text`.
    ///
    /// A block with no usable tokens is not an error; every output is empty.
    ///
    /// # Errors
    ///
    /// Only `HuffmanError::InternalConsistency`, which would mean the tree
    /// builder and code generator disagree.
    pub fn analyze(text: &str) -> Result<Self, HuffmanError> {
        let tokens = tokenize(text);
        let frequencies = FrequencyTable::from_tokens(&tokens);
        let tree = HuffmanTree::build(&frequencies);
        let codes = CodeTable::from_tree(&tree);
        let encoded = encode(&tokens, &codes)?;

        Ok(Self {
            tokens,
            frequencies,
            tree,
            codes,
            encoded,
        })
    }

    /// Tokens of the block, in order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }

    pub fn encoded(&self) -> &EncodedBlock {
        &self.encoded
    }

    /// True if the block had no usable tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Decodes the block's own bits with its own tree.
    pub fn decode(&self) -> Result<Vec<Token>, HuffmanError> {
        decode_with_tree(&self.encoded, &self.tree)
    }

    /// Splits into the (frequencies, codes, encoded bits) triple.
    pub fn into_parts(self) -> (FrequencyTable, CodeTable, EncodedBlock) {
        (self.frequencies, self.codes, self.encoded)
    }

    /// Returns size statistics for the block.
    pub fn stats(&self) -> BlockStats {
        BlockStats {
            token_count: self.tokens.len(),
            distinct_tokens: self.frequencies.len(),
            encoded_bits: self.encoded.len(),
            tree_depth: self.tree.depth(),
        }
    }
}

/// Convenience wrapper for [`BlockAnalysis::analyze`].
pub fn analyze(text: &str) -> Result<BlockAnalysis, HuffmanError> {
    BlockAnalysis::analyze(text)
}

/// Statistics about one encoded block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockStats {
    /// Number of tokens in the block
    pub token_count: usize,
    /// Number of distinct tokens
    pub distinct_tokens: usize,
    /// Length of the encoded bitstring
    pub encoded_bits: usize,
    /// Longest code length (0 for empty or single-token trees)
    pub tree_depth: usize,
}

impl BlockStats {
    /// Mean bits spent per token.
    pub fn average_code_length(&self) -> f64 {
        if self.token_count == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.token_count as f64
        }
    }

    /// Bits a fixed-width code would need: `ceil(log2(distinct))` per
    /// token, and at least one.
    pub fn fixed_width_bits(&self) -> usize {
        let width = if self.distinct_tokens <= 1 {
            1
        } else {
            (usize::BITS - (self.distinct_tokens - 1).leading_zeros()) as usize
        };
        self.token_count * width
    }

    /// Encoded size as a percentage of the fixed-width size.
    pub fn compression_ratio(&self) -> f64 {
        let fixed = self.fixed_width_bits();
        if fixed == 0 {
            0.0
        } else {
            (self.encoded_bits as f64 / fixed as f64) * 100.0
        }
    }
}
