//! Turns an encoded bitstring back into tokens.
//!
//! Decoding walks a binary tree from the root, `'0'` to the left child and
//! `'1'` to the right, emitting a token at every leaf and restarting at the
//! root. It is the only stage that validates its input: any bit stream that
//! does not split into complete codes is rejected as a whole.

use crate::codes::CodeTable;
use crate::encoder::EncodedBlock;
use crate::error::{CodeTableDefect, HuffmanError, MalformedKind};
use crate::tokenizer::Token;
use crate::tree::{HuffmanTree, Node};
use slotmap::{DefaultKey, SlotMap};

fn malformed(position: usize, kind: MalformedKind) -> HuffmanError {
    HuffmanError::MalformedEncoding { position, kind }
}

/// Maps `'0'`/`'1'` to a child index.
fn parse_bit(position: usize, c: char) -> Result<usize, HuffmanError> {
    match c {
        '0' => Ok(0),
        '1' => Ok(1),
        other => Err(malformed(position, MalformedKind::InvalidBit(other))),
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    token: Option<Token>,
    children: [Option<DefaultKey>; 2],
}

/// Binary trie rebuilt from a code table.
///
/// Unlike a Huffman tree a trie may be incomplete, so a bit can lead
/// nowhere; that case is reported as `MissingChild`.
#[derive(Debug)]
struct CodeTrie {
    nodes: SlotMap<DefaultKey, TrieNode>,
    root: DefaultKey,
}

impl CodeTrie {
    fn from_codes(codes: &CodeTable) -> Result<Self, HuffmanError> {
        if let Some((token, other)) = codes.prefix_conflict() {
            return Err(CodeTableDefect::PrefixConflict { token, other }.into());
        }

        let mut nodes = SlotMap::with_capacity(codes.len() * 2 + 1);
        let root = nodes.insert(TrieNode::default());

        for (token, code) in codes.iter() {
            let mut current = root;
            for (position, c) in code.chars().enumerate() {
                let bit = parse_bit(position, c).map_err(|_| CodeTableDefect::NonBinaryCode {
                    token: token.to_string(),
                    code: code.to_string(),
                })?;
                let existing = nodes[current].children[bit];
                current = match existing {
                    Some(child) => child,
                    None => {
                        let child = nodes.insert(TrieNode::default());
                        nodes[current].children[bit] = Some(child);
                        child
                    }
                };
            }

            if current == root {
                return Err(CodeTableDefect::EmptyCode {
                    token: token.to_string(),
                }
                .into());
            }
            nodes[current].token = Some(token.to_string());
        }

        Ok(Self { nodes, root })
    }

    fn decode(&self, encoded: &EncodedBlock) -> Result<Vec<Token>, HuffmanError> {
        let mut tokens = Vec::new();
        let mut current = self.root;
        let mut consumed = 0;

        for (position, c) in encoded.as_str().chars().enumerate() {
            let bit = parse_bit(position, c)?;
            let next = self.nodes[current].children[bit]
                .ok_or_else(|| malformed(position, MalformedKind::MissingChild))?;

            match &self.nodes[next].token {
                Some(token) => {
                    tokens.push(token.clone());
                    current = self.root;
                }
                None => current = next,
            }
            consumed = position + 1;
        }

        if current != self.root {
            return Err(malformed(consumed, MalformedKind::TruncatedCode));
        }
        Ok(tokens)
    }
}

/// Decodes `encoded` using the code table that produced it.
///
/// # Errors
///
/// - `MalformedEncoding` if a character is not a bit, a bit continues no
///   code, or the stream stops inside a code.
/// - `InvalidCodeTable` if the table cannot be arranged into a prefix trie.
pub fn decode(encoded: &EncodedBlock, codes: &CodeTable) -> Result<Vec<Token>, HuffmanError> {
    CodeTrie::from_codes(codes)?.decode(encoded)
}

/// Decodes `encoded` by walking the Huffman tree directly.
///
/// A tree whose root is a single leaf reads every `'0'` as that token.
///
/// # Errors
///
/// `MalformedEncoding` under the same conditions as [`decode`].
pub fn decode_with_tree(
    encoded: &EncodedBlock,
    tree: &HuffmanTree,
) -> Result<Vec<Token>, HuffmanError> {
    let mut bits = encoded.as_str().chars().enumerate();

    let Some(root) = tree.root() else {
        return match bits.next() {
            None => Ok(Vec::new()),
            Some((position, c)) => {
                parse_bit(position, c)?;
                Err(malformed(position, MalformedKind::MissingChild))
            }
        };
    };

    let mut tokens = Vec::new();

    if let Node::Leaf { token, .. } = &tree.nodes[root] {
        for (position, c) in bits {
            match parse_bit(position, c)? {
                0 => tokens.push(token.clone()),
                _ => return Err(malformed(position, MalformedKind::MissingChild)),
            }
        }
        return Ok(tokens);
    }

    let mut current = root;
    let mut consumed = 0;
    for (position, c) in bits {
        let bit = parse_bit(position, c)?;
        let next = match &tree.nodes[current] {
            Node::Internal { left, right, .. } => {
                if bit == 0 {
                    *left
                } else {
                    *right
                }
            }
            Node::Leaf { .. } => return Err(malformed(position, MalformedKind::MissingChild)),
        };

        match &tree.nodes[next] {
            Node::Leaf { token, .. } => {
                tokens.push(token.clone());
                current = root;
            }
            Node::Internal { .. } => current = next,
        }
        consumed = position + 1;
    }

    if current != root {
        return Err(malformed(consumed, MalformedKind::TruncatedCode));
    }
    Ok(tokens)
}
