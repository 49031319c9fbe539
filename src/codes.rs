use crate::error::{CodeTableDefect, HuffmanError};
use crate::tokenizer::Token;
use crate::tree::{HuffmanTree, Node};
use slotmap::DefaultKey;
use std::collections::BTreeMap;

/// Mapping from token to its bitstring of `'0'`/`'1'` characters.
///
/// Tables derived from a tree are always prefix-free. Iteration is in token
/// order so reports come out the same on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<Token, String>,
}

impl CodeTable {
    /// Derives the codes by walking the tree, `0` for left and `1` for right.
    ///
    /// A single-leaf tree gives its token the code `"0"`; an empty tree gives
    /// an empty table.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        if let Some(root) = tree.root() {
            collect_codes(tree, root, String::new(), &mut codes);
        }
        Self { codes }
    }

    /// Builds a table from explicit (token, code) pairs, e.g. read back from
    /// a report.
    ///
    /// Rejects empty or non-binary codes, repeated tokens and tables that
    /// are not prefix-free.
    pub fn from_pairs<I, T, C>(pairs: I) -> Result<Self, HuffmanError>
    where
        I: IntoIterator<Item = (T, C)>,
        T: Into<Token>,
        C: Into<String>,
    {
        let mut codes = BTreeMap::new();
        for (token, code) in pairs {
            let token = token.into();
            let code = code.into();
            if code.is_empty() {
                return Err(CodeTableDefect::EmptyCode { token }.into());
            }
            if !code.chars().all(|c| c == '0' || c == '1') {
                return Err(CodeTableDefect::NonBinaryCode { token, code }.into());
            }
            if codes.contains_key(&token) {
                return Err(CodeTableDefect::DuplicateToken { token }.into());
            }
            codes.insert(token, code);
        }

        let table = Self { codes };
        if let Some((token, other)) = table.prefix_conflict() {
            return Err(CodeTableDefect::PrefixConflict { token, other }.into());
        }
        Ok(table)
    }

    /// Returns the code of `token`.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.codes.get(token).map(String::as_str)
    }

    /// Number of tokens with a code.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterates (token, code) in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.codes
            .iter()
            .map(|(token, code)| (token.as_str(), code.as_str()))
    }

    /// Renders each entry as a `token:bitstring` line (without newline).
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(token, code)| format!("{token}:{code}"))
    }

    /// True if no code is a prefix of a different token's code.
    pub fn is_prefix_free(&self) -> bool {
        self.prefix_conflict().is_none()
    }

    /// Finds two tokens whose codes collide, if any.
    ///
    /// After sorting the codes, a prefix always sorts directly before some
    /// code it prefixes, so checking neighbours is enough.
    pub(crate) fn prefix_conflict(&self) -> Option<(Token, Token)> {
        let mut by_code: Vec<(&str, &str)> = self
            .codes
            .iter()
            .map(|(token, code)| (code.as_str(), token.as_str()))
            .collect();
        by_code.sort_unstable();

        by_code
            .windows(2)
            .find(|pair| pair[1].0.starts_with(pair[0].0))
            .map(|pair| (pair[0].1.to_string(), pair[1].1.to_string()))
    }
}

fn collect_codes(
    tree: &HuffmanTree,
    key: DefaultKey,
    path: String,
    codes: &mut BTreeMap<Token, String>,
) {
    match &tree.nodes[key] {
        Node::Leaf { token, .. } => {
            let code = if path.is_empty() {
                "0".to_string()
            } else {
                path
            };
            codes.insert(token.clone(), code);
        }
        Node::Internal { left, right, .. } => {
            collect_codes(tree, *left, format!("{path}0"), codes);
            collect_codes(tree, *right, format!("{path}1"), codes);
        }
    }
}
