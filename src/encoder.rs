use crate::codes::CodeTable;
use crate::error::HuffmanError;
use std::fmt;

/// Concatenated codes of a block, one `'0'`/`'1'` character per bit.
///
/// Only meaningful together with the code table that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EncodedBlock {
    bits: String,
}

impl EncodedBlock {
    /// Wraps an existing bitstring without validating it; the decoder
    /// rejects anything that is not `'0'`/`'1'`.
    pub fn from_bits(bits: impl Into<String>) -> Self {
        Self { bits: bits.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.bits
    }

    /// Number of encoded bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The first `max_chars` bits, with `...` appended if truncated.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.bits.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &self.bits[..cut]),
            None => self.bits.clone(),
        }
    }

    pub fn into_string(self) -> String {
        self.bits
    }
}

impl fmt::Display for EncodedBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bits)
    }
}

/// Concatenates the code of every token, in order.
///
/// # Errors
///
/// `HuffmanError::InternalConsistency` if a token has no code, which means
/// the table was not built from these tokens.
pub fn encode<S: AsRef<str>>(tokens: &[S], codes: &CodeTable) -> Result<EncodedBlock, HuffmanError> {
    let mut bits = String::new();
    for token in tokens {
        let token = token.as_ref();
        let code = codes
            .get(token)
            .ok_or_else(|| HuffmanError::InternalConsistency {
                token: token.to_string(),
            })?;
        bits.push_str(code);
    }
    Ok(EncodedBlock { bits })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_in_order() {
        let codes = CodeTable::from_pairs([("a", "0"), ("b", "10"), ("c", "11")]).unwrap();
        let encoded = encode(&["b", "a", "c", "a"], &codes).unwrap();
        assert_eq!(encoded.as_str(), "100110");
        assert_eq!(encoded.len(), 6);
    }

    #[test]
    fn test_encode_empty() {
        let encoded = encode::<&str>(&[], &CodeTable::default()).unwrap();
        assert!(encoded.is_empty());
    }

    #[test]
    fn test_missing_token_is_inconsistency() {
        let codes = CodeTable::from_pairs([("a", "0")]).unwrap();
        let err = encode(&["a", "zebra"], &codes).unwrap_err();
        assert_eq!(
            err,
            HuffmanError::InternalConsistency {
                token: "zebra".into()
            }
        );
    }

    #[test]
    fn test_preview() {
        let encoded = EncodedBlock::from_bits("0101010101");
        assert_eq!(encoded.preview(4), "0101...");
        assert_eq!(encoded.preview(10), "0101010101");
        assert_eq!(encoded.preview(100), "0101010101");
    }
}
