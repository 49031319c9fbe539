use crate::tokenizer::Token;
use ahash::AHashMap as HashMap;

/// Occurrence counts of the distinct tokens of one block.
///
/// Entries are kept in first-seen order, which is also the order leaves
/// enter the tree builder. Immutable once built; the counts always sum to the
/// number of tokens the table was built from.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    /// (token, count) in first-seen order
    entries: Vec<(Token, usize)>,
    /// Position of each token in `entries`
    index: HashMap<Token, usize>,
}

impl FrequencyTable {
    /// Counts the tokens of a sequence.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries: Vec<(Token, usize)> = Vec::new();
        let mut index: HashMap<Token, usize> = HashMap::default();

        for token in tokens {
            let token = token.as_ref();
            match index.get(token) {
                Some(&pos) => entries[pos].1 += 1,
                None => {
                    index.insert(token.to_string(), entries.len());
                    entries.push((token.to_string(), 1));
                }
            }
        }

        Self { entries, index }
    }

    /// Returns the count for `token`, if it occurs.
    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&pos| self.entries[pos].1)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens in the block.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterates (token, count) in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.entries
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    /// Listing by decreasing count; equal counts stay in first-seen order.
    pub fn sorted_desc(&self) -> Vec<(&str, usize)> {
        let mut listing: Vec<(&str, usize)> = self.iter().collect();
        // sort_by is stable
        listing.sort_by(|a, b| b.1.cmp(&a.1));
        listing
    }
}

// The index is derived from the entries.
impl PartialEq for FrequencyTable {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for FrequencyTable {}
