use crate::frequency::FrequencyTable;
use crate::tokenizer::Token;
use slotmap::{DefaultKey, SlotMap};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Write;

/// A node of the prefix tree.
///
/// Children are arena keys, so every node has exactly one owner (the arena)
/// and exactly one parent, except the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Holds exactly one token and its occurrence count.
    Leaf { token: Token, weight: usize },

    /// Holds no token; weight is the sum of the children's weights.
    Internal {
        weight: usize,
        left: DefaultKey,
        right: DefaultKey,
    },
}

impl Node {
    pub fn weight(&self) -> usize {
        match self {
            Node::Leaf { weight, .. } | Node::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

/// Heap entry ordered so that `BinaryHeap` pops the lightest node first,
/// and among equal weights the one that arrived first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    weight: usize,
    arrival: usize,
    key: DefaultKey,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.arrival.cmp(&self.arrival))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Huffman prefix tree stored in a generational arena.
///
/// An empty frequency table gives a tree with no root.
#[derive(Debug, Clone, Default)]
pub struct HuffmanTree {
    pub(crate) nodes: SlotMap<DefaultKey, Node>,
    pub(crate) root: Option<DefaultKey>,
}

impl HuffmanTree {
    /// Builds the tree by repeatedly merging the two lightest nodes.
    ///
    /// Leaves arrive in the table's first-seen order and every merged node
    /// arrives after everything already queued. Ties on weight are broken by
    /// arrival (FIFO), so the same table always yields the same tree. The
    /// first node removed becomes the left child.
    pub fn build(frequencies: &FrequencyTable) -> Self {
        let mut nodes = SlotMap::with_capacity(frequencies.len().saturating_mul(2));
        let mut queue = BinaryHeap::with_capacity(frequencies.len());
        let mut arrival = 0;

        for (token, count) in frequencies.iter() {
            let key = nodes.insert(Node::Leaf {
                token: token.to_string(),
                weight: count,
            });
            queue.push(QueueEntry {
                weight: count,
                arrival,
                key,
            });
            arrival += 1;
        }

        while queue.len() > 1 {
            let (Some(left), Some(right)) = (queue.pop(), queue.pop()) else {
                break;
            };

            let weight = left.weight + right.weight;
            let key = nodes.insert(Node::Internal {
                weight,
                left: left.key,
                right: right.key,
            });
            queue.push(QueueEntry {
                weight,
                arrival,
                key,
            });
            arrival += 1;
        }

        let root = queue.pop().map(|entry| entry.key);
        Self { nodes, root }
    }

    /// Key of the root node, `None` for an empty tree.
    pub fn root(&self) -> Option<DefaultKey> {
        self.root
    }

    /// Looks up a node by key.
    pub fn node(&self, key: DefaultKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Iterates every node of the tree in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = (DefaultKey, &Node)> + '_ {
        self.nodes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of leaves, equal to the number of distinct tokens.
    pub fn leaf_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_leaf()).count()
    }

    /// Weight of the root, equal to the number of tokens in the block.
    pub fn total_weight(&self) -> usize {
        self.root
            .and_then(|key| self.nodes.get(key))
            .map_or(0, Node::weight)
    }

    /// Length of the longest root-to-leaf path.
    ///
    /// A single-leaf tree has depth 0 and an empty tree depth 0.
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.depth_from(root))
    }

    fn depth_from(&self, key: DefaultKey) -> usize {
        match &self.nodes[key] {
            Node::Leaf { .. } => 0,
            Node::Internal { left, right, .. } => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
        }
    }

    /// Renders the tree as indented text, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.render_node(&mut out, root, 0, "root");
        }
        out
    }

    fn render_node(&self, out: &mut String, key: DefaultKey, depth: usize, label: &str) {
        let indent = "  ".repeat(depth);
        match &self.nodes[key] {
            Node::Leaf { token, weight } => {
                let _ = writeln!(out, "{indent}{label} -> '{token}' [weight: {weight}]");
            }
            Node::Internal {
                weight,
                left,
                right,
            } => {
                let _ = writeln!(out, "{indent}{label} -> internal [weight: {weight}]");
                self.render_node(out, *left, depth + 1, "L");
                self.render_node(out, *right, depth + 1, "R");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn leaf_token(tree: &HuffmanTree, key: DefaultKey) -> &str {
        match tree.node(key) {
            Some(Node::Leaf { token, .. }) => token,
            other => panic!("expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table() {
        let tree = HuffmanTree::build(&FrequencyTable::default());
        assert!(tree.is_empty());
        assert_eq!(tree.total_weight(), 0);
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn test_single_leaf_is_root() {
        let table = FrequencyTable::from_tokens(tokenize("cat cat cat"));
        let tree = HuffmanTree::build(&table);

        let root = tree.root().expect("tree has a root");
        assert_eq!(leaf_token(&tree, root), "cat");
        assert_eq!(tree.total_weight(), 3);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.leaf_count(), 1);
    }

    #[test]
    fn test_lighter_node_goes_left() {
        let table = FrequencyTable::from_tokens(tokenize("a a a b"));
        let tree = HuffmanTree::build(&table);

        let root = tree.root().unwrap();
        match tree.node(root).unwrap() {
            Node::Internal {
                weight,
                left,
                right,
            } => {
                assert_eq!(*weight, 4);
                assert_eq!(leaf_token(&tree, *left), "b");
                assert_eq!(leaf_token(&tree, *right), "a");
            }
            other => panic!("expected internal root, got {:?}", other),
        }
    }

    #[test]
    fn test_ties_break_by_arrival() {
        // All weights equal: x and y merge first, then z with the xy node
        // (z arrived before the merged node).
        let table = FrequencyTable::from_tokens(["x", "y", "z"]);
        let tree = HuffmanTree::build(&table);

        let root = tree.root().unwrap();
        let Node::Internal { left, right, .. } = tree.node(root).unwrap() else {
            panic!("root should be internal");
        };
        assert_eq!(leaf_token(&tree, *left), "z");
        let Node::Internal {
            left: xy_left,
            right: xy_right,
            weight,
        } = tree.node(*right).unwrap()
        else {
            panic!("right child should be internal");
        };
        assert_eq!(*weight, 2);
        assert_eq!(leaf_token(&tree, *xy_left), "x");
        assert_eq!(leaf_token(&tree, *xy_right), "y");
    }

    #[test]
    fn test_weight_invariant() {
        let table = FrequencyTable::from_tokens(tokenize(
            "the cat and the dog and the bird saw the cat",
        ));
        let tree = HuffmanTree::build(&table);

        for (_, node) in tree.nodes() {
            if let Node::Internal {
                weight,
                left,
                right,
            } = node
            {
                assert_eq!(*weight, tree.nodes[*left].weight() + tree.nodes[*right].weight());
            }
        }
        assert_eq!(tree.total_weight(), table.total());
        assert_eq!(tree.leaf_count(), table.len());
        assert_eq!(tree.nodes().count(), 2 * table.len() - 1);
    }

    #[test]
    fn test_render() {
        let table = FrequencyTable::from_tokens(tokenize("a a b"));
        let tree = HuffmanTree::build(&table);
        let expected = "root -> internal [weight: 3]\n  L -> 'b' [weight: 1]\n  R -> 'a' [weight: 2]\n";
        assert_eq!(tree.render(), expected);
    }
}
