//! Property-based tests for the Newick parser and writer
//!
//! These tests use proptest to generate random trees and random token
//! soups and verify that parsing, writing and validation agree.

use cladewick::newick::{parse_str, precheck};
use cladewick::parser::tokenizer::tokenize;
use cladewick::parser::{Token, TokenClass};
use proptest::prelude::*;

// --- GENERATED TREES ---
#[derive(Debug, Clone)]
enum Node {
    Leaf {
        label: String,
        length: f64,
    },
    Inner {
        children: Vec<Node>,
        label: Option<String>,
        length: f64,
    },
}

impl Node {
    /// Renders in the canonical form produced by the writer.
    fn render(&self, out: &mut String) {
        match self {
            Node::Leaf { label, length } => {
                out.push_str(label);
                out.push(':');
                out.push_str(&length.to_string());
            }
            Node::Inner {
                children,
                label,
                length,
            } => {
                out.push('(');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    child.render(out);
                }
                out.push(')');
                if let Some(label) = label {
                    out.push_str(label);
                }
                out.push(':');
                out.push_str(&length.to_string());
            }
        }
    }

    fn leaf_labels<'a>(&'a self, labels: &mut Vec<&'a str>) {
        match self {
            Node::Leaf { label, .. } => labels.push(label),
            Node::Inner { children, .. } => {
                for child in children {
                    child.leaf_labels(labels);
                }
            }
        }
    }

    fn num_inner(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Inner { children, .. } => {
                1 + children.iter().map(Node::num_inner).sum::<usize>()
            }
        }
    }
}

fn newick_of(node: &Node) -> String {
    let mut out = String::new();
    node.render(&mut out);
    out.push(';');
    out
}

fn label() -> impl Strategy<Value = String> {
    "[A-Z][a-z0-9_]{0,6}"
}

fn length() -> impl Strategy<Value = f64> {
    // Multiples of 1/8 print and parse back exactly
    (0u32..2000).prop_map(|n| f64::from(n) / 8.0)
}

fn arb_tree() -> impl Strategy<Value = Node> {
    let leaf = (label(), length()).prop_map(|(label, length)| Node::Leaf { label, length });
    leaf.prop_recursive(6, 64, 4, |inner| {
        (
            prop::collection::vec(inner, 1..5),
            prop::option::of(label()),
            length(),
        )
            .prop_map(|(children, label, length)| Node::Inner {
                children,
                label,
                length,
            })
    })
}

// --- TOKEN SOUPS ---
fn arb_soup() -> impl Strategy<Value = String> {
    let pieces = vec!["(", ")", ",", ":", ";", "A", "1", "'q'"];
    prop::collection::vec(prop::sample::select(pieces), 0..16).prop_map(|pieces| pieces.concat())
}

/// Grammar of token successions, written independently of the parser.
fn may_follow(prev: TokenClass, next: TokenClass) -> bool {
    use TokenClass as C;
    match prev {
        C::None | C::Open | C::Comma => matches!(next, C::Open | C::Atom),
        C::Close => next != C::Open && next != C::None,
        C::Colon => next == C::Atom,
        C::Atom => matches!(next, C::Close | C::Colon | C::Comma | C::Semicolon),
        C::Semicolon => false,
    }
}

/// Decides whether the token sequence is acceptable Newick.
fn accepted_by_oracle(tokens: &[Token<'_>]) -> bool {
    if precheck(tokens).is_err() || tokens.last() != Some(&Token::Semicolon) {
        return false;
    }

    let mut prev = TokenClass::None;
    let mut depth = 0usize;
    for token in tokens {
        if !may_follow(prev, token.class()) {
            return false;
        }
        match token {
            Token::Open => depth += 1,
            Token::Close => depth -= 1,
            // A non-number after ':' outside any clade has nowhere to go
            Token::Unquoted(text) if prev == TokenClass::Colon => match text.parse::<f64>() {
                Ok(length) if !length.is_finite() => return false,
                Err(_) if depth == 0 => return false,
                _ => {}
            },
            Token::Quoted(_) if prev == TokenClass::Colon && depth == 0 => return false,
            _ => {}
        }
        prev = token.class();
    }

    true
}

proptest! {
    #[test]
    fn test_parse_matches_generated_tree(node in arb_tree()) {
        let newick = newick_of(&node);
        let tree = parse_str(&newick).unwrap();

        prop_assert!(tree.is_valid());
        prop_assert_eq!(tree.num_inner(), node.num_inner());
        prop_assert_eq!(tree.num_inner(), newick.matches('(').count());
        prop_assert_eq!(tree.num_leaves() + tree.num_inner(), tree.num_vertices());

        let mut expected = Vec::new();
        node.leaf_labels(&mut expected);
        let labels: Vec<_> = tree.leaf_labels().collect();
        prop_assert_eq!(labels, expected);
    }

    #[test]
    fn test_round_trip(node in arb_tree()) {
        let newick = newick_of(&node);
        let tree = parse_str(&newick).unwrap();

        let written = tree.to_newick();
        prop_assert_eq!(&written, &newick);

        let reparsed = parse_str(&written).unwrap();
        prop_assert_eq!(reparsed.to_newick(), written);
        prop_assert_eq!(reparsed.total_branch_length(), tree.total_branch_length());
    }

    #[test]
    fn test_whitespace_does_not_matter(node in arb_tree()) {
        let newick = newick_of(&node);
        let spaced = newick
            .replace(',', " ,\t")
            .replace(':', " : ")
            .replace('(', "( ");

        let tree = parse_str(&spaced).unwrap();
        prop_assert_eq!(tree.to_newick(), newick);
    }

    #[test]
    fn test_subtree_root_is_common_ancestor(node in arb_tree(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..4)) {
        let tree = parse_str(newick_of(&node)).unwrap();
        let leaves = tree.leaves();
        let targets: Vec<_> = picks.iter().map(|pick| leaves[pick.index(leaves.len())]).collect();
        let labels: Vec<_> = targets.iter().map(|&leaf| tree[leaf].label().unwrap()).collect();

        let subroot = tree.subtree_root_index(&labels);
        // Labels may repeat, so compare against the first leaf per label
        for label in &labels {
            let leaf = tree.find_leaf(label).unwrap();
            prop_assert!(tree.is_ancestor_or_self(subroot, leaf));
        }
        if labels.len() == 1 {
            prop_assert_eq!(Some(subroot), tree.find_leaf(labels[0]));
        }
    }

    #[test]
    fn test_validator_and_builder_agree(soup in arb_soup()) {
        let tokens = tokenize(&soup);
        let expected = accepted_by_oracle(&tokens);

        match parse_str(&soup) {
            Ok(tree) => {
                prop_assert!(expected, "accepted {:?}", soup);
                prop_assert!(tree.is_valid());
                let opening = tokens.iter().filter(|&&token| token == Token::Open).count();
                prop_assert_eq!(tree.num_inner(), opening);
            }
            Err(err) => {
                prop_assert!(!expected, "rejected {:?}: {}", soup, err);
                prop_assert!(err.is_format_error());
            }
        }
    }
}
