//! Constants and definitions for the Newick parser.
//!
//! This module contains the transition table of the Newick automaton.

use crate::parser::tokenizer::{NUM_TOKEN_CLASSES, TokenClass};

const F: bool = false;
const T: bool = true;

/// Legal transitions between token classes: `TRANSITIONS[prev][next]`.
///
/// Rows and columns are in [TokenClass] order:
/// ```text
///  prev \ next  NONE  OPEN  CLOSE COLON COMMA SEMI  ATOM
///  NONE         F     T     F     F     F     F     T
///  OPEN         F     T     F     F     F     F     T
///  CLOSE        F     F     T     T     T     T     T
///  COLON        F     F     F     F     F     F     T
///  COMMA        F     T     F     F     F     F     T
///  SEMI         F     F     F     F     F     F     F
///  ATOM         F     F     T     T     T     T     F
/// ```
pub(crate) const TRANSITIONS: [[bool; NUM_TOKEN_CLASSES]; NUM_TOKEN_CLASSES] = [
    [F, T, F, F, F, F, T],
    [F, T, F, F, F, F, T],
    [F, F, T, T, T, T, T],
    [F, F, F, F, F, F, T],
    [F, T, F, F, F, F, T],
    [F, F, F, F, F, F, F],
    [F, F, T, T, T, T, F],
];

/// Returns whether a token of class `next` may follow one of class `prev`.
#[inline]
pub(crate) fn is_legal_transition(prev: TokenClass, next: TokenClass) -> bool {
    TRANSITIONS[prev.index()][next.index()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use TokenClass as C;

    #[test]
    fn test_selected_transitions() {
        assert!(is_legal_transition(C::None, C::Open));
        assert!(is_legal_transition(C::None, C::Atom));
        assert!(!is_legal_transition(C::None, C::Semicolon));
        assert!(!is_legal_transition(C::Open, C::Comma));
        assert!(!is_legal_transition(C::Open, C::Close));
        assert!(is_legal_transition(C::Close, C::Atom));
        assert!(is_legal_transition(C::Close, C::Close));
        assert!(!is_legal_transition(C::Close, C::Open));
        assert!(!is_legal_transition(C::Atom, C::Atom));
        assert!(!is_legal_transition(C::Colon, C::Colon));
        assert!(is_legal_transition(C::Comma, C::Open));
    }

    #[test]
    fn test_nothing_follows_semicolon_and_nothing_returns_to_none() {
        let all = [C::None, C::Open, C::Close, C::Colon, C::Comma, C::Semicolon, C::Atom];
        for class in all {
            assert!(!is_legal_transition(C::Semicolon, class));
            assert!(!is_legal_transition(class, C::None));
        }
    }
}
