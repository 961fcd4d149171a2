//! Lexical analysis of normalized Newick strings.
//!
//! [tokenize] splits a string into [Token]s; each token belongs to one of the
//! [TokenClass]es driving the transition automaton of the Newick parser.
//! Purely lexical: no grammar checks happen here.

use std::fmt;
use tracing::warn;

// =#========================================================================#=
// TOKEN CLASS
// =#========================================================================$=
/// Token classes of the Newick transition table.
///
/// [None](TokenClass::None) is the initial state before any token was read;
/// [Atom](TokenClass::Atom) covers labels as well as numeric literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    None = 0,
    Open = 1,
    Close = 2,
    Colon = 3,
    Comma = 4,
    Semicolon = 5,
    Atom = 6,
}

/// Number of token classes, i.e. the dimension of the transition table.
pub const NUM_TOKEN_CLASSES: usize = 7;

impl TokenClass {
    /// Returns the row/column of this class in the transition table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenClass::None => write!(f, "start of input"),
            TokenClass::Open => write!(f, "'('"),
            TokenClass::Close => write!(f, "')'"),
            TokenClass::Colon => write!(f, "':'"),
            TokenClass::Comma => write!(f, "','"),
            TokenClass::Semicolon => write!(f, "';'"),
            TokenClass::Atom => write!(f, "label"),
        }
    }
}

// =#========================================================================#=
// TOKEN
// =#========================================================================$=
/// A lexical unit of a Newick string, borrowing from the tokenized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// Run of letters, digits and `| + ^ ? . _ -` (label or number)
    Unquoted(&'a str),
    /// Content between matching single or double quotes, quotes excluded
    Quoted(&'a str),
}

impl<'a> Token<'a> {
    /// Returns the class of this token.
    pub fn class(&self) -> TokenClass {
        match self {
            Token::Open => TokenClass::Open,
            Token::Close => TokenClass::Close,
            Token::Comma => TokenClass::Comma,
            Token::Colon => TokenClass::Colon,
            Token::Semicolon => TokenClass::Semicolon,
            Token::Unquoted(_) | Token::Quoted(_) => TokenClass::Atom,
        }
    }

    /// Returns the text of an atom, `None` for punctuation.
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Token::Unquoted(text) | Token::Quoted(text) => Some(text),
            _ => None,
        }
    }
}

/// Returns whether `c` may appear in an unquoted label or number.
#[inline]
pub fn is_unquoted_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '|' | '+' | '^' | '?' | '.' | '_' | '-')
}

// =#========================================================================#=
// TOKENIZE
// =#========================================================================$=
/// Splits a (normalized) Newick string into tokens.
///
/// A quote without matching closing quote, as well as any character that is
/// neither punctuation, quote, nor part of an unquoted run, is skipped
/// (with a warning), which includes whitespace.
///
/// # Arguments
/// * `newick` - Newick string, typically already normalized
///
/// # Returns
/// The tokens in input order
///
/// # Examples
/// ```
/// # use cladewick::parser::tokenizer::{tokenize, Token};
/// let tokens = tokenize("('Swamp hen':0.5,B);");
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Open,
///         Token::Quoted("Swamp hen"),
///         Token::Colon,
///         Token::Unquoted("0.5"),
///         Token::Comma,
///         Token::Unquoted("B"),
///         Token::Close,
///         Token::Semicolon,
///     ]
/// );
/// ```
pub fn tokenize(newick: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = newick.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            ',' => tokens.push(Token::Comma),
            ':' => tokens.push(Token::Colon),
            ';' => tokens.push(Token::Semicolon),
            '\'' | '"' => {
                let content_start = start + c.len_utf8();
                match newick[content_start..].find(c) {
                    Some(len) => {
                        tokens.push(Token::Quoted(&newick[content_start..content_start + len]));
                        // Skip past the closing quote
                        let closing = content_start + len;
                        while chars.next_if(|&(i, _)| i <= closing).is_some() {}
                    }
                    None => warn!(position = start, "skipping unmatched quote {c:?}"),
                }
            }
            c if is_unquoted_char(c) => {
                let mut end = start + c.len_utf8();
                while let Some((i, next)) = chars.next_if(|&(_, next)| is_unquoted_char(next)) {
                    end = i + next.len_utf8();
                }
                tokens.push(Token::Unquoted(&newick[start..end]));
            }
            c if c.is_whitespace() => {}
            c => warn!(position = start, "skipping unrecognized character {c:?}"),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_and_runs() {
        let tokens = tokenize("((A_1:1e-5,B|x):+2.5,C^?)root;");
        let classes: Vec<_> = tokens.iter().map(Token::class).collect();
        assert_eq!(
            classes,
            vec![
                TokenClass::Open,
                TokenClass::Open,
                TokenClass::Atom,
                TokenClass::Colon,
                TokenClass::Atom,
                TokenClass::Comma,
                TokenClass::Atom,
                TokenClass::Close,
                TokenClass::Colon,
                TokenClass::Atom,
                TokenClass::Comma,
                TokenClass::Atom,
                TokenClass::Close,
                TokenClass::Atom,
                TokenClass::Semicolon,
            ]
        );
        assert_eq!(tokens[2], Token::Unquoted("A_1"));
        assert_eq!(tokens[4], Token::Unquoted("1e-5"));
        assert_eq!(tokens[6], Token::Unquoted("B|x"));
        assert_eq!(tokens[9], Token::Unquoted("+2.5"));
        assert_eq!(tokens[13], Token::Unquoted("root"));
    }

    #[test]
    fn test_quoted_keeps_embedded_characters() {
        let tokens = tokenize("('a,(b):c;',\"Baillon's Crake\");");
        assert_eq!(tokens[1], Token::Quoted("a,(b):c;"));
        assert_eq!(tokens[3], Token::Quoted("Baillon's Crake"));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_empty_quotes() {
        assert_eq!(tokenize("''"), vec![Token::Quoted("")]);
    }

    #[test]
    fn test_unmatched_quote_is_skipped() {
        assert_eq!(tokenize("'abc"), vec![Token::Unquoted("abc")]);
    }

    #[test]
    fn test_unrecognized_characters_are_skipped() {
        assert_eq!(
            tokenize("A[x]*;"),
            vec![
                Token::Unquoted("A"),
                Token::Unquoted("x"),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn test_non_ascii_in_quotes() {
        assert_eq!(tokenize("'Kākāpō'"), vec![Token::Quoted("Kākāpō")]);
    }

    #[test]
    fn test_text() {
        assert_eq!(Token::Quoted("A B").text(), Some("A B"));
        assert_eq!(Token::Comma.text(), None);
    }
}
