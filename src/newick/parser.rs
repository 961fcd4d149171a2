//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse single strings or sequences of lines, as well as lazy parsing
//! via a [NewickIterator].
//!
//! # Pipeline
//! 1. [strip_whitespace] removes whitespace outside quoted labels
//! 2. [tokenize] splits the string into [Token]s
//! 3. [precheck] cheaply rejects obviously malformed token sequences
//! 4. A transition automaton validates each token against the transition
//!    table and at the same time builds the tree with a [TreeBuilder]

use crate::model::tree_builder::{DEFAULT_NUM_VERTICES_GUESS, TreeBuilder};
use crate::model::{Tree, VertexIndex};
use crate::newick::defs::is_legal_transition;
use crate::parser::normalizer::strip_whitespace;
use crate::parser::parsing_error::{FormatErrorKind, ParsingError};
use crate::parser::tokenizer::{Token, TokenClass, tokenize};
use crate::parser::utils::parse_branch_length;
use tracing::{debug, trace, warn};

/// Rejection reason together with the index of the offending token.
type Rejection = (FormatErrorKind, usize);

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================$=
/// Parser (configuration) for Newick strings, one tree per string/line.
///
/// # Configuration
/// * [`with_num_vertices(num_vertices)`](Self::with_num_vertices)
///     - Can be configured with the expected number of vertices per tree for
///       pre-allocation, otherwise it is inferred from the first parsed tree
///       and then reused.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_lines`](Self::parse_lines) - Parse all trees eagerly
/// * [`into_iter`](Self::into_iter) - Parse trees lazily
///
/// # Example
/// ```
/// use cladewick::newick::NewickParser;
///
/// let mut parser = NewickParser::new();
/// let tree = parser.parse_str("((Kiwi:1.0,Emu:1.0):0.5,Ostrich:1.5);").unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    know_num_vertices: bool,
    num_vertices: usize,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            know_num_vertices: false,
            num_vertices: DEFAULT_NUM_VERTICES_GUESS,
        }
    }

    /// Sets the expected number of vertices in each parsed tree.
    ///
    /// This allows pre-allocation of the arena. If not set, the size of the
    /// first parsed tree is used for subsequent trees.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self.know_num_vertices = true;
        self
    }
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick string into a [Tree].
    ///
    /// # Arguments
    /// * `newick` - Raw Newick string terminated by `;`; whitespace outside
    ///   quoted labels is ignored
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError::Format)` - If the string is not valid Newick,
    ///   carrying the original string
    pub fn parse_str(&mut self, newick: &str) -> Result<Tree, ParsingError> {
        let normalized = strip_whitespace(newick);
        let tokens = tokenize(&normalized);

        let tree = precheck(&tokens)
            .and_then(|()| self.build(&tokens))
            .map_err(|(kind, position)| {
                debug!(%kind, position, "rejected newick string");
                ParsingError::format(kind, position, newick)
            })?;

        if !self.know_num_vertices {
            self.num_vertices = tree.num_vertices();
            self.know_num_vertices = true;
        }
        debug!(
            leaves = tree.num_leaves(),
            inner = tree.num_inner(),
            "parsed tree"
        );

        Ok(tree)
    }

    /// Parses one tree per line, skipping blank lines.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees, in order
    /// * `Err(ParsingError)` - For the first malformed line
    pub fn parse_lines<I, S>(&mut self, lines: I) -> Result<Vec<Tree>, ParsingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| self.parse_str(line.as_ref()))
            .collect()
    }

    /// Consumes the parser and returns an iterator parsing one tree per line
    /// lazily. Blank lines are skipped.
    ///
    /// The parser can be retrieved again via [NewickIterator::into_parser].
    pub fn into_iter<I, S>(self, lines: I) -> NewickIterator<I::IntoIter>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        NewickIterator {
            parser: self,
            lines: lines.into_iter(),
            done: false,
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Runs the transition automaton over all tokens.
    fn build(&self, tokens: &[Token<'_>]) -> Result<Tree, Rejection> {
        let mut automaton = Automaton::new(TreeBuilder::with_capacity(self.num_vertices));
        for (position, token) in tokens.iter().enumerate() {
            automaton.step(token).map_err(|kind| (kind, position))?;
        }
        automaton.finish().map_err(|kind| (kind, tokens.len()))
    }
}

/// Fast structural gate run before the transition automaton.
///
/// Rejects:
/// - an empty token sequence
/// - a sequence containing `(` that does not start with `(`,
///   or opening a second top-level clade
/// - a `)` while no clade is open, or clades left open at the end
/// - a `,` outside of any clade
///
/// Passing does not imply that the sequence is valid Newick.
///
/// # Returns
/// `Ok(())` if passed, else the reason and the index of the offending token
pub fn precheck(tokens: &[Token<'_>]) -> Result<(), (FormatErrorKind, usize)> {
    let Some(first) = tokens.first() else {
        return Err((FormatErrorKind::EmptyInput, 0));
    };
    if *first != Token::Open && tokens.contains(&Token::Open) {
        return Err((FormatErrorKind::MisplacedOpening, 0));
    }

    let mut depth: usize = 0;
    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::Open => {
                if depth == 0 && position > 0 {
                    return Err((FormatErrorKind::MisplacedOpening, position));
                }
                depth += 1;
            }
            Token::Close => {
                if depth == 0 {
                    return Err((FormatErrorKind::UnbalancedParentheses, position));
                }
                depth -= 1;
            }
            Token::Comma if depth == 0 => {
                return Err((FormatErrorKind::TopLevelComma, position));
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err((FormatErrorKind::UnbalancedParentheses, tokens.len()));
    }
    Ok(())
}

// =#========================================================================#=
// TRANSITION AUTOMATON
// =#========================================================================$=
/// Validates and builds in a single pass.
///
/// Instead of an explicit stack, the automaton keeps the clade currently
/// receiving children (`parent`); closing a clade moves up via the parent
/// link of the builder.
struct Automaton {
    builder: TreeBuilder,
    prev: TokenClass,
    /// Clade that new vertices are attached to
    parent: Option<VertexIndex>,
    /// Vertex a following `:length` (or a label after `)`) applies to
    current: Option<VertexIndex>,
}

impl Automaton {
    fn new(builder: TreeBuilder) -> Self {
        Self {
            builder,
            prev: TokenClass::None,
            parent: None,
            current: None,
        }
    }

    fn step(&mut self, token: &Token<'_>) -> Result<(), FormatErrorKind> {
        let class = token.class();
        if !is_legal_transition(self.prev, class) {
            return Err(FormatErrorKind::IllegalTransition {
                from: self.prev,
                to: class,
            });
        }
        trace!(from = %self.prev, to = %class, "transition");

        match token {
            Token::Open => {
                let clade = self.builder.add_clade(self.parent);
                self.parent = Some(clade);
                self.current = Some(clade);
            }
            Token::Close => {
                let closed = self.parent.ok_or(FormatErrorKind::UnbalancedParentheses)?;
                self.current = Some(closed);
                self.parent = self.builder.parent_of(closed);
            }
            Token::Colon | Token::Comma | Token::Semicolon => {}
            Token::Unquoted(_) | Token::Quoted(_) => self.atom(token)?,
        }

        self.prev = class;
        Ok(())
    }

    /// Interprets an atom by context: branch length after `:`,
    /// label of the just closed clade after `)`, new leaf otherwise.
    ///
    /// A number after `:` that is not finite (`1e999`, `inf`, `nan`) is
    /// rejected rather than turned into a leaf.
    fn atom(&mut self, token: &Token<'_>) -> Result<(), FormatErrorKind> {
        let text = token.text().unwrap_or_default();
        let branch_length = match token {
            Token::Unquoted(_) if self.prev == TokenClass::Colon => parse_branch_length(text),
            _ => None,
        };
        if branch_length.is_some_and(|length| !length.is_finite()) {
            return Err(FormatErrorKind::InvalidBranchLength(text.to_string()));
        }

        match (self.current, branch_length) {
            (Some(current), Some(length)) => self.builder.set_branch_length(current, length),
            (Some(current), None) if self.prev == TokenClass::Close => {
                self.builder.set_label(current, text.to_string());
            }
            _ => {
                if self.prev == TokenClass::Colon {
                    if self.parent.is_none() {
                        return Err(FormatErrorKind::InvalidBranchLength(text.to_string()));
                    }
                    warn!(text, "branch length is not a number, adding it as vertex");
                }
                let leaf = self.builder.add_leaf(self.parent, text.to_string());
                self.current = Some(leaf);
            }
        }

        Ok(())
    }

    fn finish(self) -> Result<Tree, FormatErrorKind> {
        if self.prev != TokenClass::Semicolon {
            return Err(FormatErrorKind::MissingTerminator);
        }
        self.builder.finish_tree().ok_or(FormatErrorKind::EmptyInput)
    }
}

// =#========================================================================#=
// NEWICK ITERATOR (lazy parser)
// =#========================================================================$=
/// Iterator to parse Newick trees, one per line.
///
/// Created by [NewickParser::into_iter()].
/// Yields `Result<Tree, ParsingError>` for each non-blank line and stops
/// after the first error.
pub struct NewickIterator<I> {
    parser: NewickParser,
    lines: I,
    done: bool,
}

impl<I> NewickIterator<I> {
    /// Consumes the iterator and returns the underlying [NewickParser].
    pub fn into_parser(self) -> NewickParser {
        self.parser
    }
}

impl<I, S> Iterator for NewickIterator<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Tree, ParsingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let line = self.lines.find(|line| !line.as_ref().trim().is_empty())?;
        let result = self.parser.parse_str(line.as_ref());
        if result.is_err() {
            self.done = true;
        }

        Some(result)
    }
}
