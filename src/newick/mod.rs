//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick strings into
//! [Tree]s, and [to_newick]/[write_newick_file] to write them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single string, returns a [Tree]
//! * [`parse_file`] - parses a file with one tree per line
//! * [`read_lines`] - reads the lines of a file (for lazy parsing)
//!
//! # Full API
//! For more control, configure a [NewickParser]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_lines`] - parse all trees eagerly
//! * [`NewickParser::into_iter`] - obtain an iterator over trees
//!
//! # Format
//! The Newick format has the following simple grammar:
//! * `tree ::= clade ';'`
//! * `clade ::= leaf | '(' clade (',' clade)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Labels are runs of letters, digits and `| + ^ ? . _ -`,
//!   or anything enclosed in single or double quotes
//! * Whitespace is ignored, except inside quoted labels
//! * Inner vertices may be unlabeled; missing branch lengths are `0`
//! * Extensions such as `[...]` comments or NHX annotations are not supported

mod defs;
pub mod parser;
pub mod writer;

pub use parser::{NewickIterator, NewickParser, precheck};
pub use writer::{to_newick, write_newick_file};

use crate::model::Tree;
use crate::parser::ParsingError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [Tree].
///
/// This is a convenience function for quick parsing of a single Newick string
/// using default settings and thus not requiring configuration of a parser.
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [Tree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use cladewick::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    NewickParser::new().parse_str(newick.as_ref())
}

/// Parses a file containing one Newick string per line.
///
/// Blank lines are skipped. Parsing stops at the first malformed line.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<Tree>` - All parsed trees, in file order
/// * [ParsingError] - If file reading fails or a line is not valid Newick
///
/// # Example
/// ```no_run
/// use cladewick::newick::parse_file;
///
/// let trees = parse_file("anseriformes.nwk")?;
/// println!("Parsed {} trees", trees.len());
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Tree>, ParsingError> {
    let lines = read_lines(&path)?;
    let trees = NewickParser::new().parse_lines(&lines)?;
    info!(
        path = %path.as_ref().display(),
        trees = trees.len(),
        "parsed newick file"
    );
    Ok(trees)
}

/// Reads all lines of a file.
///
/// # Errors
/// Returns [ParsingError::Io] if the file cannot be opened or read.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ParsingError> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(lines)
}
