//! Lexical layer of the Newick parser and its error types.
//!
//! A raw line passes [normalizer::strip_whitespace] and then
//! [tokenizer::tokenize]; the resulting tokens are consumed by the
//! [NewickParser](crate::newick::NewickParser).

pub mod normalizer;
pub mod parsing_error;
pub mod tokenizer;
pub mod utils;

pub use parsing_error::{FormatErrorKind, ParsingError};
pub use tokenizer::{Token, TokenClass};
