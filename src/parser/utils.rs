//! Utility functions for labels and numbers in Newick strings.
//!
//! Labels are stored unquoted in the tree model. When writing, labels that
//! could not be read back as a single unquoted token get quoted again.

use crate::parser::tokenizer::is_unquoted_char;

/// Checks if a label can be written without quotes, that is,
/// it is non-empty and consists only of letters, digits and `| + ^ ? . _ -`.
///
/// # Examples
/// ```
/// # use cladewick::parser::utils::is_plain_label;
/// assert!(is_plain_label("Pukeko"));
/// assert!(is_plain_label("Porphyrio_melanotus"));
/// assert!(!is_plain_label("Australasian Swamphen"));
/// assert!(!is_plain_label("Pu[ke]ko"));
/// assert!(!is_plain_label(""));
/// ```
pub fn is_plain_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(is_unquoted_char)
}

/// Quotes a label for writing it into a Newick string if necessary.
///
/// Plain labels are returned as-is. Others are wrapped in single quotes,
/// or in double quotes if the label itself contains a single quote.
/// Since quote styles do not nest, a label containing both quote characters
/// cannot be represented and is wrapped in single quotes regardless.
///
/// # Examples
/// ```
/// # use cladewick::parser::utils::quote_label;
/// assert_eq!(quote_label("Pukeko"), "Pukeko");
/// assert_eq!(quote_label("Australasian Swamphen"), "'Australasian Swamphen'");
/// assert_eq!(quote_label("Baillon's Crake"), "\"Baillon's Crake\"");
/// assert_eq!(quote_label(""), "''");
/// ```
pub fn quote_label(label: &str) -> String {
    if is_plain_label(label) {
        label.to_string()
    } else if label.contains('\'') && !label.contains('"') {
        format!("\"{label}\"")
    } else {
        format!("'{label}'")
    }
}

/// Parses the text of an atom as branch length.
///
/// Accepts anything Rust parses as `f64`, including scientific notation,
/// signs, and the non-finite `inf` and `nan`. Callers decide whether a
/// non-finite value is acceptable.
///
/// # Returns
/// `Some(length)` if `text` is a number, `None` otherwise
///
/// # Examples
/// ```
/// # use cladewick::parser::utils::parse_branch_length;
/// assert_eq!(parse_branch_length("0.5"), Some(0.5));
/// assert_eq!(parse_branch_length("1e-3"), Some(0.001));
/// assert_eq!(parse_branch_length("-2"), Some(-2.0));
/// assert_eq!(parse_branch_length("1e999"), Some(f64::INFINITY));
/// assert!(parse_branch_length("nan").is_some_and(f64::is_nan));
/// assert_eq!(parse_branch_length("Kea"), None);
/// ```
pub fn parse_branch_length(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}
