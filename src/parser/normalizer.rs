//! Whitespace normalization of raw Newick lines.

/// Removes all whitespace outside of quoted spans.
///
/// The line is split on double quotes first; every even segment (outside
/// double quotes) is then split on single quotes and only its even segments
/// are stripped. Quote styles therefore do not nest, and whitespace inside
/// `'...'` or `"..."` is kept so that quoted labels may contain spaces.
///
/// # Arguments
/// * `line` - Raw input line
///
/// # Returns
/// The normalized line, quotes and quoted content unchanged
///
/// # Examples
/// ```
/// # use cladewick::parser::normalizer::strip_whitespace;
/// assert_eq!(strip_whitespace(" (A : 1, B:2) ;\n"), "(A:1,B:2);");
/// assert_eq!(strip_whitespace("('Swamp hen' ,B);"), "('Swamp hen',B);");
/// assert_eq!(strip_whitespace("(\"Baillon's Crake\", B);"), "(\"Baillon's Crake\",B);");
/// ```
pub fn strip_whitespace(line: &str) -> String {
    let mut normalized = String::with_capacity(line.len());

    for (i, double_quoted) in line.split('"').enumerate() {
        if i > 0 {
            normalized.push('"');
        }
        if i % 2 == 1 {
            normalized.push_str(double_quoted);
            continue;
        }

        for (j, single_quoted) in double_quoted.split('\'').enumerate() {
            if j > 0 {
                normalized.push('\'');
            }
            if j % 2 == 1 {
                normalized.push_str(single_quoted);
            } else {
                normalized.extend(single_quoted.chars().filter(|c| !c.is_whitespace()));
            }
        }
    }

    normalized
}
