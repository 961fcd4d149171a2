//! Newick string and file writing.

use crate::model::{Tree, Vertex, VertexIndex};
use crate::parser::utils::quote_label;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Extra buffer per vertex in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Writes given list of trees to a file in Newick format, one tree per line.
///
/// # Arguments
/// * `path` - The file to (over)write
/// * `trees` - Trees to write
///
/// # Errors
/// Returns an I/O error if creating or writing the file fails.
///
/// # Example
/// ```no_run
/// use cladewick::newick::{parse_str, write_newick_file};
///
/// let tree = parse_str("((Kiwi,Emu),Ostrich);")?;
/// write_newick_file("ratites.nwk", &[tree])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_newick_file<P: AsRef<Path>>(path: P, trees: &[Tree]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// A leaf is written as `label:length`, an inner vertex as
/// `(child,child,...)label:length` with the label omitted if absent.
/// Every vertex, the root included, gets its branch length. Labels are quoted
/// if necessary (see [quote_label]). The output is structurally equivalent
/// to the parsed input, though not necessarily identical to it.
///
/// The tree is traversed with an explicit stack, so deep trees are fine.
///
/// # Example
/// ```
/// use cladewick::newick::{parse_str, to_newick};
///
/// let tree = parse_str("(A:1, (B:2.5,'C c':3)x:4);").unwrap();
/// assert_eq!(to_newick(&tree), "(A:1,(B:2.5,'C c':3)x:4):0;");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(tree));

    // (vertex, index of next child to write)
    let mut stack: Vec<(VertexIndex, usize)> = vec![(tree.root_index(), 0)];
    while let Some((index, next_child)) = stack.pop() {
        let vertex = &tree[index];
        if vertex.is_leaf() {
            push_label_and_length(&mut newick, vertex);
            continue;
        }

        let children = vertex.children();
        if next_child == 0 {
            newick.push('(');
        } else if next_child < children.len() {
            newick.push(',');
        }

        if next_child < children.len() {
            stack.push((index, next_child + 1));
            stack.push((children[next_child], 0));
        } else {
            newick.push(')');
            push_label_and_length(&mut newick, vertex);
        }
    }

    newick.push(';');
    newick
}

fn push_label_and_length(newick: &mut String, vertex: &Vertex) {
    if let Some(label) = vertex.label() {
        newick.push_str(&quote_label(label));
    }
    newick.push(':');
    newick.push_str(&vertex.branch_length().to_string());
}

/// Estimates the length of the Newick string of the given tree.
fn estimate_newick_len(tree: &Tree) -> usize {
    let label_len: usize = tree
        .pre_order_iter()
        .filter_map(Vertex::label)
        .map(str::len)
        .sum();
    label_len + tree.num_vertices() * BUFFER_CHARS
}
