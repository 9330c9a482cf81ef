//! C array-initializer literals for matrices.
//!
//! Renders every element (no summarization, whatever the size) with
//! shortest round-trip precision, and wraps long rows at a fixed width:
//!
//! ```text
//! {{0.5, 0.25},
//!  {1.0, 0.0}}
//! ```
//!
//! A row that does not fit breaks before the element that would overflow
//! and continues on a line indented by two spaces.

mod float;
mod parse;

pub use float::format_f64;
pub use parse::parse_matrix_literal;

use crate::matrix::Matrix;

/// Maximum rendered line width, including indentation.
pub const LINE_WIDTH: usize = 75;

const SEPARATOR: &str = ", ";
const ROW_INDENT: &str = " ";
const WRAP_INDENT: &str = "  ";

/// Render `matrix` as a C initializer for `double name[rows][cols]`.
pub fn render_matrix(matrix: &Matrix) -> String {
    let mut out = String::from("{");
    let last = matrix.rows() - 1;
    for (i, row) in matrix.iter_rows().enumerate() {
        if i > 0 {
            out.push_str(ROW_INDENT);
        }
        out.push_str(&render_row(row));
        if i < last {
            out.push_str(",\n");
        }
    }
    out.push('}');
    out
}

fn render_row(row: &[f64]) -> String {
    // Nested rows lose one column to the outer closing brace, and every
    // element but the last is followed by a trailing comma.
    let elem_width = LINE_WIDTH - 1 - SEPARATOR.trim_end().len();

    let mut done = String::new();
    let mut line = String::from(WRAP_INDENT);
    let last = row.len() - 1;
    for (j, &value) in row.iter().enumerate() {
        let word = format_f64(value);
        if line.len() + word.len() > elem_width && line.len() > WRAP_INDENT.len() {
            done.push_str(line.trim_end());
            done.push('\n');
            line = String::from(WRAP_INDENT);
        }
        line.push_str(&word);
        if j < last {
            line.push_str(SEPARATOR);
        }
    }
    done.push_str(&line);

    format!("{{{}}}", &done[WRAP_INDENT.len()..])
}
