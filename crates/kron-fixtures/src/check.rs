//! Consistency checks for generated fixtures.
//!
//! Re-reads C source produced by [`crate::template::render_fixture`] and
//! confirms that the declared array sizes match their literals, that the
//! dimension variables agree with the declarations, and that the embedded
//! reference really is the Kronecker product of the embedded operands.

use std::path::Path;

use serde::Serialize;

use crate::error::{FixtureError, Severity, Violation};
use crate::kron::kron;
use crate::literal::parse_matrix_literal;
use crate::matrix::Matrix;
use crate::template::KERNEL_NAME;

/// Outcome of checking one fixture.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// `[m, n, p, q, r, c]` as assigned in the source, when all present.
    pub dims: Option<[usize; 6]>,
    pub violations: Vec<Violation>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.violations
            .iter()
            .all(|v| v.severity != Severity::Error)
    }
}

/// Check a fixture file on disk.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] if the file cannot be read.
pub fn check_fixture_file(path: &Path) -> Result<CheckReport, FixtureError> {
    let source = std::fs::read_to_string(path)?;
    Ok(check_fixture(&source))
}

/// Check fixture source text.
pub fn check_fixture(source: &str) -> CheckReport {
    let mut violations = Vec::new();

    let mut dims = [0usize; 6];
    let mut all_dims = true;
    for (slot, var) in dims.iter_mut().zip(["m", "n", "p", "q", "r", "c"]) {
        if let Some(v) = dimension(source, var) {
            *slot = v;
        } else {
            all_dims = false;
            violations.push(Violation::new(
                Severity::Error,
                "CHECK-001",
                format!("missing dimension assignment `{var} = <n>;`"),
                var,
            ));
        }
    }

    let arrays: Vec<Option<Matrix>> = ["A_arr", "B_arr", "C_arr_ref"]
        .into_iter()
        .map(|name| array(source, name, &mut violations))
        .collect();

    if all_dims {
        let [m, n, p, q, r, c] = dims;
        match (m.checked_mul(p), n.checked_mul(q)) {
            (Some(mp), Some(nq)) if mp == r && nq == c => {}
            (Some(mp), Some(nq)) => violations.push(Violation::new(
                Severity::Error,
                "CHECK-003",
                format!("r = {r}, c = {c} but m*p = {mp}, n*q = {nq}"),
                "dimensions",
            )),
            _ => violations.push(Violation::new(
                Severity::Error,
                "CHECK-003",
                format!("m*p or n*q overflows for m = {m}, n = {n}, p = {p}, q = {q}"),
                "dimensions",
            )),
        }
        let expected = [("A_arr", (m, n)), ("B_arr", (p, q)), ("C_arr_ref", (r, c))];
        for ((name, shape), matrix) in expected.iter().zip(&arrays) {
            if let Some(matrix) = matrix
                && matrix.shape() != *shape
            {
                violations.push(Violation::new(
                    Severity::Error,
                    "CHECK-003",
                    format!(
                        "{name} is {}x{} but dimension variables give {}x{}",
                        matrix.rows(),
                        matrix.cols(),
                        shape.0,
                        shape.1
                    ),
                    name,
                ));
            }
        }
    }

    if let [Some(a), Some(b), Some(c_ref)] = arrays.as_slice() {
        let matches = kron(a, b).is_ok_and(|expected| expected.bitwise_eq(c_ref));
        if !matches {
            violations.push(Violation::new(
                Severity::Error,
                "CHECK-004",
                "C_arr_ref is not the Kronecker product of A_arr and B_arr".to_string(),
                "C_arr_ref",
            ));
        }
    }

    if !source.contains(&format!("{KERNEL_NAME}(A, B, C, ")) {
        violations.push(Violation::new(
            Severity::Error,
            "CHECK-005",
            format!("no call to {KERNEL_NAME}"),
            "kernel",
        ));
    }

    CheckReport {
        dims: all_dims.then_some(dims),
        violations,
    }
}

/// Value of a `var = <n>;` line.
fn dimension(source: &str, var: &str) -> Option<usize> {
    let prefix = format!("{var} = ");
    source.lines().find_map(|line| {
        line.strip_prefix(&prefix)?
            .strip_suffix(';')?
            .trim()
            .parse()
            .ok()
    })
}

/// Parse `double <name>[R][C] = {...};`, checking declared against actual
/// shape.
fn array(source: &str, name: &str, violations: &mut Vec<Violation>) -> Option<Matrix> {
    let decl = format!("double {name}[");
    let Some(start) = source.find(&decl) else {
        violations.push(Violation::new(
            Severity::Error,
            "CHECK-001",
            format!("missing declaration of {name}"),
            name,
        ));
        return None;
    };

    let rest = &source[start + decl.len() - 1..];
    let parsed = declared_shape(rest).and_then(|(shape, body)| {
        let end = body.find(';')?;
        Some((shape, &body[..end]))
    });
    let Some((declared, literal)) = parsed else {
        violations.push(Violation::new(
            Severity::Error,
            "CHECK-001",
            format!("malformed declaration of {name}"),
            name,
        ));
        return None;
    };

    match parse_matrix_literal(literal) {
        Ok(matrix) => {
            if matrix.shape() != declared {
                violations.push(Violation::new(
                    Severity::Error,
                    "CHECK-002",
                    format!(
                        "{name} declared {}x{} but literal is {}x{}",
                        declared.0,
                        declared.1,
                        matrix.rows(),
                        matrix.cols()
                    ),
                    name,
                ));
            }
            Some(matrix)
        }
        Err(e) => {
            violations.push(Violation::new(
                Severity::Error,
                "CHECK-002",
                format!("{name}: {e}"),
                name,
            ));
            None
        }
    }
}

/// `[R][C] = <body>` → `((R, C), <body>)`
fn declared_shape(text: &str) -> Option<((usize, usize), &str)> {
    let (rows, text) = bracketed(text)?;
    let (cols, text) = bracketed(text)?;
    let body = text.trim_start().strip_prefix('=')?;
    Some(((rows, cols), body))
}

fn bracketed(text: &str) -> Option<(usize, &str)> {
    let inner = text.strip_prefix('[')?;
    let end = inner.find(']')?;
    let value = inner[..end].trim().parse().ok()?;
    Some((value, &inner[end + 1..]))
}
