//! C fixture template.
//!
//! One renderer covers both fixture flavours. [`EntryPoint`] picks the
//! wrapping function and [`FailureMode`] picks assert-and-abort versus
//! report-and-continue. Apart from those two choices and the kernel
//! blocking factor, the emitted translation unit is fixed text.

use crate::error::FixtureError;
use crate::literal::render_matrix;
use crate::matrix::Matrix;

/// Headers every fixture includes, in order.
pub const HEADERS: [&str; 4] = ["FLAME.h", "FQAM.h", "__kernels.h", "assertf.h"];

/// Kernel under test.
pub const KERNEL_NAME: &str = "kernel_kron_prod_rec";

/// Blocking factor passed as the kernel's last argument.
pub const DEFAULT_BLOCKING: u32 = 2;

/// Function name used by single-shot fixtures.
pub const DEFAULT_TEST_FUNCTION: &str = "test_tensor_1";

/// Function wrapping the fixture body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// `int main (void)`, a standalone test program.
    Main,
    /// `void <name> (void)`, linked into a larger test binary.
    TestFunction(String),
}

impl EntryPoint {
    /// A `void <name> (void)` entry point.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidIdentifier`] if `name` is not a C
    /// identifier.
    pub fn test_function(name: &str) -> Result<Self, FixtureError> {
        if is_c_identifier(name) {
            Ok(Self::TestFunction(name.to_string()))
        } else {
            Err(FixtureError::InvalidIdentifier(name.to_string()))
        }
    }

    fn signature(&self) -> String {
        match self {
            Self::Main => "int main (void)".to_string(),
            Self::TestFunction(name) => format!("void {name} (void)"),
        }
    }
}

/// What the fixture does once `C` has been compared with `C_ref`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// `assertf` on mismatch, aborting the test program.
    Abort,
    /// Print a pass/fail line labelled with `test_id` and keep going.
    Report { test_id: u32 },
}

/// Parameters of one rendered fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOptions {
    pub entry: EntryPoint,
    pub failure: FailureMode,
    pub blocking: u32,
}

impl TemplateOptions {
    /// `void test_tensor_1 (void)` that aborts on failure.
    pub fn single_shot() -> Self {
        Self {
            entry: EntryPoint::TestFunction(DEFAULT_TEST_FUNCTION.to_string()),
            failure: FailureMode::Abort,
            blocking: DEFAULT_BLOCKING,
        }
    }

    /// `int main (void)` that reports `test_id` and never aborts.
    pub fn batch(test_id: u32) -> Self {
        Self {
            entry: EntryPoint::Main,
            failure: FailureMode::Report { test_id },
            blocking: DEFAULT_BLOCKING,
        }
    }

    #[must_use]
    pub fn with_blocking(mut self, blocking: u32) -> Self {
        self.blocking = blocking;
        self
    }

    #[must_use]
    pub fn with_entry(mut self, entry: EntryPoint) -> Self {
        self.entry = entry;
        self
    }

    /// The `test_id` label, if this fixture reports one.
    pub fn test_id(&self) -> Option<u32> {
        match self.failure {
            FailureMode::Abort => None,
            FailureMode::Report { test_id } => Some(test_id),
        }
    }
}

/// Render the complete C translation unit for `a ⊗ b = c_ref`.
///
/// # Errors
///
/// Returns [`FixtureError::ShapeMismatch`] if `c_ref` is not
/// `(a.rows * b.rows) x (a.cols * b.cols)` and
/// [`FixtureError::InvalidBlocking`] for a zero blocking factor.
pub fn render_fixture(
    a: &Matrix,
    b: &Matrix,
    c_ref: &Matrix,
    options: &TemplateOptions,
) -> Result<String, FixtureError> {
    let (m, n) = a.shape();
    let (p, q) = b.shape();
    let (r, c) = (m * p, n * q);
    if c_ref.shape() != (r, c) {
        return Err(FixtureError::ShapeMismatch {
            rows: r,
            cols: c,
            found: c_ref.as_slice().len(),
        });
    }
    if options.blocking == 0 {
        return Err(FixtureError::InvalidBlocking);
    }

    let mut out = String::from("\n");
    for header in HEADERS {
        out.push_str(&format!("#include \"{header}\"\n"));
    }
    out.push_str(&format!("  {}    \n{{ \n", options.entry.signature()));

    out.push_str("FLA_Init();\n  \n");
    out.push_str("// Turn on parameter checking\n");
    out.push_str("FLA_Check_error_level_set(FLA_FULL_ERROR_CHECKING);\n");
    out.push_str("FLA_Obj A, B, C_ref, C, ZERO;\n");
    out.push_str("int m, n, p, q, r, c;\n\n");

    out.push_str("// Square matrices dimension\n");
    for (var, value) in [("m", m), ("n", n), ("p", p), ("q", q), ("r", r), ("c", c)] {
        out.push_str(&format!("{var} = {value};\n"));
    }
    out.push('\n');

    out.push_str("// Create FLA objects\n");
    out.push_str("FLA_Obj_create_without_buffer(FLA_DOUBLE, m, n, &A);\n");
    out.push_str("FLA_Obj_create_without_buffer(FLA_DOUBLE, p, q, &B);\n");
    out.push_str("FLA_Obj_create_without_buffer(FLA_DOUBLE, r, c, &C_ref);\n");
    out.push_str("FLA_Obj_create(FLA_DOUBLE, r, c, 1, c, &C);\n");
    out.push_str("FLA_Obj_create_constant (0.0, &ZERO);\n");
    out.push_str("FLA_Set(ZERO, C); // Initialize C to all zeros\n\n");

    out.push_str("// Create buffer for operands and reference\n");
    for (name, matrix) in [("A_arr", a), ("B_arr", b), ("C_arr_ref", c_ref)] {
        out.push_str(&format!(
            "double {name}[{}][{}] = {};\n",
            matrix.rows(),
            matrix.cols(),
            render_matrix(matrix)
        ));
    }
    out.push('\n');

    out.push_str("FLA_Obj_attach_buffer(A_arr, 1, m, &A);\n");
    out.push_str("FLA_Obj_attach_buffer(B_arr, 1, p, &B);\n");
    out.push_str("FLA_Obj_attach_buffer(C_arr_ref, 1, r, &C_ref);\n\n");

    out.push_str("// Execute kernel being tested\n");
    out.push_str(&format!("{KERNEL_NAME}(A, B, C, {});\n\n", options.blocking));

    out.push_str("// Check success\n");
    out.push_str("bool success = FLA_Obj_equals(C, C_ref);\n");
    match options.failure {
        FailureMode::Abort => {
            out.push_str("assertf(success, \"Failed test\");\n");
            out.push_str("printf (\"Passed test! \\n\");\n");
        }
        FailureMode::Report { test_id } => {
            out.push_str("if (success)\n");
            out.push_str(&format!("  printf (\"Passed test {test_id} \\n\");\n"));
            out.push_str("else\n");
            out.push_str(&format!("  printf (\"Failed test {test_id} \\n\");\n"));
        }
    }
    out.push_str("}\n");
    Ok(out)
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kron::kron;

    fn pair() -> (Matrix, Matrix, Matrix) {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::from_rows(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        let c = kron(&a, &b).unwrap();
        (a, b, c)
    }

    #[test]
    fn single_shot_uses_test_function_and_assert() {
        let (a, b, c) = pair();
        let code = render_fixture(&a, &b, &c, &TemplateOptions::single_shot()).unwrap();
        assert!(code.starts_with("\n#include \"FLAME.h\"\n"));
        assert!(code.contains("  void test_tensor_1 (void)    \n{ \n"));
        assert!(code.contains("assertf(success, \"Failed test\");"));
        assert!(code.contains("printf (\"Passed test! \\n\");"));
        assert!(!code.contains("int main"));
        assert!(code.ends_with("}\n"));
    }

    #[test]
    fn batch_uses_main_and_reports_id() {
        let (a, b, c) = pair();
        let code = render_fixture(&a, &b, &c, &TemplateOptions::batch(7)).unwrap();
        assert!(code.contains("  int main (void)    \n"));
        assert!(code.contains("  printf (\"Passed test 7 \\n\");"));
        assert!(code.contains("  printf (\"Failed test 7 \\n\");"));
        assert!(!code.contains("assertf("));
    }

    #[test]
    fn includes_all_headers_in_order() {
        let (a, b, c) = pair();
        let code = render_fixture(&a, &b, &c, &TemplateOptions::batch(0)).unwrap();
        let positions: Vec<usize> = HEADERS
            .iter()
            .map(|h| code.find(&format!("#include \"{h}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn dimensions_and_declarations() {
        let a = Matrix::column_vector(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::column_vector(vec![5.0, 6.0]).unwrap();
        let c = kron(&a, &b).unwrap();
        let code = render_fixture(&a, &b, &c, &TemplateOptions::batch(0)).unwrap();
        for line in ["m = 4;", "n = 1;", "p = 2;", "q = 1;", "r = 8;", "c = 1;"] {
            assert!(code.contains(&format!("\n{line}\n")), "missing {line}");
        }
        assert!(code.contains("double A_arr[4][1] = {{1.0},"));
        assert!(code.contains("double B_arr[2][1] = {{5.0},\n {6.0}};"));
        assert!(code.contains("double C_arr_ref[8][1] = {{5.0},"));
    }

    #[test]
    fn kernel_call_uses_blocking() {
        let (a, b, c) = pair();
        let default = render_fixture(&a, &b, &c, &TemplateOptions::single_shot()).unwrap();
        assert!(default.contains("kernel_kron_prod_rec(A, B, C, 2);"));
        let custom = render_fixture(
            &a,
            &b,
            &c,
            &TemplateOptions::single_shot().with_blocking(4),
        )
        .unwrap();
        assert!(custom.contains("kernel_kron_prod_rec(A, B, C, 4);"));
    }

    #[test]
    fn zero_blocking_rejected() {
        let (a, b, c) = pair();
        let err =
            render_fixture(&a, &b, &c, &TemplateOptions::batch(0).with_blocking(0)).unwrap_err();
        assert!(matches!(err, FixtureError::InvalidBlocking));
    }

    #[test]
    fn mismatched_reference_rejected() {
        let (a, b, _) = pair();
        let wrong = Matrix::column_vector(vec![1.0; 4]).unwrap();
        let err = render_fixture(&a, &b, &wrong, &TemplateOptions::batch(0)).unwrap_err();
        assert!(matches!(
            err,
            FixtureError::ShapeMismatch {
                rows: 4,
                cols: 4,
                found: 4
            }
        ));
    }

    #[test]
    fn custom_test_function() {
        let (a, b, c) = pair();
        let opts = TemplateOptions::single_shot()
            .with_entry(EntryPoint::test_function("test_kron_small").unwrap());
        let code = render_fixture(&a, &b, &c, &opts).unwrap();
        assert!(code.contains("  void test_kron_small (void)    \n"));
        assert_eq!(opts.test_id(), None);
        assert_eq!(TemplateOptions::batch(3).test_id(), Some(3));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_c_identifier("test_tensor_1"));
        assert!(is_c_identifier("_x"));
        assert!(!is_c_identifier("1abc"));
        assert!(!is_c_identifier("has-dash"));
        assert!(!is_c_identifier(""));
        assert!(matches!(
            EntryPoint::test_function("bad name"),
            Err(FixtureError::InvalidIdentifier(_))
        ));
    }
}
