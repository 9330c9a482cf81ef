//! A generated fixture: operands, reference product and C source.

use crate::error::FixtureError;
use crate::kron::kron;
use crate::matrix::Matrix;
use crate::template::{TemplateOptions, render_fixture};

/// File name of the batch fixture labelled `test_id`.
pub fn batch_file_name(test_id: u32) -> String {
    format!("test_kron_{test_id}.c")
}

/// One rendered fixture. Built once and never modified.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub a: Matrix,
    pub b: Matrix,
    /// `a ⊗ b`, embedded as the expected value.
    pub c_ref: Matrix,
    pub options: TemplateOptions,
    pub source: String,
}

impl Fixture {
    /// Compute `a ⊗ b` and render the C source for it.
    ///
    /// # Errors
    ///
    /// Propagates [`kron`] overflow and [`render_fixture`] errors.
    pub fn new(a: Matrix, b: Matrix, options: TemplateOptions) -> Result<Self, FixtureError> {
        let c_ref = kron(&a, &b)?;
        let source = render_fixture(&a, &b, &c_ref, &options)?;
        tracing::debug!(
            a = ?a.shape(),
            b = ?b.shape(),
            c_ref = ?c_ref.shape(),
            test_id = ?options.test_id(),
            bytes = source.len(),
            "rendered fixture"
        );
        Ok(Self {
            a,
            b,
            c_ref,
            options,
            source,
        })
    }

    pub fn test_id(&self) -> Option<u32> {
        self.options.test_id()
    }

    /// `test_kron_<id>.c` for reporting fixtures, `None` otherwise.
    pub fn file_name(&self) -> Option<String> {
        self.test_id().map(batch_file_name)
    }
}
