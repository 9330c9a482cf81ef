//! YAML generation plans.
//!
//! A plan bundles the seed, kernel blocking factor and the settings of a
//! single-shot and/or batch run, so a fixture set can be regenerated from
//! one checked-in file.

mod parser;
mod types;
mod validator;

pub use parser::{parse_plan, parse_plan_str};
pub use types::*;
pub use validator::validate_plan;

use crate::error::{FixtureError, error_count};
use crate::fixture::Fixture;
use crate::generate::{
    BatchConfig, GeneratedFiles, SingleConfig, generate_batch, generate_single, resolve_seed,
    seeded_rng,
};
use crate::matrix::Matrix;
use crate::template::{EntryPoint, TemplateOptions};

impl SingleSection {
    /// Driver settings for this section.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidIdentifier`] for a bad function name.
    pub fn to_config(&self, blocking: u32) -> Result<SingleConfig, FixtureError> {
        Ok(SingleConfig {
            rows: self.rows,
            cols: self.cols,
            path: self.path.clone(),
            options: TemplateOptions::single_shot()
                .with_entry(EntryPoint::test_function(&self.function)?)
                .with_blocking(blocking),
        })
    }

    /// Explicit operands, if the section gives them.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Plan`] if only one operand is given, and the
    /// [`Matrix::from_rows`] errors for malformed ones.
    pub fn operands(&self) -> Result<Option<(Matrix, Matrix)>, FixtureError> {
        match (&self.a, &self.b) {
            (Some(a), Some(b)) => Ok(Some((Matrix::from_rows(a)?, Matrix::from_rows(b)?))),
            (None, None) => Ok(None),
            _ => Err(FixtureError::Plan(
                "single.a and single.b must be given together".to_string(),
            )),
        }
    }
}

impl BatchSection {
    pub fn to_config(&self, blocking: u32) -> BatchConfig {
        BatchConfig {
            num_tests: self.num_tests,
            min_size: self.min_size,
            max_size: self.max_size,
            output_dir: self.output_dir.clone(),
            blocking,
        }
    }
}

/// Execute every section of `plan`: single-shot first, then batch, from
/// one RNG stream seeded with the plan seed.
///
/// # Errors
///
/// Returns [`FixtureError::Plan`] if validation reports errors, otherwise
/// the first generation or I/O error.
pub fn execute_plan<F>(plan: &Plan, on_fixture: F) -> Result<GeneratedFiles, FixtureError>
where
    F: FnMut(&Fixture),
{
    let violations = validate_plan(plan);
    let errors = error_count(&violations);
    if errors > 0 {
        return Err(FixtureError::Plan(format!(
            "{errors} validation error(s)"
        )));
    }

    let seed = resolve_seed(plan.seed);
    let mut rng = seeded_rng(seed);
    let blocking = plan.kernel.blocking;
    let mut manifest = GeneratedFiles::default();

    if let Some(ref single) = plan.single {
        let config = single.to_config(blocking)?;
        manifest
            .files
            .push(generate_single(&mut rng, &config, single.operands()?)?);
    }

    if let Some(ref batch) = plan.batch {
        let result = generate_batch(&mut rng, &batch.to_config(blocking), on_fixture)?;
        manifest.files.extend(result.files);
    }

    tracing::info!(seed, files = manifest.files.len(), "executed plan");
    Ok(manifest)
}
