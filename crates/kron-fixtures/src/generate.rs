//! Fixture drivers: single-shot and batch generation to disk.
//!
//! All randomness comes from a caller-supplied RNG. Seeding a
//! [`ChaCha8Rng`] with the same value reproduces the same files byte for
//! byte.

use std::path::{Path, PathBuf};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::FixtureError;
use crate::fixture::{Fixture, batch_file_name};
use crate::matrix::{MAX_ELEMENTS, Matrix};
use crate::template::{DEFAULT_BLOCKING, TemplateOptions};

pub const DEFAULT_MIN_SIZE: u32 = 1;
pub const DEFAULT_MAX_SIZE: u32 = 10;
pub const DEFAULT_NUM_TESTS: u32 = 5;
pub const DEFAULT_SINGLE_ROWS: usize = 16;
pub const DEFAULT_SINGLE_COLS: usize = 16;
pub const DEFAULT_SINGLE_PATH: &str = "src/generated_code.c";

/// Largest accepted size exponent. Two `2^s x 1` operands give a
/// reference with `2^(2s)` rows, which must stay within [`MAX_ELEMENTS`].
pub const MAX_SIZE_EXPONENT: u32 = MAX_ELEMENTS.ilog2() / 2;

/// Deterministic RNG for fixture generation.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Use `seed` if given, otherwise draw one and log it so the run can be
/// repeated.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let drawn = rand::random::<u64>();
        tracing::info!(seed = drawn, "no seed given, drew one");
        drawn
    })
}

/// Manifest of written fixtures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratedFiles {
    pub files: Vec<GeneratedFile>,
}

/// A single written fixture.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub test_id: Option<u32>,
    pub a_shape: (usize, usize),
    pub b_shape: (usize, usize),
    pub bytes: usize,
}

/// Settings for the single-shot fixture.
#[derive(Debug, Clone)]
pub struct SingleConfig {
    pub rows: usize,
    pub cols: usize,
    pub path: PathBuf,
    pub options: TemplateOptions,
}

impl Default for SingleConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SINGLE_ROWS,
            cols: DEFAULT_SINGLE_COLS,
            path: PathBuf::from(DEFAULT_SINGLE_PATH),
            options: TemplateOptions::single_shot(),
        }
    }
}

/// Settings for a batch of column-vector fixtures.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub num_tests: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub output_dir: PathBuf,
    pub blocking: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            num_tests: DEFAULT_NUM_TESTS,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            output_dir: PathBuf::from("."),
            blocking: DEFAULT_BLOCKING,
        }
    }
}

impl BatchConfig {
    /// # Errors
    ///
    /// Returns [`FixtureError::InvalidSizeRange`] if `min_size > max_size`
    /// and [`FixtureError::SizeTooLarge`] past [`MAX_SIZE_EXPONENT`], where
    /// the largest reference would exceed [`MAX_ELEMENTS`].
    pub fn check(&self) -> Result<(), FixtureError> {
        if self.min_size > self.max_size {
            return Err(FixtureError::InvalidSizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.max_size > MAX_SIZE_EXPONENT {
            return Err(FixtureError::SizeTooLarge(self.max_size));
        }
        if self.blocking == 0 {
            return Err(FixtureError::InvalidBlocking);
        }
        Ok(())
    }
}

/// Two random `rows x cols` operands rendered with `options`.
///
/// `A` is drawn completely before `B`.
///
/// # Errors
///
/// Returns [`FixtureError::EmptyMatrix`] for a zero dimension, plus any
/// [`Fixture::new`] error.
pub fn random_single_fixture<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    options: TemplateOptions,
) -> Result<Fixture, FixtureError> {
    let a = Matrix::random(rng, rows, cols)?;
    let b = Matrix::random(rng, rows, cols)?;
    Fixture::new(a, b, options)
}

/// Batch fixture `test_id`: two column vectors of length `2^s`, each with
/// its own `s` drawn uniformly from `[min_size, max_size]`.
///
/// Draw order is size of `A`, entries of `A`, size of `B`, entries of `B`.
///
/// # Errors
///
/// Returns the [`BatchConfig::check`] errors, plus any [`Fixture::new`]
/// error.
pub fn random_batch_fixture<R: Rng + ?Sized>(
    rng: &mut R,
    test_id: u32,
    config: &BatchConfig,
) -> Result<Fixture, FixtureError> {
    config.check()?;
    let a = random_column(rng, config)?;
    let b = random_column(rng, config)?;
    Fixture::new(
        a,
        b,
        TemplateOptions::batch(test_id).with_blocking(config.blocking),
    )
}

fn random_column<R: Rng + ?Sized>(
    rng: &mut R,
    config: &BatchConfig,
) -> Result<Matrix, FixtureError> {
    let size = rng.random_range(config.min_size..=config.max_size);
    Matrix::random(rng, 1usize << size, 1)
}

/// Write `fixture` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`FixtureError::Io`] if directory creation or the write fails.
pub fn write_fixture(fixture: &Fixture, path: &Path) -> Result<GeneratedFile, FixtureError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &fixture.source)?;
    tracing::debug!(path = %path.display(), bytes = fixture.source.len(), "wrote fixture");
    Ok(GeneratedFile {
        path: path.to_path_buf(),
        test_id: fixture.test_id(),
        a_shape: fixture.a.shape(),
        b_shape: fixture.b.shape(),
        bytes: fixture.source.len(),
    })
}

/// Generate the single-shot fixture and write it to `config.path`.
///
/// With `operands` the given matrices are used instead of random ones.
///
/// # Errors
///
/// Propagates generation and I/O errors.
pub fn generate_single<R: Rng + ?Sized>(
    rng: &mut R,
    config: &SingleConfig,
    operands: Option<(Matrix, Matrix)>,
) -> Result<GeneratedFile, FixtureError> {
    let fixture = match operands {
        Some((a, b)) => Fixture::new(a, b, config.options.clone())?,
        None => random_single_fixture(rng, config.rows, config.cols, config.options.clone())?,
    };
    let file = write_fixture(&fixture, &config.path)?;
    tracing::info!(path = %file.path.display(), "generated single-shot fixture");
    Ok(file)
}

/// Generate `config.num_tests` fixtures with ids `0..num_tests` into
/// `config.output_dir`.
///
/// `on_fixture` sees every fixture after it is written. Files written
/// before an error stay on disk.
///
/// # Errors
///
/// Returns the [`BatchConfig::check`] errors before writing anything, and
/// the first generation or I/O error afterwards.
pub fn generate_batch<R, F>(
    rng: &mut R,
    config: &BatchConfig,
    mut on_fixture: F,
) -> Result<GeneratedFiles, FixtureError>
where
    R: Rng + ?Sized,
    F: FnMut(&Fixture),
{
    config.check()?;
    std::fs::create_dir_all(&config.output_dir)?;

    let mut files = Vec::with_capacity(config.num_tests as usize);
    for test_id in 0..config.num_tests {
        let fixture = random_batch_fixture(rng, test_id, config)?;
        let path = config.output_dir.join(batch_file_name(test_id));
        files.push(write_fixture(&fixture, &path)?);
        on_fixture(&fixture);
    }

    tracing::info!(
        count = files.len(),
        dir = %config.output_dir.display(),
        "generated batch fixtures"
    );
    Ok(GeneratedFiles { files })
}
