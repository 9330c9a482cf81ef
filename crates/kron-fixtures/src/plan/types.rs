use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::generate::{
    DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_NUM_TESTS, DEFAULT_SINGLE_COLS,
    DEFAULT_SINGLE_PATH, DEFAULT_SINGLE_ROWS,
};
use crate::template::{DEFAULT_BLOCKING, DEFAULT_TEST_FUNCTION};

/// A YAML generation plan.
///
/// Either section may be omitted; a plan with neither is rejected by
/// [`super::validate_plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub kernel: KernelSection,
    #[serde(default)]
    pub single: Option<SingleSection>,
    #[serde(default)]
    pub batch: Option<BatchSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KernelSection {
    #[serde(default = "default_blocking")]
    pub blocking: u32,
}

impl Default for KernelSection {
    fn default() -> Self {
        Self {
            blocking: DEFAULT_BLOCKING,
        }
    }
}

/// Single-shot fixture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleSection {
    #[serde(default = "default_single_rows")]
    pub rows: usize,
    #[serde(default = "default_single_cols")]
    pub cols: usize,
    #[serde(default = "default_single_path")]
    pub path: PathBuf,
    #[serde(default = "default_function")]
    pub function: String,
    /// Explicit operands as nested rows; both or neither.
    #[serde(default)]
    pub a: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub b: Option<Vec<Vec<f64>>>,
}

/// Batch fixture settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchSection {
    #[serde(default = "default_num_tests")]
    pub num_tests: u32,
    #[serde(default = "default_min_size")]
    pub min_size: u32,
    #[serde(default = "default_max_size")]
    pub max_size: u32,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_blocking() -> u32 {
    DEFAULT_BLOCKING
}

fn default_single_rows() -> usize {
    DEFAULT_SINGLE_ROWS
}

fn default_single_cols() -> usize {
    DEFAULT_SINGLE_COLS
}

fn default_single_path() -> PathBuf {
    PathBuf::from(DEFAULT_SINGLE_PATH)
}

fn default_function() -> String {
    DEFAULT_TEST_FUNCTION.to_string()
}

fn default_num_tests() -> u32 {
    DEFAULT_NUM_TESTS
}

fn default_min_size() -> u32 {
    DEFAULT_MIN_SIZE
}

fn default_max_size() -> u32 {
    DEFAULT_MAX_SIZE
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
