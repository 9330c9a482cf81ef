pub mod batch;
pub mod check;
pub mod kron;
pub mod render;
pub mod run;
pub mod single;
pub mod validate;

use kron_fixtures::matrix::Matrix;

/// Parse an inline matrix given as YAML nested rows, e.g. `[[1, 2], [3, 4]]`.
pub fn parse_inline_matrix(text: &str) -> Result<Matrix, Box<dyn std::error::Error>> {
    let rows: Vec<Vec<f64>> = serde_yaml::from_str(text)?;
    Ok(Matrix::from_rows(&rows)?)
}
