use kron_fixtures::kron::kron;
use kron_fixtures::literal::render_matrix;

use super::parse_inline_matrix;

pub fn run(a: &str, b: &str) -> Result<(), Box<dyn std::error::Error>> {
    let a = parse_inline_matrix(a)?;
    let b = parse_inline_matrix(b)?;
    let c = kron(&a, &b)?;
    println!("// {}x{}", c.rows(), c.cols());
    println!("{}", render_matrix(&c));
    Ok(())
}
