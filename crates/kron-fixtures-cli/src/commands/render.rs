use kron_fixtures::fixture::Fixture;
use kron_fixtures::template::TemplateOptions;

use super::parse_inline_matrix;

pub fn run(
    a: &str,
    b: &str,
    batch_id: Option<u32>,
    blocking: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let a = parse_inline_matrix(a)?;
    let b = parse_inline_matrix(b)?;
    let options = match batch_id {
        Some(id) => TemplateOptions::batch(id),
        None => TemplateOptions::single_shot(),
    }
    .with_blocking(blocking);

    let fixture = Fixture::new(a, b, options)?;
    print!("{}", fixture.source);
    Ok(())
}
