use std::path::Path;

use kron_fixtures::error::{Severity, error_count};
use kron_fixtures::plan::{parse_plan, validate_plan};

pub fn run(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let plan = parse_plan(path)?;
    let violations = validate_plan(&plan);

    let errors = error_count(&violations);
    let warnings = violations
        .iter()
        .filter(|v| v.severity == Severity::Warning)
        .count();

    for v in &violations {
        println!("{v}");
    }

    println!("\n{errors} error(s), {warnings} warning(s)");

    if errors == 0 {
        println!("Plan is valid.");
        Ok(())
    } else {
        Err(format!("Plan has {errors} validation error(s)").into())
    }
}
