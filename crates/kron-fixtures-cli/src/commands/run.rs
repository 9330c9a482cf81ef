use std::path::Path;

use kron_fixtures::plan::{execute_plan, parse_plan};

use super::batch::print_manifest;

pub fn run(path: &Path, print: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = parse_plan(path)?;
    let result = execute_plan(&plan, |fixture| {
        if print {
            println!("{}", fixture.source);
        }
    })?;
    println!(
        "Executed {}: {} file(s)",
        path.display(),
        result.files.len()
    );
    print_manifest(&result);
    Ok(())
}
