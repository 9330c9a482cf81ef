use std::path::PathBuf;

use kron_fixtures::check::{CheckReport, check_fixture_file};

pub fn run(files: &[PathBuf], format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut reports: Vec<(String, CheckReport)> = Vec::new();
    for path in files {
        reports.push((path.display().to_string(), check_fixture_file(path)?));
    }

    match format {
        "json" => {
            let map: std::collections::BTreeMap<_, _> =
                reports.iter().map(|(p, r)| (p.as_str(), r)).collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        _ => {
            for (path, report) in &reports {
                let status = if report.is_ok() { "OK" } else { "FAIL" };
                println!("{status} {path}");
                for v in &report.violations {
                    println!("  {v}");
                }
            }
        }
    }

    let failed = reports.iter().filter(|(_, r)| !r.is_ok()).count();
    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{failed} fixture(s) failed consistency checks").into())
    }
}
