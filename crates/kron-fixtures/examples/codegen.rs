//! Print every fixture a plan would generate, without writing files.
//!
//! Usage:
//!   cargo run --example codegen -- crates/kron-fixtures-cli/tests/fixtures/reference-plan.yaml

use std::path::PathBuf;
use std::process;

use kron_fixtures::fixture::Fixture;
use kron_fixtures::generate::{
    random_batch_fixture, random_single_fixture, resolve_seed, seeded_rng,
};
use kron_fixtures::plan::{parse_plan, validate_plan};

fn main() {
    let path = std::env::args().nth(1).map_or_else(
        || {
            eprintln!("Usage: codegen <plan.yaml>");
            process::exit(1);
        },
        PathBuf::from,
    );

    let plan = parse_plan(&path).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {e}", path.display());
        process::exit(1);
    });
    for v in validate_plan(&plan) {
        eprintln!("{v}");
    }

    let seed = resolve_seed(plan.seed);
    let mut rng = seeded_rng(seed);
    let blocking = plan.kernel.blocking;
    let mut fixtures: Vec<(String, Fixture)> = Vec::new();

    if let Some(ref single) = plan.single {
        let fixture = single
            .to_config(blocking)
            .and_then(|config| match single.operands()? {
                Some((a, b)) => Fixture::new(a, b, config.options),
                None => random_single_fixture(&mut rng, config.rows, config.cols, config.options),
            });
        match fixture {
            Ok(f) => fixtures.push((single.path.display().to_string(), f)),
            Err(e) => {
                eprintln!("single: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(ref batch) = plan.batch {
        let config = batch.to_config(blocking);
        for test_id in 0..config.num_tests {
            match random_batch_fixture(&mut rng, test_id, &config) {
                Ok(f) => {
                    let name = f.file_name().unwrap_or_default();
                    fixtures.push((name, f));
                }
                Err(e) => {
                    eprintln!("batch {test_id}: {e}");
                    process::exit(1);
                }
            }
        }
    }

    println!("// ============================================");
    println!("// Plan: {} (seed {seed})", path.display());
    println!("// Fixtures: {}", fixtures.len());
    println!("// ============================================");
    for (name, f) in &fixtures {
        println!(
            "\n// ---- {name}: A {:?} ⊗ B {:?} = {:?} ----",
            f.a.shape(),
            f.b.shape(),
            f.c_ref.shape()
        );
        print!("{}", f.source);
    }
}
