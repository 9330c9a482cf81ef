use std::path::PathBuf;

use kron_fixtures::generate::{
    BatchConfig, GeneratedFiles, generate_batch, resolve_seed, seeded_rng,
};

pub struct Args {
    pub output: PathBuf,
    pub seed: Option<u64>,
    pub num_tests: u32,
    pub min_size: u32,
    pub max_size: u32,
    pub blocking: u32,
    pub print: bool,
}

pub fn run(args: &Args, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = BatchConfig {
        num_tests: args.num_tests,
        min_size: args.min_size,
        max_size: args.max_size,
        output_dir: args.output.clone(),
        blocking: args.blocking,
    };
    let seed = resolve_seed(args.seed);
    let result = generate_batch(&mut seeded_rng(seed), &config, |fixture| {
        if args.print {
            println!("{}", fixture.source);
        }
    })?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!(
                "Generated {} files in {}:",
                result.files.len(),
                args.output.display()
            );
            print_manifest(&result);
        }
    }
    Ok(())
}

/// Print one line per generated file.
pub fn print_manifest(result: &GeneratedFiles) {
    for f in &result.files {
        println!(
            "  {} (A {}x{}, B {}x{}, {} bytes)",
            f.path.display(),
            f.a_shape.0,
            f.a_shape.1,
            f.b_shape.0,
            f.b_shape.1,
            f.bytes
        );
    }
}
