use std::path::PathBuf;

use kron_fixtures::generate::{SingleConfig, generate_single, resolve_seed, seeded_rng};
use kron_fixtures::template::{EntryPoint, TemplateOptions};

pub struct Args {
    pub output: PathBuf,
    pub seed: Option<u64>,
    pub rows: usize,
    pub cols: usize,
    pub function: String,
    pub blocking: u32,
}

pub fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = SingleConfig {
        rows: args.rows,
        cols: args.cols,
        path: args.output.clone(),
        options: TemplateOptions::single_shot()
            .with_entry(EntryPoint::test_function(&args.function)?)
            .with_blocking(args.blocking),
    };
    let seed = resolve_seed(args.seed);
    let file = generate_single(&mut seeded_rng(seed), &config, None)?;

    println!(
        "Generated {} ({}x{} operands, seed {seed}, {} bytes)",
        file.path.display(),
        file.a_shape.0,
        file.a_shape.1,
        file.bytes
    );
    Ok(())
}
