use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

/// Top-level CLI argument parser for the `kf` command
#[derive(Parser)]
#[command(
    name = "kf",
    about = "kron-fixtures: self-checking C tests for Kronecker-product kernels",
    version
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `kf` CLI
#[derive(Subcommand)]
enum Commands {
    /// Write one fixture from two random matrices (asserts on failure)
    Single {
        /// Output path of the generated C file
        #[arg(short, long, default_value = "src/generated_code.c")]
        output: PathBuf,
        /// RNG seed (drawn and logged when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Rows of each random operand
        #[arg(long, default_value_t = 16)]
        rows: usize,
        /// Columns of each random operand
        #[arg(long, default_value_t = 16)]
        cols: usize,
        /// Name of the generated test function
        #[arg(long, default_value = "test_tensor_1")]
        function: String,
        /// Blocking factor passed to the kernel
        #[arg(long, default_value_t = 2)]
        blocking: u32,
    },
    /// Write a batch of column-vector fixtures test_kron_<id>.c
    Batch {
        /// Output directory for generated files
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// RNG seed (drawn and logged when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of fixtures to generate
        #[arg(long, default_value_t = 5)]
        num_tests: u32,
        /// Smallest size exponent (vectors have 2^size rows)
        #[arg(long, default_value_t = 1)]
        min_size: u32,
        /// Largest size exponent
        #[arg(long, default_value_t = 10)]
        max_size: u32,
        /// Blocking factor passed to the kernel
        #[arg(long, default_value_t = 2)]
        blocking: u32,
        /// Also print every generated fixture to stdout
        #[arg(long)]
        print: bool,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print a fixture built from inline matrices, e.g. "[[1, 2], [3, 4]]"
    Render {
        /// Left operand as nested rows
        #[arg(long)]
        a: String,
        /// Right operand as nested rows
        #[arg(long)]
        b: String,
        /// Render the batch flavour with this test id instead of the
        /// single-shot flavour
        #[arg(long)]
        batch_id: Option<u32>,
        /// Blocking factor passed to the kernel
        #[arg(long, default_value_t = 2)]
        blocking: u32,
    },
    /// Print the reference Kronecker product of inline matrices
    Kron {
        /// Left operand as nested rows
        #[arg(long)]
        a: String,
        /// Right operand as nested rows
        #[arg(long)]
        b: String,
    },
    /// Validate a YAML generation plan
    Validate {
        /// Path to the plan YAML file
        plan: PathBuf,
    },
    /// Execute a YAML generation plan
    Run {
        /// Path to the plan YAML file
        plan: PathBuf,
        /// Also print every generated batch fixture to stdout
        #[arg(long)]
        print: bool,
    },
    /// Verify generated fixtures are self-consistent
    Check {
        /// Generated C files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Install the stderr log subscriber
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Single {
            output,
            seed,
            rows,
            cols,
            function,
            blocking,
        } => commands::single::run(&commands::single::Args {
            output,
            seed,
            rows,
            cols,
            function,
            blocking,
        }),
        Commands::Batch {
            output,
            seed,
            num_tests,
            min_size,
            max_size,
            blocking,
            print,
            format,
        } => commands::batch::run(
            &commands::batch::Args {
                output,
                seed,
                num_tests,
                min_size,
                max_size,
                blocking,
                print,
            },
            &format,
        ),
        Commands::Render {
            a,
            b,
            batch_id,
            blocking,
        } => commands::render::run(&a, &b, batch_id, blocking),
        Commands::Kron { a, b } => commands::kron::run(&a, &b),
        Commands::Validate { plan } => commands::validate::run(&plan),
        Commands::Run { plan, print } => commands::run::run(&plan, print),
        Commands::Check { files, format } => commands::check::run(&files, &format),
    }
}

/// Entry point: parse CLI arguments and run the selected subcommand
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run_command(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
