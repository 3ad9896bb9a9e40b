//! tilework - CLI for procedural mosaics
//!
//! Usage:
//!   tilework truchet [options]    Render a Truchet tile mosaic
//!   tilework voronoi [options]    Render a rounded Voronoi mosaic
//!   tilework patterns             List selectable names
//!
//! Logging goes to stderr and follows `RUST_LOG` (default: warn).

mod cli;

use std::env;

use tracing_subscriber::EnvFilter;

use cli::{cmd_patterns, cmd_truchet, cmd_voronoi};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let prog = args.first().map(String::as_str).unwrap_or("tilework");

    if args.len() >= 2 {
        match args[1].as_str() {
            "truchet" => {
                cmd_truchet(&args[2..]);
                return;
            }
            "voronoi" => {
                cmd_voronoi(&args[2..]);
                return;
            }
            "patterns" => {
                cmd_patterns();
                return;
            }
            "help" | "--help" | "-h" => {
                print_usage(prog);
                return;
            }
            other => {
                eprintln!("Unknown command: {}", other);
            }
        }
    }

    print_usage(prog);
    std::process::exit(1);
}

fn print_usage(prog: &str) {
    eprintln!("tilework - procedural Truchet and Voronoi mosaics");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {} truchet [options]", prog);
    eprintln!("  {} voronoi [options]", prog);
    eprintln!("  {} patterns", prog);
    eprintln!("  {} help", prog);
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  -c, --config <file>    YAML parameter document (flags override it)");
    eprintln!("  --seed <n>             Random seed for reproducibility");
    eprintln!("  -o, --output <file>    Output file (default: stdout)");
    eprintln!("  -f, --format <fmt>     Output format: svg, json, png (default: svg)");
    eprintln!();
    eprintln!("Run '{} truchet --help' or '{} voronoi --help' for command options.", prog, prog);
}
