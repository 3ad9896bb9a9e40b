//! The `truchet` command - render a Truchet tile mosaic.

use std::path::Path;

use tilework::config::assign_by_name;
use tilework::{TruchetParams, svg, truchet};

use super::common::{CliError, CliResult, OutputFormat, emit, make_rng, take_parsed, take_value};
use super::config;

/// Run the truchet command.
pub fn cmd_truchet(args: &[String]) {
    if let Err(err) = run(args) {
        eprintln!("Error: {}", err);
        if matches!(err, CliError::Usage(_)) {
            print_usage();
        }
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> CliResult<()> {
    // A config file is the base layer; flags are applied on top of it.
    let mut params = match config_path(args)? {
        Some(path) => config::load::<TruchetParams>(Path::new(path))?,
        None => TruchetParams::default(),
    };
    let mut seed: Option<u64> = None;
    let mut output: Option<&str> = None;
    let mut format = OutputFormat::Svg;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
            }
            "--pattern" | "-p" => {
                let name = take_value(args, &mut i)?;
                assign_by_name(&mut params.grid.pattern, name);
            }
            "--tile" | "-t" => {
                let name = take_value(args, &mut i)?;
                assign_by_name(&mut params.tile.pattern, name);
            }
            "--rule" | "-r" => {
                params.grid.eac.rule = take_parsed(args, &mut i)?;
            }
            "--seed-row" => {
                let name = take_value(args, &mut i)?;
                assign_by_name(&mut params.grid.eac.seed, name);
            }
            "--offset" => {
                params.grid.eac.offset = take_parsed(args, &mut i)?;
            }
            "--invert" => {
                params.grid.eac.invert = true;
            }
            "--edge" => {
                let name = take_value(args, &mut i)?;
                assign_by_name(&mut params.grid.eac.edge_behavior, name);
            }
            "--spacing" | "-s" => {
                params.grid.spacing = take_parsed(args, &mut i)?;
            }
            "--width" | "-w" => {
                params.grid.width = take_parsed(args, &mut i)?;
            }
            "--height" => {
                params.grid.height = take_parsed(args, &mut i)?;
            }
            "--seed" => {
                seed = Some(take_parsed(args, &mut i)?);
            }
            "-o" | "--output" => {
                output = Some(take_value(args, &mut i)?);
            }
            "-f" | "--format" => {
                let name = take_value(args, &mut i)?;
                format = OutputFormat::from_name(name)
                    .ok_or_else(|| CliError::Usage(format!("Unknown format: {}", name)))?;
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            unknown => {
                return Err(CliError::Usage(format!("Unknown option: {}", unknown)));
            }
        }
        i += 1;
    }

    let mut rng = make_rng(seed);
    let mosaic = truchet::build(&params, &mut rng);
    tracing::info!(
        pattern = %params.grid.pattern,
        tile = %params.tile.pattern,
        paths = mosaic.paths.len(),
        "truchet mosaic ready"
    );

    emit(&mosaic, svg::truchet_to_svg, (mosaic.width, mosaic.height), format, output)
}

/// Find `--config <file>` ahead of the main pass.
pub(crate) fn config_path(args: &[String]) -> CliResult<Option<&str>> {
    let mut i = 0;
    while i < args.len() {
        if args[i] == "--config" || args[i] == "-c" {
            return take_value(args, &mut i).map(Some);
        }
        i += 1;
    }
    Ok(None)
}

/// Print usage information.
pub fn print_usage() {
    eprintln!("tilework truchet - Render a Truchet tile mosaic");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tilework truchet [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <file>     YAML parameter document");
    eprintln!("    -p, --pattern <name>    Grid pattern: random, checkerboard, eac (default: random)");
    eprintln!("    -t, --tile <name>       Tile style (default: concentricSmith)");
    eprintln!("    -r, --rule <n>          Automaton rule, 0-255 (default: 30)");
    eprintln!("    --seed-row <name>       Automaton first row (default: center)");
    eprintln!("    --offset <n>            Automaton rows to skip (default: 0)");
    eprintln!("    --invert                Flip every automaton cell");
    eprintln!("    --edge <name>           Automaton edges: infinite, wrap (default: infinite)");
    eprintln!("    -s, --spacing <n>       Tile size (default: 100)");
    eprintln!("    -w, --width <n>         Canvas width (default: 1600)");
    eprintln!("    --height <n>            Canvas height (default: 700)");
    eprintln!("    --seed <n>              Random seed for reproducibility");
    eprintln!("    -o, --output <file>     Output file (default: stdout)");
    eprintln!("    -f, --format <fmt>      svg, json or png (default: svg)");
    eprintln!();
    eprintln!("Run 'tilework patterns' to list every name.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_path_is_found_anywhere() {
        let a = args(&["--rule", "90", "--config", "grid.yaml", "--invert"]);
        assert_eq!(config_path(&a).unwrap(), Some("grid.yaml"));
        assert_eq!(config_path(&args(&["--invert"])).unwrap(), None);
        assert!(config_path(&args(&["-c"])).is_err());
    }

    #[test]
    fn unknown_option_is_rejected() {
        assert!(matches!(run(&args(&["--frobnicate"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn bad_format_is_rejected() {
        assert!(matches!(run(&args(&["-f", "gif"])), Err(CliError::Usage(_))));
    }

    #[test]
    fn png_needs_an_output_file() {
        let a = args(&["-f", "png", "--width", "100", "--height", "100", "--seed", "1"]);
        assert!(matches!(run(&a), Err(CliError::Usage(_))));
    }
}
