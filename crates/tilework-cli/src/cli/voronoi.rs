//! The `voronoi` command - render a rounded Voronoi mosaic.

use std::path::Path;

use tilework::config::assign_by_name;
use tilework::voronoi::{self, Layer, VoronoiLayers};
use tilework::{DelaunaySubdivision, sampling, svg};

use super::common::{CliError, CliResult, OutputFormat, emit, make_rng, take_parsed, take_value};
use super::config::{self, VoronoiDocument};
use super::truchet::config_path;

/// Run the voronoi command.
pub fn cmd_voronoi(args: &[String]) {
    if let Err(err) = run(args) {
        eprintln!("Error: {}", err);
        if matches!(err, CliError::Usage(_)) {
            print_usage();
        }
        std::process::exit(1);
    }
}

/// Layers named in a comma-separated list; unknown names are skipped.
fn parse_layers(list: &str) -> VoronoiLayers {
    let layers: Vec<Layer> = list
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .filter_map(|name| match name.parse::<Layer>() {
            Ok(layer) => Some(layer),
            Err(err) => {
                tracing::warn!("{}; skipping", err);
                None
            }
        })
        .collect();
    VoronoiLayers::only(&layers)
}

fn run(args: &[String]) -> CliResult<()> {
    let mut doc = match config_path(args)? {
        Some(path) => config::load::<VoronoiDocument>(Path::new(path))?,
        None => VoronoiDocument::default(),
    };
    let mut output: Option<&str> = None;
    let mut format = OutputFormat::Svg;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
            }
            "--source" => {
                let name = take_value(args, &mut i)?;
                assign_by_name(&mut doc.points.source, name);
            }
            "--border-width" | "-b" => {
                doc.voronoi.border_width = take_parsed(args, &mut i)?;
            }
            "--step" => {
                doc.voronoi.parallel_path_step = take_parsed(args, &mut i)?;
            }
            "--simplify" => {
                doc.voronoi.simplify_radius = take_parsed(args, &mut i)?;
            }
            "--bezier" => {
                doc.voronoi.bezier_factor = take_parsed(args, &mut i)?;
            }
            "--show" => {
                doc.voronoi.layers = parse_layers(take_value(args, &mut i)?);
            }
            "--width" | "-w" => {
                doc.voronoi.width = take_parsed(args, &mut i)?;
            }
            "--height" => {
                doc.voronoi.height = take_parsed(args, &mut i)?;
            }
            "--seed" => {
                doc.seed = Some(take_parsed(args, &mut i)?);
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

    let params = &doc.voronoi;
    let mut rng = make_rng(doc.seed);
    let sites = sampling::generate(&doc.points, params.width, params.height, &mut rng);
    let mosaic = voronoi::build(params, &sites, &DelaunaySubdivision::new());
    tracing::info!(
        source = %doc.points.source,
        sites = sites.len(),
        cells = mosaic.cells.len(),
        "voronoi mosaic ready"
    );

    emit(&mosaic, svg::voronoi_to_svg, (mosaic.width, mosaic.height), format, output)
}

/// Print usage information.
pub fn print_usage() {
    eprintln!("tilework voronoi - Render a rounded Voronoi mosaic");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    tilework voronoi [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -c, --config <file>       YAML parameter document");
    eprintln!("    --source <name>           Sites: cairo, grid, random (default: cairo)");
    eprintln!("    -b, --border-width <n>    Vein width (default: 3)");
    eprintln!("    --step <n>                Inset marching step (default: 0.05)");
    eprintln!("    --simplify <n>            Merge radius for inset points (default: 4)");
    eprintln!("    --bezier <n>              Corner rounding factor (default: 1)");
    eprintln!("    --show <l1,l2>            Layers to draw (default: seeds,smoothCells)");
    eprintln!("    -w, --width <n>           Canvas width (default: 1600)");
    eprintln!("    --height <n>              Canvas height (default: 700)");
    eprintln!("    --seed <n>                Random seed for reproducibility");
    eprintln!("    -o, --output <file>       Output file (default: stdout)");
    eprintln!("    -f, --format <fmt>        svg, json or png (default: svg)");
    eprintln!();
    eprintln!("LAYERS:");
    eprintln!("    seeds, edges, hardCells, smoothCells, controlPoints, veins");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_from_a_list() {
        let layers = parse_layers("veins, edges");
        assert!(layers.veins && layers.edges);
        assert!(!layers.seeds && !layers.smooth_cells);
    }

    #[test]
    fn unknown_layers_are_skipped() {
        let layers = parse_layers("veins,blobs");
        assert_eq!(layers, VoronoiLayers::only(&[Layer::Veins]));
        assert_eq!(parse_layers(""), VoronoiLayers::none());
    }

    #[test]
    fn unknown_option_is_rejected() {
        let args = vec!["--frobnicate".to_string()];
        assert!(matches!(run(&args), Err(CliError::Usage(_))));
    }
}
