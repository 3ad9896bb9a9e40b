//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

/// Everything that can stop a command after its arguments were accepted.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write output: {0}")]
    Write(#[from] io::Error),

    #[error("bad YAML in {path}: {source}")]
    Yaml { path: PathBuf, source: serde_yaml::Error },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PNG rendering failed: {0}")]
    Render(String),
}

pub type CliResult<T> = Result<T, CliError>;

/// Output format for a generated mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
    Png,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "svg" => Some(Self::Svg),
            "json" => Some(Self::Json),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// Pull the value that follows flag `args[*i]`, advancing `i` past it.
pub fn take_value<'a>(args: &'a [String], i: &mut usize) -> CliResult<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| CliError::Usage(format!("{} needs a value", flag)))
}

/// Parse the value that follows flag `args[*i]`.
pub fn take_parsed<T: std::str::FromStr>(args: &[String], i: &mut usize) -> CliResult<T> {
    let flag = args[*i].clone();
    let value = take_value(args, i)?;
    value
        .parse()
        .map_err(|_| CliError::Usage(format!("invalid value for {}: {}", flag, value)))
}

/// Seeded generator when a seed was given, otherwise one seeded from the OS.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Write `bytes` to `path`, or to stdout when no path was given.
pub fn write_output(bytes: &[u8], path: Option<&str>) -> CliResult<()> {
    match path {
        Some(path) => {
            fs::write(path, bytes)?;
            eprintln!("Wrote: {}", path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Rasterise an SVG document onto a white background.
pub fn generate_png(svg_content: &str, width: f64, height: f64, scale: f64) -> CliResult<Vec<u8>> {
    use resvg::usvg;
    use tiny_skia::Pixmap;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).map_err(|e| CliError::Render(e.to_string()))?;

    let pixmap_width = (width * scale).ceil() as u32;
    let pixmap_height = (height * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height).ok_or_else(|| {
        CliError::Render(format!("could not create a {}x{} pixmap", pixmap_width, pixmap_height))
    })?;

    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| CliError::Render(e.to_string()))
}

/// Encode a mosaic in the requested format and write it out.
pub fn emit<T: serde::Serialize>(
    mosaic: &T,
    svg: impl FnOnce(&T) -> String,
    size: (f64, f64),
    format: OutputFormat,
    output: Option<&str>,
) -> CliResult<()> {
    let bytes = match format {
        OutputFormat::Svg => svg(mosaic).into_bytes(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(mosaic)?;
            json.push('\n');
            json.into_bytes()
        }
        OutputFormat::Png => {
            if output.is_none() {
                return Err(CliError::Usage("PNG output needs -o <file>".to_string()));
            }
            generate_png(&svg(mosaic), size.0, size.1, 1.0)?
        }
    };
    write_output(&bytes, output)
}
