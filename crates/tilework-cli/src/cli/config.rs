//! YAML parameter documents.
//!
//! Documents mirror the library's parameter structs with camelCase keys.
//! Every key is optional, so a document only needs the values it changes:
//!
//! ```yaml
//! grid:
//!   pattern: eac
//!   eac:
//!     rule: 90
//! tile:
//!   pattern: smith
//! ```

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tilework::{PointsParams, VoronoiParams};

use super::common::{CliError, CliResult};

/// A Voronoi document: the mosaic parameters plus where the sites come from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoronoiDocument {
    #[serde(flatten)]
    pub voronoi: VoronoiParams,
    pub points: PointsParams,
    /// RNG seed used when none is given on the command line
    pub seed: Option<u64>,
}

/// Parse a YAML document from a string.
pub fn parse<T: DeserializeOwned>(text: &str, origin: &Path) -> CliResult<T> {
    serde_yaml::from_str(text).map_err(|source| CliError::Yaml { path: origin.to_path_buf(), source })
}

/// Load a YAML document from disk.
pub fn load<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let doc = parse(&text, path)?;
    tracing::debug!(path = %path.display(), "loaded parameter document");
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilework::truchet::{EdgeBehavior, GridPattern, TileStyle};
    use tilework::{PointsSource, TruchetParams};

    fn origin() -> &'static Path {
        Path::new("test.yaml")
    }

    #[test]
    fn partial_truchet_document() {
        let yaml = "grid:\n  pattern: eac\n  eac:\n    rule: 90\n    edgeBehavior: wrap\ntile:\n  pattern: smith\n";
        let params: TruchetParams = parse(yaml, origin()).unwrap();
        assert_eq!(params.grid.pattern, GridPattern::Eac);
        assert_eq!(params.grid.eac.rule, 90);
        assert_eq!(params.grid.eac.edge_behavior, EdgeBehavior::Wrap);
        assert_eq!(params.tile.pattern, TileStyle::Smith);
        assert_eq!(params.grid.width, 1600.0);
        assert_eq!(params.tile.concentric_smith.num_circles, 7);
    }

    #[test]
    fn voronoi_document_flattens_params() {
        let yaml = "width: 400\nborderWidth: 8\npoints:\n  source: grid\n  grid:\n    xSpacing: 30\nseed: 9\n";
        let doc: VoronoiDocument = parse(yaml, origin()).unwrap();
        assert_eq!(doc.voronoi.width, 400.0);
        assert_eq!(doc.voronoi.height, 700.0);
        assert_eq!(doc.voronoi.border_width, 8.0);
        assert_eq!(doc.points.source, PointsSource::Grid);
        assert_eq!(doc.points.grid.x_spacing, 30.0);
        assert_eq!(doc.seed, Some(9));
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let doc: VoronoiDocument = parse("{}", origin()).unwrap();
        assert_eq!(doc, VoronoiDocument::default());
    }

    #[test]
    fn unknown_selector_is_a_yaml_error() {
        let result: CliResult<TruchetParams> = parse("tile:\n  pattern: hexagon\n", origin());
        assert!(matches!(result, Err(CliError::Yaml { .. })));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result: CliResult<TruchetParams> = load(Path::new("/nonexistent/tilework.yaml"));
        assert!(matches!(result, Err(CliError::Read { .. })));
    }
}
