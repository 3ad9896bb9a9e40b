//! Truchet tile mosaics.
//!
//! A mosaic is built in two passes:
//! 1. [`grid::synthesize`] turns [`GridParams`] into a boolean state per cell
//!    (checkerboard, uniform random, or an elementary cellular automaton).
//! 2. [`tile::render_grid`] maps every cell's state onto a tile style.
//!
//! Both passes are rerun from scratch on every parameter change.

pub mod automaton;
pub mod grid;
pub mod tile;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::selector_names;

pub use automaton::{AutomatonParams, EdgeBehavior, Rule, Seed};
pub use grid::{CheckerboardParams, Grid, GridCell, synthesize};
pub use tile::{ConcentricSmithParams, GroupStyle, TruchetMosaic, render_grid, tile_paths};

/// How cell states are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GridPattern {
    Checkerboard,
    /// Elementary cellular automaton
    Eac,
    #[default]
    Random,
}

selector_names!(GridPattern, "grid pattern", {
    Checkerboard => "checkerboard",
    Eac => "eac",
    Random => "random",
});

/// Motif drawn in each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TileStyle {
    #[default]
    ConcentricSmith,
    Diagonal,
    Smith,
    Solid,
    Triangle,
}

selector_names!(TileStyle, "truchet pattern", {
    ConcentricSmith => "concentricSmith",
    Diagonal => "diagonal",
    Smith => "smith",
    Solid => "solid",
    Triangle => "triangle",
});

impl TileStyle {
    /// Filled styles paint solid regions; the rest are stroked outlines.
    pub fn is_filled(&self) -> bool {
        matches!(self, TileStyle::Solid | TileStyle::Triangle)
    }
}

/// Grid extent, pitch and state source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridParams {
    pub width: f64,
    pub height: f64,
    /// Cell pitch
    pub spacing: f64,
    pub pattern: GridPattern,
    pub checkerboard: CheckerboardParams,
    pub eac: AutomatonParams,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 700.0,
            spacing: 100.0,
            pattern: GridPattern::Random,
            checkerboard: CheckerboardParams::default(),
            eac: AutomatonParams::default(),
        }
    }
}

/// Tile style selection and style-specific settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileParams {
    pub pattern: TileStyle,
    pub concentric_smith: ConcentricSmithParams,
}

/// Everything needed to build a Truchet mosaic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TruchetParams {
    pub grid: GridParams,
    pub tile: TileParams,
}

/// Synthesize the grid and generate every tile.
pub fn build<R: Rng + ?Sized>(params: &TruchetParams, rng: &mut R) -> TruchetMosaic {
    let grid = synthesize(&params.grid, rng);
    tracing::debug!(
        rows = grid.rows,
        cols = grid.cols,
        pattern = %params.grid.pattern,
        "synthesized truchet grid"
    );
    render_grid(&grid, &params.tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn default_params_follow_the_editor_defaults() {
        let params = TruchetParams::default();
        assert_eq!(params.grid.width, 1600.0);
        assert_eq!(params.grid.height, 700.0);
        assert_eq!(params.grid.spacing, 100.0);
        assert_eq!(params.grid.pattern, GridPattern::Random);
        assert_eq!(params.grid.eac.rule, 30);
        assert_eq!(params.tile.pattern, TileStyle::ConcentricSmith);
        assert_eq!(params.tile.concentric_smith.num_circles, 7);
    }

    #[test]
    fn partial_json_document_fills_defaults() {
        let params: TruchetParams = serde_json::from_str(
            r#"{"grid": {"pattern": "eac", "eac": {"seed": "allSet", "edgeBehavior": "wrap"}},
                "tile": {"pattern": "smith"}}"#,
        )
        .unwrap();
        assert_eq!(params.grid.pattern, GridPattern::Eac);
        assert_eq!(params.grid.eac.seed, Seed::AllSet);
        assert_eq!(params.grid.eac.edge_behavior, EdgeBehavior::Wrap);
        assert_eq!(params.grid.spacing, 100.0);
        assert_eq!(params.tile.pattern, TileStyle::Smith);
    }

    #[test]
    fn build_produces_tiles_for_every_cell() {
        let mut params = TruchetParams::default();
        params.tile.pattern = TileStyle::Diagonal;
        let mut rng = StdRng::seed_from_u64(7);
        let mosaic = build(&params, &mut rng);
        // 16 x 7 cells, one segment each
        assert_eq!(mosaic.paths.len(), 16 * 7);
    }

    #[test]
    fn same_seed_same_mosaic() {
        let params = TruchetParams::default();
        let a = build(&params, &mut StdRng::seed_from_u64(99));
        let b = build(&params, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
