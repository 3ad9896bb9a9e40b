//! Tile geometry for each Truchet style.
//!
//! Every style has two orientations selected by the cell state. Coordinates
//! are absolute: a cell with top-left corner `(x, y)` and edge `s` spans
//! `[x, x + s] x [y, y + s]`.

use serde::{Deserialize, Serialize};

use super::{Grid, TileParams, TileStyle};
use crate::geometry::{CircularArc, Point};
use crate::path::{Path, PathRole};

/// Stroke width used by every outline style except concentric Smith.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Seam stroke drawn around filled tiles so neighbours meet without gaps.
pub const SEAM_STROKE_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConcentricSmithParams {
    /// Distance between neighbouring arcs, as a fraction of the cell size
    pub gap: f64,
    pub num_circles: usize,
    pub stroke_width: f64,
}

impl Default for ConcentricSmithParams {
    fn default() -> Self {
        Self { gap: 0.15, num_circles: 7, stroke_width: 3.0 }
    }
}

/// Paint settings shared by every path in a mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupStyle {
    pub filled: bool,
    pub stroke_width: f64,
}

impl GroupStyle {
    pub fn for_tile(params: &TileParams) -> Self {
        match params.pattern {
            TileStyle::Solid | TileStyle::Triangle => {
                Self { filled: true, stroke_width: SEAM_STROKE_WIDTH }
            }
            TileStyle::ConcentricSmith => {
                Self { filled: false, stroke_width: params.concentric_smith.stroke_width }
            }
            TileStyle::Diagonal | TileStyle::Smith => {
                Self { filled: false, stroke_width: DEFAULT_STROKE_WIDTH }
            }
        }
    }
}

/// A rendered Truchet mosaic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruchetMosaic {
    pub width: f64,
    pub height: f64,
    pub style: TileStyle,
    pub group: GroupStyle,
    pub paths: Vec<Path>,
}

/// Generate the tile for every cell of `grid`.
pub fn render_grid(grid: &Grid, params: &TileParams) -> TruchetMosaic {
    let paths = grid
        .cells()
        .flat_map(|cell| tile_paths(params, cell.origin, grid.spacing, cell.state))
        .collect();

    TruchetMosaic {
        width: grid.width,
        height: grid.height,
        style: params.pattern,
        group: GroupStyle::for_tile(params),
        paths,
    }
}

/// Paths for one tile at `origin` with edge `size`.
pub fn tile_paths(params: &TileParams, origin: Point, size: f64, state: bool) -> Vec<Path> {
    let Point { x, y } = origin;
    let s = size;

    match params.pattern {
        TileStyle::Diagonal => {
            let (a, b) = if state {
                (Point::new(x, y), Point::new(x + s, y + s))
            } else {
                (Point::new(x, y + s), Point::new(x + s, y))
            };
            vec![Path::polyline(&[a, b], false, PathRole::Stroke)]
        }
        TileStyle::Triangle => {
            let corners = if state {
                [Point::new(x, y), Point::new(x + s, y), Point::new(x, y + s)]
            } else {
                [Point::new(x + s, y), Point::new(x + s, y + s), Point::new(x, y + s)]
            };
            vec![Path::polyline(&corners, true, PathRole::Fill)]
        }
        TileStyle::Solid => {
            if !state {
                return Vec::new();
            }
            let corners = [
                Point::new(x, y),
                Point::new(x + s, y),
                Point::new(x + s, y + s),
                Point::new(x, y + s),
            ];
            vec![Path::polyline(&corners, true, PathRole::Fill)]
        }
        TileStyle::Smith => smith(x, y, s, state),
        TileStyle::ConcentricSmith => concentric_smith(x, y, s, state, &params.concentric_smith),
    }
}

/// Two quarter circles of radius `s/2` joining edge midpoints.
fn smith(x: f64, y: f64, s: f64, state: bool) -> Vec<Path> {
    let r = 0.5 * s;
    let top = Point::new(x + r, y);
    let right = Point::new(x + s, y + r);
    let bottom = Point::new(x + r, y + s);
    let left = Point::new(x, y + r);

    let pairs = if state {
        [(left, top), (right, bottom)]
    } else {
        [(top, right), (bottom, left)]
    };
    pairs
        .iter()
        .map(|&(from, to)| Path::arc(&CircularArc::new(r, from, to)))
        .collect()
}

/// A cell corner that arcs are centred on.
///
/// An arc of radius `t` runs from `origin + a * t` to `origin + b * t`.
#[derive(Clone, Copy)]
struct Corner {
    origin: Point,
    a: Point,
    b: Point,
}

impl Corner {
    fn start(&self, t: f64) -> Point {
        self.origin + self.a * t
    }

    fn end(&self, t: f64) -> Point {
        self.origin + self.b * t
    }

    /// Filled ring between the innermost and outermost arcs.
    fn background(&self, inner: f64, outer: f64) -> Path {
        let mut path = Path::new(PathRole::Background);
        path.move_to(self.start(inner))
            .arc_to(&CircularArc::new(inner, self.start(inner), self.end(inner)))
            .line_to(self.end(outer))
            .arc_to(&CircularArc::new(outer, self.end(outer), self.start(outer)).with_sweep(true))
            .close();
        path
    }

    fn arcs(&self, radii: &[f64]) -> Vec<Path> {
        radii
            .iter()
            .map(|&t| Path::arc(&CircularArc::new(t, self.start(t), self.end(t))))
            .collect()
    }
}

/// Nested arc bands around two opposite corners, each backed by a filled
/// ring so overlapping bands hide what lies beneath.
fn concentric_smith(
    x: f64,
    y: f64,
    s: f64,
    state: bool,
    params: &ConcentricSmithParams,
) -> Vec<Path> {
    let n = params.num_circles;
    if n == 0 {
        return Vec::new();
    }

    let gap = params.gap * s;
    let offset = (0.5 * (s - gap * (n - 1) as f64)).abs();
    let radii: Vec<f64> = (0..n).map(|i| offset + i as f64 * gap).collect();
    let (inner, outer) = (radii[0], radii[n - 1]);

    let right = Point::new(1.0, 0.0);
    let down = Point::new(0.0, 1.0);
    let corners = if state {
        [
            Corner { origin: Point::new(x, y), a: down, b: right },
            Corner { origin: Point::new(x + s, y + s), a: -down, b: -right },
        ]
    } else {
        [
            Corner { origin: Point::new(x + s, y), a: -right, b: down },
            Corner { origin: Point::new(x, y + s), a: right, b: -down },
        ]
    };

    let mut paths = Vec::with_capacity(2 * (n + 1));
    for corner in &corners {
        paths.push(corner.background(inner, outer));
        paths.extend(corner.arcs(&radii));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathCommand;
    use crate::truchet::GridParams;
    use crate::truchet::grid::synthesize;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tile(pattern: TileStyle) -> TileParams {
        TileParams { pattern, ..TileParams::default() }
    }

    fn endpoints(path: &Path) -> Vec<Point> {
        path.commands
            .iter()
            .filter_map(|c| match *c {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(p),
                PathCommand::ArcTo { end, .. } | PathCommand::CubicTo { end, .. } => Some(end),
                PathCommand::Close => None,
            })
            .collect()
    }

    #[test]
    fn diagonal_orientations() {
        let origin = Point::new(10.0, 20.0);
        let on = tile_paths(&tile(TileStyle::Diagonal), origin, 5.0, true);
        let off = tile_paths(&tile(TileStyle::Diagonal), origin, 5.0, false);
        assert_eq!(endpoints(&on[0]), vec![Point::new(10.0, 20.0), Point::new(15.0, 25.0)]);
        assert_eq!(endpoints(&off[0]), vec![Point::new(10.0, 25.0), Point::new(15.0, 20.0)]);
    }

    #[test]
    fn triangle_halves_cover_opposite_corners() {
        let on = tile_paths(&tile(TileStyle::Triangle), Point::zero(), 1.0, true);
        let off = tile_paths(&tile(TileStyle::Triangle), Point::zero(), 1.0, false);
        assert_eq!(on[0].role, PathRole::Fill);
        assert_eq!(
            endpoints(&on[0]),
            vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)]
        );
        assert_eq!(
            endpoints(&off[0]),
            vec![Point::new(1.0, 0.0), Point::new(1.0, 1.0), Point::new(0.0, 1.0)]
        );
    }

    #[test]
    fn solid_only_draws_set_cells() {
        assert_eq!(tile_paths(&tile(TileStyle::Solid), Point::zero(), 4.0, true).len(), 1);
        assert!(tile_paths(&tile(TileStyle::Solid), Point::zero(), 4.0, false).is_empty());
    }

    #[test]
    fn smith_arcs_join_edge_midpoints() {
        let on = tile_paths(&tile(TileStyle::Smith), Point::zero(), 2.0, true);
        assert_eq!(on.len(), 2);
        assert_eq!(endpoints(&on[0]), vec![Point::new(0.0, 1.0), Point::new(1.0, 0.0)]);
        assert_eq!(endpoints(&on[1]), vec![Point::new(2.0, 1.0), Point::new(1.0, 2.0)]);
        match on[0].commands[1] {
            PathCommand::ArcTo { radius, large_arc, sweep, .. } => {
                assert_eq!(radius, 1.0);
                assert!(!large_arc);
                assert!(!sweep);
            }
            _ => panic!("expected an arc"),
        }

        let off = tile_paths(&tile(TileStyle::Smith), Point::zero(), 2.0, false);
        assert_eq!(endpoints(&off[0]), vec![Point::new(1.0, 0.0), Point::new(2.0, 1.0)]);
        assert_eq!(endpoints(&off[1]), vec![Point::new(1.0, 2.0), Point::new(0.0, 1.0)]);
    }

    #[test]
    fn concentric_radii_are_centred_in_the_cell() {
        let params = tile(TileStyle::ConcentricSmith);
        let paths = tile_paths(&params, Point::zero(), 100.0, true);
        // two backgrounds plus 7 arcs per corner
        assert_eq!(paths.len(), 16);
        assert_eq!(paths[0].role, PathRole::Background);
        assert_eq!(paths[8].role, PathRole::Background);

        // gap 15, offset |0.5 * (100 - 90)| = 5
        let radii: Vec<f64> = paths[1..8]
            .iter()
            .map(|p| match p.commands[1] {
                PathCommand::ArcTo { radius, .. } => radius,
                _ => panic!("expected an arc"),
            })
            .collect();
        for (i, r) in radii.iter().enumerate() {
            assert_relative_eq!(*r, 5.0 + 15.0 * i as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn concentric_background_ring_outline() {
        let params = TileParams {
            pattern: TileStyle::ConcentricSmith,
            concentric_smith: ConcentricSmithParams { gap: 0.25, num_circles: 3, stroke_width: 1.0 },
        };
        // offset |0.5 * (8 - 4)| = 2, radii 2, 4, 6
        let on = tile_paths(&params, Point::zero(), 8.0, true);
        assert_eq!(
            endpoints(&on[0]),
            vec![Point::new(0.0, 2.0), Point::new(2.0, 0.0), Point::new(6.0, 0.0), Point::new(0.0, 6.0)]
        );
        assert_eq!(
            endpoints(&on[4]),
            vec![Point::new(8.0, 6.0), Point::new(6.0, 8.0), Point::new(2.0, 8.0), Point::new(8.0, 2.0)]
        );
        match on[0].commands[3] {
            PathCommand::ArcTo { sweep, .. } => assert!(sweep),
            _ => panic!("expected the outer arc"),
        }

        let off = tile_paths(&params, Point::zero(), 8.0, false);
        assert_eq!(
            endpoints(&off[0]),
            vec![Point::new(6.0, 0.0), Point::new(8.0, 2.0), Point::new(8.0, 6.0), Point::new(2.0, 0.0)]
        );
        assert_eq!(endpoints(&off[1]), vec![Point::new(6.0, 0.0), Point::new(8.0, 2.0)]);
        assert_eq!(
            endpoints(&off[4]),
            vec![Point::new(2.0, 8.0), Point::new(0.0, 6.0), Point::new(0.0, 2.0), Point::new(6.0, 8.0)]
        );
    }

    #[test]
    fn concentric_with_no_circles_is_empty() {
        let params = TileParams {
            pattern: TileStyle::ConcentricSmith,
            concentric_smith: ConcentricSmithParams { num_circles: 0, ..ConcentricSmithParams::default() },
        };
        assert!(tile_paths(&params, Point::zero(), 10.0, true).is_empty());
    }

    #[test]
    fn group_style_per_tile_style() {
        assert!(GroupStyle::for_tile(&tile(TileStyle::Solid)).filled);
        assert!(GroupStyle::for_tile(&tile(TileStyle::Triangle)).filled);
        assert_eq!(GroupStyle::for_tile(&tile(TileStyle::Smith)).stroke_width, 2.0);
        assert_eq!(GroupStyle::for_tile(&tile(TileStyle::ConcentricSmith)).stroke_width, 3.0);
    }

    #[test]
    fn render_grid_places_tiles_on_cell_origins() {
        let grid_params = GridParams {
            width: 20.0,
            height: 10.0,
            spacing: 10.0,
            pattern: crate::truchet::GridPattern::Checkerboard,
            ..GridParams::default()
        };
        let grid = synthesize(&grid_params, &mut StdRng::seed_from_u64(0));
        let mosaic = render_grid(&grid, &tile(TileStyle::Diagonal));
        assert_eq!((mosaic.width, mosaic.height), (20.0, 10.0));
        assert_eq!(mosaic.paths.len(), 2);
        // (0,0) is clear, (0,1) is set
        assert_eq!(endpoints(&mosaic.paths[0]), vec![Point::new(0.0, 10.0), Point::new(10.0, 0.0)]);
        assert_eq!(endpoints(&mosaic.paths[1]), vec![Point::new(10.0, 0.0), Point::new(20.0, 10.0)]);
    }
}
