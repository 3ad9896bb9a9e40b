//! Voronoi "vein" mosaics.
//!
//! Pipeline, rerun wholesale for every parameter change:
//!
//! ```text
//! sites --PlanarSubdivision--> Diagram --order_cell--> VCell
//!       --inset_vertices--> simplify --> bezier_segments --> RefinedCell
//! ```
//!
//! The rounded cells are painted on top of (or cut out of) the canvas, so the
//! gaps between them read as veins.

pub mod cell;
pub mod delaunay;
pub mod diagram;
pub mod refine;

use serde::{Deserialize, Serialize};

use crate::config::selector_names;
use crate::geometry::{Line, Point};
use crate::path::{Path, PathRole};

pub use cell::{VCell, order_cell, transform_cells};
pub use delaunay::DelaunaySubdivision;
pub use diagram::{Bounds, Diagram, DiagramCell, Edge, HalfEdge, PlanarSubdivision};
pub use refine::{BezierParams, bezier_segments, inset_vertices, simplify};

/// A drawable layer of a Voronoi mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Layer {
    Seeds,
    Edges,
    HardCells,
    SmoothCells,
    ControlPoints,
    Veins,
}

selector_names!(Layer, "voronoi layer", {
    Seeds => "seeds",
    Edges => "edges",
    HardCells => "hardCells",
    SmoothCells => "smoothCells",
    ControlPoints => "controlPoints",
    Veins => "veins",
});

/// Which layers to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoronoiLayers {
    pub seeds: bool,
    pub edges: bool,
    pub hard_cells: bool,
    pub smooth_cells: bool,
    pub control_points: bool,
    pub veins: bool,
}

impl Default for VoronoiLayers {
    fn default() -> Self {
        Self {
            seeds: true,
            edges: false,
            hard_cells: false,
            smooth_cells: true,
            control_points: false,
            veins: false,
        }
    }
}

impl VoronoiLayers {
    /// Nothing shown.
    pub fn none() -> Self {
        Self {
            seeds: false,
            edges: false,
            hard_cells: false,
            smooth_cells: false,
            control_points: false,
            veins: false,
        }
    }

    /// Exactly the given layers shown.
    pub fn only(layers: &[Layer]) -> Self {
        let mut shown = Self::none();
        for &layer in layers {
            shown.set(layer, true);
        }
        shown
    }

    pub fn set(&mut self, layer: Layer, shown: bool) {
        let flag = match layer {
            Layer::Seeds => &mut self.seeds,
            Layer::Edges => &mut self.edges,
            Layer::HardCells => &mut self.hard_cells,
            Layer::SmoothCells => &mut self.smooth_cells,
            Layer::ControlPoints => &mut self.control_points,
            Layer::Veins => &mut self.veins,
        };
        *flag = shown;
    }

    pub fn is_shown(&self, layer: Layer) -> bool {
        match layer {
            Layer::Seeds => self.seeds,
            Layer::Edges => self.edges,
            Layer::HardCells => self.hard_cells,
            Layer::SmoothCells => self.smooth_cells,
            Layer::ControlPoints => self.control_points,
            Layer::Veins => self.veins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoronoiParams {
    pub width: f64,
    pub height: f64,
    /// Full vein width; cells are inset by half of it
    pub border_width: f64,
    /// Marching increment when searching for inset points
    pub parallel_path_step: f64,
    pub simplify_radius: f64,
    /// Control point reach, 1.0 puts both controls on the corner
    pub bezier_factor: f64,
    pub layers: VoronoiLayers,
}

impl Default for VoronoiParams {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 700.0,
            border_width: 3.0,
            parallel_path_step: 0.05,
            simplify_radius: 4.0,
            bezier_factor: 1.0,
            layers: VoronoiLayers::default(),
        }
    }
}

impl VoronoiParams {
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_border_width(mut self, border_width: f64) -> Self {
        self.border_width = border_width;
        self
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }
}

/// One cell carried through every refinement stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinedCell {
    pub site_index: usize,
    pub cell: VCell,
    /// Inset and simplified outline
    pub inset: Vec<Point>,
    /// Smoothed outline; `None` when the inset has fewer than three points
    pub bezier: Option<Vec<BezierParams>>,
}

/// Everything the renderer needs to draw a Voronoi mosaic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoronoiMosaic {
    pub width: f64,
    pub height: f64,
    pub sites: Vec<Point>,
    /// Diagram edges with both ends known
    #[serde(skip)]
    pub edges: Vec<Line>,
    pub cells: Vec<RefinedCell>,
    pub layers: VoronoiLayers,
}

impl VoronoiMosaic {
    /// Inset polygons, one per cell that kept at least three points.
    pub fn hard_cell_paths(&self) -> Vec<Path> {
        self.cells
            .iter()
            .filter(|c| c.inset.len() >= 3)
            .map(|c| Path::polyline(&c.inset, true, PathRole::Fill))
            .collect()
    }

    pub fn smooth_cell_paths(&self) -> Vec<Path> {
        self.cells
            .iter()
            .filter_map(|c| c.bezier.as_deref())
            .map(|b| Path::bezier_loop(b, PathRole::Fill))
            .collect()
    }

    /// The canvas rectangle with every smoothed cell as a further subpath.
    ///
    /// The rectangle runs clockwise on screen and the cells the other way,
    /// so a non-zero fill leaves the cells as holes.
    pub fn veins_path(&self) -> Path {
        let canvas = Bounds::from_size(self.width, self.height).corners();
        let mut path = Path::polyline(&canvas, true, PathRole::Fill);
        for cell in self.smooth_cell_paths() {
            path.commands.extend(cell.commands);
        }
        path
    }

    pub fn control_points(&self) -> impl Iterator<Item = &BezierParams> {
        self.cells.iter().filter_map(|c| c.bezier.as_deref()).flatten()
    }
}

/// Run the whole pipeline for `sites`.
pub fn build<S>(params: &VoronoiParams, sites: &[Point], subdivision: &S) -> VoronoiMosaic
where
    S: PlanarSubdivision + ?Sized,
{
    let diagram = subdivision.compute(sites, &params.bounds());
    let inset = 0.5 * params.border_width;

    let cells: Vec<RefinedCell> = diagram
        .cells
        .iter()
        .map(|dc| {
            let cell = order_cell(dc);
            let ticks = inset_vertices(&cell, inset, params.parallel_path_step);
            let inset = simplify(&ticks, params.simplify_radius);
            let bezier = bezier_segments(&inset, params.bezier_factor);
            RefinedCell { site_index: dc.site_index, cell, inset, bezier }
        })
        .collect();

    let smoothed = cells.iter().filter(|c| c.bezier.is_some()).count();
    tracing::debug!(
        sites = sites.len(),
        cells = cells.len(),
        smoothed,
        "built voronoi mosaic"
    );

    VoronoiMosaic {
        width: params.width,
        height: params.height,
        sites: sites.to_vec(),
        edges: diagram.finite_edges(),
        cells,
        layers: params.layers,
    }
}
