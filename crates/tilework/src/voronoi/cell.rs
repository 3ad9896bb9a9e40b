//! Ordered cell polygons.

use serde::Serialize;

use super::diagram::{Diagram, DiagramCell};
use crate::geometry::{EPSILON, Line, Point};

/// A cell's vertices, sorted by descending angle around the site, and the
/// edges joining them.
///
/// `edges[i]` runs from `vertices[i - 1]` (wrapping) to `vertices[i]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct VCell {
    pub vertices: Vec<Point>,
    #[serde(skip)]
    pub edges: Vec<Line>,
}

impl VCell {
    /// Build a cell from already ordered vertices.
    ///
    /// Fewer than three vertices give an empty cell.
    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        if vertices.len() < 3 {
            return Self::default();
        }
        let edges = edges_from_ordered(&vertices);
        Self { vertices, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

fn edges_from_ordered(vertices: &[Point]) -> Vec<Line> {
    let Some(&last) = vertices.last() else {
        return Vec::new();
    };
    let mut prev = last;
    vertices
        .iter()
        .map(|&curr| {
            let edge = Line::new(prev, curr);
            prev = curr;
            edge
        })
        .collect()
}

/// Collect the finite endpoints of a cell's half-edges and order them.
pub fn order_cell(cell: &DiagramCell) -> VCell {
    let mut vertices: Vec<Point> = Vec::new();
    for half_edge in &cell.half_edges {
        for p in [half_edge.edge.va, half_edge.edge.vb].into_iter().flatten() {
            if !(p.x.is_finite() && p.y.is_finite()) {
                continue;
            }
            if !vertices.iter().any(|v| v.is_close(p, EPSILON)) {
                vertices.push(p);
            }
        }
    }

    let site = cell.site;
    let mut keyed: Vec<(f64, Point)> = vertices
        .into_iter()
        .map(|v| ((v - site).angle(), v))
        .collect();
    // Descending; stable so ties keep discovery order.
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));

    VCell::from_vertices(keyed.into_iter().map(|(_, v)| v).collect())
}

/// Order every cell of `diagram`, in diagram order.
pub fn transform_cells(diagram: &Diagram) -> Vec<VCell> {
    diagram.cells.iter().map(order_cell).collect()
}
