//! Voronoi diagram data model.
//!
//! The diagram is produced by a [`PlanarSubdivision`]; the rest of the
//! pipeline only reads it. Unbounded edge ends are modelled as `None`.

use serde::Serialize;

use crate::geometry::{EPSILON, Line, Point};

/// Clipping rectangle, +y down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }

    /// Rectangle from the origin to `(width, height)`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Corners clockwise on screen, starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Boundary between two sites' cells, or between a cell and the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub left_site: usize,
    /// `None` on the bounds rectangle
    pub right_site: Option<usize>,
    pub va: Option<Point>,
    pub vb: Option<Point>,
}

impl Edge {
    pub fn is_finite(&self) -> bool {
        self.va.is_some() && self.vb.is_some()
    }

    /// The edge as a segment, when both ends are known.
    pub fn to_line(&self) -> Option<Line> {
        Some(Line::new(self.va?, self.vb?))
    }
}

/// An edge as seen from one of its cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfEdge {
    pub site_index: usize,
    pub edge: Edge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramCell {
    pub site: Point,
    pub site_index: usize,
    pub half_edges: Vec<HalfEdge>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Diagram {
    pub cells: Vec<DiagramCell>,
    pub edges: Vec<Edge>,
    pub vertices: Vec<Point>,
}

impl Diagram {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Segments for every edge with two known endpoints.
    pub fn finite_edges(&self) -> Vec<Line> {
        let lines: Vec<Line> = self.edges.iter().filter_map(Edge::to_line).collect();
        let skipped = self.edges.len() - lines.len();
        if skipped > 0 {
            tracing::debug!(skipped, "skipping unbounded diagram edges");
        }
        lines
    }

    /// Record `p` unless an existing vertex is already within `EPSILON`.
    pub(crate) fn add_vertex(&mut self, p: Point) {
        if !self.vertices.iter().any(|v| v.is_close(p, EPSILON)) {
            self.vertices.push(p);
        }
    }
}

/// Computes a Voronoi diagram for a set of sites clipped to `bounds`.
///
/// Implementations must return one cell per distinct site they could place
/// and must not fail; problems are logged and reported as an empty diagram.
pub trait PlanarSubdivision {
    fn compute(&self, sites: &[Point], bounds: &Bounds) -> Diagram;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_geometry() {
        let b = Bounds::from_size(16.0, 7.0);
        assert_eq!(b.area(), 112.0);
        assert_eq!(b.corners()[2], Point::new(16.0, 7.0));
        assert!(b.contains(Point::new(16.0, 0.0)));
        assert!(!b.contains(Point::new(-0.1, 3.0)));
    }

    #[test]
    fn unbounded_edges_are_skipped() {
        let diagram = Diagram {
            cells: Vec::new(),
            edges: vec![
                Edge { left_site: 0, right_site: Some(1), va: Some(Point::zero()), vb: Some(Point::new(1.0, 0.0)) },
                Edge { left_site: 0, right_site: Some(2), va: Some(Point::zero()), vb: None },
            ],
            vertices: Vec::new(),
        };
        assert!(diagram.edges[0].is_finite());
        assert!(!diagram.edges[1].is_finite());
        assert_eq!(diagram.finite_edges().len(), 1);
    }

    #[test]
    fn vertices_are_deduplicated() {
        let mut diagram = Diagram::default();
        diagram.add_vertex(Point::new(1.0, 1.0));
        diagram.add_vertex(Point::new(1.0, 1.0 + 1e-12));
        diagram.add_vertex(Point::new(2.0, 1.0));
        assert_eq!(diagram.vertices.len(), 2);
    }
}
