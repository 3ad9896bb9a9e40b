//! Voronoi diagrams from a Delaunay triangulation.
//!
//! Each cell starts as the bounds rectangle and is cut down by the
//! perpendicular bisector of every Delaunay neighbour (Sutherland-Hodgman
//! against one half-plane at a time). Every ring edge remembers which
//! neighbour produced it, which gives the diagram its `right_site` labels.

use spade::{DelaunayTriangulation, HasPosition, Point2, Triangulation};

use super::diagram::{Bounds, Diagram, DiagramCell, Edge, HalfEdge, PlanarSubdivision};
use crate::geometry::{EPSILON, Point};

/// Triangulation vertex carrying the caller's site index.
#[derive(Debug, Clone, Copy)]
struct Site {
    position: Point2<f64>,
    index: usize,
}

impl HasPosition for Site {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

/// [`PlanarSubdivision`] backed by `spade`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelaunaySubdivision;

impl DelaunaySubdivision {
    pub fn new() -> Self {
        Self
    }
}

impl PlanarSubdivision for DelaunaySubdivision {
    fn compute(&self, sites: &[Point], bounds: &Bounds) -> Diagram {
        if !(bounds.width() > 0.0 && bounds.height() > 0.0) {
            tracing::warn!(?bounds, "empty bounds; no diagram");
            return Diagram::default();
        }

        let input: Vec<Site> = sites
            .iter()
            .enumerate()
            .filter(|(_, p)| p.x.is_finite() && p.y.is_finite())
            .map(|(index, p)| Site { position: Point2::new(p.x, p.y), index })
            .collect();
        if input.len() < sites.len() {
            tracing::debug!(dropped = sites.len() - input.len(), "ignoring non-finite sites");
        }
        if input.is_empty() {
            return Diagram::default();
        }

        let triangulation = match DelaunayTriangulation::<Site>::bulk_load_stable(input) {
            Ok(t) => t,
            Err(err) => {
                tracing::error!(?err, "failed to triangulate sites");
                return Diagram::default();
            }
        };

        let mut cells: Vec<DiagramCell> = triangulation
            .vertices()
            .filter_map(|vertex| {
                let site = *vertex.data();
                let mut ring = Ring::rect(bounds);
                for edge in vertex.out_edges() {
                    let neighbour = *edge.to().data();
                    ring = ring.clip(to_point(site.position), to_point(neighbour.position), neighbour.index);
                    if ring.points.len() < 3 {
                        break;
                    }
                }
                ring.into_cell(to_point(site.position), site.index)
            })
            .collect();
        cells.sort_by_key(|c| c.site_index);

        let mut diagram = Diagram::default();
        for cell in &cells {
            for half_edge in &cell.half_edges {
                let edge = half_edge.edge;
                if edge.right_site.is_none_or(|right| edge.left_site < right) {
                    diagram.edges.push(edge);
                }
                if let Some(va) = edge.va {
                    diagram.add_vertex(va);
                }
            }
        }
        diagram.cells = cells;

        tracing::debug!(
            sites = sites.len(),
            cells = diagram.cells.len(),
            edges = diagram.edges.len(),
            "computed voronoi diagram"
        );
        diagram
    }
}

fn to_point(p: Point2<f64>) -> Point {
    Point::new(p.x, p.y)
}

/// Convex polygon whose edge `i` runs from `points[i]` to `points[i + 1]`
/// and borders the site `labels[i]` (`None` on the bounds).
#[derive(Debug, Clone)]
struct Ring {
    points: Vec<Point>,
    labels: Vec<Option<usize>>,
}

impl Ring {
    fn rect(bounds: &Bounds) -> Self {
        Self { points: bounds.corners().to_vec(), labels: vec![None; 4] }
    }

    /// Keep the half-plane closer to `site` than to `neighbour`.
    fn clip(&self, site: Point, neighbour: Point, label: usize) -> Ring {
        let normal = neighbour - site;
        if normal.length_squared() < EPSILON * EPSILON {
            return self.clone();
        }
        let mid = site.midpoint(neighbour);
        let side = |p: Point| (p - mid).dot(normal);

        let n = self.points.len();
        let mut out = Ring { points: Vec::with_capacity(n + 1), labels: Vec::with_capacity(n + 1) };

        for i in 0..n {
            let p = self.points[i];
            let q = self.points[(i + 1) % n];
            let (sp, sq) = (side(p), side(q));
            let (p_in, q_in) = (sp <= 0.0, sq <= 0.0);
            let next_label = self.labels[(i + 1) % n];

            match (p_in, q_in) {
                (true, true) => out.push(q, next_label),
                (true, false) => out.push(p + (q - p) * (sp / (sp - sq)), Some(label)),
                (false, true) => {
                    out.push(p + (q - p) * (sp / (sp - sq)), self.labels[i]);
                    out.push(q, next_label);
                }
                (false, false) => {}
            }
        }
        out
    }

    fn push(&mut self, p: Point, label: Option<usize>) {
        self.points.push(p);
        self.labels.push(label);
    }

    fn into_cell(self, site: Point, site_index: usize) -> Option<DiagramCell> {
        let n = self.points.len();
        if n < 3 {
            tracing::debug!(site_index, "site has an empty cell");
            return None;
        }

        let half_edges = (0..n)
            .filter_map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                if a.distance(b) < EPSILON {
                    return None;
                }
                Some(HalfEdge {
                    site_index,
                    edge: Edge {
                        left_site: site_index,
                        right_site: self.labels[i],
                        va: Some(a),
                        vb: Some(b),
                    },
                })
            })
            .collect();

        Some(DiagramCell { site, site_index, half_edges })
    }
}
