//! Turning hard cell polygons into rounded blobs.
//!
//! Three steps, each usable on its own:
//! 1. [`inset_vertices`] walks every edge and finds where a point pushed
//!    inward by the border width first clears all edges of the cell.
//! 2. [`simplify`] merges clusters of nearby points into their centroid.
//! 3. [`bezier_segments`] rounds each corner with a cubic from the middle of
//!    the incoming edge to the middle of the outgoing one.

use serde::Serialize;

use super::cell::VCell;
use crate::geometry::{EPSILON, Line, Point};

/// Slack allowed when testing a candidate against the border width.
pub const INSET_TOLERANCE: f64 = 0.1;

/// One cubic segment of a smoothed cell outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BezierParams {
    pub start: Point,
    pub c1: Point,
    pub c2: Point,
    pub end: Point,
}

fn distance_to_any_edge(p: Point, edges: &[Line]) -> f64 {
    edges
        .iter()
        .map(|e| e.distance_to_segment(p))
        .fold(f64::INFINITY, f64::min)
}

/// Walk from `origin` along `dir` in `step` increments and return the first
/// offset candidate that satisfies `clear`.
///
/// The candidate at `origin` itself is always tested; later candidates must stay
/// strictly inside the edge of length `len`.
fn march(
    origin: Point,
    dir: Point,
    normal: Point,
    step: f64,
    len: f64,
    clear: impl Fn(Point) -> bool,
) -> Option<Point> {
    let mut k: u64 = 0;
    loop {
        let candidate = origin + dir * (k as f64 * step) + normal;
        if clear(candidate) {
            return Some(candidate);
        }
        k += 1;
        if k as f64 * step >= len {
            return None;
        }
    }
}

fn push_unique(points: &mut Vec<Point>, p: Point, eps: f64) {
    if !points.iter().any(|t| p.is_close(*t, eps)) {
        points.push(p);
    }
}

/// Points lying `distance` inside the cell boundary.
///
/// For each edge, at most one start point (found marching from the edge's
/// first vertex) and one end point (marching back from its last vertex) are
/// kept. A point within `step + INSET_TOLERANCE` of one already kept is
/// dropped.
pub fn inset_vertices(cell: &VCell, distance: f64, step: f64) -> Vec<Point> {
    let mut ticks = Vec::new();
    let Some(&last) = cell.vertices.last() else {
        return ticks;
    };
    if cell.vertices.len() < 3 {
        return ticks;
    }
    if !(step > 0.0) {
        tracing::warn!(step, "parallel path step must be positive");
        return ticks;
    }

    let limit = distance - INSET_TOLERANCE;
    let dedupe = step + INSET_TOLERANCE;
    let clear = |p: Point| distance_to_any_edge(p, &cell.edges) >= limit;

    let mut prev = last;
    for &curr in &cell.vertices {
        let line = Line::new(prev, curr);
        let len = line.length();
        if len < EPSILON {
            tracing::debug!(?prev, "skipping zero-length cell edge");
            prev = curr;
            continue;
        }

        let dir = line.parallel_vector().normalize();
        let normal = line.normal_right().normalize() * distance;

        if let Some(start) = march(prev, dir, normal, step, len, clear) {
            push_unique(&mut ticks, start, dedupe);
            if let Some(end) = march(curr, -dir, normal, step, len, clear) {
                push_unique(&mut ticks, end, dedupe);
            }
        }

        prev = curr;
    }

    ticks
}

/// Repeatedly replace the first point that has neighbours within `radius`
/// (per coordinate) by the centroid of the group, until nothing merges.
pub fn simplify(vertices: &[Point], radius: f64) -> Vec<Point> {
    let mut path = vertices.to_vec();

    'scan: loop {
        for i in 0..path.len() {
            let v = path[i];
            let neighbours: Vec<usize> = (0..path.len())
                .filter(|&j| j != i && path[j].is_close(v, radius))
                .collect();
            if neighbours.is_empty() {
                continue;
            }

            let sum = neighbours.iter().fold(v, |acc, &j| acc + path[j]);
            path[i] = sum * (1.0 / (neighbours.len() + 1) as f64);
            for &j in neighbours.iter().rev() {
                path.remove(j);
            }
            continue 'scan;
        }
        break;
    }

    path
}

/// Closed cubic chain rounding every corner of `vertices`.
///
/// Returns `None` for fewer than three vertices. Segment `i` bends around
/// `vertices[i - 1]`; consecutive segments share endpoints exactly.
pub fn bezier_segments(vertices: &[Point], factor: f64) -> Option<Vec<BezierParams>> {
    let n = vertices.len();
    if n < 3 {
        return None;
    }

    let mut prev = vertices[n - 1];
    let mut prev_mid = Line::new(vertices[n - 2], prev).midpoint();

    let control = |from: Point, corner: Point| {
        let l = Line::new(from, corner);
        from + l.parallel_vector().normalize() * (l.length() * factor)
    };

    let segments = vertices
        .iter()
        .map(|&v| {
            let mid = Line::new(prev, v).midpoint();
            let segment = BezierParams {
                start: prev_mid,
                c1: control(prev_mid, prev),
                c2: control(mid, prev),
                end: mid,
            };
            prev = v;
            prev_mid = mid;
            segment
        })
        .collect();

    Some(segments)
}
