//! Seed point generators for Voronoi mosaics.
//!
//! Every generator works over an oversized area so that rotated lattices
//! still cover the canvas, keeps only points inside the border, and gives up
//! after [`LOOP_LIMIT`] iterations with a warning.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::selector_names;
use crate::geometry::Point;

/// Maximum iterations of any sampling loop.
pub const LOOP_LIMIT: usize = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PointsSource {
    #[default]
    Cairo,
    Grid,
    Random,
}

selector_names!(PointsSource, "points source", {
    Cairo => "cairo",
    Grid => "grid",
    Random => "random",
});

/// Rectangular lattice, optionally staggered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSampler {
    /// Rotation in degrees
    pub angle: f64,
    pub border: f64,
    pub is_staggered: bool,
    pub jitter: f64,
    pub x_spacing: f64,
    pub y_spacing: f64,
}

impl Default for GridSampler {
    fn default() -> Self {
        Self { angle: 0.0, border: 1.0, is_staggered: true, jitter: 0.0, x_spacing: 50.0, y_spacing: 50.0 }
    }
}

/// Uniform points with a minimum spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RandomSampler {
    pub border: f64,
    pub min_spacing: f64,
    pub num_points: usize,
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self { border: 20.0, min_spacing: 40.0, num_points: 300 }
    }
}

/// Sites whose Voronoi diagram is a Cairo pentagonal tiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CairoSampler {
    /// Rotation in degrees
    pub angle: f64,
    pub border: f64,
    pub jitter: f64,
    pub spacing: f64,
}

impl Default for CairoSampler {
    fn default() -> Self {
        Self { angle: 0.0, border: 20.0, jitter: 0.0, spacing: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointsParams {
    pub source: PointsSource,
    pub cairo: CairoSampler,
    pub grid: GridSampler,
    pub random: RandomSampler,
}

/// Generate sites for a `width` x `height` canvas with the selected source.
pub fn generate<R: Rng + ?Sized>(params: &PointsParams, width: f64, height: f64, rng: &mut R) -> Vec<Point> {
    let points = match params.source {
        PointsSource::Cairo => params.cairo.generate(width, height, rng),
        PointsSource::Grid => params.grid.generate(width, height, rng),
        PointsSource::Random => params.random.generate(width, height, rng),
    };
    tracing::debug!(source = %params.source, count = points.len(), "generated sites");
    points
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// `jitter * u` for `u` uniform in [-1, 1).
fn wobble<R: Rng + ?Sized>(jitter: f64, rng: &mut R) -> f64 {
    jitter * (2.0 * rng.random::<f64>() - 1.0)
}

/// Tracks the iteration budget of one sampling loop.
struct LoopGuard {
    count: usize,
}

impl LoopGuard {
    fn new() -> Self {
        Self { count: 0 }
    }

    /// Count one iteration; false once the budget is spent.
    fn tick(&mut self, sampler: &str) -> bool {
        self.count += 1;
        if self.count > LOOP_LIMIT {
            tracing::warn!(sampler, limit = LOOP_LIMIT, "too many loops; aborting");
            return false;
        }
        true
    }
}

struct Frame {
    width: f64,
    height: f64,
    border: f64,
}

impl Frame {
    fn admits(&self, p: Point) -> bool {
        p.x >= self.border && p.x < self.width - self.border && p.y >= self.border && p.y < self.height - self.border
    }
}

impl GridSampler {
    pub fn generate<R: Rng + ?Sized>(&self, width: f64, height: f64, rng: &mut R) -> Vec<Point> {
        let mut points = Vec::new();
        if !(positive(width) && positive(height) && positive(self.x_spacing) && positive(self.y_spacing)) {
            tracing::warn!(sampler = ?self, width, height, "grid sampler needs positive extents");
            return points;
        }

        let frame = Frame { width, height, border: self.border };
        let max_dim = width.max(height);
        let (xs, ys) = (self.x_spacing, self.y_spacing);
        let angle = -self.angle * PI / 180.0;
        let (sin, cos) = angle.sin_cos();

        let nx = (max_dim / xs).floor();
        let ny = (max_dim / ys).floor();
        let x_start = xs - nx * xs;
        let mut x = x_start;
        let mut y = ys - ny * ys;
        let mut is_even = (nx as u64) % 2 == 0;

        let mut guard = LoopGuard::new();
        while y < height + max_dim {
            if !guard.tick("grid") {
                break;
            }

            let xj = x - xs + wobble(self.jitter, rng);
            let yj = y - ys + wobble(self.jitter, rng);
            let p = Point::new(xj * cos - yj * sin + xs, yj * cos + xj * sin + ys);
            if frame.admits(p) {
                points.push(p);
            }

            x += xs;
            if x >= width + max_dim {
                y += ys;
                is_even = !is_even;
                x = x_start;
                if self.is_staggered && !is_even {
                    x += 0.5 * xs;
                }
            }
        }
        points
    }
}

impl RandomSampler {
    pub fn generate<R: Rng + ?Sized>(&self, width: f64, height: f64, rng: &mut R) -> Vec<Point> {
        let mut points: Vec<Point> = Vec::new();
        let r_squared = self.min_spacing * self.min_spacing;
        let border = self.border;

        let mut guard = LoopGuard::new();
        while points.len() < self.num_points {
            if !guard.tick("random") {
                break;
            }

            let p = Point::new(
                rng.random::<f64>() * (width - 2.0 * border) + border,
                rng.random::<f64>() * (height - 2.0 * border) + border,
            );
            if !points.iter().any(|q| q.distance_squared(p) < r_squared) {
                points.push(p);
            }
        }
        points
    }
}

impl CairoSampler {
    pub fn generate<R: Rng + ?Sized>(&self, width: f64, height: f64, rng: &mut R) -> Vec<Point> {
        let mut points = Vec::new();
        if !(positive(width) && positive(height) && positive(self.spacing)) {
            tracing::warn!(sampler = ?self, width, height, "cairo sampler needs positive extents");
            return points;
        }

        let frame = Frame { width, height, border: self.border };
        let max_dim = width.max(height);
        let s = self.spacing;
        let angle = -self.angle * PI / 180.0;
        let (sin, cos) = angle.sin_cos();

        let d1 = s * 3f64.sqrt() / 2.0;
        let d2 = s + d1;
        let k = ((max_dim + d2) / d2).floor();
        let origin = -k * d2;

        let (mut x0, mut y0) = (origin, origin);
        let (mut x, mut y) = (x0, y0);
        let mut col_alt = false;
        let mut row_alt = false;

        let mut guard = LoopGuard::new();
        while y < height + max_dim {
            if !guard.tick("cairo") {
                break;
            }

            let xj = x + wobble(self.jitter, rng);
            let yj = y + wobble(self.jitter, rng);
            let p = Point::new(xj * cos - yj * sin, yj * cos + xj * sin);
            if frame.admits(p) {
                points.push(p);
            }

            if x >= width + max_dim {
                if row_alt {
                    x0 -= 0.5 * s;
                    y0 += d1;
                } else {
                    y0 += s;
                }
                col_alt = false;
                x = x0;
                y = y0;
                row_alt = !row_alt;
            } else {
                x += if col_alt { s } else { d1 };
                y += if col_alt { 0.0 } else { 0.5 * s };
                col_alt = !col_alt;
            }
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn inside(points: &[Point], width: f64, height: f64, border: f64) -> bool {
        points
            .iter()
            .all(|p| p.x >= border && p.x < width - border && p.y >= border && p.y < height - border)
    }

    #[test]
    fn grid_unrotated_lattice() {
        let sampler = GridSampler { is_staggered: false, border: 0.0, ..GridSampler::default() };
        let points = sampler.generate(200.0, 100.0, &mut rng());
        // Columns 0, 50, 100, 150 and rows 0, 50
        assert_eq!(points.len(), 8);
        assert!(points.contains(&Point::new(150.0, 50.0)));
        assert!(inside(&points, 200.0, 100.0, 0.0));
    }

    #[test]
    fn grid_stagger_offsets_alternate_rows() {
        let straight = GridSampler { is_staggered: false, ..GridSampler::default() };
        let staggered = GridSampler::default();
        let a = straight.generate(400.0, 400.0, &mut rng());
        let b = staggered.generate(400.0, 400.0, &mut rng());
        assert!(a.iter().all(|p| (p.x % 50.0).abs() < 1e-9));
        assert!(b.iter().any(|p| ((p.x - 25.0) % 50.0).abs() < 1e-9));
    }

    #[test]
    fn grid_rotation_and_jitter_respect_border() {
        let sampler = GridSampler { angle: 30.0, jitter: 5.0, border: 10.0, ..GridSampler::default() };
        let points = sampler.generate(300.0, 200.0, &mut rng());
        assert!(!points.is_empty());
        assert!(inside(&points, 300.0, 200.0, 10.0));
    }

    #[test]
    fn random_points_keep_min_spacing() {
        let sampler = RandomSampler { num_points: 50, min_spacing: 20.0, border: 5.0 };
        let points = sampler.generate(400.0, 300.0, &mut rng());
        assert_eq!(points.len(), 50);
        assert!(inside(&points, 400.0, 300.0, 5.0));
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= 20.0);
            }
        }
    }

    #[test]
    fn random_gives_up_when_space_runs_out() {
        let sampler = RandomSampler { num_points: 1_000, min_spacing: 50.0, border: 0.0 };
        let points = sampler.generate(100.0, 100.0, &mut rng());
        assert!(points.len() < 1_000);
        assert!(!points.is_empty());
    }

    #[test]
    fn huge_point_counts_stop_at_the_loop_limit() {
        let sampler = RandomSampler { num_points: usize::MAX, min_spacing: 50.0, border: 0.0 };
        let points = sampler.generate(100.0, 100.0, &mut rng());
        assert!(!points.is_empty());
        assert!(points.len() < 10);
    }

    #[test]
    fn cairo_points_fill_the_canvas() {
        let points = CairoSampler::default().generate(800.0, 600.0, &mut rng());
        assert!(points.len() > 50);
        assert!(inside(&points, 800.0, 600.0, 20.0));
    }

    #[test]
    fn degenerate_spacing_yields_nothing() {
        let grid = GridSampler { x_spacing: 0.0, ..GridSampler::default() };
        assert!(grid.generate(100.0, 100.0, &mut rng()).is_empty());
        let cairo = CairoSampler { spacing: -1.0, ..CairoSampler::default() };
        assert!(cairo.generate(100.0, 100.0, &mut rng()).is_empty());
    }

    #[test]
    fn generate_dispatches_on_source() {
        let params = PointsParams { source: PointsSource::Random, ..PointsParams::default() };
        let points = generate(&params, 1600.0, 700.0, &mut rng());
        assert!(!points.is_empty());
        assert!(inside(&points, 1600.0, 700.0, 20.0));
    }
}
