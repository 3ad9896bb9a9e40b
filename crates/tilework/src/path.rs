//! Path descriptors emitted by the tile and Voronoi generators.
//!
//! A `Path` is an ordered list of drawing commands plus a role telling the
//! renderer whether to stroke it, fill it, or paint it as tile background.
//! Rendering to markup lives in [`crate::svg`]; plotters and rasterisers can
//! instead call [`Path::flatten`] to get plain polylines.

use std::fmt::Write as _;

use lyon_geom::{CubicBezierSegment, point};
use serde::Serialize;

use crate::geometry::{CircularArc, Point};
use crate::voronoi::BezierParams;

/// Default tolerance for [`Path::flatten`].
pub const FLATTEN_TOLERANCE: f64 = 0.1;

/// A single drawing command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    ArcTo {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    },
    CubicTo {
        c1: Point,
        c2: Point,
        end: Point,
    },
    Close,
}

/// How a path should be painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PathRole {
    /// Outline only
    Stroke,
    /// Solid foreground fill
    Fill,
    /// Background-coloured fill, no stroke
    Background,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub commands: Vec<PathCommand>,
    pub role: PathRole,
}

impl Path {
    pub fn new(role: PathRole) -> Self {
        Self { commands: Vec::new(), role }
    }

    /// Polyline through `points`, optionally closed.
    pub fn polyline(points: &[Point], closed: bool, role: PathRole) -> Self {
        let mut path = Self::new(role);
        for (i, &p) in points.iter().enumerate() {
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        if closed && points.len() > 1 {
            path.close();
        }
        path
    }

    /// Standalone stroked arc.
    pub fn arc(arc: &CircularArc) -> Self {
        let mut path = Self::new(PathRole::Stroke);
        path.move_to(arc.start);
        path.arc_to(arc);
        path
    }

    /// Closed chain of cubic segments, as produced for a smoothed cell.
    pub fn bezier_loop(segments: &[BezierParams], role: PathRole) -> Self {
        let mut path = Self::new(role);
        for (i, b) in segments.iter().enumerate() {
            if i == 0 {
                path.move_to(b.start);
            }
            path.commands.push(PathCommand::CubicTo { c1: b.c1, c2: b.c2, end: b.end });
        }
        if !segments.is_empty() {
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    /// Continue with an arc; the current point is assumed to be `arc.start`.
    pub fn arc_to(&mut self, arc: &CircularArc) -> &mut Self {
        self.commands.push(PathCommand::ArcTo {
            radius: arc.radius,
            large_arc: arc.large_arc,
            sweep: arc.sweep,
            end: arc.end,
        });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Render the SVG `d` attribute.
    pub fn to_svg_data(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(d, "M {} {}", p.x, p.y),
                PathCommand::LineTo(p) => write!(d, "L {} {}", p.x, p.y),
                PathCommand::ArcTo { radius, large_arc, sweep, end } => write!(
                    d,
                    "A {r} {r} 0 {} {} {} {}",
                    large_arc as u8,
                    sweep as u8,
                    end.x,
                    end.y,
                    r = radius
                ),
                PathCommand::CubicTo { c1, c2, end } => write!(
                    d,
                    "C {} {} {} {} {} {}",
                    c1.x, c1.y, c2.x, c2.y, end.x, end.y
                ),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }

    /// Flatten into polylines, one per subpath.
    ///
    /// Closed subpaths repeat their first point at the end.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<Point>> {
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(p);
                }
                PathCommand::LineTo(p) => current.push(p),
                PathCommand::ArcTo { radius, large_arc, sweep, end } => {
                    let Some(&from) = current.last() else { continue };
                    let arc = CircularArc { radius, start: from, end, large_arc, sweep };
                    current.extend(arc.flatten(tolerance).into_iter().skip(1));
                }
                PathCommand::CubicTo { c1, c2, end } => {
                    let Some(&from) = current.last() else { continue };
                    let curve = CubicBezierSegment {
                        from: point(from.x, from.y),
                        ctrl1: point(c1.x, c1.y),
                        ctrl2: point(c2.x, c2.y),
                        to: point(end.x, end.y),
                    };
                    curve.for_each_flattened(tolerance, &mut |segment| {
                        current.push(Point::new(segment.to.x, segment.to.y));
                    });
                }
                PathCommand::Close => {
                    if let Some(&first) = current.first() {
                        current.push(first);
                    }
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                }
            }
        }

        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgtypes::{PathParser, PathSegment};

    #[test]
    fn polyline_data() {
        let path = Path::polyline(
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 5.5)],
            true,
            PathRole::Fill,
        );
        assert_eq!(path.to_svg_data(), "M 0 0 L 10 0 L 10 5.5 Z");
    }

    #[test]
    fn arc_data_parses() {
        let arc = CircularArc::new(5.0, Point::new(0.0, 5.0), Point::new(5.0, 0.0));
        let d = Path::arc(&arc).to_svg_data();
        let segments: Vec<_> = PathParser::from(d.as_str()).collect::<Result<_, _>>().unwrap();
        assert_eq!(segments.len(), 2);
        match segments[1] {
            PathSegment::EllipticalArc { rx, ry, large_arc, sweep, x, y, .. } => {
                assert_eq!((rx, ry), (5.0, 5.0));
                assert!(!large_arc);
                assert!(!sweep);
                assert_eq!((x, y), (5.0, 0.0));
            }
            _ => panic!("expected an elliptical arc segment"),
        }
    }

    #[test]
    fn flatten_closed_polyline_repeats_start() {
        let path = Path::polyline(
            &[Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
            true,
            PathRole::Stroke,
        );
        let lines = path.flatten(FLATTEN_TOLERANCE);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
        assert_eq!(lines[0][0], lines[0][3]);
    }

    #[test]
    fn flatten_arc_has_many_points() {
        let arc = CircularArc::new(50.0, Point::new(0.0, 50.0), Point::new(50.0, 0.0));
        let lines = Path::arc(&arc).flatten(0.05);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].len() > 4);
        assert_eq!(*lines[0].last().unwrap(), Point::new(50.0, 0.0));
    }

    #[test]
    fn empty_path() {
        let path = Path::new(PathRole::Stroke);
        assert!(path.is_empty());
        assert_eq!(path.to_svg_data(), "");
        assert!(path.flatten(FLATTEN_TOLERANCE).is_empty());
    }
}
