//! SVG output for mosaics.
//!
//! Documents are assembled as plain strings: a root `<svg>` with a
//! `viewBox` matching the canvas, one `<g>` per layer carrying the paint
//! attributes, and bare `<path>`/`<circle>`/`<line>` children.

use crate::path::{Path, PathRole};
use crate::truchet::TruchetMosaic;
use crate::voronoi::VoronoiMosaic;

/// Seed and Bezier endpoint marker radius.
pub const MARKER_RADIUS: f64 = 8.0;

/// Control point marker radius.
pub const SMALL_MARKER_RADIUS: f64 = 4.0;

fn open_document(svg: &mut String, width: f64, height: f64) {
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg version="1.1" xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
"#,
        w = width,
        h = height
    ));
}

fn close_document(svg: &mut String) {
    svg.push_str("</svg>\n");
}

fn write_path(svg: &mut String, path: &Path) {
    if path.is_empty() {
        return;
    }
    let paint = match path.role {
        PathRole::Background => r#" stroke="none" fill="white""#,
        PathRole::Stroke | PathRole::Fill => "",
    };
    svg.push_str(&format!("    <path d=\"{}\"{}/>\n", path.to_svg_data(), paint));
}

fn write_circle(svg: &mut String, x: f64, y: f64, r: f64, fill: Option<&str>) {
    match fill {
        Some(fill) => {
            svg.push_str(&format!("    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n", x, y, r, fill));
        }
        None => {
            svg.push_str(&format!("    <circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>\n", x, y, r));
        }
    }
}

/// Render a Truchet mosaic.
pub fn truchet_to_svg(mosaic: &TruchetMosaic) -> String {
    let mut svg = String::new();
    open_document(&mut svg, mosaic.width, mosaic.height);

    let group = mosaic.group;
    let fill = if group.filled { "black" } else { "none" };
    svg.push_str(&format!(
        "  <g id=\"tiles\" stroke=\"black\" stroke-width=\"{}\" fill=\"{}\">\n",
        group.stroke_width, fill
    ));
    for path in &mosaic.paths {
        write_path(&mut svg, path);
    }
    svg.push_str("  </g>\n");

    close_document(&mut svg);
    svg
}

/// Render the layers of a Voronoi mosaic that are switched on.
pub fn voronoi_to_svg(mosaic: &VoronoiMosaic) -> String {
    let layers = mosaic.layers;
    let mut svg = String::new();
    open_document(&mut svg, mosaic.width, mosaic.height);

    if layers.veins {
        svg.push_str(&format!(
            "  <path id=\"veins\" stroke=\"none\" fill=\"black\" d=\"{}\"/>\n",
            mosaic.veins_path().to_svg_data()
        ));
    }

    if layers.hard_cells {
        svg.push_str("  <g id=\"hard-cells\" stroke=\"none\" fill=\"chartreuse\">\n");
        for path in mosaic.hard_cell_paths() {
            write_path(&mut svg, &path);
        }
        svg.push_str("  </g>\n");
    }

    if layers.smooth_cells {
        svg.push_str("  <g id=\"smooth-cells\" stroke=\"none\" fill=\"palevioletred\">\n");
        for path in mosaic.smooth_cell_paths() {
            write_path(&mut svg, &path);
        }
        svg.push_str("  </g>\n");
    }

    if layers.control_points {
        svg.push_str("  <g id=\"control-points\">\n");
        for b in mosaic.control_points() {
            write_circle(&mut svg, b.start.x, b.start.y, MARKER_RADIUS, Some("black"));
            write_circle(&mut svg, b.c1.x, b.c1.y, SMALL_MARKER_RADIUS, Some("darkred"));
            write_circle(&mut svg, b.c2.x, b.c2.y, SMALL_MARKER_RADIUS, Some("darkred"));
        }
        svg.push_str("  </g>\n");
    }

    if layers.edges {
        svg.push_str("  <g id=\"edges\" stroke=\"black\">\n");
        for edge in &mosaic.edges {
            svg.push_str(&format!(
                "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"/>\n",
                edge.p1.x, edge.p1.y, edge.p2.x, edge.p2.y
            ));
        }
        svg.push_str("  </g>\n");
    }

    if layers.seeds {
        svg.push_str("  <g id=\"seeds\" stroke=\"none\" fill=\"blue\">\n");
        for site in &mosaic.sites {
            write_circle(&mut svg, site.x, site.y, MARKER_RADIUS, None);
        }
        svg.push_str("  </g>\n");
    }

    close_document(&mut svg);
    svg
}
