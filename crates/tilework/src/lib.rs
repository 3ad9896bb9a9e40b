//! # tilework
//!
//! Procedural 2D artwork: Truchet tile mosaics and rounded Voronoi "vein"
//! mosaics, emitted as path descriptors that any renderer can draw.
//!
//! ## Rust Lesson: Modules
//!
//! A `macro_rules!` macro is not an item, so it cannot be `pub` like a
//! function. `config` defines `selector_names!` and re-exports it with
//! `pub(crate) use`, after which other modules import it by path like any
//! other name.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use tilework::{svg, truchet};
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mosaic = truchet::build(&truchet::TruchetParams::default(), &mut rng);
//! let document = svg::truchet_to_svg(&mosaic);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod path;
pub mod sampling;
pub mod svg;
pub mod truchet;
pub mod voronoi;

// Re-export common types at crate root for convenience.
pub use error::{Error, Result};
pub use geometry::{CircularArc, Line, Point};
pub use path::{Path, PathCommand, PathRole};
pub use sampling::{PointsParams, PointsSource};
pub use truchet::{GridPattern, TileStyle, TruchetMosaic, TruchetParams};
pub use voronoi::{DelaunaySubdivision, PlanarSubdivision, VoronoiMosaic, VoronoiParams};
