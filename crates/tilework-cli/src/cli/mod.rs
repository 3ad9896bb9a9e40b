//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `truchet` - Render a Truchet tile mosaic
//! - `voronoi` - Render a rounded Voronoi mosaic
//! - `patterns` - List every selectable name

pub mod common;
pub mod config;
pub mod patterns;
pub mod truchet;
pub mod voronoi;

pub use patterns::cmd_patterns;
pub use truchet::cmd_truchet;
pub use voronoi::cmd_voronoi;
