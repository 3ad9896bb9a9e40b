//! The `patterns` command - list every selectable name.

use tilework::PointsSource;
use tilework::truchet::{EdgeBehavior, GridPattern, Seed, TileStyle};
use tilework::voronoi::Layer;

/// Section heading and names for every selector.
pub fn listing() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Grid patterns (--pattern)", GridPattern::all().iter().map(|p| p.name()).collect()),
        ("Tile styles (--tile)", TileStyle::all().iter().map(|t| t.name()).collect()),
        ("Automaton seed rows (--seed-row)", Seed::all().iter().map(|s| s.name()).collect()),
        ("Automaton edges (--edge)", EdgeBehavior::all().iter().map(|e| e.name()).collect()),
        ("Points sources (--source)", PointsSource::all().iter().map(|p| p.name()).collect()),
        ("Voronoi layers (--show)", Layer::all().iter().map(|l| l.name()).collect()),
    ]
}

/// Run the patterns command.
pub fn cmd_patterns() {
    for (heading, names) in listing() {
        println!("{}:", heading);
        for name in names {
            println!("  {}", name);
        }
        println!();
    }
}
