//! Elementary cellular automaton row generator.
//!
//! One working row of cells is evolved generation by generation; each
//! recorded generation becomes one row of the Truchet grid.
//!
//! # Rule table
//!
//! The rule number's bits are read least-significant first and the list is
//! then reversed, so `table[0]` holds the rule's most significant bit. The
//! neighbourhood index counts a neighbour when it is OFF:
//!
//! ```text
//! index = 4 * !left + 2 * !mid + !right
//! ```
//!
//! The two inversions cancel out, which is why rule 30 still grows the
//! classic Rule 30 triangle. Existing artwork depends on this exact layout.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::selector_names;

/// Initial row contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Seed {
    AllClear,
    AllSet,
    /// Runs of `size` cells, alternating clear and set
    Alternating,
    /// A block of `size` set cells near the middle
    #[default]
    Center,
    /// Only the second cell of the visible window is set
    First,
    Random,
}

selector_names!(Seed, "EAC seed", {
    AllClear => "allClear",
    AllSet => "allSet",
    Alternating => "alternating",
    Center => "center",
    First => "first",
    Random => "random",
});

/// What lies beyond the left and right edges of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeBehavior {
    /// Pad the row so growth from the edges never reaches the visible window
    #[default]
    Infinite,
    /// Neighbours wrap around the visible window
    Wrap,
}

selector_names!(EdgeBehavior, "EAC edge behavior", {
    Infinite => "infinite",
    Wrap => "wrap",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutomatonParams {
    pub edge_behavior: EdgeBehavior,
    /// Flip every recorded cell
    pub invert: bool,
    /// Generations to run before recording starts
    pub offset: usize,
    /// Wolfram rule number; clamped to 0..=255
    pub rule: i64,
    pub seed: Seed,
    /// Run length for `alternating`, block width for `center`
    pub size: usize,
}

impl Default for AutomatonParams {
    fn default() -> Self {
        Self {
            edge_behavior: EdgeBehavior::Infinite,
            invert: false,
            offset: 0,
            rule: 30,
            seed: Seed::Center,
            size: 1,
        }
    }
}

/// An 8-entry lookup table derived from a rule number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    number: u8,
    table: [bool; 8],
}

impl Rule {
    /// Build the table for `number`, clamping out-of-range values.
    pub fn new(number: i64) -> Self {
        let clamped = number.clamp(0, 255);
        if clamped != number {
            tracing::warn!(rule = number, clamped, "invalid rule number");
        }
        let number = clamped as u8;

        let mut table = [false; 8];
        let mut bits = number;
        for entry in table.iter_mut() {
            *entry = bits & 1 == 1;
            bits >>= 1;
        }
        table.reverse();

        Self { number, table }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn table(&self) -> &[bool; 8] {
        &self.table
    }

    /// Next state of the middle cell.
    #[inline]
    pub fn next_state(&self, left: bool, mid: bool, right: bool) -> bool {
        let index = 4 * usize::from(!left) + 2 * usize::from(!mid) + usize::from(!right);
        self.table[index]
    }

    /// Compute `next` from `prev`, indexing neighbours circularly.
    pub fn step(&self, prev: &[bool], next: &mut [bool]) {
        let width = prev.len();
        debug_assert_eq!(width, next.len());
        for c in 0..width {
            let left = prev[(c + width - 1) % width];
            let right = prev[(c + 1) % width];
            next[c] = self.next_state(left, prev[c], right);
        }
    }
}

/// Working row width and the column where the visible window starts.
///
/// `None` when the padded row length overflows.
fn layout(edge_behavior: EdgeBehavior, rows: usize, cols: usize) -> Option<(usize, usize)> {
    match edge_behavior {
        EdgeBehavior::Wrap => Some((cols, 0)),
        EdgeBehavior::Infinite => {
            let window = rows.checked_add(1)?;
            let width = window.checked_mul(2)?.checked_add(cols)?;
            Some((width, window))
        }
    }
}

fn seed_row<R: Rng + ?Sized>(
    params: &AutomatonParams,
    width: usize,
    window: usize,
    rng: &mut R,
) -> Vec<bool> {
    match params.seed {
        Seed::AllClear => vec![false; width],
        Seed::AllSet => vec![true; width],
        Seed::Alternating => {
            let mut row = Vec::with_capacity(width);
            let mut state = false;
            let mut count = 0;
            for _ in 0..width {
                row.push(state);
                count += 1;
                if count >= params.size {
                    count = 0;
                    state = !state;
                }
            }
            row
        }
        Seed::Center => {
            let size = params.size as i64;
            let start = (0.5 * width as f64 - size as f64).floor() as i64;
            let end = start + size;
            (0..width as i64).map(|c| c >= start && c < end).collect()
        }
        Seed::First => (0..width).map(|c| c == window + 1).collect(),
        Seed::Random => (0..width).map(|_| rng.random::<f64>() > 0.5).collect(),
    }
}

/// Run the automaton and return `rows * cols` states, row-major.
///
/// Sizes whose cell count, padded row or generation count overflow give an
/// empty vector.
pub fn run<R: Rng + ?Sized>(
    params: &AutomatonParams,
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Vec<bool> {
    if rows == 0 || cols == 0 {
        return Vec::new();
    }
    let sizes = rows.checked_mul(cols).and_then(|cells| {
        let (width, window) = layout(params.edge_behavior, rows, cols)?;
        let generations = rows.checked_add(params.offset)?;
        Some((cells, width, window, generations))
    });
    let Some((cells, width, window, generations)) = sizes else {
        tracing::warn!(rows, cols, offset = params.offset, "automaton too large to run");
        return Vec::new();
    };

    let mut states = vec![false; cells];
    let rule = Rule::new(params.rule);

    let mut prev = seed_row(params, width, window, rng);
    let mut curr = vec![false; width];

    let mut record = |generation: usize, row: &[bool]| {
        if generation < params.offset {
            return;
        }
        let r = generation - params.offset;
        let cells = &row[window..window + cols];
        for (dst, &src) in states[r * cols..(r + 1) * cols].iter_mut().zip(cells) {
            *dst = src != params.invert;
        }
    };

    record(0, &prev);
    for generation in 1..generations {
        rule.step(&prev, &mut curr);
        record(generation, &curr);
        std::mem::swap(&mut prev, &mut curr);
    }

    states
}
