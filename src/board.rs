use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use strum::VariantArray;
use unordered_pair::UnorderedPair;

use crate::location::{Dimension, Location};
use crate::solver::{PathSolver, SolveOutcome};
use crate::step::SquareStep;

/// The value carried by a single cell. `0` means the cell is unlabeled; a positive value marks a
/// waypoint the solution path must cross in increasing order.
pub type Label = usize;

/// A rectangular puzzle board: a label matrix, a set of walls between adjacent cells, and the
/// adjacency graph induced by both.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder), which
/// validates the label set before construction. A built board is immutable.
pub struct Board {
    pub(crate) labels: Array2<Label>,
    pub(crate) dims: (Dimension, Dimension),
    // position of label l at index l - 1; contiguity is enforced by the builder
    pub(crate) label_positions: Vec<Location>,
    pub(crate) walls: HashSet<UnorderedPair<Location>>,
    pub(crate) graph: UnGraphMap<Location, ()>,
}

impl Board {
    /// The number of rows on this board.
    pub fn rows(&self) -> usize {
        self.dims.0.get()
    }

    /// The number of columns on this board.
    pub fn cols(&self) -> usize {
        self.dims.1.get()
    }

    /// The raw label at `location`, `0` if the cell is unlabeled.
    pub fn label_at(&self, location: Location) -> Label {
        self.labels[location.as_index()]
    }

    /// The highest label present on this board, `0` if no cell is labeled.
    pub fn max_label(&self) -> Label {
        self.label_positions.len()
    }

    /// The location carrying `label`, or [`None`] if `label` is `0` or not on the board.
    pub fn label_position(&self, label: Label) -> Option<Location> {
        label.checked_sub(1).and_then(|ind| self.label_positions.get(ind)).copied()
    }

    /// Whether a wall separates the two locations of `pair`.
    ///
    /// Walls are symmetric; the order of the pair does not matter.
    pub fn is_wall(&self, pair: UnorderedPair<Location>) -> bool {
        self.walls.contains(&pair)
    }

    pub(crate) fn in_bounds(&self, location: Location) -> bool {
        location.0 < self.rows() && location.1 < self.cols()
    }

    /// The in-bounds, unwalled 4-neighbors of `location`, always enumerated right, down, left,
    /// up. Solver determinism rests on this order being fixed.
    pub fn neighbors(&self, location: Location) -> Vec<Location> {
        SquareStep::VARIANTS
            .iter()
            .map(|dir| dir.attempt_from(location))
            .filter(|other| {
                self.in_bounds(*other) && !self.is_wall(UnorderedPair::from((location, *other)))
            })
            .collect()
    }

    /// Solves this board, deferring to a [`PathSolver`].
    ///
    /// Equivalent to `PathSolver::from(&board).solve()`; see [`PathSolver::solve`] for the
    /// outcome taxonomy.
    pub fn solve(&self) -> SolveOutcome {
        PathSolver::from(self).solve()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.labels.rows() {
            for label in row {
                match char::from_digit(*label as u32, 36) {
                    Some('0') => f.write_str(".")?,
                    Some(digit) => write!(f, "{}", digit)?,
                    // labels past 'z' exist in no real puzzle; keep the row width anyway
                    None => f.write_str("#")?,
                }
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}
