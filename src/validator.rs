use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::board::{Board, Label};
use crate::connectivity;
use crate::location::Location;

/// Rules a candidate path can break, each carrying the offending positions and values.
///
/// The [`Display`] impl of each variant is a human-readable reason string naming the rule that
/// failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The path is empty.
    EmptyPath,
    /// The path does not cover the reachable component of its own first cell exactly.
    LengthMismatch {
        /// The length of the candidate path.
        found: usize,
        /// The size of the reachable component.
        expected: usize,
    },
    /// The path visits a cell more than once.
    RepeatedCell {
        /// The first cell visited twice.
        location: Location,
    },
    /// Two consecutive path cells are not 4-adjacent.
    NonAdjacentMove {
        /// The earlier cell of the offending move.
        from: Location,
        /// The later cell of the offending move.
        to: Location,
    },
    /// Two consecutive path cells are separated by a wall.
    BlockedMove {
        /// The earlier cell of the offending move.
        from: Location,
        /// The later cell of the offending move.
        to: Location,
    },
    /// A labeled cell was crossed out of sequence.
    UnexpectedLabel {
        /// The cell carrying the offending label.
        location: Location,
        /// The label the sequence called for.
        expected: Label,
        /// The label actually found there.
        found: Label,
    },
    /// The walk ended before every label was crossed.
    MissingLabels {
        /// The first label never reached.
        next: Label,
        /// The highest label on the board.
        max: Label,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "no solution provided"),
            Self::LengthMismatch { found, expected } => {
                write!(f, "path length {} but expected {}", found, expected)
            }
            Self::RepeatedCell { location } => write!(f, "duplicate cell {} in path", location),
            Self::NonAdjacentMove { from, to } => {
                write!(f, "non-adjacent move {} -> {}", from, to)
            }
            Self::BlockedMove { from, to } => write!(f, "blocked move {} -> {}", from, to),
            Self::UnexpectedLabel { location, expected, found } => {
                write!(f, "expected label {} at {} but found {}", expected, location, found)
            }
            Self::MissingLabels { next, max } => {
                write!(f, "missing labels from {} to {}", next, max)
            }
        }
    }
}

/// Independently re-verify a candidate `path` against every puzzle rule on `board`.
///
/// Nothing is trusted from the solver's bookkeeping: reachability is recomputed from `path[0]`,
/// adjacency from Manhattan distance, and the label sequence from a fresh counter. Checks run in
/// a fixed order and the first broken rule is returned.
pub fn validate(board: &Board, path: &[Location]) -> Result<(), ValidationError> {
    let Some(start) = path.first() else {
        return Err(ValidationError::EmptyPath);
    };

    let expected = connectivity::reachable_from(board, *start).len();
    if path.len() != expected {
        return Err(ValidationError::LengthMismatch { found: path.len(), expected });
    }

    let mut seen = HashSet::with_capacity(path.len());
    for location in path {
        if !seen.insert(*location) {
            return Err(ValidationError::RepeatedCell { location: *location });
        }
    }

    for (from, to) in path.iter().copied().tuple_windows() {
        if from.manhattan_distance(&to) != 1 {
            return Err(ValidationError::NonAdjacentMove { from, to });
        }

        if board.is_wall(UnorderedPair::from((from, to))) {
            return Err(ValidationError::BlockedMove { from, to });
        }
    }

    let mut expected_label = 1;
    for location in path {
        let found = board.label_at(*location);
        if found > 0 {
            if found != expected_label {
                return Err(ValidationError::UnexpectedLabel {
                    location: *location,
                    expected: expected_label,
                    found,
                });
            }
            expected_label += 1;
        }
    }

    if expected_label <= board.max_label() {
        return Err(ValidationError::MissingLabels { next: expected_label, max: board.max_label() });
    }

    Ok(())
}
