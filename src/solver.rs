use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::board::{Board, Label};
use crate::connectivity;
use crate::location::Location;
use crate::validator;
use crate::validator::ValidationError;

/// Reasons a search ends without a solution. All of these are ordinary outcomes of well-formed
/// puzzles, not faults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoSolutionReason {
    /// No cell carries label `1`, so the path has no defined start.
    MissingStartLabel,
    /// Some labeled cell cannot be reached from the label-`1` cell at all; the search tree was
    /// never entered.
    UnreachableLabel {
        /// The stranded label.
        label: Label,
        /// Its location.
        location: Location,
    },
    /// The backtracking tree was fully explored and no leaf satisfied every rule.
    SearchExhausted,
    /// The configured node budget ran out before the tree was exhausted.
    BudgetExhausted {
        /// Nodes expanded before the search was cut off.
        nodes_expanded: u64,
    },
}

impl Display for NoSolutionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStartLabel => write!(f, "no cell carries label 1"),
            Self::UnreachableLabel { label, location } => {
                write!(f, "label {} at {} is unreachable from label 1", label, location)
            }
            Self::SearchExhausted => write!(f, "search exhausted without a solution"),
            Self::BudgetExhausted { nodes_expanded } => {
                write!(f, "search cut off after expanding {} nodes", nodes_expanded)
            }
        }
    }
}

/// The tagged outcome of one solve call, carrying enough data for a caller to react without
/// re-deriving anything. Self-contained, so it can be sent over a channel from a background
/// solve to a foreground consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A path was found and independently re-validated.
    Solved(Vec<Location>),
    /// A path was found but failed independent validation. Surfaced with the path so a caller
    /// can still display it for debugging.
    Invalid {
        /// The rejected path.
        path: Vec<Location>,
        /// The rule it broke.
        reason: ValidationError,
    },
    /// No qualifying path exists or the search was cut short.
    NoSolution(NoSolutionReason),
}

enum Search {
    Found,
    Exhausted,
    Aborted,
}

/// Depth-first backtracking search for the ordered-waypoint Hamiltonian path on one [`Board`].
///
/// The search is uninformed by design: successors are expanded strictly in
/// [`Board::neighbors`] order with no heuristic reordering, and the only domain pruning is the
/// label-sequence check and the visited mask. Identical inputs therefore always yield the
/// identical path. Construct with [`From<&Board>`](Self::from), optionally bound the search
/// with [`node_budget`](Self::node_budget), then call [`solve`](Self::solve).
pub struct PathSolver<'a> {
    board: &'a Board,
    node_budget: Option<u64>,
    nodes_expanded: u64,
    // size of the reachable component of the label-1 cell
    target_len: usize,
    visited: Array2<bool>,
    path: Vec<Location>,
}

impl<'a> From<&'a Board> for PathSolver<'a> {
    fn from(board: &'a Board) -> Self {
        Self {
            board,
            node_budget: None,
            nodes_expanded: 0,
            target_len: 0,
            visited: Array2::from_elem((board.rows(), board.cols()), false),
            path: Vec::new(),
        }
    }
}

impl PathSolver<'_> {
    /// Bound the search to at most `limit` node expansions.
    ///
    /// A search that hits the limit reports
    /// [`BudgetExhausted`](NoSolutionReason::BudgetExhausted) instead of running unbounded on a
    /// pathological board. Unset by default.
    pub fn node_budget(mut self, limit: u64) -> Self {
        self.node_budget = Some(limit);
        self
    }

    /// Solve the board, consuming this solver.
    ///
    /// Before the tree is entered, two pre-checks short-circuit unsolvable inputs: a board with
    /// no label `1` and a board on which any waypoint is unreachable from the label-`1` cell.
    /// A path found by the search is re-verified by [`validate`](crate::validator::validate)
    /// before it is surfaced.
    pub fn solve(mut self) -> SolveOutcome {
        let Some(start) = self.board.label_position(1) else {
            return SolveOutcome::NoSolution(NoSolutionReason::MissingStartLabel);
        };

        let reachable = connectivity::reachable_from(self.board, start);
        for (label, location) in self.board.label_positions.iter().copied().enumerate() {
            if !reachable.contains(&location) {
                return SolveOutcome::NoSolution(NoSolutionReason::UnreachableLabel {
                    label: label + 1,
                    location,
                });
            }
        }

        self.target_len = reachable.len();
        self.visited[start.as_index()] = true;
        self.path.push(start);

        match self.backtrack(start, 1) {
            Search::Found => match validator::validate(self.board, &self.path) {
                Ok(()) => SolveOutcome::Solved(self.path),
                Err(reason) => SolveOutcome::Invalid { path: self.path, reason },
            },
            Search::Exhausted => SolveOutcome::NoSolution(NoSolutionReason::SearchExhausted),
            Search::Aborted => SolveOutcome::NoSolution(NoSolutionReason::BudgetExhausted {
                nodes_expanded: self.nodes_expanded,
            }),
        }
    }

    fn backtrack(&mut self, position: Location, mut next_label: Label) -> Search {
        if self.node_budget.is_some_and(|limit| self.nodes_expanded >= limit) {
            return Search::Aborted;
        }
        self.nodes_expanded += 1;

        // the label check comes first; a mismatched waypoint kills the whole branch
        let label = self.board.label_at(position);
        if label > 0 {
            if label != next_label {
                return Search::Exhausted;
            }
            next_label += 1;
        }

        if self.path.len() == self.target_len {
            // full coverage; a success additionally needs every label consumed and the tail
            // sitting exactly on the max-label cell
            return if next_label > self.board.max_label()
                && self.board.label_position(self.board.max_label()) == Some(position)
            {
                Search::Found
            } else {
                Search::Exhausted
            };
        }

        for neighbor in self.board.neighbors(position) {
            if self.visited[neighbor.as_index()] {
                continue;
            }

            // mark, recurse, and fully undo on failure so sibling branches see clean state
            self.visited[neighbor.as_index()] = true;
            self.path.push(neighbor);

            match self.backtrack(neighbor, next_label) {
                Search::Exhausted => {
                    self.path.pop();
                    self.visited[neighbor.as_index()] = false;
                }
                done => return done,
            }
        }

        Search::Exhausted
    }
}
