#![warn(missing_docs)]

//! # `zirconium`
//!
//! An exact solver for Zip-style ordered-waypoint Hamiltonian path puzzles, as posited in the
//! LinkedIn game Zip: a rectangular grid in which some cells carry distinct positive labels and
//! some adjacent cell pairs are walled off. A solution visits every reachable cell exactly once,
//! crosses the labeled cells in strictly increasing label order, and terminates on the
//! highest-labeled cell.
//!
//! Begin by building a board object using [`BoardBuilder`](builder::BoardBuilder), either cell
//! by cell or from a row-major label matrix with
//! [`from_rows`](builder::BoardBuilder::from_rows). Then call [`solve()`](crate::Board::solve)
//! and match on the returned [`SolveOutcome`](solver::SolveOutcome).
//!
//! # Internals
//! The search is plain depth-first backtracking with two layers of defense around it. Before
//! the tree is entered, a breadth-first reachability pass over the unwalled adjacency graph
//! rejects boards on which any waypoint is cut off from the label-1 cell. Inside the tree, the
//! only pruning is domain-given: a branch dies the moment it crosses a waypoint out of
//! sequence. Successors are expanded in a fixed right, down, left, up order, so the solver is
//! fully deterministic. Any path the search produces is re-verified by an independent
//! [`validate`](validator::validate) pass that recomputes every rule from scratch before the
//! result is surfaced.
//!
//! The target puzzle class keeps grids small (on the order of 10×10), which keeps the
//! exponential worst case of uninformed search tractable in practice; an optional
//! [node budget](solver::PathSolver::node_budget) bounds the search anyway.

pub use board::Board;
pub use builder::BoardBuilder;
pub use location::Location;
pub use solver::{NoSolutionReason, PathSolver, SolveOutcome};

pub mod board;
pub mod builder;
pub mod connectivity;
pub(crate) mod location;
pub mod solver;
pub mod step;
pub mod validator;
