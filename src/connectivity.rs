use std::collections::HashSet;

use petgraph::visit::Bfs;

use crate::board::Board;
use crate::location::Location;

/// The maximal set of locations connected to `start` on `board` via unwalled adjacencies,
/// found by breadth-first traversal of the board's adjacency graph. `start` is always a member.
///
/// `start` must be in bounds; board locations are in bounds by construction.
pub fn reachable_from(board: &Board, start: Location) -> HashSet<Location> {
    let mut reachable = HashSet::with_capacity(board.graph.node_count());

    let mut bfs = Bfs::new(&board.graph, start);
    while let Some(location) = bfs.next(&board.graph) {
        reachable.insert(location);
    }

    reachable
}
