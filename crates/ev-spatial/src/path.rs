//! Path queries over a [`SpatialGraph`].
//!
//! All distances are unweighted hop counts (cell steps, 4-connectivity).
//! Every query is read-only, so they are safe to call concurrently from
//! several runs sharing one graph.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use ev_core::{Cell, NodeId};

use crate::{SpatialError, SpatialGraph, SpatialResult};

impl SpatialGraph {
    /// Cells along a shortest path from `from` to `to`, excluding `from` and
    /// including `to`.  Empty when `from == to`.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NotWalkable`] if either endpoint is a wall or outside
    ///   the grid.
    /// - [`SpatialError::Unreachable`] if no path connects them.
    pub fn shortest_path(&self, from: Cell, to: Cell) -> SpatialResult<Vec<Cell>> {
        let source = self.node(from).ok_or(SpatialError::NotWalkable(from))?;
        let target = self.node(to).ok_or(SpatialError::NotWalkable(to))?;
        if source == target {
            return Ok(vec![]);
        }

        // prev[v] = node that first reached v; INVALID for unreached nodes.
        let mut prev = vec![NodeId::INVALID; self.node_count()];
        prev[source.index()] = source;
        let mut queue = VecDeque::from([source]);

        while let Some(node) = queue.pop_front() {
            for &n in self.neighbors(node) {
                if prev[n.index()] != NodeId::INVALID {
                    continue;
                }
                prev[n.index()] = node;
                if n == target {
                    return Ok(self.reconstruct(&prev, source, target));
                }
                queue.push_back(n);
            }
        }

        Err(SpatialError::Unreachable { from, to })
    }

    /// Length of a shortest path in cell steps.
    pub fn path_distance(&self, from: Cell, to: Cell) -> SpatialResult<u32> {
        if let Some(field) = self.exit_field(to) {
            let node = self.node(from).ok_or(SpatialError::NotWalkable(from))?;
            return field.get(node).ok_or(SpatialError::Unreachable { from, to });
        }
        self.shortest_path(from, to).map(|p| p.len() as u32)
    }

    /// All exits reachable from `from` with their distances, nearest first.
    /// Equal distances are ordered by `Cell`.
    ///
    /// Empty if `from` is not walkable or no exit is reachable.
    pub fn exits_sorted_by_distance(&self, from: Cell) -> Vec<(Cell, u32)> {
        let Some(node) = self.node(from) else {
            return vec![];
        };
        let mut exits: Vec<(Cell, u32)> = self
            .exit_fields()
            .filter_map(|(exit, field)| field.get(node).map(|d| (exit, d)))
            .collect();
        exits.sort_unstable_by_key(|&(exit, d)| (d, exit));
        exits
    }

    /// Nearest reachable exit and its distance.
    pub fn nearest_exit(&self, from: Cell) -> Option<(Cell, u32)> {
        self.exits_sorted_by_distance(from).into_iter().next()
    }

    /// The neighbor of `from` that lies one step closer to `exit`.
    ///
    /// Returns `None` when `from` already is `exit`, when `exit` is not an
    /// exit cell, or when no path exists.  Among equally good neighbors the
    /// first in up/left/right/down order wins.
    pub fn next_step_toward_exit(&self, from: Cell, exit: Cell) -> Option<Cell> {
        let field = self.exit_field(exit)?;
        let node = self.node(from)?;
        let d = field.get(node)?;
        if d == 0 {
            return None;
        }
        self.neighbors(node)
            .iter()
            .find(|&&n| field.get(n) == Some(d - 1))
            .map(|&n| self.cell(n))
    }

    /// Shortest-path distance from `from` to every cell within `radius` steps
    /// (inclusive), `from` itself at distance 0.
    ///
    /// Used to find helpers a dependent can reach: walls are respected because
    /// the search walks the graph rather than measuring straight lines.
    pub fn distances_within(&self, from: Cell, radius: u32) -> FxHashMap<Cell, u32> {
        let mut reached = FxHashMap::default();
        let Some(source) = self.node(from) else {
            return reached;
        };
        reached.insert(from, 0);
        let mut queue = VecDeque::from([(source, 0u32)]);

        while let Some((node, d)) = queue.pop_front() {
            if d == radius {
                continue;
            }
            for &n in self.neighbors(node) {
                let cell = self.cell(n);
                if reached.contains_key(&cell) {
                    continue;
                }
                reached.insert(cell, d + 1);
                queue.push_back((n, d + 1));
            }
        }
        reached
    }

    fn reconstruct(&self, prev: &[NodeId], source: NodeId, target: NodeId) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut cur = target;
        while cur != source {
            cells.push(self.cell(cur));
            cur = prev[cur.index()];
        }
        cells.reverse();
        cells
    }
}
