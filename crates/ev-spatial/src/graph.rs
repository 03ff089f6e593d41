//! Cell graph representation and construction.
//!
//! # Data layout
//!
//! Every non-wall cell is a node.  Adjacency uses **Compressed Sparse Row
//! (CSR)** format; the neighbors of `NodeId n` are
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Neighbors are stored in the fixed order up, left, right, down, which makes
//! every BFS in [`crate::path`] deterministic.
//!
//! # Exit distance fields
//!
//! At build time one BFS runs from every exit and the resulting hop counts are
//! kept.  Movement queries ("next cell toward exit X") and nearest-exit lists
//! then cost O(degree) and O(exits) instead of a fresh search per occupant
//! per tick.  The graph never changes during a run, so the fields never go
//! stale.

use std::collections::VecDeque;

use ev_core::{Cell, NodeId};

use crate::{CellKind, FloorPlan, SpatialError, SpatialResult};

// ── DistanceField ─────────────────────────────────────────────────────────────

/// Hop counts from one source to every node.  `u32::MAX` marks unreachable.
#[derive(Clone, Debug)]
pub struct DistanceField {
    dist: Vec<u32>,
}

impl DistanceField {
    pub(crate) const UNREACHED: u32 = u32::MAX;

    pub(crate) fn from_raw(dist: Vec<u32>) -> Self {
        Self { dist }
    }

    /// Distance to `node`, or `None` if unreachable.
    #[inline]
    pub fn get(&self, node: NodeId) -> Option<u32> {
        match self.dist.get(node.index()) {
            Some(&d) if d != Self::UNREACHED => Some(d),
            _ => None,
        }
    }
}

// ── SpatialGraph ──────────────────────────────────────────────────────────────

/// Undirected 4-connected graph over the walkable cells of a floor plan.
///
/// Construct with [`SpatialGraph::from_plan`].
#[derive(Debug)]
pub struct SpatialGraph {
    pub width:  u32,
    pub height: u32,

    /// Row-major `cell → node` map; `NodeId::INVALID` for walls.
    cell_node: Vec<NodeId>,

    /// `node → cell`.  Indexed by `NodeId`.
    pub node_cell: Vec<Cell>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Neighbor node of each directed half-edge.
    pub edge_to: Vec<NodeId>,

    /// Exit cells sorted by `Cell` order; parallel to `exit_fields`.
    exits: Vec<Cell>,

    /// BFS hop counts from each exit.
    exit_fields: Vec<DistanceField>,
}

impl SpatialGraph {
    /// Build the graph from a floor plan and validate it.
    ///
    /// # Errors
    ///
    /// - [`SpatialError::NoExit`] if the plan has no exit cell.
    /// - [`SpatialError::Disconnected`] naming the first walkable cell (row
    ///   order) from which no exit can be reached.
    pub fn from_plan(plan: &FloorPlan) -> SpatialResult<SpatialGraph> {
        let (width, height) = (plan.width, plan.height);

        let mut cell_node = vec![NodeId::INVALID; plan.area()];
        let mut node_cell = Vec::new();
        for (cell, kind) in plan.cells() {
            if kind.is_walkable() {
                cell_node[plan.index_of(cell)] = NodeId(node_cell.len() as u32);
                node_cell.push(cell);
            }
        }

        // CSR adjacency, neighbors in up/left/right/down order.
        let mut node_out_start = Vec::with_capacity(node_cell.len() + 1);
        let mut edge_to = Vec::with_capacity(node_cell.len() * 4);
        node_out_start.push(0u32);
        for &cell in &node_cell {
            for n in orthogonal_neighbors(cell, width, height) {
                let id = cell_node[plan.index_of(n)];
                if id != NodeId::INVALID {
                    edge_to.push(id);
                }
            }
            node_out_start.push(edge_to.len() as u32);
        }

        let mut exits = plan.exits();
        if exits.is_empty() {
            return Err(SpatialError::NoExit);
        }
        exits.sort_unstable();

        let mut graph = SpatialGraph {
            width,
            height,
            cell_node,
            node_cell,
            node_out_start,
            edge_to,
            exits,
            exit_fields: Vec::new(),
        };

        let exit_fields: Vec<DistanceField> = graph
            .exits
            .iter()
            .map(|&e| graph.bfs_field(graph.node_unchecked(e)))
            .collect();
        graph.exit_fields = exit_fields;

        graph.check_connected(plan)?;
        Ok(graph)
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_cell.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_to.len() / 2
    }

    /// Exit cells, sorted by `Cell` order.
    pub fn exits(&self) -> &[Cell] {
        &self.exits
    }

    pub fn is_exit(&self, cell: Cell) -> bool {
        self.exits.binary_search(&cell).is_ok()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Node for `cell`, or `None` for walls and out-of-grid cells.
    #[inline]
    pub fn node(&self, cell: Cell) -> Option<NodeId> {
        if cell.x >= self.width || cell.y >= self.height {
            return None;
        }
        let id = self.cell_node[cell.y as usize * self.width as usize + cell.x as usize];
        (id != NodeId::INVALID).then_some(id)
    }

    #[inline]
    pub fn cell(&self, node: NodeId) -> Cell {
        self.node_cell[node.index()]
    }

    pub fn is_walkable(&self, cell: Cell) -> bool {
        self.node(cell).is_some()
    }

    /// Neighbor nodes of `node` in up/left/right/down order.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        &self.edge_to[start..end]
    }

    /// Distance field rooted at `exit`, or `None` if `exit` is not an exit.
    pub fn exit_field(&self, exit: Cell) -> Option<&DistanceField> {
        self.exits
            .binary_search(&exit)
            .ok()
            .map(|i| &self.exit_fields[i])
    }

    pub(crate) fn exit_fields(&self) -> impl Iterator<Item = (Cell, &DistanceField)> {
        self.exits.iter().copied().zip(self.exit_fields.iter())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn node_unchecked(&self, cell: Cell) -> NodeId {
        self.cell_node[cell.y as usize * self.width as usize + cell.x as usize]
    }

    /// Full BFS from `source` over the whole graph.
    pub(crate) fn bfs_field(&self, source: NodeId) -> DistanceField {
        let mut dist = vec![DistanceField::UNREACHED; self.node_count()];
        let mut queue = VecDeque::new();
        dist[source.index()] = 0;
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            let next = dist[node.index()] + 1;
            for &n in self.neighbors(node) {
                if dist[n.index()] == DistanceField::UNREACHED {
                    dist[n.index()] = next;
                    queue.push_back(n);
                }
            }
        }
        DistanceField::from_raw(dist)
    }

    /// Every walkable cell must reach at least one exit.
    fn check_connected(&self, plan: &FloorPlan) -> SpatialResult<()> {
        for (cell, kind) in plan.cells() {
            if kind == CellKind::Wall {
                continue;
            }
            let node = self.node_unchecked(cell);
            if self.exit_fields.iter().all(|f| f.get(node).is_none()) {
                return Err(SpatialError::Disconnected(cell));
            }
        }
        Ok(())
    }
}

/// In-grid orthogonal neighbors of `cell` in up/left/right/down order.
fn orthogonal_neighbors(cell: Cell, width: u32, height: u32) -> impl Iterator<Item = Cell> {
    let Cell { x, y } = cell;
    [
        (y > 0).then(|| Cell::new(x, y - 1)),
        (x > 0).then(|| Cell::new(x - 1, y)),
        (x + 1 < width).then(|| Cell::new(x + 1, y)),
        (y + 1 < height).then(|| Cell::new(x, y + 1)),
    ]
    .into_iter()
    .flatten()
}
