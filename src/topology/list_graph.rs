//! Adjacency-list implementation of the [`Graph`] trait.
//!
//! [`ListGraph`] is the graph callers build by hand, the graph the generators
//! return, and the private working copy the drawing layer augments to a
//! maximal planar graph. Edges are numbered in insertion order, so a copy
//! built by re-adding the edges of another graph in index order has the very
//! same arc ids.

use hashbrown::HashSet;

use super::graph::Graph;
use super::ids::{ArcId, EdgeId, NodeId};
use crate::planarity_error::PlanarityError;

/// A growable simple undirected graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListGraph {
    /// `(u, v)` endpoints of every edge, by edge index.
    ends: Vec<(NodeId, NodeId)>,
    /// Out-arcs of every node, in insertion order.
    out: Vec<Vec<ArcId>>,
}

impl ListGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph with `n` isolated nodes.
    pub fn with_nodes(n: usize) -> Self {
        Self {
            ends: Vec::new(),
            out: vec![Vec::new(); n],
        }
    }

    /// Build a graph with `n` nodes from `(u, v)` index pairs, rejecting
    /// out-of-range endpoints, self-loops and parallel edges.
    pub fn from_edges<I>(n: usize, edges: I) -> Result<Self, PlanarityError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut g = Self::with_nodes(n);
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        for (u, v) in edges {
            g.check_endpoints(u, v)?;
            if !seen.insert((u.min(v), u.max(v))) {
                return Err(PlanarityError::ParallelEdge(u, v));
            }
            g.add_edge(NodeId::new(u), NodeId::new(v));
        }
        Ok(g)
    }

    /// Append an isolated node.
    pub fn add_node(&mut self) -> NodeId {
        self.out.push(Vec::new());
        NodeId::new(self.out.len() - 1)
    }

    /// Append the edge `{u, v}` without any simplicity check.
    ///
    /// The new edge gets the next edge index; its forward arc runs `u -> v`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> EdgeId {
        let e = EdgeId::new(self.ends.len());
        self.ends.push((u, v));
        self.out[u.index()].push(ArcId::new(e, true));
        self.out[v.index()].push(ArcId::new(e, false));
        e
    }

    /// Append the edge `{u, v}` if it keeps the graph simple.
    pub fn try_add_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeId, PlanarityError> {
        self.check_endpoints(u.index(), v.index())?;
        if self.has_edge(u, v) {
            return Err(PlanarityError::ParallelEdge(u.index(), v.index()));
        }
        Ok(self.add_edge(u, v))
    }

    /// Whether some edge joins `u` and `v`. Linear in the degree of `u`.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.out
            .get(u.index())
            .is_some_and(|arcs| arcs.iter().any(|&a| self.target(a) == v))
    }

    fn check_endpoints(&self, u: usize, v: usize) -> Result<(), PlanarityError> {
        let node_count = self.out.len();
        for node in [u, v] {
            if node >= node_count {
                return Err(PlanarityError::NodeOutOfRange { node, node_count });
            }
        }
        if u == v {
            return Err(PlanarityError::SelfLoop(u));
        }
        Ok(())
    }
}

impl Graph for ListGraph {
    type OutArcs<'a>
        = std::iter::Copied<std::slice::Iter<'a, ArcId>>
    where
        Self: 'a;

    #[inline]
    fn node_count(&self) -> usize {
        self.out.len()
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.ends.len()
    }

    #[inline]
    fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId) {
        self.ends[edge.index()]
    }

    #[inline]
    fn out_arcs(&self, node: NodeId) -> Self::OutArcs<'_> {
        self.out[node.index()].iter().copied()
    }

    #[inline]
    fn degree(&self, node: NodeId) -> usize {
        self.out[node.index()].len()
    }
}
