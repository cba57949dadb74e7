//! Core trait for the simple undirected graphs consumed by the planarity
//! algorithms.
//!
//! The algorithms never own or mutate the caller's graph. They only need
//! dense identities (so that per-node and per-arc data can live in vectors),
//! the two endpoints of every edge, and the out-arcs of every node.

use super::ids::{ArcId, EdgeId, NodeId};

/// Read-only access to a simple undirected graph.
///
/// # Contract
/// - Nodes are `NodeId::new(0) .. NodeId::new(node_count())`.
/// - Edges are `EdgeId::new(0) .. EdgeId::new(edge_count())`, and
///   `endpoints(e) = (u, v)` fixes the forward arc of `e` as `u -> v`.
/// - `out_arcs(n)` yields every arc whose source is `n`, each exactly once:
///   the forward arc of every edge with `u == n` and the backward arc of every
///   edge with `v == n`.
/// - At most `u32::MAX + 1` nodes and [`MAX_EDGES`](super::ids::MAX_EDGES)
///   edges; the ids are `u32`-backed and do not check this in release
///   builds.
/// - The graph is simple: no self-loops, no parallel edges. This is not
///   checked by the algorithms; violating it is a contract breach.
pub trait Graph {
    type OutArcs<'a>: Iterator<Item = ArcId>
    where
        Self: 'a;

    /// Number of nodes.
    fn node_count(&self) -> usize;
    /// Number of undirected edges.
    fn edge_count(&self) -> usize;
    /// The `(u, v)` endpoints of an edge.
    fn endpoints(&self, edge: EdgeId) -> (NodeId, NodeId);
    /// All arcs leaving `node`.
    fn out_arcs(&self, node: NodeId) -> Self::OutArcs<'_>;

    /// Number of arcs, always twice the number of edges.
    #[inline]
    fn arc_count(&self) -> usize {
        2 * self.edge_count()
    }

    /// Iterator over all nodes in index order.
    fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(NodeId::new)
    }

    /// Iterator over all edges in index order.
    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edge_count()).map(EdgeId::new)
    }

    /// Iterator over all arcs in index order.
    fn arcs(&self) -> impl Iterator<Item = ArcId> + '_ {
        (0..self.arc_count()).map(ArcId::from_index)
    }

    /// First endpoint of an edge.
    #[inline]
    fn u(&self, edge: EdgeId) -> NodeId {
        self.endpoints(edge).0
    }

    /// Second endpoint of an edge.
    #[inline]
    fn v(&self, edge: EdgeId) -> NodeId {
        self.endpoints(edge).1
    }

    /// Node an arc leaves from.
    #[inline]
    fn source(&self, arc: ArcId) -> NodeId {
        let (u, v) = self.endpoints(arc.edge());
        if arc.is_forward() { u } else { v }
    }

    /// Node an arc points to.
    #[inline]
    fn target(&self, arc: ArcId) -> NodeId {
        let (u, v) = self.endpoints(arc.edge());
        if arc.is_forward() { v } else { u }
    }

    /// The arc of the same edge running the other way.
    #[inline]
    fn opposite(&self, arc: ArcId) -> ArcId {
        arc.opposite()
    }

    /// The arc of `edge` leaving `u(edge)` (`forward`) or `v(edge)`.
    #[inline]
    fn direct(&self, edge: EdgeId, forward: bool) -> ArcId {
        ArcId::new(edge, forward)
    }

    /// Number of arcs leaving `node`.
    fn degree(&self, node: NodeId) -> usize {
        self.out_arcs(node).count()
    }

    /// Some arc leaving `node`, if it has any.
    fn first_out(&self, node: NodeId) -> Option<ArcId> {
        self.out_arcs(node).next()
    }
}
