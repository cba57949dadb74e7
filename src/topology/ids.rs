//! `NodeId`, `EdgeId`, `ArcId`: strong, zero-cost handles for graph entities
//!
//! Every node and edge of a [`Graph`](crate::topology::graph::Graph) is named
//! by a dense index, so per-entity data lives in plain vectors (see
//! [`maps`](crate::topology::maps)). An undirected edge `e = {u, v}` is
//! realised as two opposite arcs:
//!
//! - `ArcId(2 * e)`     runs `u -> v` (the *forward* arc),
//! - `ArcId(2 * e + 1)` runs `v -> u`.
//!
//! Flipping the low bit gives the opposite arc; dropping it gives the edge.
//! Node indices must fit in a `u32` and edge indices below `2^31`, so that
//! every arc index fits as well. Debug builds assert both limits.

use std::fmt;

/// Exclusive upper bound on edge indices; both arcs of an edge below it fit
/// in a `u32`.
pub const MAX_EDGES: usize = 1 << 31;

/// Dense handle of a graph node.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct NodeId(u32);

/// Dense handle of an undirected edge.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EdgeId(u32);

/// Dense handle of a directed half of an edge.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ArcId(u32);

impl NodeId {
    /// Wraps a dense node index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "node index exceeds u32 range");
        NodeId(index as u32)
    }

    /// Returns the dense index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl EdgeId {
    /// Wraps a dense edge index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        debug_assert!(index < MAX_EDGES, "edge index leaves no room for its arcs");
        EdgeId(index as u32)
    }

    /// Returns the dense index of this edge.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The arc of this edge running `u -> v` (`forward`) or `v -> u`.
    #[inline]
    pub const fn arc(self, forward: bool) -> ArcId {
        ArcId::new(self, forward)
    }
}

impl ArcId {
    /// The arc of `edge` in the given direction.
    #[inline]
    pub const fn new(edge: EdgeId, forward: bool) -> Self {
        debug_assert!((edge.0 as usize) < MAX_EDGES, "edge index leaves no room for its arcs");
        ArcId(edge.0 * 2 + if forward { 0 } else { 1 })
    }

    /// Wraps a dense arc index.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "arc index exceeds u32 range");
        ArcId(index as u32)
    }

    /// Returns the dense index of this arc.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The undirected edge this arc belongs to.
    #[inline]
    pub const fn edge(self) -> EdgeId {
        EdgeId(self.0 >> 1)
    }

    /// `true` for the `u -> v` arc of its edge.
    #[inline]
    pub const fn is_forward(self) -> bool {
        self.0 & 1 == 0
    }

    /// The arc of the same edge running the other way.
    #[inline]
    pub const fn opposite(self) -> ArcId {
        ArcId(self.0 ^ 1)
    }
}

// -----------------------------------------------------------------------------
// Formatting traits
// -----------------------------------------------------------------------------

macro_rules! impl_id_fmt {
    ($($ty:ident),*) => {$(
        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($ty)).field(&self.0).finish()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    )*};
}

impl_id_fmt!(NodeId, EdgeId, ArcId);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arc_encoding_pairs_directions() {
        let e = EdgeId::new(7);
        let fwd = e.arc(true);
        let bwd = e.arc(false);
        assert_eq!(fwd.index(), 14);
        assert_eq!(bwd.index(), 15);
        assert!(fwd.is_forward());
        assert!(!bwd.is_forward());
        assert_eq!(fwd.opposite(), bwd);
        assert_eq!(bwd.opposite(), fwd);
        assert_eq!(fwd.edge(), e);
        assert_eq!(bwd.edge(), e);
    }

    #[test]
    fn debug_and_display() {
        let n = NodeId::new(42);
        assert_eq!(format!("{:?}", n), "NodeId(42)");
        assert_eq!(format!("{}", n), "42");
        assert_eq!(format!("{:?}", ArcId::from_index(3)), "ArcId(3)");
    }

    #[test]
    fn ordering_follows_index() {
        assert!(NodeId::new(1) < NodeId::new(2));
        assert!(ArcId::from_index(0) < ArcId::from_index(1));
    }

    #[test]
    fn last_edge_keeps_both_arcs() {
        let e = EdgeId::new(MAX_EDGES - 1);
        assert_eq!(e.arc(false).index(), u32::MAX as usize);
        assert_eq!(e.arc(false).edge(), e);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "edge index leaves no room for its arcs")]
    fn edge_index_past_arc_range_panics() {
        let _ = EdgeId::new(MAX_EDGES);
    }

    #[test]
    fn serde_is_transparent_integer() {
        let json = serde_json::to_string(&EdgeId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: EdgeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EdgeId::new(5));
    }
}
