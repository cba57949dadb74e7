//! Dense per-entity maps keyed by [`NodeId`], [`EdgeId`] and [`ArcId`].
//!
//! All three are thin wrappers around a `Vec<T>` indexed by the handle's dense
//! index. They are allocated once per algorithm run, sized from the graph,
//! and grown explicitly with [`ensure_len`](NodeMap::ensure_len) when the
//! drawing layer adds edges to its working copy.

use std::ops::{Index, IndexMut};

use super::graph::Graph;
use super::ids::{ArcId, EdgeId, NodeId};

macro_rules! dense_map {
    ($(#[$meta:meta])* $name:ident, $key:ty, $count:ident, $from:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Default)]
        pub struct $name<T>(Vec<T>);

        impl<T: Clone> $name<T> {
            /// A map holding `value` for every entity of `graph`.
            pub fn new<G: Graph + ?Sized>(graph: &G, value: T) -> Self {
                Self(vec![value; graph.$count()])
            }

            /// A map of `len` copies of `value`.
            pub fn filled(len: usize, value: T) -> Self {
                Self(vec![value; len])
            }

            /// Grow the map to at least `len` entries, padding with `value`.
            pub fn ensure_len(&mut self, len: usize, value: T) {
                if self.0.len() < len {
                    self.0.resize(len, value);
                }
            }

            /// Overwrite every entry with `value`.
            pub fn fill(&mut self, value: T) {
                self.0.fill(value);
            }
        }

        impl<T> $name<T> {
            /// Wraps an existing vector; entry `i` belongs to the entity with index `i`.
            pub fn from_vec(values: Vec<T>) -> Self {
                Self(values)
            }

            #[inline]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Entry for `key`, or `None` when the map is too short.
            #[inline]
            pub fn get(&self, key: $key) -> Option<&T> {
                self.0.get(key.index())
            }

            /// `(key, value)` pairs in index order.
            pub fn iter(&self) -> impl Iterator<Item = ($key, &T)> + '_ {
                self.0.iter().enumerate().map(|(i, v)| ($from(i), v))
            }

            pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
                self.0.iter()
            }

            pub fn as_slice(&self) -> &[T] {
                &self.0
            }

            pub fn into_vec(self) -> Vec<T> {
                self.0
            }
        }

        impl<T> Index<$key> for $name<T> {
            type Output = T;

            #[inline]
            fn index(&self, key: $key) -> &T {
                &self.0[key.index()]
            }
        }

        impl<T> IndexMut<$key> for $name<T> {
            #[inline]
            fn index_mut(&mut self, key: $key) -> &mut T {
                &mut self.0[key.index()]
            }
        }
    };
}

dense_map!(
    /// Per-node values.
    NodeMap, NodeId, node_count, NodeId::new
);
dense_map!(
    /// Per-edge values.
    EdgeMap, EdgeId, edge_count, EdgeId::new
);
dense_map!(
    /// Per-arc values.
    ArcMap, ArcId, arc_count, ArcId::from_index
);

impl EdgeMap<bool> {
    /// Edges whose flag is set, in index order.
    pub fn marked(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.iter().filter(|&(_, on)| *on).map(|(e, _)| e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_by_handle() {
        let mut m = NodeMap::filled(3, 0usize);
        m[NodeId::new(1)] = 5;
        assert_eq!(m[NodeId::new(1)], 5);
        assert_eq!(m.get(NodeId::new(3)), None);
        let pairs: Vec<_> = m.iter().map(|(n, &v)| (n.index(), v)).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 5), (2, 0)]);
    }

    #[test]
    fn ensure_len_only_grows() {
        let mut m = ArcMap::filled(2, false);
        m.ensure_len(4, true);
        assert_eq!(m.as_slice(), &[false, false, true, true]);
        m.ensure_len(1, false);
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn marked_edges() {
        let m = EdgeMap::from_vec(vec![true, false, true]);
        let marked: Vec<_> = m.marked().map(EdgeId::index).collect();
        assert_eq!(marked, vec![0, 2]);
    }
}
