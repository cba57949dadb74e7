//! Per-node lists of DFS children ordered by ascending lowpoint.
//!
//! The lists are intrusive: every node stores its first child and its own
//! `prev`/`next` siblings, so a child whose component has been merged away
//! is unlinked in O(1). Keeping the lowest-low child first is what makes the
//! "externally active" test constant time.

use super::lowpoint::DfsForest;
use crate::topology::{Graph, NodeId, NodeMap};

#[derive(Clone, Copy, Debug, Default)]
struct ChildLink {
    first: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub(crate) struct ChildLists {
    links: NodeMap<ChildLink>,
}

impl ChildLists {
    /// Thread every node's children in ascending `low` order.
    ///
    /// One bucket pass over all nodes keyed on `low` (which is below `n`)
    /// sorts every sibling group at once, stably, in O(n).
    pub fn build<G: Graph>(graph: &G, forest: &DfsForest) -> Self {
        let n = graph.node_count();
        let mut buckets: Vec<Vec<NodeId>> = vec![Vec::new(); n];
        for node in graph.nodes() {
            if forest.pred[node].is_some() {
                buckets[forest.low[node]].push(node);
            }
        }

        let mut links = NodeMap::new(graph, ChildLink::default());
        let mut last: NodeMap<Option<NodeId>> = NodeMap::new(graph, None);
        for child in buckets.into_iter().flatten() {
            let Some(parent) = forest.parent(graph, child) else {
                continue;
            };
            match last[parent] {
                None => links[parent].first = Some(child),
                Some(prev) => {
                    links[prev].next = Some(child);
                    links[child].prev = Some(prev);
                }
            }
            last[parent] = Some(child);
        }
        ChildLists { links }
    }

    /// Remaining child with the lowest `low`.
    #[inline]
    pub fn first(&self, node: NodeId) -> Option<NodeId> {
        self.links[node].first
    }

    /// Sibling after `child`.
    #[inline]
    pub fn next(&self, child: NodeId) -> Option<NodeId> {
        self.links[child].next
    }

    /// Unlink `child` from the list of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) {
        let ChildLink { prev, next, .. } = self.links[child];
        match prev {
            Some(p) => self.links[p].next = next,
            None => self.links[parent].first = next,
        }
        if let Some(n) = next {
            self.links[n].prev = prev;
        }
    }

    /// Detach and return the first child of `node`.
    pub fn pop_first(&mut self, node: NodeId) -> Option<NodeId> {
        let child = self.links[node].first?;
        self.remove(node, child);
        Some(child)
    }

    /// Children of `node` still in the list, in order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first(node), move |&c| self.next(c))
    }
}
