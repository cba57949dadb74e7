//! Single-pass DFS computing discovery order, the spanning forest, lowpoints
//! and direct back-edge ancestors.

use crate::topology::{ArcId, EdgeMap, Graph, NodeId, NodeMap};

const UNREACHED: usize = usize::MAX;

/// DFS forest of a graph, with the per-node values the embedding needs.
#[derive(Debug, Clone)]
pub(crate) struct DfsForest {
    /// DFS discovery rank of every node.
    pub order: NodeMap<usize>,
    /// Inverse of `order`: `order_list[order[n]] == n`.
    pub order_list: Vec<NodeId>,
    /// Tree arc `parent -> node`, `None` for the root of each DFS tree.
    pub pred: NodeMap<Option<ArcId>>,
    /// Tree membership, per edge (both arcs of a tree edge are tree arcs).
    pub tree: EdgeMap<bool>,
    /// Lowest order reachable from the subtree by one back edge.
    pub low: NodeMap<usize>,
    /// Lowest order reachable from the node itself by one back edge.
    pub ancestor: NodeMap<usize>,
}

impl DfsForest {
    pub fn build<G: Graph>(graph: &G) -> Self {
        let mut forest = DfsForest {
            order: NodeMap::new(graph, UNREACHED),
            order_list: Vec::with_capacity(graph.node_count()),
            pred: NodeMap::new(graph, None),
            tree: EdgeMap::new(graph, false),
            low: NodeMap::new(graph, UNREACHED),
            ancestor: NodeMap::new(graph, UNREACHED),
        };

        for start in graph.nodes() {
            if forest.order[start] != UNREACHED {
                continue;
            }
            forest.reach(start);
            let mut stack: Vec<(NodeId, G::OutArcs<'_>)> = vec![(start, graph.out_arcs(start))];

            while let Some((node, next)) = stack.last_mut().map(|(n, arcs)| (*n, arcs.next())) {
                match next {
                    Some(arc) => {
                        let target = graph.target(arc);
                        if forest.order[target] == UNREACHED {
                            // discover
                            forest.tree[arc.edge()] = true;
                            forest.pred[target] = Some(arc);
                            forest.reach(target);
                            stack.push((target, graph.out_arcs(target)));
                        } else {
                            forest.examine(arc, node, target);
                        }
                    }
                    None => {
                        stack.pop();
                        if let Some(arc) = forest.pred[node] {
                            forest.backtrack(graph.source(arc), node);
                        }
                    }
                }
            }
        }
        forest
    }

    fn reach(&mut self, node: NodeId) {
        let rank = self.order_list.len();
        self.order[node] = rank;
        self.low[node] = rank;
        self.ancestor[node] = rank;
        self.order_list.push(node);
    }

    fn examine(&mut self, arc: ArcId, source: NodeId, target: NodeId) {
        let t = self.order[target];
        if t < self.order[source] && !self.tree[arc.edge()] {
            if self.low[source] > t {
                self.low[source] = t;
            }
            if self.ancestor[source] > t {
                self.ancestor[source] = t;
            }
        }
    }

    fn backtrack(&mut self, parent: NodeId, child: NodeId) {
        if self.low[parent] > self.low[child] {
            self.low[parent] = self.low[child];
        }
    }

    /// Number of nodes in the forest.
    #[inline]
    pub fn len(&self) -> usize {
        self.order_list.len()
    }

    /// `source -> target` is the tree arc to a DFS child of `source`.
    #[inline]
    pub fn is_child_arc<G: Graph>(&self, graph: &G, arc: ArcId) -> bool {
        self.tree[arc.edge()] && self.order[graph.source(arc)] < self.order[graph.target(arc)]
    }

    /// `source -> target` is a back edge seen from its upper end, i.e. the
    /// target is a proper descendant of the source.
    #[inline]
    pub fn is_descending_back_arc<G: Graph>(&self, graph: &G, arc: ArcId) -> bool {
        !self.tree[arc.edge()] && self.order[graph.source(arc)] < self.order[graph.target(arc)]
    }

    /// DFS parent of `node`, `None` for tree roots.
    #[inline]
    pub fn parent<G: Graph>(&self, graph: &G, node: NodeId) -> Option<NodeId> {
        self.pred[node].map(|arc| graph.source(arc))
    }
}
