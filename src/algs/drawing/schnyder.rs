//! Schnyder realizer of an embedded triangulation and the grid coordinates
//! derived from it.
//!
//! Interior nodes are removed from the outer face one at a time (a canonical
//! ordering shelling towards the outer edge `a - b`); every removal labels the
//! angles of the triangles around the node, and arcs whose label repeats on
//! their successor become the parent pointers of the three trees rooted at
//! `a`, `b` and `c`. Subtree sizes summed along the tree paths give the
//! barycentric coordinates of every node.

use super::GridPoint;
use crate::topology::{ArcId, ArcMap, Graph, NodeId, NodeMap};

/// Not yet adjacent to a removed node.
const FREE: i32 = -1;
/// Removed, or one of the two base nodes.
const DONE: i32 = -2;

/// Removal state. `conn[n]` counts how many separate stretches of the
/// current outer face `n` touches, or holds `FREE`/`DONE`; a node is
/// *proper* (removable) when it touches exactly one.
struct Shelling<'a, G: Graph> {
    graph: &'a G,
    next: &'a ArcMap<ArcId>,
    prev: ArcMap<ArcId>,
    conn: NodeMap<i32>,
    proper: NodeMap<bool>,
    candidates: Vec<NodeId>,
}

impl<G: Graph> Shelling<'_, G> {
    fn set_proper(&mut self, node: NodeId, on: bool) {
        self.proper[node] = on;
        if on {
            self.candidates.push(node);
        }
    }

    /// Update the neighbors of a node that just joined the removed set.
    fn relax(&mut self, node: NodeId) {
        let graph = self.graph;
        for e in graph.out_arcs(node) {
            let m = graph.target(e);
            if self.conn[m] == FREE {
                self.conn[m] = 1;
            } else if self.conn[m] != DONE {
                self.conn[m] += 1;
                let pe = e.opposite();
                if self.conn[graph.target(self.next[pe])] == DONE {
                    self.conn[m] -= 1;
                }
                if self.conn[graph.target(self.prev[pe])] == DONE {
                    self.conn[m] -= 1;
                }
                let on = self.conn[m] == 1;
                self.set_proper(m, on);
            }
        }
    }
}

/// Straight-line grid coordinates for a triangulation with at least three
/// nodes, embedded by the successor map `next`.
pub(super) fn draw<G: Graph>(graph: &G, next: &ArcMap<ArcId>) -> NodeMap<GridPoint> {
    let mut prev = ArcMap::new(graph, ArcId::from_index(0));
    for node in graph.nodes() {
        let Some(first) = graph.first_out(node) else {
            continue;
        };
        let mut p = first;
        let mut e = next[first];
        while e != first {
            prev[e] = p;
            p = e;
            e = next[e];
        }
        prev[e] = p;
    }

    let e0 = ArcId::from_index(0);
    let a = graph.source(e0);
    let b = graph.target(e0);
    let c = graph.target(next[e0.opposite()]);

    let mut sh = Shelling {
        graph,
        next,
        prev,
        conn: NodeMap::new(graph, FREE),
        proper: NodeMap::new(graph, false),
        candidates: Vec::new(),
    };

    sh.conn[a] = DONE;
    sh.conn[b] = DONE;
    for e in graph.out_arcs(a) {
        let m = graph.target(e);
        if sh.conn[m] == FREE {
            sh.conn[m] = 1;
        }
    }
    sh.conn[c] = 2;
    sh.relax(b);

    let mut angle = ArcMap::new(graph, -1i8);
    let label = |angle: &mut ArcMap<i8>, e: ArcId| {
        angle[e] = 0;
        let f = next[e.opposite()];
        angle[f] = 1;
        let f = next[f.opposite()];
        angle[f] = 2;
    };

    while let Some(n) = sh.candidates.pop() {
        if !sh.proper[n] {
            continue;
        }
        sh.proper[n] = false;
        sh.conn[n] = DONE;
        sh.relax(n);

        let Some(first) = graph.first_out(n) else {
            continue;
        };
        let mut p = first;
        let mut e = next[first];
        loop {
            if sh.conn[graph.target(e)] == DONE && sh.conn[graph.target(p)] == DONE {
                label(&mut angle, e);
            }
            if e == first {
                break;
            }
            p = e;
            e = next[e];
        }
    }

    let mut apred: NodeMap<Option<NodeId>> = NodeMap::new(graph, None);
    let mut bpred: NodeMap<Option<NodeId>> = NodeMap::new(graph, None);
    let mut cpred: NodeMap<Option<NodeId>> = NodeMap::new(graph, None);
    for e in graph.arcs() {
        if angle[e] != angle[next[e]] {
            continue;
        }
        let (s, t) = (graph.source(e), graph.target(e));
        match angle[e] {
            2 => apred[t] = Some(s),
            1 => bpred[t] = Some(s),
            0 => cpred[t] = Some(s),
            _ => {}
        }
    }
    cpred[a] = None;
    cpred[b] = None;

    let aorder = tree_order(graph, &apred, b, c);
    let border = tree_order(graph, &bpred, c, a);
    let corder = tree_order(graph, &cpred, a, b);

    let atree = subtree_sizes(graph, &apred, &aorder);
    let btree = subtree_sizes(graph, &bpred, &border);

    let parent = |pred: &NodeMap<Option<NodeId>>, n: NodeId| {
        pred[n].expect("realizer tree spans every non-root node of its order")
    };

    let mut apath = NodeMap::new(graph, 0i32);
    let mut apath_btree = NodeMap::new(graph, 0i32);
    apath[b] = 1;
    apath[c] = 1;
    apath_btree[b] = btree[b];
    for &n in aorder.iter().skip(1) {
        let p = parent(&apred, n);
        apath[n] = apath[p] + 1;
        apath_btree[n] = btree[n] + apath_btree[p];
    }

    let mut bpath_atree = NodeMap::new(graph, 0i32);
    bpath_atree[a] = atree[a];
    for &n in border.iter().skip(1) {
        let p = parent(&bpred, n);
        bpath_atree[n] = atree[n] + bpath_atree[p];
    }

    let mut cpath = NodeMap::new(graph, 0i32);
    let mut cpath_atree = NodeMap::new(graph, 0i32);
    let mut cpath_btree = NodeMap::new(graph, 0i32);
    cpath[a] = 1;
    cpath[b] = 1;
    cpath_atree[a] = atree[a];
    cpath_btree[b] = btree[b];
    for &n in corder.iter().skip(1) {
        let p = parent(&cpred, n);
        cpath[n] = cpath[p] + 1;
        cpath_atree[n] = atree[n] + cpath_atree[p];
        cpath_btree[n] = btree[n] + cpath_btree[p];
    }

    NodeMap::from_vec(
        graph
            .nodes()
            .map(|n| GridPoint {
                x: bpath_atree[n] + cpath_atree[n] - atree[n] - cpath[n] + 1,
                y: cpath_btree[n] + apath_btree[n] - btree[n] - apath[n] + 1,
            })
            .collect(),
    )
}

/// Nodes of a tree given by parent pointers, every node after its parent.
/// `skip_a` and `skip_b` are the two outer nodes not in the tree.
fn tree_order<G: Graph>(
    graph: &G,
    pred: &NodeMap<Option<NodeId>>,
    skip_a: NodeId,
    skip_b: NodeId,
) -> Vec<NodeId> {
    let mut processed = NodeMap::new(graph, false);
    let mut order = Vec::with_capacity(graph.node_count());
    let mut stack = Vec::new();
    for n in graph.nodes() {
        if processed[n] || n == skip_a || n == skip_b {
            continue;
        }
        stack.push(n);
        processed[n] = true;
        let mut m = pred[n];
        while let Some(p) = m {
            if processed[p] {
                break;
            }
            stack.push(p);
            processed[p] = true;
            m = pred[p];
        }
        order.extend(stack.drain(..).rev());
    }
    order
}

fn subtree_sizes<G: Graph>(
    graph: &G,
    pred: &NodeMap<Option<NodeId>>,
    order: &[NodeId],
) -> NodeMap<i32> {
    let mut size = NodeMap::new(graph, 0i32);
    for &n in order.iter().rev() {
        size[n] = 1;
        for e in graph.out_arcs(n) {
            let t = graph.target(e);
            if pred[t] == Some(n) {
                size[n] += size[t];
            }
        }
    }
    size
}
