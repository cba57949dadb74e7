//! Completion of an embedded planar graph to a triangulation.
//!
//! Each pass adds edges to a [`ListGraph`] working copy and splices their
//! arcs into the successor map so that the map stays a planar rotation
//! system. New arcs get the next free ids, so the map only ever grows.

use crate::topology::{ArcId, ArcMap, Graph, ListGraph, NodeId, NodeMap};

/// Add the edge `u - v` and return its forward arc, growing `next` to cover
/// both new arcs.
fn add_arc(graph: &mut ListGraph, next: &mut ArcMap<ArcId>, u: NodeId, v: NodeId) -> ArcId {
    let arc = graph.add_edge(u, v).arc(true);
    next.ensure_len(graph.arc_count(), arc);
    arc
}

fn set_processed(processed: &mut ArcMap<bool>, arc: ArcId) {
    processed.ensure_len(arc.index() + 1, false);
    processed[arc] = true;
}

fn is_processed(processed: &ArcMap<bool>, arc: ArcId) -> bool {
    processed.get(arc).copied().unwrap_or(false)
}

/// Join every connected component to the first one with a single edge.
pub(super) fn make_connected(graph: &mut ListGraph, next: &mut ArcMap<ArcId>) -> usize {
    let mut reached = NodeMap::new(&*graph, false);
    let mut stack = Vec::new();
    let mut anchor: Option<NodeId> = None;
    let mut added = 0;

    for i in 0..graph.node_count() {
        let node = NodeId::new(i);
        if reached[node] {
            continue;
        }
        reached[node] = true;
        stack.push(node);
        while let Some(n) = stack.pop() {
            for arc in graph.out_arcs(n) {
                let t = graph.target(arc);
                if !reached[t] {
                    reached[t] = true;
                    stack.push(t);
                }
            }
        }

        let Some(u) = anchor else {
            anchor = Some(node);
            continue;
        };
        let ue = graph.first_out(u);
        let ve = graph.first_out(node);
        let e = add_arc(graph, next, u, node);
        added += 1;

        match ue {
            Some(ue) => {
                next[e] = next[ue];
                next[ue] = e;
            }
            None => next[e] = e,
        }
        let r = e.opposite();
        match ve {
            Some(ve) => {
                next[r] = next[ve];
                next[ve] = r;
            }
            None => next[r] = r,
        }
    }
    added
}

/// Remove cut vertices: walking each face, a node met twice gets a chord
/// between its two face neighbors.
pub(super) fn make_biconnected(graph: &mut ListGraph, next: &mut ArcMap<ArcId>) -> usize {
    let arcs: Vec<ArcId> = graph.arcs().collect();
    let mut processed = ArcMap::new(&*graph, false);
    let mut visited = NodeMap::new(&*graph, false);
    let mut touched = Vec::new();
    let mut added = 0;

    for &start in &arcs {
        if is_processed(&processed, start) {
            continue;
        }
        let mut pp = start;
        let mut e = next[pp.opposite()];
        set_processed(&mut processed, e);
        visited[graph.source(e)] = true;
        touched.push(graph.source(e));

        let last = e;
        let mut p = e;
        e = next[e.opposite()];

        while e != last {
            set_processed(&mut processed, e);
            let s = graph.source(e);
            if visited[s] {
                let (u, v) = (graph.source(p), graph.target(e));
                let n = add_arc(graph, next, u, v);
                added += 1;
                next[n] = p;
                next[pp.opposite()] = n;
                next[n.opposite()] = next[e.opposite()];
                next[e.opposite()] = n.opposite();
                p = n;
                e = next[n.opposite()];
            } else {
                visited[s] = true;
                touched.push(s);
                pp = p;
                p = e;
                e = next[e.opposite()];
            }
        }

        for node in touched.drain(..) {
            visited[node] = false;
        }
    }
    added
}

/// Triangulate every face of length four or more by fanning chords out of
/// its lowest-degree node, or, when that node already sees another face
/// node, out of both ends of a separating chord.
pub(super) fn make_max_planar(graph: &mut ListGraph, next: &mut ArcMap<ArcId>) -> usize {
    let degree = NodeMap::from_vec(graph.nodes().map(|n| graph.degree(n)).collect());
    let arcs: Vec<ArcId> = graph.arcs().collect();
    let mut processed = ArcMap::new(&*graph, false);
    let mut visited = NodeMap::new(&*graph, false);
    let edges_before = graph.edge_count();

    for &start in &arcs {
        if is_processed(&processed, start) {
            continue;
        }
        set_processed(&mut processed, start);

        let mut mine = start;
        let mut mind = degree[graph.source(start)];
        let mut face_size = 1;

        let mut e = next[start.opposite()];
        while e != start {
            set_processed(&mut processed, e);
            face_size += 1;
            if degree[graph.source(e)] < mind {
                mine = e;
                mind = degree[graph.source(e)];
            }
            e = next[e.opposite()];
        }

        if face_size < 4 {
            continue;
        }

        let s = graph.source(mine);
        let neighbors: Vec<NodeId> = graph.out_arcs(s).map(|a| graph.target(a)).collect();
        for &t in &neighbors {
            visited[t] = true;
        }

        let mut opposite = None;
        e = next[next[mine.opposite()].opposite()];
        while graph.target(e) != s {
            if visited[graph.source(e)] {
                opposite = Some(e);
                break;
            }
            e = next[e.opposite()];
        }
        for &t in &neighbors {
            visited[t] = false;
        }

        match opposite {
            None => {
                let first = next[mine.opposite()];
                fan(graph, next, s, mine, first);
            }
            Some(oppe) => {
                let mine = next[mine.opposite()];
                let s = graph.source(mine);
                let oppe = next[oppe.opposite()];
                let t = graph.source(oppe);

                let ce = add_arc(graph, next, s, t);
                next[ce] = mine;
                next[ce.opposite()] = oppe;

                fan(graph, next, s, ce, oppe);
                fan(graph, next, t, ce.opposite(), mine);
            }
        }
    }
    graph.edge_count() - edges_before
}

/// Connect `hub` to every node of the face after `p` until the walk returns
/// to `hub`; `pn` is the hub arc the first chord is inserted behind.
fn fan(graph: &mut ListGraph, next: &mut ArcMap<ArcId>, hub: NodeId, mut pn: ArcId, mut p: ArcId) {
    let mut e = next[p.opposite()];
    while graph.target(e) != hub {
        let src = graph.source(e);
        let n = add_arc(graph, next, hub, src);
        next[n] = pn;
        next[n.opposite()] = e;
        next[p.opposite()] = n.opposite();

        pn = n;
        p = e;
        e = next[e.opposite()];
    }
    next[e.opposite()] = pn;
}
