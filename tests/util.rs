#![allow(dead_code)]
use hashbrown::HashSet;
use planar_embed::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn nid(i: usize) -> NodeId {
    NodeId::new(i)
}

/// Build a graph from `(u, v)` pairs, panicking on malformed input.
pub fn graph_from(n: usize, edges: &[(usize, usize)]) -> ListGraph {
    ListGraph::from_edges(n, edges.iter().copied()).expect("simple test graph")
}

/// Edge list of a graph as index pairs.
pub fn edge_pairs<G: Graph>(g: &G) -> Vec<(usize, usize)> {
    g.edges()
        .map(|e| {
            let (u, v) = g.endpoints(e);
            (u.index(), v.index())
        })
        .collect()
}

/// Random maximal planar graph on `n >= 3` nodes: start from a triangle and
/// repeatedly drop a new node into a random triangular face.
pub fn random_triangulation(n: usize, seed: u64) -> ListGraph {
    assert!(n >= 3);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut edges = vec![(0, 1), (1, 2), (2, 0)];
    let mut faces = vec![[0, 1, 2], [0, 2, 1]];
    for w in 3..n {
        let f = rng.gen_range(0..faces.len());
        let [a, b, c] = faces.swap_remove(f);
        edges.extend([(a, w), (b, w), (c, w)]);
        faces.extend([[a, b, w], [b, c, w], [c, a, w]]);
    }
    shuffle(&mut edges, &mut rng);
    graph_from(n, &edges)
}

/// Random planar graph: a triangulation with each edge kept with
/// probability `keep`.
pub fn random_planar(n: usize, keep: f64, seed: u64) -> ListGraph {
    let tri = random_triangulation(n, seed);
    let mut rng = SmallRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);
    let kept: Vec<_> = edge_pairs(&tri)
        .into_iter()
        .filter(|_| rng.r#gen::<f64>() < keep)
        .collect();
    graph_from(n, &kept)
}

/// A triangulation on `n >= 5` nodes plus one more edge; never planar.
pub fn random_non_planar(n: usize, seed: u64) -> ListGraph {
    assert!(n >= 5);
    let mut g = random_triangulation(n, seed);
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    loop {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v && !g.has_edge(nid(u), nid(v)) {
            g.add_edge(nid(u), nid(v));
            return g;
        }
    }
}

/// Disjoint union; nodes of `b` are shifted past those of `a`.
pub fn disjoint_union<G: Graph, H: Graph>(a: &G, b: &H) -> ListGraph {
    let shift = a.node_count();
    let mut edges = edge_pairs(a);
    edges.extend(edge_pairs(b).into_iter().map(|(u, v)| (u + shift, v + shift)));
    graph_from(shift + b.node_count(), &edges)
}

fn shuffle<T>(items: &mut [T], rng: &mut SmallRng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Homeomorph {
    K5,
    K33,
}

/// Classify an edge set as a subdivision of K5 or K3,3, or `None` if it is
/// neither (extra edges, dangling paths, wrong branch structure).
pub fn classify_subdivision<G: Graph>(g: &G, edges: &[EdgeId]) -> Option<Homeomorph> {
    let n = g.node_count();
    let mut adj: Vec<Vec<(usize, EdgeId)>> = vec![Vec::new(); n];
    for &e in edges {
        let (u, v) = g.endpoints(e);
        adj[u.index()].push((v.index(), e));
        adj[v.index()].push((u.index(), e));
    }
    let branch: Vec<usize> = (0..n).filter(|&i| adj[i].len() > 2).collect();
    if adj.iter().any(|a| a.len() == 1) {
        return None;
    }
    let kind = match (branch.len(), branch.iter().all(|&b| adj[b].len() == 4)) {
        (5, true) => Homeomorph::K5,
        (6, false) if branch.iter().all(|&b| adj[b].len() == 3) => Homeomorph::K33,
        _ => return None,
    };

    // Contract every branch-to-branch path.
    let mut used = HashSet::new();
    let mut links = Vec::new();
    for &b in &branch {
        for &(first, e) in &adj[b] {
            if used.contains(&e) {
                continue;
            }
            used.insert(e);
            let (mut prev, mut cur) = (b, first);
            while adj[cur].len() == 2 {
                let &(next, ne) = adj[cur].iter().find(|&&(t, _)| t != prev)?;
                if !used.insert(ne) {
                    return None;
                }
                prev = cur;
                cur = next;
            }
            if cur == b {
                return None;
            }
            links.push((b.min(cur), b.max(cur)));
        }
    }
    if used.len() != edges.len() {
        return None;
    }
    links.sort_unstable();
    let len = links.len();
    links.dedup();
    if links.len() != len {
        return None;
    }

    match kind {
        Homeomorph::K5 => (links.len() == 10).then_some(kind),
        Homeomorph::K33 => {
            if links.len() != 9 {
                return None;
            }
            let mut side = vec![None; n];
            side[branch[0]] = Some(false);
            let mut stack = vec![branch[0]];
            while let Some(x) = stack.pop() {
                for &(a, c) in &links {
                    let y = if a == x {
                        c
                    } else if c == x {
                        a
                    } else {
                        continue;
                    };
                    let want = side[x].map(|s: bool| !s);
                    match side[y] {
                        None => {
                            side[y] = want;
                            stack.push(y);
                        }
                        s if s != want => return None,
                        _ => {}
                    }
                }
            }
            let left = branch.iter().filter(|&&b| side[b] == Some(false)).count();
            (left == 3).then_some(kind)
        }
    }
}

fn orient(a: GridPoint, b: GridPoint, c: GridPoint) -> i64 {
    let (ax, ay) = (a.x as i64, a.y as i64);
    let (bx, by) = (b.x as i64, b.y as i64);
    let (cx, cy) = (c.x as i64, c.y as i64);
    ((bx - ax) * (cy - ay) - (by - ay) * (cx - ax)).signum()
}

fn on_segment(a: GridPoint, b: GridPoint, p: GridPoint) -> bool {
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}

/// Whether two closed segments share a point.
pub fn segments_touch(a: GridPoint, b: GridPoint, c: GridPoint, d: GridPoint) -> bool {
    let (o1, o2) = (orient(a, b, c), orient(a, b, d));
    let (o3, o4) = (orient(c, d, a), orient(c, d, b));
    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(a, b, c))
        || (o2 == 0 && on_segment(a, b, d))
        || (o3 == 0 && on_segment(c, d, a))
        || (o4 == 0 && on_segment(c, d, b))
}

/// First pair of edges whose straight-line segments meet anywhere other
/// than at a shared endpoint.
pub fn find_crossing<G: Graph>(g: &G, pts: &NodeMap<GridPoint>) -> Option<(EdgeId, EdgeId)> {
    let edges: Vec<_> = g.edges().collect();
    for (i, &e) in edges.iter().enumerate() {
        let (u, v) = g.endpoints(e);
        for &f in &edges[i + 1..] {
            let (x, y) = g.endpoints(f);
            let shared = [x, y].into_iter().find(|&w| w == u || w == v);
            let bad = match shared {
                None => segments_touch(pts[u], pts[v], pts[x], pts[y]),
                Some(s) => {
                    let a = if s == u { v } else { u };
                    let b = if s == x { y } else { x };
                    let (ps, pa, pb) = (pts[s], pts[a], pts[b]);
                    orient(ps, pa, pb) == 0
                        && (pa.x - ps.x) as i64 * (pb.x - ps.x) as i64
                            + (pa.y - ps.y) as i64 * (pb.y - ps.y) as i64
                            > 0
                }
            };
            if bad {
                return Some((e, f));
            }
        }
    }
    None
}

/// Assert a coloring is proper and uses indices below `bound`.
pub fn assert_proper_coloring<G: Graph>(g: &G, colors: &NodeMap<Option<usize>>, bound: usize) {
    for (n, c) in colors.iter() {
        let c = c.unwrap_or_else(|| panic!("node {n} uncolored"));
        assert!(c < bound, "node {n} has color {c} >= {bound}");
    }
    for e in g.edges() {
        let (u, v) = g.endpoints(e);
        assert_ne!(colors[u], colors[v], "edge {u} - {v} is monochromatic");
    }
}
