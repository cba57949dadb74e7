//! Deterministic constructors for the standard graphs used when exercising the
//! planarity algorithms.
//!
//! Node indices are assigned predictably (documented per constructor) so tests
//! can refer to specific nodes.

use itertools::Itertools;

use super::graph::Graph;
use super::ids::NodeId;
use super::list_graph::ListGraph;

fn from_pairs(n: usize, pairs: impl IntoIterator<Item = (usize, usize)>) -> ListGraph {
    let mut g = ListGraph::with_nodes(n);
    for (u, v) in pairs {
        g.add_edge(NodeId::new(u), NodeId::new(v));
    }
    g
}

/// Path `0 - 1 - ... - (n-1)`.
pub fn path(n: usize) -> ListGraph {
    from_pairs(n, (1..n).map(|i| (i - 1, i)))
}

/// Cycle `0 - 1 - ... - (n-1) - 0`; degenerates to a path below three nodes.
pub fn cycle(n: usize) -> ListGraph {
    let mut g = path(n);
    if n >= 3 {
        g.add_edge(NodeId::new(n - 1), NodeId::new(0));
    }
    g
}

/// Star with center `0` and leaves `1..=leaves`.
pub fn star(leaves: usize) -> ListGraph {
    from_pairs(leaves + 1, (1..=leaves).map(|i| (0, i)))
}

/// Wheel with hub `0` and a rim cycle over `1..=rim`.
pub fn wheel(rim: usize) -> ListGraph {
    let spokes = (1..=rim).map(|i| (0, i));
    let ring = (1..=rim).map(move |i| (i, if i == rim { 1 } else { i + 1 }));
    from_pairs(rim + 1, spokes.chain(ring))
}

/// `rows x cols` grid; node `(r, c)` has index `r * cols + c`.
pub fn grid(rows: usize, cols: usize) -> ListGraph {
    let id = |r: usize, c: usize| r * cols + c;
    let mut pairs = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                pairs.push((id(r, c), id(r, c + 1)));
            }
            if r + 1 < rows {
                pairs.push((id(r, c), id(r + 1, c)));
            }
        }
    }
    from_pairs(rows * cols, pairs)
}

/// Complete graph `K_n`.
pub fn complete(n: usize) -> ListGraph {
    from_pairs(n, (0..n).tuple_combinations())
}

/// Complete bipartite graph `K_{a,b}`; sides are `0..a` and `a..a+b`.
pub fn complete_bipartite(a: usize, b: usize) -> ListGraph {
    from_pairs(a + b, (0..a).cartesian_product(a..a + b))
}

/// Petersen graph: outer cycle `0..5`, inner pentagram `5..10`, spokes `i - i+5`.
pub fn petersen() -> ListGraph {
    let outer = (0..5).map(|i| (i, (i + 1) % 5));
    let spokes = (0..5).map(|i| (i, i + 5));
    let inner = (0..5).map(|i| (5 + i, 5 + (i + 2) % 5));
    from_pairs(10, outer.chain(spokes).chain(inner))
}

/// Octahedron `K_{2,2,2}`: antipodal pairs are `(0, 1)`, `(2, 3)`, `(4, 5)`.
pub fn octahedron() -> ListGraph {
    let pairs = (0..6usize)
        .tuple_combinations()
        .filter(|&(u, v)| u / 2 != v / 2);
    from_pairs(6, pairs)
}

/// Icosahedron: apex `0`, upper ring `1..=5`, lower ring `6..=10`, apex `11`.
/// Every node has degree five.
pub fn icosahedron() -> ListGraph {
    let top = (1..=5).map(|i| (0, i));
    let upper = (1..=5).map(|i| (i, i % 5 + 1));
    let zigzag = (1..=5).flat_map(|i| [(i, i + 5), (i % 5 + 1, i + 5)]);
    let lower = (6..=10).map(|i| (i, (i - 5) % 5 + 6));
    let bottom = (6..=10).map(|i| (11, i));
    from_pairs(12, top.chain(upper).chain(zigzag).chain(lower).chain(bottom))
}

/// Replace every edge `{u, v}` of `graph` by a path `u - w - v` through a new
/// node `w`. Original nodes keep their indices; the node inserted on edge `e`
/// gets index `node_count + e`.
pub fn subdivide<G: Graph>(graph: &G) -> ListGraph {
    let n = graph.node_count();
    let mut g = ListGraph::with_nodes(n + graph.edge_count());
    for e in graph.edges() {
        let (u, v) = graph.endpoints(e);
        let w = NodeId::new(n + e.index());
        g.add_edge(u, w);
        g.add_edge(w, v);
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(complete(5).edge_count(), 10);
        assert_eq!(complete_bipartite(3, 3).edge_count(), 9);
        assert_eq!(petersen().edge_count(), 15);
        assert_eq!(octahedron().edge_count(), 12);
        assert_eq!(wheel(5).edge_count(), 10);
        assert_eq!(grid(3, 4).edge_count(), 17);
        assert_eq!(cycle(2).edge_count(), 1);
        assert_eq!(star(4).degree(NodeId::new(0)), 4);
    }

    #[test]
    fn icosahedron_is_five_regular() {
        let g = icosahedron();
        assert_eq!(g.edge_count(), 30);
        assert!(g.nodes().all(|n| g.degree(n) == 5));
    }

    #[test]
    fn petersen_is_cubic() {
        let g = petersen();
        assert!(g.nodes().all(|n| g.degree(n) == 3));
    }

    #[test]
    fn subdivision_doubles_edges() {
        let k4 = complete(4);
        let s = subdivide(&k4);
        assert_eq!(s.node_count(), 10);
        assert_eq!(s.edge_count(), 12);
        for e in k4.edges() {
            assert_eq!(s.degree(NodeId::new(4 + e.index())), 2);
        }
    }
}
