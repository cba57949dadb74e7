mod util;
use util::*;

use planar_embed::prelude::*;
use proptest::prelude::*;

fn embed<G: Graph>(g: &G) -> Option<EmbeddingMap> {
    let mut pe = PlanarEmbedding::new(g);
    pe.run(false).then(|| pe.into_embedding_map().expect("planar run has a map"))
}

#[test]
fn k4_embeds_with_four_triangles() {
    let g = generators::complete(4);
    assert!(check_planarity(&g));
    let emb = embed(&g).expect("K4 is planar");
    let faces = emb.faces(&g);
    assert_eq!(faces.len(), 4);
    assert!(faces.iter().all(|f| f.len() == 3));
}

#[test]
fn classic_obstructions_are_rejected() {
    for g in [
        generators::complete(5),
        generators::complete_bipartite(3, 3),
        generators::petersen(),
        generators::complete(6),
        generators::complete_bipartite(3, 4),
    ] {
        assert!(!check_planarity(&g));
        assert!(embed(&g).is_none());
    }
}

#[test]
fn single_edge_and_isolated_nodes() {
    let g = generators::path(2);
    let emb = embed(&g).expect("an edge is planar");
    assert_eq!(emb.len(), 2);
    assert_eq!(emb.next(ArcId::from_index(0)), ArcId::from_index(0));

    let empty = ListGraph::with_nodes(5);
    let emb = embed(&empty).expect("no edges");
    assert!(emb.is_empty());
}

#[test]
fn disconnected_graphs_embed_every_component() {
    let g = disjoint_union(&generators::octahedron(), &generators::grid(3, 3));
    let g = disjoint_union(&g, &generators::star(3));
    let emb = embed(&g).expect("union of planar graphs");
    emb.validate(&g).unwrap();
    emb.check_euler(&g).unwrap();
}

#[test]
fn a_non_planar_component_spoils_the_union() {
    let g = disjoint_union(&generators::cycle(6), &generators::complete_bipartite(3, 3));
    assert!(!check_planarity(&g));
}

#[test]
fn wheel_rotation_orbits_match_degrees() {
    let g = generators::wheel(9);
    let emb = embed(&g).unwrap();
    for n in g.nodes() {
        let first = g.first_out(n).unwrap();
        let orbit: Vec<_> = emb.orbit(first).collect();
        assert_eq!(orbit.len(), g.degree(n));
        assert!(orbit.iter().all(|&a| g.source(a) == n));
    }
}

#[test]
fn rerun_clears_previous_result() {
    let g = generators::complete(5);
    let mut pe = PlanarEmbedding::new(&g);
    assert!(!pe.run(true));
    assert!(pe.kuratowski_subdivision().is_some());
    assert!(!pe.run(false));
    assert!(pe.kuratowski_subdivision().is_none());
    assert!(pe.validate_invariants().is_ok());
}

#[test]
fn subdivided_triangulation_stays_planar() {
    let g = generators::subdivide(&random_triangulation(20, 3));
    let emb = embed(&g).expect("subdivisions preserve planarity");
    emb.check_euler(&g).unwrap();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn triangulations_embed_as_triangles(n in 3usize..60, seed in any::<u64>()) {
        let g = random_triangulation(n, seed);
        prop_assert!(check_planarity(&g));
        let emb = embed(&g).expect("triangulation is planar");
        prop_assert!(emb.validate(&g).is_ok());
        let faces = emb.faces(&g);
        prop_assert_eq!(faces.len(), 2 * n - 4);
        prop_assert!(faces.iter().all(|f| f.len() == 3));
    }

    #[test]
    fn sparse_planar_graphs_satisfy_euler(n in 1usize..60, keep in 0.0f64..1.0, seed in any::<u64>()) {
        let g = random_planar(n.max(3), keep, seed);
        let emb = embed(&g).expect("subgraph of a triangulation");
        prop_assert!(emb.validate(&g).is_ok());
        prop_assert!(emb.check_euler(&g).is_ok());
    }

    #[test]
    fn one_edge_too_many_is_not_planar(n in 5usize..60, seed in any::<u64>()) {
        let g = random_non_planar(n, seed);
        prop_assert!(!check_planarity(&g));
        prop_assert!(embed(&g).is_none());
    }

    #[test]
    fn check_and_embed_agree(n in 3usize..40, keep in 0.5f64..1.0, extra in 0usize..4, seed in any::<u64>()) {
        let mut g = random_planar(n, keep, seed);
        for i in 0..extra {
            let (u, v) = (nid(i % n), nid((i * 7 + 3) % n));
            if u != v && !g.has_edge(u, v) {
                g.add_edge(u, v);
            }
        }
        let mut pe = PlanarEmbedding::new(&g);
        prop_assert_eq!(check_planarity(&g), pe.run(false));
    }
}
