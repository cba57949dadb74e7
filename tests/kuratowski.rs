mod util;
use util::*;

use planar_embed::prelude::*;
use proptest::prelude::*;

fn witness<G: Graph>(g: &G) -> KuratowskiSubdivision {
    let mut pe = PlanarEmbedding::new(g);
    assert!(!pe.run(true), "graph unexpectedly planar");
    assert!(pe.embedding_map().is_none());
    pe.kuratowski_subdivision().cloned().expect("witness requested")
}

fn witness_kind<G: Graph>(g: &G) -> Option<Homeomorph> {
    let k = witness(g);
    let edges: Vec<_> = k.edges().collect();
    classify_subdivision(g, &edges)
}

#[test]
fn k5_witness_is_every_edge() {
    let g = generators::complete(5);
    let k = witness(&g);
    assert_eq!(k.len(), 10);
    assert!(g.edges().all(|e| k.contains(e)));
    assert_eq!(witness_kind(&g), Some(Homeomorph::K5));
}

#[test]
fn k33_witness_is_every_edge() {
    let g = generators::complete_bipartite(3, 3);
    let k = witness(&g);
    assert_eq!(k.len(), 9);
    assert_eq!(witness_kind(&g), Some(Homeomorph::K33));
}

#[test]
fn petersen_contains_a_subdivided_k33() {
    let g = generators::petersen();
    assert!(witness_kind(&g).is_some());
}

#[test]
fn dense_graphs_yield_valid_witnesses() {
    for g in [
        generators::complete(6),
        generators::complete(8),
        generators::complete_bipartite(3, 5),
        generators::complete_bipartite(4, 4),
    ] {
        assert!(witness_kind(&g).is_some());
    }
}

#[test]
fn subdivided_obstructions_keep_their_type() {
    let g = generators::subdivide(&generators::complete(5));
    assert_eq!(witness_kind(&g), Some(Homeomorph::K5));
    let g = generators::subdivide(&generators::complete_bipartite(3, 3));
    assert_eq!(witness_kind(&g), Some(Homeomorph::K33));
}

#[test]
fn witness_avoids_planar_components() {
    let g = disjoint_union(&generators::grid(4, 4), &generators::complete(5));
    let k = witness(&g);
    let shift = 16;
    for e in k.edges() {
        let (u, v) = g.endpoints(e);
        assert!(u.index() >= shift && v.index() >= shift);
    }
    assert_eq!(k.len(), 10);
}

#[test]
fn witness_is_not_recorded_unless_requested() {
    let g = generators::complete(5);
    let mut pe = PlanarEmbedding::new(&g);
    assert!(!pe.run(false));
    assert!(pe.kuratowski_minor().is_none());
    assert!(!pe.kuratowski(EdgeId::new(0)));
}

/// The first seeded overfull triangulation whose isolation takes the `minor`
/// branch. Seeds are scanned in order, so the graph is the same on every run.
fn graph_for_minor(minor: KuratowskiMinor) -> ListGraph {
    (0..20_000u64)
        .map(|seed| random_non_planar(6 + (seed % 40) as usize, seed))
        .find(|g| {
            let mut pe = PlanarEmbedding::new(g);
            !pe.run(true) && pe.kuratowski_minor() == Some(minor)
        })
        .unwrap_or_else(|| panic!("no seeded graph reaches minor {minor:?}"))
}

fn assert_minor_witness(minor: KuratowskiMinor) {
    let g = graph_for_minor(minor);
    let k = witness(&g);
    assert_eq!(k.minor, minor);
    let edges: Vec<_> = k.edges().collect();
    assert!(
        classify_subdivision(&g, &edges).is_some(),
        "minor {minor:?} produced an invalid witness of {} edges",
        edges.len()
    );
}

#[test]
fn minor_a_yields_a_subdivision() {
    assert_minor_witness(KuratowskiMinor::A);
}

#[test]
fn minor_b_yields_a_subdivision() {
    assert_minor_witness(KuratowskiMinor::B);
}

#[test]
fn minor_c_yields_a_subdivision() {
    assert_minor_witness(KuratowskiMinor::C);
}

#[test]
fn minor_d_yields_a_subdivision() {
    assert_minor_witness(KuratowskiMinor::D);
}

#[test]
fn minor_e_yields_a_subdivision() {
    assert_minor_witness(KuratowskiMinor::E);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn overfull_triangulations_yield_subdivisions(n in 5usize..50, seed in any::<u64>()) {
        let g = random_non_planar(n, seed);
        let k = witness(&g);
        let edges: Vec<_> = k.edges().collect();
        prop_assert!(
            classify_subdivision(&g, &edges).is_some(),
            "minor {:?} produced an invalid witness of {} edges",
            k.minor,
            edges.len()
        );
    }

    #[test]
    fn witness_minus_any_edge_is_planar(n in 5usize..25, seed in any::<u64>()) {
        let g = random_non_planar(n, seed);
        let k = witness(&g);
        let edges: Vec<_> = k.edges().collect();
        let pairs: Vec<_> = edges
            .iter()
            .map(|&e| {
                let (u, v) = g.endpoints(e);
                (u.index(), v.index())
            })
            .collect();
        for skip in 0..pairs.len() {
            let rest: Vec<_> = pairs
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skip)
                .map(|(_, &p)| p)
                .collect();
            prop_assert!(check_planarity(&graph_from(n, &rest)));
        }
    }
}
