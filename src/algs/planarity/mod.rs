//! Boyer–Myrvold planarity testing, embedding and Kuratowski isolation.
//!
//! - [`check_planarity`] answers yes/no without building a rotation system.
//! - [`PlanarEmbedding`] builds an [`EmbeddingMap`] for planar graphs and,
//!   on request, a [`KuratowskiSubdivision`] for non-planar ones.
//!
//! Inputs must be simple graphs; see [`Graph`](crate::topology::Graph).

mod child_list;
mod embedding;
mod engine;
mod face;
mod kuratowski;
mod lowpoint;

pub use embedding::{EmbeddingMap, PlanarEmbedding};
pub use kuratowski::{KuratowskiMinor, KuratowskiSubdivision};

use crate::topology::Graph;

/// Whether `graph` is planar.
///
/// Runs the embedding engine without flattening the rotations, so it costs
/// little more than the DFS.
pub fn check_planarity<G: Graph>(graph: &G) -> bool {
    let planar = engine::BoyerMyrvold::new(graph).embed().is_continue();
    log::debug!(
        "planarity check: {} nodes, {} edges, planar = {planar}",
        graph.node_count(),
        graph.edge_count()
    );
    planar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::generators;

    #[test]
    fn canonical_graphs() {
        assert!(check_planarity(&generators::complete(4)));
        assert!(check_planarity(&generators::octahedron()));
        assert!(check_planarity(&generators::grid(4, 5)));
        assert!(check_planarity(&generators::wheel(7)));
        assert!(!check_planarity(&generators::complete(5)));
        assert!(!check_planarity(&generators::complete_bipartite(3, 3)));
        assert!(!check_planarity(&generators::petersen()));
    }

    #[test]
    fn empty_and_tiny_graphs() {
        assert!(check_planarity(&generators::path(0)));
        assert!(check_planarity(&generators::path(1)));
        assert!(check_planarity(&generators::path(2)));
    }

    #[test]
    fn subdivisions_keep_the_verdict() {
        assert!(!check_planarity(&generators::subdivide(&generators::complete(5))));
        assert!(check_planarity(&generators::subdivide(&generators::octahedron())));
    }
}
