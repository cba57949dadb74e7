#![cfg_attr(docsrs, feature(doc_cfg))]
//! # planar-embed
//!
//! planar-embed is a Rust library for planarity testing of simple undirected
//! graphs and the algorithms that build on a planar embedding. Everything runs
//! in a single thread and never mutates the caller's graph.
//!
//! ## Features
//! - Linear-time Boyer–Myrvold planarity test ([`check_planarity`](algs::check_planarity))
//! - Combinatorial embeddings as arc successor maps ([`PlanarEmbedding`](algs::PlanarEmbedding))
//! - Kuratowski subdivision isolation for non-planar inputs, tagged with the
//!   obstruction case that produced it
//! - Schnyder straight-line drawings on the `(n - 2) x (n - 2)` grid
//! - Five and six coloring with Kempe chain recoloring
//!
//! ## Graphs
//! The algorithms are generic over the [`Graph`](topology::Graph) trait, which
//! only asks for dense node/edge ids, edge endpoints and out-arcs. The bundled
//! [`ListGraph`](topology::ListGraph) and the constructors in
//! [`topology::generators`] cover the common cases.
//!
//! ## Invariant checking
//! Successful runs validate their results (rotation system, Euler's formula,
//! grid bounds, proper coloring) in debug builds. Enable the
//! `check-invariants` feature to keep these checks in release builds.
//!
//! ```
//! use planar_embed::prelude::*;
//!
//! let k5 = generators::complete(5);
//! let mut pe = PlanarEmbedding::new(&k5);
//! assert!(!pe.run(true));
//! assert_eq!(pe.kuratowski_edges().count(), 10);
//! ```

pub mod algs;
pub mod debug_invariants;
pub mod planarity_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use planarity_error::PlanarityError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::coloring::{BucketQueue, Color, Palette, PlanarColoring};
    pub use crate::algs::drawing::{GridPoint, PlanarDrawing};
    pub use crate::algs::planarity::{
        check_planarity, EmbeddingMap, KuratowskiMinor, KuratowskiSubdivision, PlanarEmbedding,
    };
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::planarity_error::PlanarityError;
    pub use crate::topology::generators;
    pub use crate::topology::{ArcId, ArcMap, EdgeId, EdgeMap, Graph, ListGraph, NodeId, NodeMap};
}
