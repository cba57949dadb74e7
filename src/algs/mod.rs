//! Re-export public algorithms.

pub mod coloring;
pub mod drawing;
pub mod planarity;

pub use coloring::{Color, Palette, PlanarColoring};
pub use drawing::{GridPoint, PlanarDrawing};
pub use planarity::{
    check_planarity, EmbeddingMap, KuratowskiMinor, KuratowskiSubdivision, PlanarEmbedding,
};
