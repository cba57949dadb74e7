//! PlanarityError: Unified error type for planar-embed public APIs
//!
//! Non-planarity is never an error: the planarity, embedding and drawing entry
//! points answer it with `false`. This type covers checked graph construction,
//! mismatched inputs handed to the drawing and coloring layers, and the
//! invariant violations reported by [`DebugInvariants`](crate::DebugInvariants).

use thiserror::Error;

/// Unified error type for planar-embed operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanarityError {
    /// An edge endpoint does not name a node of the graph.
    #[error("Graph error: node {node} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },
    /// The planarity routines require a simple graph.
    #[error("Graph error: self-loop on node {0}")]
    SelfLoop(usize),
    /// The planarity routines require a simple graph.
    #[error("Graph error: parallel edge between nodes {0} and {1}")]
    ParallelEdge(usize, usize),
    /// An embedding map computed for a different graph was supplied.
    #[error("Embedding error: map covers {found} arcs but the graph has {expected}")]
    EmbeddingSizeMismatch { expected: usize, found: usize },
    /// The successor of an arc leaves from a different node.
    #[error("Embedding error: arc {arc} at node {node} is followed by arc {next} of another node")]
    RotationLeavesNode { arc: usize, next: usize, node: usize },
    /// Two arcs share the same successor.
    #[error("Embedding error: arc {0} is the successor of more than one arc")]
    RotationNotPermutation(usize),
    /// The successor orbit of a node misses some of its out-arcs.
    #[error("Embedding error: rotation at node {node} has {orbit} arcs, node degree is {degree}")]
    RotationOrbitMismatch { node: usize, orbit: usize, degree: usize },
    /// The face count of a planar embedding disagrees with Euler's formula.
    #[error(
        "Embedding error: Euler characteristic violated ({nodes} - {edges} + {faces} != 2 * {components})"
    )]
    EulerViolation {
        nodes: usize,
        edges: usize,
        faces: usize,
        components: usize,
    },
    /// A drawing coordinate lies outside the `[0, n - 2]` grid.
    #[error("Drawing error: node {node} placed at ({x}, {y}), outside [0, {max}]")]
    PointOutOfGrid { node: usize, x: i32, y: i32, max: i32 },
    /// Two nodes of a drawing share a grid point.
    #[error("Drawing error: nodes {0} and {1} share a grid point")]
    DuplicatePoint(usize, usize),
    /// Two adjacent nodes received the same color.
    #[error("Coloring error: adjacent nodes {0} and {1} share color {2}")]
    ColorConflict(usize, usize, usize),
    /// A color index beyond the palette bound was assigned.
    #[error("Coloring error: node {node} has color {color}, bound is {bound}")]
    ColorOutOfRange { node: usize, color: usize, bound: usize },
    /// A node was left without a color after a successful run.
    #[error("Coloring error: node {0} is uncolored")]
    Uncolored(usize),
}
