//! Straight-line planar drawing on an integer grid.
//!
//! [`PlanarDrawing`] places the nodes of a planar graph with `n` nodes on the
//! `[0, n - 2] x [0, n - 2]` grid so that straight edges never cross. A graph
//! that is not already a triangulation is first completed on a private
//! working copy; the added edges only steer the layout and are discarded.

mod augment;
mod schnyder;

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::algs::planarity::{EmbeddingMap, PlanarEmbedding};
use crate::debug_invariants::DebugInvariants;
use crate::planarity_error::PlanarityError;
use crate::topology::{Graph, ListGraph, NodeId, NodeMap};

/// Integer grid coordinate of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        GridPoint { x, y }
    }
}

/// Schnyder drawing of a planar graph.
///
/// ```
/// use planar_embed::prelude::*;
///
/// let g = generators::wheel(5);
/// let mut drawing = PlanarDrawing::new(&g);
/// assert!(drawing.run());
/// let max = g.node_count() as i32 - 2;
/// assert!(drawing.coords().values().all(|p| p.x <= max && p.y <= max));
/// ```
#[derive(Debug)]
pub struct PlanarDrawing<'a, G: Graph> {
    graph: &'a G,
    points: NodeMap<GridPoint>,
}

impl<'a, G: Graph> PlanarDrawing<'a, G> {
    /// The graph must be simple.
    pub fn new(graph: &'a G) -> Self {
        PlanarDrawing {
            graph,
            points: NodeMap::new(graph, GridPoint::default()),
        }
    }

    /// Embed the graph and compute coordinates; `false` if it is not planar.
    pub fn run(&mut self) -> bool {
        let mut pe = PlanarEmbedding::new(self.graph);
        if !pe.run(false) {
            return false;
        }
        match pe.into_embedding_map() {
            Some(embedding) => {
                self.draw(&embedding);
                true
            }
            None => false,
        }
    }

    /// Compute coordinates from a precomputed planar embedding of the graph.
    ///
    /// The map is checked to be a rotation system of this graph that
    /// satisfies Euler's formula.
    pub fn run_with_embedding(&mut self, embedding: &EmbeddingMap) -> Result<(), PlanarityError> {
        embedding.validate(self.graph)?;
        embedding.check_euler(self.graph)?;
        self.draw(embedding);
        Ok(())
    }

    fn draw(&mut self, embedding: &EmbeddingMap) {
        let graph = self.graph;
        let n = graph.node_count();
        let m = graph.edge_count();

        self.points = if n <= 2 {
            NodeMap::new(graph, GridPoint::default())
        } else if m == 3 * n - 6 {
            schnyder::draw(graph, embedding.as_map())
        } else {
            let mut aux = ListGraph::with_nodes(n);
            for e in graph.edges() {
                let (u, v) = graph.endpoints(e);
                aux.add_edge(u, v);
            }
            let mut next = embedding.as_map().clone();
            let connected = augment::make_connected(&mut aux, &mut next);
            let biconnected = augment::make_biconnected(&mut aux, &mut next);
            let triangulated = augment::make_max_planar(&mut aux, &mut next);
            log::debug!(
                "drawing: augmented {m} edges by {connected} + {biconnected} + {triangulated}"
            );
            schnyder::draw(&aux, &next)
        };

        crate::debug_invariants!(self.validate_invariants(), "PlanarDrawing::run");
    }

    #[inline]
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// Coordinates of every node.
    pub fn coords(&self) -> &NodeMap<GridPoint> {
        &self.points
    }

    #[inline]
    pub fn point(&self, node: NodeId) -> GridPoint {
        self.points[node]
    }
}

impl<G: Graph> Index<NodeId> for PlanarDrawing<'_, G> {
    type Output = GridPoint;

    fn index(&self, node: NodeId) -> &GridPoint {
        &self.points[node]
    }
}

impl<G: Graph> DebugInvariants for PlanarDrawing<'_, G> {
    fn validate_invariants(&self) -> Result<(), PlanarityError> {
        let n = self.graph.node_count();
        let max = n.saturating_sub(2) as i32;
        for (node, p) in self.points.iter() {
            if !(0..=max).contains(&p.x) || !(0..=max).contains(&p.y) {
                return Err(PlanarityError::PointOutOfGrid {
                    node: node.index(),
                    x: p.x,
                    y: p.y,
                    max,
                });
            }
        }
        if n > 2 {
            let mut owner = hashbrown::HashMap::with_capacity(n);
            for (node, p) in self.points.iter() {
                if let Some(other) = owner.insert(*p, node) {
                    return Err(PlanarityError::DuplicatePoint(other.index(), node.index()));
                }
            }
        }
        Ok(())
    }
}
