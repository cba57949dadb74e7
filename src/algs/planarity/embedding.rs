//! Combinatorial embeddings and the public embedding entry point.

use std::collections::VecDeque;
use std::ops::{ControlFlow, Index};

use super::engine::BoyerMyrvold;
use super::kuratowski::{isolate, KuratowskiMinor, KuratowskiSubdivision};
use crate::debug_invariants::DebugInvariants;
use crate::planarity_error::PlanarityError;
use crate::topology::{ArcId, ArcMap, EdgeId, Graph, NodeMap};

/// Rotation system: for every arc, the next arc leaving the same node in
/// clockwise order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbeddingMap {
    next: ArcMap<ArcId>,
}

impl EmbeddingMap {
    /// Wraps a successor map; entry `a` is the arc following `a`.
    pub fn from_successors(next: ArcMap<ArcId>) -> Self {
        EmbeddingMap { next }
    }

    /// Successor of `arc` around its source node.
    #[inline]
    pub fn next(&self, arc: ArcId) -> ArcId {
        self.next[arc]
    }

    /// Number of arcs covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.next.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    pub fn as_map(&self) -> &ArcMap<ArcId> {
        &self.next
    }

    pub fn into_map(self) -> ArcMap<ArcId> {
        self.next
    }

    /// Arcs of the rotation containing `start`, beginning with `start`.
    pub fn orbit(&self, start: ArcId) -> impl Iterator<Item = ArcId> + '_ {
        std::iter::successors(Some(start), move |&a| {
            let n = self.next(a);
            (n != start).then_some(n)
        })
    }

    /// Every face as the cycle of arcs bounding it. A face is traversed by
    /// following `e -> next(opposite(e))`.
    pub fn faces<G: Graph>(&self, graph: &G) -> Vec<Vec<ArcId>> {
        let mut seen = ArcMap::new(graph, false);
        let mut faces = Vec::new();
        for start in graph.arcs() {
            if seen[start] {
                continue;
            }
            let mut face = Vec::new();
            let mut arc = start;
            while !seen[arc] {
                seen[arc] = true;
                face.push(arc);
                arc = self.next(arc.opposite());
            }
            faces.push(face);
        }
        faces
    }

    pub fn face_count<G: Graph>(&self, graph: &G) -> usize {
        self.faces(graph).len()
    }

    /// Check that the map is a rotation system of `graph`.
    pub fn validate<G: Graph>(&self, graph: &G) -> Result<(), PlanarityError> {
        if self.len() != graph.arc_count() {
            return Err(PlanarityError::EmbeddingSizeMismatch {
                expected: graph.arc_count(),
                found: self.len(),
            });
        }

        let mut hit = ArcMap::new(graph, false);
        for arc in graph.arcs() {
            let next = self.next(arc);
            if next.index() >= graph.arc_count() || graph.source(next) != graph.source(arc) {
                return Err(PlanarityError::RotationLeavesNode {
                    arc: arc.index(),
                    next: next.index(),
                    node: graph.source(arc).index(),
                });
            }
            if std::mem::replace(&mut hit[next], true) {
                return Err(PlanarityError::RotationNotPermutation(next.index()));
            }
        }

        for node in graph.nodes() {
            let degree = graph.degree(node);
            let orbit = graph.first_out(node).map_or(0, |a| self.orbit(a).count());
            if orbit != degree {
                return Err(PlanarityError::RotationOrbitMismatch {
                    node: node.index(),
                    orbit,
                    degree,
                });
            }
        }
        Ok(())
    }

    /// Check Euler's formula `n - m + f = 2c` over the non-isolated nodes
    /// and their `c` connected components.
    pub fn check_euler<G: Graph>(&self, graph: &G) -> Result<(), PlanarityError> {
        let nodes = graph.nodes().filter(|&n| graph.degree(n) > 0).count();
        let edges = graph.edge_count();
        let faces = self.face_count(graph);
        let components = connected_components(graph);
        if nodes + faces != edges + 2 * components {
            return Err(PlanarityError::EulerViolation {
                nodes,
                edges,
                faces,
                components,
            });
        }
        Ok(())
    }
}

impl Index<ArcId> for EmbeddingMap {
    type Output = ArcId;

    fn index(&self, arc: ArcId) -> &ArcId {
        &self.next[arc]
    }
}

/// Number of connected components containing at least one edge.
fn connected_components<G: Graph>(graph: &G) -> usize {
    let mut seen = NodeMap::new(graph, false);
    let mut queue = VecDeque::new();
    let mut count = 0;
    for start in graph.nodes() {
        if seen[start] || graph.degree(start) == 0 {
            continue;
        }
        count += 1;
        seen[start] = true;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            for arc in graph.out_arcs(node) {
                let t = graph.target(arc);
                if !seen[t] {
                    seen[t] = true;
                    queue.push_back(t);
                }
            }
        }
    }
    count
}

/// Planar embedding of a simple undirected graph.
///
/// [`run`](Self::run) either computes a rotation system (planar input) or,
/// when asked, a Kuratowski subdivision proving non-planarity. Both run in
/// linear time.
///
/// ```
/// use planar_embed::prelude::*;
///
/// let k4 = generators::complete(4);
/// let mut pe = PlanarEmbedding::new(&k4);
/// assert!(pe.run(true));
/// assert_eq!(pe.embedding_map().unwrap().face_count(&k4), 4);
///
/// let k5 = generators::complete(5);
/// let mut pe = PlanarEmbedding::new(&k5);
/// assert!(!pe.run(true));
/// assert_eq!(pe.kuratowski_edges().count(), 10);
/// ```
#[derive(Debug)]
pub struct PlanarEmbedding<'a, G: Graph> {
    graph: &'a G,
    embedding: Option<EmbeddingMap>,
    kuratowski: Option<KuratowskiSubdivision>,
}

impl<'a, G: Graph> PlanarEmbedding<'a, G> {
    /// The graph must be simple.
    pub fn new(graph: &'a G) -> Self {
        PlanarEmbedding {
            graph,
            embedding: None,
            kuratowski: None,
        }
    }

    /// Run the algorithm; returns whether the graph is planar.
    ///
    /// With `kuratowski` set, a non-planar result also records a Kuratowski
    /// subdivision. Results of an earlier run are discarded.
    pub fn run(&mut self, kuratowski: bool) -> bool {
        self.embedding = None;
        self.kuratowski = None;

        let mut bm = BoyerMyrvold::new(self.graph);
        match bm.embed() {
            ControlFlow::Continue(()) => {
                self.embedding = Some(EmbeddingMap::from_successors(bm.flatten()));
                log::debug!(
                    "planar embedding found ({} nodes, {} edges)",
                    self.graph.node_count(),
                    self.graph.edge_count()
                );
                crate::debug_invariants!(self.validate_invariants(), "PlanarEmbedding::run");
                true
            }
            ControlFlow::Break(arc) => {
                log::debug!(
                    "graph is not planar ({} nodes, {} edges), blocked back arc {arc}",
                    self.graph.node_count(),
                    self.graph.edge_count()
                );
                if kuratowski {
                    self.kuratowski = Some(isolate(&mut bm, arc));
                }
                false
            }
        }
    }

    #[inline]
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// Successor of `arc` in the rotation at its source; `None` unless the
    /// last run succeeded.
    pub fn next(&self, arc: ArcId) -> Option<ArcId> {
        self.embedding.as_ref().map(|e| e.next(arc))
    }

    pub fn embedding_map(&self) -> Option<&EmbeddingMap> {
        self.embedding.as_ref()
    }

    pub fn into_embedding_map(self) -> Option<EmbeddingMap> {
        self.embedding
    }

    /// Whether `edge` is in the Kuratowski subdivision of the last run.
    pub fn kuratowski(&self, edge: EdgeId) -> bool {
        self.kuratowski.as_ref().is_some_and(|k| k.contains(edge))
    }

    pub fn kuratowski_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.kuratowski.iter().flat_map(|k| k.edges())
    }

    pub fn kuratowski_subdivision(&self) -> Option<&KuratowskiSubdivision> {
        self.kuratowski.as_ref()
    }

    pub fn kuratowski_minor(&self) -> Option<KuratowskiMinor> {
        self.kuratowski.as_ref().map(|k| k.minor)
    }
}

impl<G: Graph> DebugInvariants for PlanarEmbedding<'_, G> {
    fn validate_invariants(&self) -> Result<(), PlanarityError> {
        if let Some(embedding) = &self.embedding {
            embedding.validate(self.graph)?;
            embedding.check_euler(self.graph)?;
        }
        Ok(())
    }
}
