//! Five and six coloring of planar graphs.
//!
//! Both variants color nodes greedily in the reverse of a min-degree
//! elimination order: every planar graph has a node of degree at most five,
//! so each node sees at most five colored neighbors when its turn comes. The
//! five-color variant resolves the remaining case with a Kempe chain swap,
//! which needs the rotation system of a planar embedding.

mod bucket_queue;
mod palette;

pub use bucket_queue::BucketQueue;
pub use palette::{Color, Palette};

use std::collections::VecDeque;

use hashbrown::HashSet;

use crate::algs::planarity::{EmbeddingMap, PlanarEmbedding};
use crate::debug_invariants::DebugInvariants;
use crate::planarity_error::PlanarityError;
use crate::topology::{Graph, NodeId, NodeMap};

/// Coloring of a planar graph with at most five or six colors.
///
/// ```
/// use planar_embed::prelude::*;
///
/// let g = generators::octahedron();
/// let mut coloring = PlanarColoring::new(&g);
/// assert!(coloring.run_five_coloring());
/// for e in g.edges() {
///     let (u, v) = g.endpoints(e);
///     assert_ne!(coloring.color_index(u), coloring.color_index(v));
/// }
/// ```
#[derive(Debug)]
pub struct PlanarColoring<'a, G: Graph> {
    graph: &'a G,
    colors: NodeMap<Option<usize>>,
    palette: Palette,
    bound: usize,
}

impl<'a, G: Graph> PlanarColoring<'a, G> {
    /// The graph must be simple.
    pub fn new(graph: &'a G) -> Self {
        Self::with_palette(graph, Palette::default())
    }

    /// Like [`new`](Self::new), resolving color indices through `palette`.
    pub fn with_palette(graph: &'a G, palette: Palette) -> Self {
        PlanarColoring {
            graph,
            colors: NodeMap::new(graph, None),
            palette,
            bound: 0,
        }
    }

    #[inline]
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color index of `node` in `0..5` or `0..6`; `None` before a
    /// successful run.
    #[inline]
    pub fn color_index(&self, node: NodeId) -> Option<usize> {
        self.colors[node]
    }

    pub fn color_indices(&self) -> &NodeMap<Option<usize>> {
        &self.colors
    }

    /// Palette color of `node`, if it is colored and the palette is long
    /// enough.
    pub fn color(&self, node: NodeId) -> Option<Color> {
        self.colors[node].and_then(|c| self.palette.get(c))
    }

    /// Color with at most six colors in linear time.
    ///
    /// Succeeds on every planar graph. A non-planar graph may or may not be
    /// colored; planarity is not checked. On `false` no colors are kept.
    pub fn run_six_coloring(&mut self) -> bool {
        self.bound = 6;
        let order = self.elimination_order();
        self.colors.fill(None);

        for &node in order.iter().rev() {
            match self.first_free(node, 6) {
                Some(c) => self.colors[node] = Some(c),
                None => {
                    log::debug!("six coloring: no color left for node {node}");
                    self.colors.fill(None);
                    return false;
                }
            }
        }
        crate::debug_invariants!(self.validate_invariants(), "PlanarColoring::run_six_coloring");
        true
    }

    /// Embed the graph and color it with at most five colors; `false` if it
    /// is not planar.
    pub fn run_five_coloring(&mut self) -> bool {
        let mut pe = PlanarEmbedding::new(self.graph);
        let embedding = if pe.run(false) { pe.into_embedding_map() } else { None };
        let Some(embedding) = embedding else {
            self.colors.fill(None);
            return false;
        };
        self.five_color(&embedding);
        true
    }

    /// Color with at most five colors using a precomputed planar embedding.
    ///
    /// The map is checked to be a rotation system of this graph that
    /// satisfies Euler's formula. Worst case quadratic.
    pub fn run_five_coloring_with(&mut self, embedding: &EmbeddingMap) -> Result<(), PlanarityError> {
        embedding.validate(self.graph)?;
        embedding.check_euler(self.graph)?;
        self.five_color(embedding);
        Ok(())
    }

    fn five_color(&mut self, embedding: &EmbeddingMap) {
        self.bound = 5;
        let order = self.elimination_order();
        self.colors.fill(None);

        let mut swaps = 0usize;
        for &node in order.iter().rev() {
            match self.first_free(node, 5) {
                Some(c) => self.colors[node] = Some(c),
                None => {
                    self.kempe_recolor(node, embedding);
                    swaps += 1;
                }
            }
        }
        log::debug!(
            "five coloring: {} nodes, {swaps} Kempe swaps",
            self.graph.node_count()
        );
        crate::debug_invariants!(self.validate_invariants(), "PlanarColoring::run_five_coloring");
    }

    /// Nodes in the order they are removed when always removing one of
    /// smallest remaining degree.
    fn elimination_order(&self) -> Vec<NodeId> {
        let graph = self.graph;
        let mut queue = BucketQueue::new(graph);
        for n in graph.nodes() {
            queue.push(n, graph.degree(n));
        }
        let mut order = Vec::with_capacity(graph.node_count());
        while let Some(n) = queue.pop_min() {
            order.push(n);
            for e in graph.out_arcs(n) {
                let t = graph.target(e);
                if let Some(k) = queue.key(t) {
                    queue.decrease(t, k - 1);
                }
            }
        }
        order
    }

    fn first_free(&self, node: NodeId, bound: usize) -> Option<usize> {
        let mut forbidden = [false; 6];
        for e in self.graph.out_arcs(node) {
            if let Some(c) = self.colors[self.graph.target(e)] {
                forbidden[c] = true;
            }
        }
        (0..bound).find(|&c| !forbidden[c])
    }

    /// `node` sees all five colors. Its colored neighbors appear around it in
    /// five distinct colors, so of the chains through neighbors 0 and 2 or
    /// neighbors 1 and 3 (in rotation order) at least one is disconnected.
    fn kempe_recolor(&mut self, node: NodeId, embedding: &EmbeddingMap) {
        let graph = self.graph;
        let first = graph
            .first_out(node)
            .expect("a node without free colors has colored neighbors");
        let around: Vec<NodeId> = embedding
            .orbit(first)
            .map(|e| graph.target(e))
            .filter(|&t| self.colors[t].is_some())
            .take(4)
            .collect();

        let color = self.colors[around[0]];
        if self.swap_chain(around[0], around[2]) {
            self.colors[node] = color;
        } else {
            let color = self.colors[around[1]];
            self.swap_chain(around[1], around[3]);
            self.colors[node] = color;
        }
    }

    /// Exchange the colors of `u` and `v` along the two-colored component of
    /// `u`, unless that component also holds `v`.
    fn swap_chain(&mut self, u: NodeId, v: NodeId) -> bool {
        let graph = self.graph;
        let (Some(cu), Some(cv)) = (self.colors[u], self.colors[v]) else {
            return false;
        };

        let mut seen = HashSet::new();
        let mut comp = Vec::new();
        let mut queue = VecDeque::from([u]);
        seen.insert(u);
        while let Some(n) = queue.pop_front() {
            if n == v {
                return false;
            }
            comp.push(n);
            for e in graph.out_arcs(n) {
                let t = graph.target(e);
                let in_chain = matches!(self.colors[t], Some(c) if c == cu || c == cv);
                if in_chain && seen.insert(t) {
                    queue.push_back(t);
                }
            }
        }

        log::debug!("Kempe swap of colors {cu}/{cv} on {} nodes", comp.len());
        for n in comp {
            self.colors[n] = self.colors[n].map(|c| cu + cv - c);
        }
        true
    }
}

impl<G: Graph> DebugInvariants for PlanarColoring<'_, G> {
    /// Every node colored below the bound of the last run, adjacent nodes
    /// colored differently. Trivially true before any run.
    fn validate_invariants(&self) -> Result<(), PlanarityError> {
        if self.bound == 0 || self.colors.values().all(Option::is_none) {
            return Ok(());
        }
        for (node, c) in self.colors.iter() {
            match *c {
                None => return Err(PlanarityError::Uncolored(node.index())),
                Some(color) if color >= self.bound => {
                    return Err(PlanarityError::ColorOutOfRange {
                        node: node.index(),
                        color,
                        bound: self.bound,
                    });
                }
                Some(_) => {}
            }
        }
        for e in self.graph.edges() {
            let (u, v) = self.graph.endpoints(e);
            if let Some(c) = self.colors[u].filter(|&c| Some(c) == self.colors[v]) {
                return Err(PlanarityError::ColorConflict(u.index(), v.index(), c));
            }
        }
        Ok(())
    }
}
