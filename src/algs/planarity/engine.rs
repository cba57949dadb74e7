//! Boyer–Myrvold embedding engine.
//!
//! Nodes are processed in descending DFS rank. For the node `v` at rank `i`
//! every tree child first gets its own two-cell component (a *bubble*).
//! Each back edge from a descendant `w` up to `v` is then walked up from `w`
//! along the external faces, recording at every component root it crosses
//! that the component must be merged into its parent. Finally the walk-down
//! starting from every pending root of `v` merges the recorded components
//! and splices the back edges into the rotations. A back edge that could not
//! be placed proves the graph non-planar.
//!
//! All state lives in index-based arenas sized once from the graph; no
//! recursion is used, so the engine runs in O(n + m) time and O(n + m)
//! memory regardless of DFS depth.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use super::child_list::ChildLists;
use super::face::{ArcLinks, Cell, ExternalFace};
use super::lowpoint::DfsForest;
use crate::topology::{ArcId, ArcMap, Graph, NodeId, NodeMap};

/// Two frames of the walk-down's merge stack, kept together: the face cell
/// where the walk entered a pending component, and that component's root.
#[derive(Clone, Copy, Debug)]
struct MergeStep {
    parent: Cell,
    parent_prev: bool,
    root: Cell,
    root_next: bool,
}

pub(crate) struct BoyerMyrvold<'g, G: Graph> {
    pub graph: &'g G,
    pub forest: DfsForest,
    pub children: ChildLists,
    pub face: ExternalFace,
    pub links: ArcLinks,
    /// Per node, DFS ranks of child components waiting to be merged into it.
    pub merge_roots: NodeMap<VecDeque<usize>>,
    /// Per node, the back arc from the current root that still has to reach it.
    pub embed_arc: NodeMap<Option<ArcId>>,
    /// Per node, whether its component was merged with reversed orientation.
    pub flip: NodeMap<bool>,
}

impl<'g, G: Graph> BoyerMyrvold<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        let forest = DfsForest::build(graph);
        let children = ChildLists::build(graph, &forest);
        BoyerMyrvold {
            graph,
            face: ExternalFace::new(forest.len()),
            forest,
            children,
            links: ArcLinks::new(graph),
            merge_roots: NodeMap::new(graph, VecDeque::new()),
            embed_arc: NodeMap::new(graph, None),
            flip: NodeMap::new(graph, false),
        }
    }

    #[inline]
    pub fn node_at(&self, rank: usize) -> NodeId {
        self.forest.order_list[rank]
    }

    #[inline]
    pub fn rank(&self, node: NodeId) -> usize {
        self.forest.order[node]
    }

    #[inline]
    pub fn cell(&self, node: NodeId) -> Cell {
        Cell::Real(self.rank(node))
    }

    /// Tree arc into `node`; only called for nodes that have a DFS parent.
    #[inline]
    pub fn tree_arc(&self, node: NodeId) -> ArcId {
        self.forest.pred[node].expect("non-root node has a tree arc")
    }

    /// External-face arc anchored at `cell`; set for every initialised cell.
    #[inline]
    pub fn first_arc(&self, cell: Cell) -> ArcId {
        self.face[cell].first.expect("initialised face cell has an anchor arc")
    }

    /// Process every node bottom-up. Breaks with the back arc that could not
    /// be embedded when the graph is not planar.
    pub fn embed(&mut self) -> ControlFlow<ArcId> {
        let graph = self.graph;
        for i in (0..self.forest.len()).rev() {
            let node = self.node_at(i);
            self.face[Cell::Real(i)].first = None;

            for arc in graph.out_arcs(node) {
                if self.forest.is_child_arc(graph, arc) {
                    self.init_face(graph.target(arc));
                }
            }

            for arc in graph.out_arcs(node) {
                if self.forest.is_descending_back_arc(graph, arc) {
                    let target = graph.target(arc);
                    self.embed_arc[target] = Some(arc);
                    self.walk_up(target, node, i);
                }
            }

            let roots = std::mem::take(&mut self.merge_roots[node]);
            for root in roots {
                self.walk_down(root, i);
            }

            for arc in graph.out_arcs(node) {
                if self.forest.is_descending_back_arc(graph, arc)
                    && self.embed_arc[graph.target(arc)].is_some()
                {
                    log::trace!("back arc {arc} from node {node} left unembedded");
                    return ControlFlow::Break(arc);
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Collapse the per-component rotations into one successor map.
    /// Only meaningful after [`embed`](Self::embed) completed.
    pub fn flatten(&mut self) -> ArcMap<ArcId> {
        let graph = self.graph;
        let mut embedding = ArcMap::from_vec(graph.arcs().collect());
        for i in 0..self.forest.len() {
            let node = self.node_at(i);
            self.merge_remaining_faces(node);
            self.store_embedding(node, &mut embedding);
        }
        embedding
    }

    fn init_face(&mut self, node: NodeId) {
        let arc = self.tree_arc(node);
        let rev = arc.opposite();
        let rank = self.rank(node);
        self.face.init_bubble(rank, arc, rev);
        self.links.isolate(arc);
        self.links.isolate(rev);
    }

    fn walk_up(&mut self, node: NodeId, root: NodeId, rorder: usize) {
        let start = self.cell(node);
        let (mut na, mut nb) = (start, start);
        let (mut da, mut db) = (true, false);

        loop {
            if self.face[na].visited == rorder || self.face[nb].visited == rorder {
                break;
            }
            self.face[na].visited = rorder;
            self.face[nb].visited = rorder;

            let reached = match (na, nb) {
                (Cell::Root(r), _) | (_, Cell::Root(r)) => Some(r),
                _ => None,
            };

            match reached {
                None => {
                    let next = if da { self.face[na].prev } else { self.face[na].next };
                    da = self.face[next].prev != na;
                    na = next;

                    let next = if db { self.face[nb].prev } else { self.face[nb].next };
                    db = self.face[next].prev != nb;
                    nb = next;
                }
                Some(r) => {
                    let rep = self.node_at(r);
                    let parent = self.graph.source(self.tree_arc(rep));
                    if self.forest.low[rep] < rorder {
                        self.merge_roots[parent].push_back(r);
                    } else {
                        self.merge_roots[parent].push_front(r);
                    }

                    if parent == root {
                        break;
                    }
                    na = self.cell(parent);
                    nb = na;
                    da = true;
                    db = false;
                }
            }
        }
    }

    fn walk_down(&mut self, r: usize, rorder: usize) {
        let rn = Cell::Root(r);
        let mut stack: Vec<MergeStep> = Vec::new();

        for rd in [true, false] {
            let mut pn = rn;
            let mut n = if rd { self.face[rn].next } else { self.face[rn].prev };

            while n != rn {
                let node = self.node_at(n.rank());

                if let Some(arc) = self.embed_arc[node] {
                    while let Some(step) = stack.pop() {
                        self.merge_component(step);
                    }

                    let d = self.face[n].entered_from_prev(pn);

                    let re = self.first_arc(rn);
                    self.links.insert_after(re, arc);
                    if !rd {
                        self.face[rn].first = Some(arc);
                    }

                    let rev = arc.opposite();
                    let e = self.first_arc(n);
                    self.links.insert_after(e, rev);
                    if d {
                        self.face[n].first = Some(rev);
                    }

                    self.face[rn].set_side(!rd, n);
                    self.face[n].set_side(d, rn);
                    pn = rn;

                    self.embed_arc[node] = None;
                    log::trace!("embedded back arc {arc} at node {node}");
                }

                if let Some(&child) = self.merge_roots[node].front() {
                    let d = self.face[n].entered_from_prev(pn);
                    let cn = Cell::Root(child);

                    let xn = self.face[cn].next;
                    let yn = self.face[cn].prev;
                    let xnode = self.node_at(xn.rank());
                    let ynode = self.node_at(yn.rank());

                    let root_next = if !self.external(xnode, rorder) {
                        true
                    } else if !self.external(ynode, rorder) {
                        false
                    } else {
                        self.pertinent(xnode)
                    };

                    stack.push(MergeStep {
                        parent: n,
                        parent_prev: d,
                        root: cn,
                        root_next,
                    });
                    pn = cn;
                    n = if root_next { xn } else { yn };
                } else if !self.external(node, rorder) {
                    // inactive node: short-circuit it out of the external face
                    let nn = self.face[n].other(pn);
                    let nd = n == self.face[nn].prev;
                    self.face[nn].set_side(nd, pn);
                    let pd = n == self.face[pn].prev;
                    self.face[pn].set_side(pd, nn);
                    self.face[nn].inverted = self.face[nn].is_pendant() && nd != rd;
                    n = nn;
                } else {
                    break;
                }
            }

            if !stack.is_empty() || n == rn {
                break;
            }
        }
    }

    fn merge_component(&mut self, step: MergeStep) {
        let MergeStep {
            parent: dn,
            parent_prev: dd,
            root: root_cell,
            root_next: cd,
        } = step;

        let parent = self.node_at(dn.rank());
        self.merge_roots[parent].pop_front();

        let child = self.node_at(root_cell.rank());
        self.children.remove(parent, child);

        let de = self.first_arc(dn);
        let mut ce = self.first_arc(root_cell);

        self.flip[child] = cd != dd;
        if cd != dd {
            ce = self.links.flip_at(ce);
        }
        self.links.splice(de, ce);
        if dd {
            self.face[dn].first = Some(ce);
        }

        let cn = if cd { self.face[root_cell].prev } else { self.face[root_cell].next };
        let mut cnext = self.face[cn].next == root_cell;
        if self.face[cn].is_pendant() && self.face[cn].inverted {
            cnext = !cnext;
        }
        self.face[cn].set_side(!cnext, dn);
        self.face[dn].set_side(dd, cn);
    }

    fn merge_remaining_faces(&mut self, node: NodeId) {
        let dn = self.cell(node);
        while let Some(child) = self.children.pop_first(node) {
            let ce = self.first_arc(Cell::Root(self.rank(child)));
            if let Some(de) = self.face[dn].first {
                self.links.splice(de, ce);
            }
            self.face[dn].first = Some(ce);
        }
    }

    fn store_embedding(&mut self, node: NodeId, embedding: &mut ArcMap<ArcId>) {
        let Some(first) = self.face[self.cell(node)].first else {
            return;
        };
        if let Some(parent) = self.forest.parent(self.graph, node) {
            self.flip[node] = self.flip[node] != self.flip[parent];
        }

        let mut prev = first;
        let mut arc = if self.flip[node] {
            self.links[prev].prev
        } else {
            self.links[prev].next
        };
        embedding[prev] = arc;

        while arc != first {
            let next = self.links.other(arc, prev);
            prev = arc;
            arc = next;
            embedding[prev] = arc;
        }
    }

    /// Some edge below `node` still escapes above rank `rorder`.
    pub fn external(&self, node: NodeId, rorder: usize) -> bool {
        if let Some(child) = self.children.first(node) {
            if self.forest.low[child] < rorder {
                return true;
            }
        }
        self.forest.ancestor[node] < rorder
    }

    /// A back edge or a pending component still needs to reach `node`.
    pub fn pertinent(&self, node: NodeId) -> bool {
        !self.merge_roots[node].is_empty() || self.embed_arc[node].is_some()
    }
}
