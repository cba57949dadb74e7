//! Isolation of a Kuratowski subdivision after a failed walk-down.
//!
//! When the back arc `(v, w)` cannot be embedded, the component rooted at
//! `v` that should have received it is blocked on both sides of its external
//! face by externally active nodes `x` and `y`. The isolator orients that
//! component, classifies its boundary around the pertinent node `w`, and
//! then marks the edges of one of five configurations (minors A to E), each
//! of which is a subdivision of `K5` or `K3,3`.

use serde::{Deserialize, Serialize};

use super::engine::BoyerMyrvold;
use super::face::Cell;
use crate::topology::{ArcId, EdgeId, EdgeMap, Graph, NodeId, NodeMap};

/// Configuration that produced a Kuratowski subdivision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KuratowskiMinor {
    /// The blocking nodes `x` or `y` still have a pending child component;
    /// the witness is taken from the deepest such component.
    A,
    /// The pertinent node has a pending child component that is itself
    /// externally active.
    B,
    /// An internal path attaches above `x` or above `y`.
    C,
    /// An internal path and a disjoint pile path both cross the component.
    D,
    /// The remaining configurations, decided by lowpoint comparisons.
    E,
}

/// Edge set of a subdivided `K5` or `K3,3` together with the case that
/// isolated it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KuratowskiSubdivision {
    pub minor: KuratowskiMinor,
    pub edges: EdgeMap<bool>,
}

impl KuratowskiSubdivision {
    /// Whether `edge` belongs to the subdivision.
    #[inline]
    pub fn contains(&self, edge: EdgeId) -> bool {
        self.edges.get(edge).copied().unwrap_or(false)
    }

    /// Member edges in index order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.marked()
    }

    /// Number of member edges.
    pub fn len(&self) -> usize {
        self.edges.marked().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-node classification used while isolating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Discovered,
    Component,
    InternalVisited,
    PileVisited,
    HighX,
    LowX,
    HighY,
    LowY,
    Root,
    Pertinent,
    Internal,
}

/// Boundary nodes of the blocked component.
#[derive(Clone, Copy, Debug)]
struct Corners {
    root: NodeId,
    x: NodeId,
    y: NodeId,
}

struct Isolator<'a, 'g, G: Graph> {
    bm: &'a mut BoyerMyrvold<'g, G>,
    rorder: usize,
    marks: NodeMap<Mark>,
    witness: EdgeMap<bool>,
}

/// Mark a Kuratowski subdivision proving that `arc` cannot be embedded.
pub(crate) fn isolate<G: Graph>(bm: &mut BoyerMyrvold<'_, G>, arc: ArcId) -> KuratowskiSubdivision {
    let graph = bm.graph;
    let mut iso = Isolator {
        rorder: bm.rank(graph.source(arc)),
        marks: NodeMap::new(graph, Mark::Unvisited),
        witness: EdgeMap::new(graph, false),
        bm,
    };
    let minor = iso.run(arc);
    log::debug!(
        "isolated Kuratowski minor {minor:?} with {} edges",
        iso.witness.marked().count()
    );
    KuratowskiSubdivision {
        minor,
        edges: iso.witness,
    }
}

impl<'g, G: Graph> Isolator<'_, 'g, G> {
    fn run(&mut self, arc: ArcId) -> KuratowskiMinor {
        let graph = self.bm.graph;
        let source = graph.source(arc);

        let mut root = source;
        let mut rn = self.find_component_root(root, graph.target(arc));
        let (mut x, mut y) = self.face_ends(rn);

        loop {
            let pending = self.bm.merge_roots[x]
                .front()
                .map(|&r| (x, r))
                .or_else(|| self.bm.merge_roots[y].front().map(|&r| (y, r)));
            let Some((node, r)) = pending else { break };
            root = node;
            rn = Cell::Root(r);
            (x, y) = self.face_ends(rn);
        }

        self.orient_component(root, rn);
        let corners = Corners { root, x, y };

        if root != source {
            self.minor_a(corners);
            return KuratowskiMinor::A;
        }

        let w = self.find_pertinent(y);
        self.set_face_flags(corners, w);

        if self.minor_b(corners, w) {
            return KuratowskiMinor::B;
        }

        let ipath = self.find_internal_path(w, root);
        for &a in ipath.iter().skip(1) {
            self.marks[graph.source(a)] = Mark::Internal;
        }
        let py = graph.source(*ipath.first().expect("blocked component has an internal path"));
        let px = graph.target(*ipath.last().expect("blocked component has an internal path"));
        let w = self.find_pertinent(py);

        if self.minor_c(corners, w, &ipath, px, py) {
            return KuratowskiMinor::C;
        }

        let ppath = self.find_pile_path(root);
        if !ppath.is_empty() {
            self.mark_face_path(y, x);
            self.mark_pertinent_path(w);
            self.mark_path(&ppath);
            self.mark_path(&ipath);
            self.close_corners(corners);
            return KuratowskiMinor::D;
        }

        self.minor_e(corners, w, &ipath, px, py);
        KuratowskiMinor::E
    }

    fn minor_a(&mut self, c: Corners) {
        self.mark_face_path(c.root, c.root);
        self.close_corners(c);
        let lw = self.find_pertinent(c.y);
        self.mark_pertinent_path(lw);
    }

    fn minor_b(&mut self, c: Corners, w: NodeId) -> bool {
        let Some(&cn) = self.bm.merge_roots[w].back() else {
            return false;
        };
        let rep = self.bm.node_at(cn);
        if self.bm.forest.low[rep] >= self.rorder {
            return false;
        }

        self.mark_face_path(c.root, c.root);
        let xlp = self.mark_external_path(c.x);
        let ylp = self.mark_external_path(c.y);
        let (lw, lz) = self.mark_common_path(w);
        self.mark_pertinent_path(lw);
        let zlp = self.mark_external_path(lz);

        let lo = xlp.min(ylp).min(zlp);
        let hi = xlp.max(ylp).max(zlp);
        self.mark_pred_path(self.bm.node_at(hi), self.bm.node_at(lo));
        true
    }

    fn minor_c(&mut self, c: Corners, w: NodeId, ipath: &[ArcId], px: NodeId, py: NodeId) -> bool {
        let high_y = self.marks[py] == Mark::HighY;
        let high_x = self.marks[px] == Mark::HighX;
        if high_y {
            if high_x {
                self.mark_face_path(c.x, px);
            }
            self.mark_face_path(c.root, c.x);
        } else if high_x {
            self.mark_face_path(c.y, c.root);
        } else {
            return false;
        }
        self.mark_pertinent_path(w);
        self.mark_path(ipath);
        self.close_corners(c);
        true
    }

    fn minor_e(&mut self, c: Corners, w: NodeId, ipath: &[ArcId], px: NodeId, py: NodeId) {
        if !self.bm.external(w, self.rorder) {
            let z = self.find_external(py);
            let (side, other) = if self.marks[z] == Mark::LowY {
                self.mark_face_path(c.root, c.x);
                (c.x, z)
            } else {
                self.mark_face_path(c.y, c.root);
                (c.y, z)
            };
            self.mark_pertinent_path(w);
            self.mark_path(ipath);
            let slp = self.mark_external_path(side);
            let olp = self.mark_external_path(other);
            self.mark_pred_path(c.root, self.bm.node_at(slp.min(olp)));
            return;
        }

        let xlp = self.mark_external_path(c.x);
        let ylp = self.mark_external_path(c.y);
        let wlp = self.mark_external_path(w);

        if wlp > xlp && wlp > ylp {
            self.mark_face_path(c.root, c.root);
            self.mark_pred_path(c.root, self.bm.node_at(xlp.min(ylp)));
            return;
        }

        self.mark_path(ipath);
        self.mark_pertinent_path(w);

        if xlp > ylp && xlp > wlp {
            self.mark_face_path(c.root, py);
            self.mark_face_path(w, c.x);
            self.mark_pred_path(c.root, self.bm.node_at(ylp.min(wlp)));
            return;
        }

        if ylp > xlp && ylp > wlp {
            self.mark_face_path(px, c.root);
            self.mark_face_path(c.y, w);
            self.mark_pred_path(c.root, self.bm.node_at(xlp.min(wlp)));
            return;
        }

        let lo = xlp.min(ylp).min(wlp);
        let hi = xlp.max(ylp).max(wlp);
        if py != c.y {
            self.mark_face_path(px, w);
            self.mark_pred_path(self.bm.node_at(hi), self.bm.node_at(lo));
        } else if px != c.x {
            self.mark_face_path(w, py);
            self.mark_pred_path(self.bm.node_at(hi), self.bm.node_at(lo));
        } else {
            self.mark_face_path(c.root, c.root);
            self.mark_pred_path(c.root, self.bm.node_at(lo));
        }
    }

    /// External paths from `x` and `y`, joined to the root through the tree.
    fn close_corners(&mut self, c: Corners) {
        let xlp = self.mark_external_path(c.x);
        let ylp = self.mark_external_path(c.y);
        self.mark_pred_path(c.root, self.bm.node_at(xlp.min(ylp)));
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    fn face_ends(&self, rn: Cell) -> (NodeId, NodeId) {
        let cell = &self.bm.face[rn];
        (self.bm.node_at(cell.next.rank()), self.bm.node_at(cell.prev.rank()))
    }

    /// Next node along the external face from `node`.
    fn face_step(&self, node: NodeId) -> NodeId {
        self.bm.graph.target(self.bm.first_arc(self.bm.cell(node)))
    }

    /// Face arc leaving `node` that does not lead back to `pred`.
    fn step_avoiding(&self, node: NodeId, pred: Option<NodeId>) -> ArcId {
        let arc = self.bm.first_arc(self.bm.cell(node));
        if Some(self.bm.graph.target(arc)) == pred {
            self.bm.links[arc].next
        } else {
            arc
        }
    }

    /// Component root of `root` on the tree path down to `node`: the child
    /// with the highest rank not exceeding `node`.
    fn find_component_root(&self, root: NodeId, node: NodeId) -> Cell {
        let mut order = self.bm.rank(root);
        let norder = self.bm.rank(node);
        for child in self.bm.children.children(root) {
            let c = self.bm.rank(child);
            if c > order && c < norder {
                order = c;
            }
        }
        Cell::Root(order)
    }

    fn find_pertinent(&self, node: NodeId) -> NodeId {
        let mut w = self.face_step(node);
        while !self.bm.pertinent(w) {
            w = self.face_step(w);
        }
        w
    }

    fn find_external(&self, node: NodeId) -> NodeId {
        let mut w = self.face_step(node);
        while !self.bm.external(w, self.rorder) {
            w = self.face_step(w);
        }
        w
    }

    fn low_point(&self, node: NodeId) -> usize {
        let forest = &self.bm.forest;
        let lp = match self.bm.children.first(node) {
            Some(child) => forest.low[child],
            None => forest.order[node],
        };
        lp.min(forest.ancestor[node])
    }

    // -------------------------------------------------------------------------
    // Component preparation
    // -------------------------------------------------------------------------

    /// Give every rotation in the component of `root` the same orientation
    /// by resolving the pending flips top-down.
    fn orient_component(&mut self, root: NodeId, rn: Cell) {
        let graph = self.bm.graph;
        let root_cell = self.bm.cell(root);
        self.bm.face[root_cell].first = self.bm.face[rn].first;
        self.marks[root] = Mark::Discovered;

        let mut stack = vec![root];
        let mut queue = Vec::new();
        while let Some(node) = stack.pop() {
            queue.push(node);

            let last = self.bm.first_arc(self.bm.cell(node));
            self.discover(graph.target(last), &mut stack);
            let mut pred = last;
            let mut arc = self.bm.links[last].next;
            while arc != last {
                self.discover(graph.target(arc), &mut stack);
                let link = self.bm.links[arc];
                let next = if link.next != pred { link.next } else { link.prev };
                pred = arc;
                arc = next;
            }
        }

        self.marks[root] = Mark::Component;
        self.bm.flip[root] = false;

        for &start in queue.iter().skip(1) {
            let mut node = start;
            while self.marks[node] != Mark::Component {
                stack.push(node);
                self.marks[node] = Mark::Component;
                node = graph.source(self.bm.tree_arc(node));
            }

            let mut flip = self.bm.flip[node];
            while let Some(node) = stack.pop() {
                flip = flip != self.bm.flip[node];
                self.bm.flip[node] = flip;
                if flip {
                    let cell = self.bm.cell(node);
                    let anchor = self.bm.links.flip_at(self.bm.first_arc(cell));
                    self.bm.face[cell].first = Some(anchor);
                }
            }
        }

        for &node in &queue {
            let first = self.bm.first_arc(self.bm.cell(node));
            self.bm.links.normalize(first);
        }
    }

    fn discover(&mut self, node: NodeId, stack: &mut Vec<NodeId>) {
        if self.marks[node] == Mark::Unvisited {
            self.marks[node] = Mark::Discovered;
            stack.push(node);
        }
    }

    fn set_face_flags(&mut self, c: Corners, w: NodeId) {
        let mut node = self.face_step(c.root);
        while node != c.y {
            self.marks[node] = Mark::HighY;
            node = self.face_step(node);
        }
        while node != w {
            self.marks[node] = Mark::LowY;
            node = self.face_step(node);
        }

        node = self.face_step(w);
        while node != c.x {
            self.marks[node] = Mark::LowX;
            node = self.face_step(node);
        }
        self.marks[node] = Mark::LowX;

        node = self.face_step(c.x);
        while node != c.root {
            self.marks[node] = Mark::HighX;
            node = self.face_step(node);
        }

        self.marks[w] = Mark::Pertinent;
        self.marks[c.root] = Mark::Root;
    }

    /// Path from the lower `y` side through the interior to the `x` side.
    fn find_internal_path(&mut self, w: NodeId, root: NodeId) -> Vec<ArcId> {
        let graph = self.bm.graph;
        let mut stack = Vec::new();

        let mut node = w;
        while node != root {
            let arc = self.bm.links[self.bm.first_arc(self.bm.cell(node))].next;
            stack.push(arc);
            node = graph.target(arc);
        }

        while let Some(&arc) = stack.last() {
            let t = graph.target(arc);
            match self.marks[t] {
                Mark::LowX | Mark::HighX => break,
                Mark::Component => {
                    self.marks[t] = Mark::InternalVisited;
                    stack.push(self.bm.links[arc.opposite()].next);
                }
                _ => {
                    stack.pop();
                    let next = self.backtrack(&mut stack, arc);
                    stack.push(next);
                }
            }
        }

        let start = stack
            .iter()
            .position(|&a| !matches!(self.marks[graph.target(a)], Mark::LowY | Mark::HighY))
            .unwrap_or(stack.len());
        stack.split_off(start)
    }

    /// Second path between the internal path and the root, disjoint from it.
    fn find_pile_path(&mut self, root: NodeId) -> Vec<ArcId> {
        let graph = self.bm.graph;
        let first = self.bm.first_arc(self.bm.cell(root));
        let mut stack = vec![first.opposite(), first];

        while stack.len() > 1 {
            let arc = stack[stack.len() - 1];
            let t = graph.target(arc);
            match self.marks[t] {
                Mark::Internal => break,
                Mark::InternalVisited => {
                    self.marks[t] = Mark::PileVisited;
                    stack.push(self.bm.links[arc.opposite()].next);
                }
                _ => {
                    stack.pop();
                    let next = self.backtrack(&mut stack, arc);
                    stack.push(next);
                }
            }
        }
        stack.split_off(1)
    }

    /// Rotate past `arc`, unwinding every stack entry the rotation returns to.
    fn backtrack(&self, stack: &mut Vec<ArcId>, arc: ArcId) -> ArcId {
        let mut arc = self.bm.links[arc].next;
        while let Some(&top) = stack.last() {
            if top != arc.opposite() {
                break;
            }
            stack.pop();
            arc = self.bm.links[top].next;
        }
        arc
    }

    // -------------------------------------------------------------------------
    // Marking
    // -------------------------------------------------------------------------

    #[inline]
    fn mark(&mut self, arc: ArcId) {
        self.witness[arc.edge()] = true;
    }

    fn mark_path(&mut self, path: &[ArcId]) {
        for &arc in path {
            self.mark(arc);
        }
    }

    /// Mark the tree path and back edge from `node` up to its lowpoint.
    /// Returns the lowpoint rank.
    fn mark_external_path(&mut self, node: NodeId) -> usize {
        let graph = self.bm.graph;
        let lp = self.low_point(node);
        let mut node = node;

        if self.bm.forest.ancestor[node] != lp {
            node = self.bm.children.first(node).expect("lowpoint below ancestor comes from a child");
            self.mark(self.bm.tree_arc(node));

            while self.bm.forest.ancestor[node] != lp {
                let forest = &self.bm.forest;
                let arc = graph
                    .out_arcs(node)
                    .find(|&a| {
                        let t = graph.target(a);
                        forest.order[t] > forest.order[node] && forest.low[t] == lp
                    })
                    .expect("lowpoint is realised by a descendant");
                self.mark(arc);
                node = graph.target(arc);
            }
        }

        let back = graph.out_arcs(node).find(|&a| self.bm.rank(graph.target(a)) == lp);
        if let Some(arc) = back {
            self.mark(arc);
        }
        lp
    }

    /// Mark the path from `node` down through pending components to the
    /// node that the failed back arc should have reached.
    fn mark_pertinent_path(&mut self, node: NodeId) {
        let graph = self.bm.graph;
        let mut node = node;
        while self.bm.embed_arc[node].is_none() {
            let r = *self.bm.merge_roots[node]
                .front()
                .expect("pertinent node without back arc has a pending component");
            let arc = self.bm.first_arc(Cell::Root(r));
            self.mark(arc);

            let mut pred = node;
            node = graph.target(arc);
            while !self.bm.pertinent(node) {
                let arc = self.step_avoiding(node, Some(pred));
                self.mark(arc);
                pred = node;
                node = graph.target(arc);
            }
        }
        if let Some(arc) = self.bm.embed_arc[node] {
            self.mark(arc);
        }
    }

    /// Mark the tree path from `node` up to its ancestor `top`.
    fn mark_pred_path(&mut self, node: NodeId, top: NodeId) {
        let mut node = node;
        while node != top {
            let arc = self.bm.tree_arc(node);
            self.mark(arc);
            node = self.bm.graph.source(arc);
        }
    }

    /// Mark the external face from `from` to `to` (a full turn when equal).
    fn mark_face_path(&mut self, from: NodeId, to: NodeId) {
        let graph = self.bm.graph;
        let mut arc = self.bm.first_arc(self.bm.cell(from));
        let mut node = graph.target(arc);
        self.mark(arc);
        while node != to {
            arc = self.bm.first_arc(self.bm.cell(node));
            self.mark(arc);
            node = graph.target(arc);
        }
    }

    /// Follow the common path below `w` until it splits into a pertinent and
    /// an external branch; returns the split nodes `(pertinent, external)`.
    fn mark_common_path(&mut self, w: NodeId) -> (NodeId, NodeId) {
        let graph = self.bm.graph;
        let mut node = w;
        let mut pred = None;

        loop {
            let pert = self.bm.pertinent(node);
            let ext = self.bm.external(node, self.rorder);

            if pert && ext {
                if let Some(&cn) = self.bm.merge_roots[node].back() {
                    if self.bm.forest.low[self.bm.node_at(cn)] < self.rorder {
                        let arc = self.bm.first_arc(Cell::Root(cn));
                        self.mark(arc);
                        pred = Some(node);
                        node = graph.target(arc);
                        continue;
                    }
                }
                return (node, node);
            }

            if pert {
                let wnode = node;
                while !self.bm.external(node, self.rorder) {
                    let arc = self.step_avoiding(node, pred);
                    self.mark(arc);
                    pred = Some(node);
                    node = graph.target(arc);
                }
                return (wnode, node);
            }

            if ext {
                let znode = node;
                while !self.bm.pertinent(node) {
                    let arc = self.step_avoiding(node, pred);
                    self.mark(arc);
                    pred = Some(node);
                    node = graph.target(arc);
                }
                return (node, znode);
            }

            let arc = self.step_avoiding(node, pred);
            self.mark(arc);
            pred = Some(node);
            node = graph.target(arc);
        }
    }
}
