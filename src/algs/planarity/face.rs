//! Arena of external-face cells and per-arc rotation links.
//!
//! Every DFS rank `i` owns two cells: the real node at rank `i` and the
//! virtual root of the component hanging below it, which stands in for the
//! parent of `order_list[i]` until the component is merged. A [`Cell`] names
//! one of them; both vectors are indexed by rank.

use std::ops::{Index, IndexMut};

use crate::topology::{ArcId, ArcMap, Graph};

/// Handle into the external-face arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Cell {
    /// The node with this DFS rank.
    Real(usize),
    /// Virtual root of the component whose topmost node has this DFS rank.
    Root(usize),
}

impl Cell {
    /// DFS rank behind the cell; for a root, the rank of the component's child.
    #[inline]
    pub fn rank(self) -> usize {
        match self {
            Cell::Real(i) | Cell::Root(i) => i,
        }
    }
}

/// One element of the circular external-face lists.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FaceCell {
    pub prev: Cell,
    pub next: Cell,
    /// Rank of the walk-up that last passed through the cell.
    pub visited: usize,
    /// An arc of the cell's rotation that lies on the external face.
    pub first: Option<ArcId>,
    /// Local `prev`/`next` sense flipped by a merge while the cell had a
    /// single neighbor.
    pub inverted: bool,
}

impl FaceCell {
    fn detached(cell: Cell, n: usize) -> Self {
        FaceCell {
            prev: cell,
            next: cell,
            visited: n,
            first: None,
            inverted: false,
        }
    }

    /// The cell's two face neighbors coincide.
    #[inline]
    pub fn is_pendant(&self) -> bool {
        self.prev == self.next
    }

    /// Neighbor on the side opposite to `from`.
    #[inline]
    pub fn other(&self, from: Cell) -> Cell {
        if self.next != from { self.next } else { self.prev }
    }

    /// Whether the walk arriving from `from` leaves through `next`, taking
    /// a pending inversion into account.
    #[inline]
    pub fn entered_from_prev(&self, from: Cell) -> bool {
        let d = from == self.prev;
        if self.is_pendant() && self.inverted { !d } else { d }
    }

    #[inline]
    pub fn set_side(&mut self, prev_side: bool, cell: Cell) {
        if prev_side {
            self.prev = cell;
        } else {
            self.next = cell;
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ExternalFace {
    real: Vec<FaceCell>,
    root: Vec<FaceCell>,
}

impl ExternalFace {
    pub fn new(n: usize) -> Self {
        ExternalFace {
            real: (0..n).map(|i| FaceCell::detached(Cell::Real(i), n)).collect(),
            root: (0..n).map(|i| FaceCell::detached(Cell::Root(i), n)).collect(),
        }
    }

    /// Open the two-cell face between rank `i` and its virtual root.
    pub fn init_bubble(&mut self, i: usize, root_arc: ArcId, child_arc: ArcId) {
        let n = self.real.len();
        self.real[i] = FaceCell {
            prev: Cell::Root(i),
            next: Cell::Root(i),
            visited: n,
            first: Some(child_arc),
            inverted: false,
        };
        self.root[i] = FaceCell {
            prev: Cell::Real(i),
            next: Cell::Real(i),
            visited: n,
            first: Some(root_arc),
            inverted: false,
        };
    }
}

impl Index<Cell> for ExternalFace {
    type Output = FaceCell;

    #[inline]
    fn index(&self, cell: Cell) -> &FaceCell {
        match cell {
            Cell::Real(i) => &self.real[i],
            Cell::Root(i) => &self.root[i],
        }
    }
}

impl IndexMut<Cell> for ExternalFace {
    #[inline]
    fn index_mut(&mut self, cell: Cell) -> &mut FaceCell {
        match cell {
            Cell::Real(i) => &mut self.real[i],
            Cell::Root(i) => &mut self.root[i],
        }
    }
}

/// Doubly linked rotation fragment around a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ArcLink {
    pub prev: ArcId,
    pub next: ArcId,
}

/// Rotation fragments for every arc, initially singletons.
#[derive(Debug, Clone)]
pub(crate) struct ArcLinks(ArcMap<ArcLink>);

impl ArcLinks {
    pub fn new<G: Graph>(graph: &G) -> Self {
        ArcLinks(ArcMap::from_vec(
            graph.arcs().map(|a| ArcLink { prev: a, next: a }).collect(),
        ))
    }

    /// Reset `arc` to a one-arc fragment.
    #[inline]
    pub fn isolate(&mut self, arc: ArcId) {
        self.0[arc] = ArcLink { prev: arc, next: arc };
    }

    /// Reverse the orientation of the fragment at `arc`'s position and
    /// return the arc that becomes its new anchor.
    pub fn flip_at(&mut self, arc: ArcId) -> ArcId {
        let link = &mut self.0[arc];
        std::mem::swap(&mut link.prev, &mut link.next);
        let anchor = link.prev;
        let link = &mut self.0[anchor];
        std::mem::swap(&mut link.prev, &mut link.next);
        anchor
    }

    /// Join two fragments after `a` and `b` respectively.
    pub fn splice(&mut self, a: ArcId, b: ArcId) {
        let an = self.0[a].next;
        let bn = self.0[b].next;
        self.0[a].next = bn;
        self.0[b].next = an;
        self.0[an].prev = b;
        self.0[bn].prev = a;
    }

    /// Insert the detached `arc` right after `at`.
    pub fn insert_after(&mut self, at: ArcId, arc: ArcId) {
        let next = self.0[at].next;
        self.0[next].prev = arc;
        self.0[arc] = ArcLink { prev: at, next };
        self.0[at].next = arc;
    }

    /// Neighbor of `arc` on the side opposite to `from`.
    #[inline]
    pub fn other(&self, arc: ArcId, from: ArcId) -> ArcId {
        let link = self.0[arc];
        if link.prev == from { link.next } else { link.prev }
    }

    /// Make every link of the fragment through `start` point the same way.
    pub fn normalize(&mut self, start: ArcId) {
        let mut pred = start;
        let mut arc = self.0[start].next;
        while arc != start {
            if self.0[arc].next == pred {
                let link = &mut self.0[arc];
                std::mem::swap(&mut link.prev, &mut link.next);
            }
            pred = arc;
            arc = self.0[arc].next;
        }
    }
}

impl Index<ArcId> for ArcLinks {
    type Output = ArcLink;

    #[inline]
    fn index(&self, arc: ArcId) -> &ArcLink {
        &self.0[arc]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::generators;

    #[test]
    fn bubble_links_real_and_root() {
        let mut face = ExternalFace::new(3);
        let a = ArcId::from_index(0);
        face.init_bubble(1, a, a.opposite());
        assert_eq!(face[Cell::Real(1)].next, Cell::Root(1));
        assert_eq!(face[Cell::Root(1)].prev, Cell::Real(1));
        assert!(face[Cell::Root(1)].is_pendant());
        assert_eq!(face[Cell::Root(1)].first, Some(a));
        assert_eq!(face[Cell::Real(0)].first, None);
    }

    #[test]
    fn inverted_pendant_swaps_direction() {
        let mut face = ExternalFace::new(2);
        let a = ArcId::from_index(0);
        face.init_bubble(1, a, a.opposite());
        let cell = face[Cell::Real(1)];
        assert!(cell.entered_from_prev(Cell::Root(1)));
        face[Cell::Real(1)].inverted = true;
        assert!(!face[Cell::Real(1)].entered_from_prev(Cell::Root(1)));
    }

    #[test]
    fn splice_merges_fragments() {
        let g = generators::star(3);
        let arcs: Vec<_> = g.arcs().collect();
        let mut links = ArcLinks::new(&g);
        links.splice(arcs[0], arcs[2]);
        links.insert_after(arcs[2], arcs[4]);
        // cycle 0 -> 4 -> 2 -> 0 after insertion behind 2
        assert_eq!(links[arcs[0]].next, arcs[2]);
        assert_eq!(links[arcs[2]].next, arcs[4]);
        assert_eq!(links[arcs[4]].next, arcs[0]);
        assert_eq!(links[arcs[0]].prev, arcs[4]);
        assert_eq!(links.other(arcs[2], arcs[0]), arcs[4]);
    }

    #[test]
    fn flip_then_normalize_restores_direction() {
        let g = generators::star(3);
        let arcs: Vec<_> = g.arcs().collect();
        let mut links = ArcLinks::new(&g);
        links.splice(arcs[0], arcs[2]);
        links.splice(arcs[2], arcs[4]);
        let anchor = links.flip_at(arcs[0]);
        links.normalize(anchor);
        let mut seen = vec![anchor];
        let mut a = links[anchor].next;
        while a != anchor {
            seen.push(a);
            a = links[a].next;
        }
        assert_eq!(seen.len(), 3);
    }
}
