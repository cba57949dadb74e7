//! Monotone bucket priority queue over nodes with small integer keys.
//!
//! Buckets are intrusive doubly linked lists threaded through per-node
//! `prev`/`next` slots, so `push`, `decrease` and removal are O(1). The
//! minimum pointer only moves down on `push`/`decrease`, which makes a full
//! drain cost O(n + max key) when keys are only ever decreased by one.

use crate::topology::{Graph, NodeId, NodeMap};

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    key: usize,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    queued: bool,
}

#[derive(Clone, Debug)]
pub struct BucketQueue {
    slots: NodeMap<Slot>,
    heads: Vec<Option<NodeId>>,
    minimum: usize,
    len: usize,
}

impl BucketQueue {
    /// An empty queue able to hold every node of `graph`.
    pub fn new<G: Graph>(graph: &G) -> Self {
        BucketQueue {
            slots: NodeMap::new(graph, Slot::default()),
            heads: Vec::new(),
            minimum: 0,
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.slots[node].queued
    }

    /// Current key of a queued node.
    pub fn key(&self, node: NodeId) -> Option<usize> {
        let slot = self.slots[node];
        slot.queued.then_some(slot.key)
    }

    /// Insert `node` with `key`; a queued node is moved to the new key.
    pub fn push(&mut self, node: NodeId, key: usize) {
        if self.slots[node].queued {
            self.unlink(node);
        } else {
            self.len += 1;
        }
        self.link(node, key);
    }

    /// Lower the key of a queued node. Does nothing for absent nodes or
    /// larger keys.
    pub fn decrease(&mut self, node: NodeId, key: usize) {
        let slot = self.slots[node];
        if slot.queued && key < slot.key {
            self.unlink(node);
            self.link(node, key);
        }
    }

    /// Remove and return a node with the smallest key.
    pub fn pop_min(&mut self) -> Option<NodeId> {
        if self.len == 0 {
            return None;
        }
        while self.heads[self.minimum].is_none() {
            self.minimum += 1;
        }
        let node = self.heads[self.minimum]?;
        self.unlink(node);
        self.slots[node].queued = false;
        self.len -= 1;
        Some(node)
    }

    fn link(&mut self, node: NodeId, key: usize) {
        if self.heads.len() <= key {
            self.heads.resize(key + 1, None);
        }
        let head = self.heads[key];
        if let Some(h) = head {
            self.slots[h].prev = Some(node);
        }
        self.slots[node] = Slot {
            key,
            prev: None,
            next: head,
            queued: true,
        };
        self.heads[key] = Some(node);
        if key < self.minimum || self.len == 1 {
            self.minimum = key;
        }
    }

    fn unlink(&mut self, node: NodeId) {
        let Slot { key, prev, next, .. } = self.slots[node];
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.heads[key] = next,
        }
        if let Some(n) = next {
            self.slots[n].prev = prev;
        }
    }
}
