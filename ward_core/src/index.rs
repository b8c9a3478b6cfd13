//! Ordered index of discharged patients.
//!
//! An unbalanced binary search tree keyed by patient identifier. Nodes live in
//! an arena and refer to their children by slot number, so deep trees never
//! recurse on insert, lookup, traversal or drop.
//!
//! Keys smaller than a node go left, everything else (including equal keys)
//! goes right. Sequential identifiers therefore degrade the tree into a list
//! with O(n) depth; that is accepted for a single-session registry.

use crate::{PatientId, PatientRecord};

#[derive(Clone, Debug)]
struct Node {
    record: PatientRecord,
    left: Option<usize>,
    right: Option<usize>,
}

/// Binary search tree of discharged patients
#[derive(Clone, Debug, Default)]
pub struct OrderedIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert a record, routing equal identifiers to the right subtree
    pub fn insert(&mut self, record: PatientRecord) {
        let slot = self.nodes.len();
        let id = record.id;
        let mut depth = 0usize;

        let mut cursor = self.root;
        let mut parent: Option<(usize, bool)> = None;
        while let Some(current) = cursor {
            let go_left = id < self.nodes[current].record.id;
            parent = Some((current, go_left));
            cursor = if go_left {
                self.nodes[current].left
            } else {
                self.nodes[current].right
            };
            depth += 1;
        }

        self.nodes.push(Node {
            record,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(slot),
            Some((p, true)) => self.nodes[p].left = Some(slot),
            Some((p, false)) => self.nodes[p].right = Some(slot),
        }

        tracing::debug!("Indexed patient {} at depth {}", id, depth);
    }

    /// Find the first record with this identifier on the path from the root
    pub fn find_by_id(&self, id: PatientId) -> Option<&PatientRecord> {
        let mut cursor = self.root;
        while let Some(current) = cursor {
            let node = &self.nodes[current];
            if id == node.record.id {
                return Some(&node.record);
            }
            cursor = if id < node.record.id {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    /// Lazy in-order traversal, identifiers non-decreasing
    pub fn inorder(&self) -> Inorder<'_> {
        let mut iter = Inorder {
            index: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(usize, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((slot, level)) = pending.pop() {
            deepest = deepest.max(level);
            let node = &self.nodes[slot];
            pending.extend(node.left.map(|l| (l, level + 1)));
            pending.extend(node.right.map(|r| (r, level + 1)));
        }
        deepest
    }
}

/// In-order iterator over an [`OrderedIndex`]
pub struct Inorder<'a> {
    index: &'a OrderedIndex,
    stack: Vec<usize>,
}

impl<'a> Inorder<'a> {
    fn push_left_spine(&mut self, mut cursor: Option<usize>) {
        while let Some(slot) = cursor {
            self.stack.push(slot);
            cursor = self.index.nodes[slot].left;
        }
    }
}

impl<'a> Iterator for Inorder<'a> {
    type Item = &'a PatientRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.stack.pop()?;
        let index = self.index;
        let node = &index.nodes[slot];
        self.push_left_spine(node.right);
        Some(&node.record)
    }
}
