use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::NodeId;
use crate::search::FloatOrd;

/// Index of a label inside a [`LabelArena`].
pub(crate) type LabelId = usize;

/// Partial `source → node` path discovered during a search.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub(crate) node: NodeId,
    pub(crate) length: f64,
    /// `length` plus the exact remaining distance to the target.
    pub(crate) lower_bound: f64,
    pub(crate) parent: Option<LabelId>,
    /// Shared length with accepted path `j`. Slots past the end are zero.
    pub(crate) overlaps: Vec<f64>,
    /// Number of accepted paths already folded into `overlaps`.
    pub(crate) validated: usize,
}

impl Label {
    pub(crate) fn root(node: NodeId, lower_bound: f64, slots: usize, validated: usize) -> Self {
        Self {
            node,
            length: 0.0,
            lower_bound,
            parent: None,
            overlaps: vec![0.0; slots],
            validated,
        }
    }

    /// Smallest overlap among the accepted paths this label has been checked
    /// against; zero before any check.
    fn min_overlap(&self) -> f64 {
        (0..self.validated)
            .map(|index| self.overlaps.get(index).copied().unwrap_or(0.0))
            .reduce(f64::min)
            .unwrap_or(0.0)
    }
}

/// Append-only label storage. Parents are referenced by index, so a label
/// stays reachable for as long as the arena lives.
#[derive(Debug, Default)]
pub(crate) struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub(crate) fn push(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        self.labels.len() - 1
    }

    pub(crate) fn get(&self, id: LabelId) -> &Label {
        &self.labels[id]
    }

    pub(crate) fn get_mut(&mut self, id: LabelId) -> &mut Label {
        &mut self.labels[id]
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }

    /// Nodes from the root label down to `id`, in travel order.
    pub(crate) fn trace(&self, id: LabelId) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.chain(id).map(|label| label.node).collect();
        nodes.reverse();
        nodes
    }

    /// Whether `node` already occurs on the chain ending at `id`.
    pub(crate) fn chain_contains(&self, id: LabelId, node: NodeId) -> bool {
        self.chain(id).any(|label| label.node == node)
    }

    fn chain(&self, id: LabelId) -> impl Iterator<Item = &Label> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let label = self.labels.get(next?)?;
            next = label.parent;
            Some(label)
        })
    }
}

/// Priority of a queued label: lower bound first, then the smallest overlap
/// component, then insertion order.
pub(crate) fn frontier_order(a: &FrontierEntry, b: &FrontierEntry) -> Ordering {
    a.lower_bound
        .cmp(&b.lower_bound)
        .then_with(|| a.min_overlap.cmp(&b.min_overlap))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    label: LabelId,
    lower_bound: FloatOrd,
    min_overlap: FloatOrd,
    sequence: u64,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; flip so the best entry pops first.
        frontier_order(other, self)
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-priority queue of label ids keyed by [`frontier_order`].
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    sequence: u64,
}

impl Frontier {
    pub(crate) fn push(&mut self, id: LabelId, label: &Label) {
        self.heap.push(FrontierEntry {
            label: id,
            lower_bound: FloatOrd(label.lower_bound),
            min_overlap: FloatOrd(label.min_overlap()),
            sequence: self.sequence,
        });
        self.sequence += 1;
    }

    pub(crate) fn pop(&mut self) -> Option<LabelId> {
        self.heap.pop().map(|entry| entry.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn child(parent: LabelId, node: NodeId, length: f64, lower_bound: f64) -> Label {
        Label {
            node,
            length,
            lower_bound,
            parent: Some(parent),
            overlaps: vec![0.0; 2],
            validated: 0,
        }
    }

    #[test]
    fn trace_walks_parents_back_to_root() {
        let mut arena = LabelArena::default();
        let root = arena.push(Label::root(0, 3.0, 2, 0));
        let one = arena.push(child(root, 1, 1.0, 3.0));
        let two = arena.push(child(one, 2, 2.0, 3.0));

        assert_eq!(arena.trace(two), vec![0, 1, 2]);
        assert!(arena.chain_contains(two, 0));
        assert!(!arena.chain_contains(one, 2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn frontier_pops_lowest_bound_first() {
        let mut arena = LabelArena::default();
        let root = arena.push(Label::root(0, 0.0, 2, 0));
        let far = arena.push(child(root, 1, 1.0, 5.0));
        let near = arena.push(child(root, 2, 1.0, 2.0));

        let mut frontier = Frontier::default();
        frontier.push(far, arena.get(far));
        frontier.push(near, arena.get(near));

        assert_eq!(frontier.pop(), Some(near));
        assert_eq!(frontier.pop(), Some(far));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn ties_break_on_validated_overlap_then_insertion() {
        let mut arena = LabelArena::default();
        let root = arena.push(Label::root(0, 0.0, 2, 0));

        let mut heavy = child(root, 1, 1.0, 4.0);
        heavy.overlaps = vec![2.0, 0.0];
        heavy.validated = 1;
        let heavy = arena.push(heavy);

        let mut light = child(root, 2, 1.0, 4.0);
        light.overlaps = vec![0.5, 0.0];
        light.validated = 1;
        let light = arena.push(light);

        let first_plain = arena.push(child(root, 3, 1.0, 4.0));
        let second_plain = arena.push(child(root, 4, 1.0, 4.0));

        let mut frontier = Frontier::default();
        for id in [heavy, light, first_plain, second_plain] {
            frontier.push(id, arena.get(id));
        }

        assert_eq!(frontier.pop(), Some(first_plain));
        assert_eq!(frontier.pop(), Some(second_plain));
        assert_eq!(frontier.pop(), Some(light));
        assert_eq!(frontier.pop(), Some(heavy));
    }

    #[test]
    fn unstored_overlap_slots_read_as_zero() {
        let mut label = Label::root(0, 1.0, 0, 2);
        assert_eq!(label.min_overlap(), 0.0);

        label.overlaps = vec![3.0];
        assert_eq!(label.min_overlap(), 0.0);

        label.overlaps = vec![3.0, 1.5];
        assert_eq!(label.min_overlap(), 1.5);
    }
}
