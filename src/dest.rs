//! The destination tree-ensemble representation.
//!
//! Spec §6 names this as an external, consumed-but-not-specified
//! collaborator (`AddChilds`, `SetLeaf`, `SetNumericalSplit`, `SetGain`,
//! `SetSumHess`). This module supplies a concrete, minimal implementation
//! of that API so the reshape stage in [`crate::handler::reg_tree`] has
//! something real to build into, grounded in the teacher's own
//! `FxIndexMap`-backed `Tree`/`TreeNode` (`tree.rs`), generalized from an
//! evaluate-in-place structure into a write-only builder.

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::map::FxIndexMap;

/// Comparison operator recorded on a numerical split. XGBoost only ever
/// writes less-than splits; the field exists so a host library's op enum
/// has somewhere to come from, not because this parser chooses among them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    LessThan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum NodeKind {
    /// A node that has not yet been given a shape by `SetLeaf`/`SetNumericalSplit`.
    Unset,
    Leaf {
        value: NotNan<f32>,
    },
    Split {
        feature: i32,
        threshold: NotNan<f32>,
        default_left: bool,
        op: Op,
        gain: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestNode {
    id: usize,
    kind: NodeKind,
    sum_hess: f64,
    children: Option<(usize, usize)>,
}

impl DestNode {
    fn new(id: usize) -> Self {
        Self {
            id,
            kind: NodeKind::Unset,
            sum_hess: 0.0,
            children: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    pub fn leaf_value(&self) -> Option<f32> {
        match self.kind {
            NodeKind::Leaf { value } => Some(value.into_inner()),
            _ => None,
        }
    }

    pub fn split_feature(&self) -> Option<i32> {
        match self.kind {
            NodeKind::Split { feature, .. } => Some(feature),
            _ => None,
        }
    }

    pub fn split_threshold(&self) -> Option<f32> {
        match self.kind {
            NodeKind::Split { threshold, .. } => Some(threshold.into_inner()),
            _ => None,
        }
    }

    pub fn default_left(&self) -> Option<bool> {
        match self.kind {
            NodeKind::Split { default_left, .. } => Some(default_left),
            _ => None,
        }
    }

    pub fn gain(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Split { gain, .. } => Some(gain),
            _ => None,
        }
    }

    pub fn sum_hess(&self) -> f64 {
        self.sum_hess
    }
}

/// A single tree in the destination ensemble's contiguous, child-indexed
/// layout: node ids are dense, allocated in the order `add_children` hands
/// them out (breadth-first, by construction of the reshape that drives it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestTree {
    nodes: FxIndexMap<usize, DestNode>,
}

impl DestTree {
    /// Allocate a tree with a single, as-yet-unshaped root at id 0.
    pub fn init() -> Self {
        let mut nodes = FxIndexMap::default();
        nodes.insert(0, DestNode::new(0));
        Self { nodes }
    }

    /// Allocate two fresh children under `parent`, returning their ids.
    pub fn add_children(&mut self, parent: usize) -> (usize, usize) {
        let left = self.nodes.len();
        self.nodes.insert(left, DestNode::new(left));
        let right = self.nodes.len();
        self.nodes.insert(right, DestNode::new(right));
        self.node_mut(parent).children = Some((left, right));
        (left, right)
    }

    pub fn set_leaf(&mut self, node: usize, value: f32) {
        let value = NotNan::new(value).expect("leaf value must not be NaN");
        self.node_mut(node).kind = NodeKind::Leaf { value };
    }

    #[allow(clippy::too_many_arguments)]
    pub fn set_numerical_split(
        &mut self,
        node: usize,
        feature: i32,
        threshold: f32,
        default_left: bool,
        op: Op,
    ) {
        let threshold = NotNan::new(threshold).expect("split threshold must not be NaN");
        self.node_mut(node).kind = NodeKind::Split {
            feature,
            threshold,
            default_left,
            op,
            gain: 0.0,
        };
    }

    pub fn set_gain(&mut self, node: usize, gain: f64) {
        if let NodeKind::Split { gain: slot, .. } = &mut self.node_mut(node).kind {
            *slot = gain;
        }
    }

    pub fn set_sum_hess(&mut self, node: usize, hess: f64) {
        self.node_mut(node).sum_hess = hess;
    }

    pub fn left_child_id(&self, node: usize) -> Option<usize> {
        self.node(node).children.map(|(l, _)| l)
    }

    pub fn right_child_id(&self, node: usize) -> Option<usize> {
        self.node(node).children.map(|(_, r)| r)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: usize) -> &DestNode {
        self.nodes.get(&id).expect("node id out of range")
    }

    fn node_mut(&mut self, id: usize) -> &mut DestNode {
        self.nodes.get_mut(&id).expect("node id out of range")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_leaf() {
        let mut tree = DestTree::init();
        tree.set_leaf(0, 0.7);
        tree.set_sum_hess(0, 4.0);

        assert_eq!(tree.num_nodes(), 1);
        assert!(tree.node(0).is_leaf());
        assert_eq!(tree.node(0).leaf_value(), Some(0.7));
        assert_eq!(tree.node(0).sum_hess(), 4.0);
        assert_eq!(tree.left_child_id(0), None);
    }

    #[test]
    fn split_with_children() {
        let mut tree = DestTree::init();
        let (left, right) = tree.add_children(0);
        tree.set_numerical_split(0, 2, 1.5, true, Op::LessThan);
        tree.set_gain(0, 0.9);
        tree.set_leaf(left, 0.1);
        tree.set_leaf(right, 0.2);

        assert_eq!(tree.num_nodes(), 3);
        assert_eq!(tree.left_child_id(0), Some(left));
        assert_eq!(tree.right_child_id(0), Some(right));
        assert!(!tree.node(0).is_leaf());
        assert_eq!(tree.node(0).split_feature(), Some(2));
        assert_eq!(tree.node(0).split_threshold(), Some(1.5));
        assert_eq!(tree.node(0).default_left(), Some(true));
        assert_eq!(tree.node(0).gain(), Some(0.9));
        assert_eq!(tree.node(left).leaf_value(), Some(0.1));
        assert_eq!(tree.node(right).leaf_value(), Some(0.2));
    }
}
