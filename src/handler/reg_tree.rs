//! Spec §4.6 — `RegTreeHandler`, the ten flat arrays plus the BFS reshape
//! from XGBoost's indexed layout into the destination library's recursive
//! child-allocation layout, and `TreeArrayHandler`, the element-handler
//! mode of the generic array accumulator (spec §4.4) specialized to
//! `trees`, the one array of objects this schema has.

use std::collections::VecDeque;

use itertools::izip;

use crate::dest::{DestTree, Op};
use crate::error::ParseError;
use crate::event::Event;

use super::{Action, Handler, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct RegTreeHandler {
    current_key: String,
    num_nodes: Option<i32>,
    loss_changes: Vec<f64>,
    sum_hessian: Vec<f64>,
    base_weights: Vec<f64>,
    leaf_child_counts: Vec<i32>,
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    parents: Vec<i32>,
    split_indices: Vec<i32>,
    split_conditions: Vec<f64>,
    default_left: Vec<bool>,
}

impl RegTreeHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::StartArray => match self.current_key.as_str() {
                "loss_changes" | "sum_hessian" | "base_weights" | "split_conditions" => {
                    Ok(Action::Push(Handler::ArrayF64(Default::default())))
                }
                "leaf_child_counts" | "left_children" | "right_children" | "parents"
                | "split_indices" => Ok(Action::Push(Handler::ArrayI32(Default::default()))),
                "default_left" => Ok(Action::Push(Handler::ArrayBool(Default::default()))),
                // Categorical-split bookkeeping: recognized and skipped, per the
                // non-goal that this parser does not decode categorical splits.
                "categories" | "categories_nodes" | "categories_segments" | "categories_sizes"
                | "split_type" => Ok(Action::Push(Handler::Ignore(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected array key in tree: {other}"
                ))),
            },
            Event::StartObject => match self.current_key.as_str() {
                "tree_param" => Ok(Action::Push(Handler::TreeParam(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected object key in tree: {other}"
                ))),
            },
            Event::Uint(_) | Event::Uint64(_) | Event::Int(_) | Event::Int64(_)
                if self.current_key == "id" =>
            {
                Ok(Action::Continue)
            }
            Event::EndObject(_) => {
                let tree = self.reshape()?;
                Ok(Action::Pop(PoppedValue::Tree(tree)))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in tree: {other:?}"
            ))),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        match value {
            PoppedValue::NumNodes(n) => self.num_nodes = Some(n),
            PoppedValue::F64Vec(v) => match self.current_key.as_str() {
                "loss_changes" => self.loss_changes = v,
                "sum_hessian" => self.sum_hessian = v,
                "base_weights" => self.base_weights = v,
                "split_conditions" => self.split_conditions = v,
                other => {
                    return Err(ParseError::schema(format!(
                        "float array absorbed under unexpected key: {other}"
                    )));
                }
            },
            PoppedValue::I32Vec(v) => match self.current_key.as_str() {
                "leaf_child_counts" => self.leaf_child_counts = v,
                "left_children" => self.left_children = v,
                "right_children" => self.right_children = v,
                "parents" => self.parents = v,
                "split_indices" => self.split_indices = v,
                other => {
                    return Err(ParseError::schema(format!(
                        "int array absorbed under unexpected key: {other}"
                    )));
                }
            },
            PoppedValue::BoolVec(v) => self.default_left = v,
            PoppedValue::None => {}
            _ => {}
        }
        Ok(())
    }

    /// Invariant (spec §3): all ten flat sequences equal `num_nodes` in
    /// length before the reshape begins.
    fn reshape(&self) -> Result<DestTree, ParseError> {
        let num_nodes = self
            .num_nodes
            .ok_or_else(|| ParseError::schema("tree missing tree_param.num_nodes"))?
            as usize;

        for (name, len) in [
            ("loss_changes", self.loss_changes.len()),
            ("sum_hessian", self.sum_hessian.len()),
            ("base_weights", self.base_weights.len()),
            ("leaf_child_counts", self.leaf_child_counts.len()),
            ("left_children", self.left_children.len()),
            ("right_children", self.right_children.len()),
            ("parents", self.parents.len()),
            ("split_indices", self.split_indices.len()),
            ("split_conditions", self.split_conditions.len()),
            ("default_left", self.default_left.len()),
        ] {
            if len != num_nodes {
                return Err(ParseError::invariant(format!(
                    "tree array {name} has length {len}, expected num_nodes = {num_nodes}"
                )));
            }
        }

        let raw: Vec<RawNode> = izip!(
            &self.loss_changes,
            &self.sum_hessian,
            &self.left_children,
            &self.right_children,
            &self.split_indices,
            &self.split_conditions,
            &self.default_left
        )
        .map(
            |(&loss_change, &sum_hess, &left, &right, &split_index, &split_condition, &default_left)| {
                RawNode {
                    loss_change,
                    sum_hess,
                    left,
                    right,
                    split_index,
                    split_condition,
                    default_left,
                }
            },
        )
        .collect();

        let mut tree = DestTree::init();
        let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
        queue.push_back((0, 0));

        while let Some((old_id, new_id)) = queue.pop_front() {
            let node = raw.get(old_id).ok_or_else(|| {
                ParseError::invariant(format!("tree references node id {old_id} out of range"))
            })?;

            if node.left == -1 {
                tree.set_leaf(new_id, node.split_condition as f32);
            } else {
                let (new_left, new_right) = tree.add_children(new_id);
                tree.set_numerical_split(
                    new_id,
                    node.split_index,
                    node.split_condition as f32,
                    node.default_left,
                    Op::LessThan,
                );
                tree.set_gain(new_id, node.loss_change);
                queue.push_back((node.left as usize, new_left));
                queue.push_back((node.right as usize, new_right));
            }
            tree.set_sum_hess(new_id, node.sum_hess);
        }

        Ok(tree)
    }
}

struct RawNode {
    loss_change: f64,
    sum_hess: f64,
    left: i32,
    right: i32,
    split_index: i32,
    split_condition: f64,
    default_left: bool,
}

/// Spec §4.4 element-handler mode, specialized to `trees`: each `StartObject`
/// installs a fresh [`RegTreeHandler`] targeting a new slot in the tree
/// sequence.
#[derive(Debug, Default)]
pub(crate) struct TreeArrayHandler {
    trees: Vec<DestTree>,
}

impl TreeArrayHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::StartObject => Ok(Action::Push(Handler::RegTree(Default::default()))),
            Event::EndArray(count) => {
                if count != self.trees.len() {
                    return Err(ParseError::invariant(format!(
                        "trees array reported {count} elements but {} were read",
                        self.trees.len()
                    )));
                }
                Ok(Action::Pop(PoppedValue::Trees(std::mem::take(
                    &mut self.trees,
                ))))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in trees array: {other:?}"
            ))),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        if let PoppedValue::Tree(tree) = value {
            self.trees.push(tree);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use serde_json::json;

    fn parse_tree(doc: serde_json::Value) -> DestTree {
        let mut dispatcher = Dispatcher::new();
        dispatcher.push_for_test(Handler::RegTree(Default::default()));
        crate::parser::pump_value(&doc, &mut dispatcher).unwrap();
        match dispatcher.pop_for_test().unwrap() {
            PoppedValue::Tree(tree) => tree,
            _ => panic!("expected a tree"),
        }
    }

    #[test]
    fn single_node_stump_is_a_leaf() {
        let doc = json!({
            "tree_param": {"num_nodes": "1", "num_feature": "3", "size_leaf_vector": "0"},
            "id": 0,
            "loss_changes": [0.0],
            "sum_hessian": [4.0],
            "base_weights": [0.0],
            "leaf_child_counts": [0],
            "left_children": [-1],
            "right_children": [-1],
            "parents": [-1],
            "split_indices": [0],
            "split_conditions": [0.7],
            "default_left": [false],
            "categories": [],
            "categories_nodes": [],
            "categories_segments": [],
            "categories_sizes": [],
            "split_type": [0],
        });

        let tree = parse_tree(doc);
        assert_eq!(tree.num_nodes(), 1);
        assert!(tree.node(0).is_leaf());
        assert_eq!(tree.node(0).leaf_value(), Some(0.7));
        assert_eq!(tree.node(0).sum_hess(), 4.0);
    }

    #[test]
    fn depth_one_tree_reshapes_with_preserved_gain_and_hess() {
        let doc = json!({
            "tree_param": {"num_nodes": "3", "num_feature": "3", "size_leaf_vector": "0"},
            "id": 0,
            "loss_changes": [0.9, 0.0, 0.0],
            "sum_hessian": [20.0, 4.0, 6.0],
            "base_weights": [0.0, 0.0, 0.0],
            "leaf_child_counts": [0, 0, 0],
            "left_children": [1, -1, -1],
            "right_children": [2, -1, -1],
            "parents": [-1, 0, 0],
            "split_indices": [2, 0, 0],
            "split_conditions": [1.5, 0.1, 0.2],
            "default_left": [true, false, false],
            "categories": [],
            "categories_nodes": [],
            "categories_segments": [],
            "categories_sizes": [],
            "split_type": [0, 0, 0],
        });

        let tree = parse_tree(doc);
        assert_eq!(tree.num_nodes(), 3);
        assert!(!tree.node(0).is_leaf());
        assert_eq!(tree.node(0).split_feature(), Some(2));
        assert_eq!(tree.node(0).split_threshold(), Some(1.5));
        assert_eq!(tree.node(0).default_left(), Some(true));
        assert_eq!(tree.node(0).gain(), Some(0.9));
        assert_eq!(tree.node(0).sum_hess(), 20.0);

        let left = tree.left_child_id(0).unwrap();
        let right = tree.right_child_id(0).unwrap();
        assert_eq!(tree.node(left).leaf_value(), Some(0.1));
        assert_eq!(tree.node(left).sum_hess(), 4.0);
        assert_eq!(tree.node(right).leaf_value(), Some(0.2));
        assert_eq!(tree.node(right).sum_hess(), 6.0);
    }

    #[test]
    fn length_mismatch_fails() {
        let doc = json!({
            "tree_param": {"num_nodes": "2", "num_feature": "3", "size_leaf_vector": "0"},
            "id": 0,
            "loss_changes": [0.0, 0.0],
            "sum_hessian": [1.0, 2.0, 3.0],
            "base_weights": [0.0, 0.0],
            "leaf_child_counts": [0, 0],
            "left_children": [-1, -1],
            "right_children": [-1, -1],
            "parents": [-1, -1],
            "split_indices": [0, 0],
            "split_conditions": [0.1, 0.2],
            "default_left": [false, false],
            "categories": [],
            "categories_nodes": [],
            "categories_segments": [],
            "categories_sizes": [],
            "split_type": [0, 0],
        });

        let mut dispatcher = Dispatcher::new();
        dispatcher.push_for_test(Handler::RegTree(Default::default()));
        let err = crate::parser::pump_value(&doc, &mut dispatcher).unwrap_err();
        assert!(err.to_string().contains("length"));
    }
}
