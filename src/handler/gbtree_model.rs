//! Spec §4.8 — `gbtree_model`: the `trees` array plus `tree_info` and
//! `gbtree_model_param`, both schema-recognized and discarded (spec §9:
//! per-tree group assignment is a host-library evaluation concern, out of
//! scope for ingestion).

use crate::dest::DestTree;
use crate::error::ParseError;
use crate::event::Event;

use super::{Action, Handler, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct GBTreeModelHandler {
    current_key: String,
    trees: Vec<DestTree>,
}

impl GBTreeModelHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::StartArray => match self.current_key.as_str() {
                "trees" => Ok(Action::Push(Handler::TreeArray(Default::default()))),
                "tree_info" => Ok(Action::Push(Handler::Ignore(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected array key in gbtree_model: {other}"
                ))),
            },
            Event::StartObject => match self.current_key.as_str() {
                "gbtree_model_param" => Ok(Action::Push(Handler::Ignore(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected object key in gbtree_model: {other}"
                ))),
            },
            Event::EndObject(_) => Ok(Action::Pop(PoppedValue::Trees(std::mem::take(
                &mut self.trees,
            )))),
            other => Err(ParseError::schema(format!(
                "unexpected event in gbtree_model: {other:?}"
            ))),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        if let PoppedValue::Trees(trees) = value {
            self.trees = trees;
        }
        Ok(())
    }
}
