//! Spec §4.5 — `tree_param`. XGBoost writes its integer parameters as
//! decimal strings, not JSON numbers.

use crate::error::ParseError;
use crate::event::Event;

use super::{Action, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct TreeParamHandler {
    current_key: String,
    num_nodes: Option<i32>,
}

impl TreeParamHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::String(s) => match self.current_key.as_str() {
                "num_nodes" => {
                    let n: i32 = s
                        .parse()
                        .map_err(|_| ParseError::schema(format!("num_nodes is not an integer: {s:?}")))?;
                    self.num_nodes = Some(n);
                    Ok(Action::Continue)
                }
                "num_feature" | "size_leaf_vector" | "num_deleted" => Ok(Action::Continue),
                other => Err(ParseError::schema(format!(
                    "unexpected key in tree_param: {other}"
                ))),
            },
            Event::EndObject(_) => {
                let num_nodes = self
                    .num_nodes
                    .ok_or_else(|| ParseError::schema("tree_param missing num_nodes"))?;
                Ok(Action::Pop(PoppedValue::NumNodes(num_nodes)))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in tree_param: {other:?}"
            ))),
        }
    }
}
