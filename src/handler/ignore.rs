//! Spec §4.3 — accepts every event; on a nested container it pushes
//! another `IgnoreHandler` so the whole subtree is consumed without
//! building anything. Used for `categories`, `split_type` and its
//! siblings, every `*_param` under the objective, `tree_info`,
//! `attributes`, and `gbtree_model_param`.

use crate::error::ParseError;
use crate::event::Event;

use super::{Action, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct IgnoreHandler;

impl IgnoreHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::StartObject | Event::StartArray => {
                Ok(Action::Push(super::Handler::Ignore(IgnoreHandler)))
            }
            Event::EndObject(_) | Event::EndArray(_) => Ok(Action::Pop(PoppedValue::None)),
            _ => Ok(Action::Continue),
        }
    }
}
