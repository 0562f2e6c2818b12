//! Spec §4.11 — `objective`. Only `name` is read; any `*_param` sibling
//! object (e.g. `reg_loss_param`) is schema-recognized and discarded.

use crate::error::ParseError;
use crate::event::Event;

use super::{Action, Handler, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct ObjectiveHandler {
    current_key: String,
    name: Option<String>,
}

impl ObjectiveHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::String(name) if self.current_key == "name" => {
                self.name = Some(name.to_owned());
                Ok(Action::Continue)
            }
            Event::StartObject => Ok(Action::Push(Handler::Ignore(Default::default()))),
            Event::EndObject(_) => {
                let name = self
                    .name
                    .take()
                    .ok_or_else(|| ParseError::schema("objective missing name"))?;
                Ok(Action::Pop(PoppedValue::Objective(name)))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in objective: {other:?}"
            ))),
        }
    }
}
