//! Spec §4.7 — `gradient_booster`. The discriminator on `name` is the one
//! place this schema stops being purely positional: a `gblinear` or `dart`
//! model has the same key but an incompatible `model` shape underneath it,
//! so `name` must be checked before `model` is ever pushed (spec §8
//! scenario 4).

use crate::dest::DestTree;
use crate::error::ParseError;
use crate::event::Event;

use super::{Action, Handler, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct GradientBoosterHandler {
    current_key: String,
    name_checked: bool,
    trees: Vec<DestTree>,
}

impl GradientBoosterHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::String(name) => match self.current_key.as_str() {
                "name" => {
                    if name != "gbtree" {
                        log::error!(
                            "only gbtree-type boosters are supported, found gradient_booster.name = {name:?}"
                        );
                        return Err(ParseError::schema(format!(
                            "unsupported gradient_booster.name: {name}"
                        )));
                    }
                    self.name_checked = true;
                    Ok(Action::Continue)
                }
                other => Err(ParseError::schema(format!(
                    "unexpected string key in gradient_booster: {other}"
                ))),
            },
            Event::StartObject => match self.current_key.as_str() {
                "model" => {
                    if !self.name_checked {
                        return Err(ParseError::schema(
                            "gradient_booster.model appeared before name",
                        ));
                    }
                    Ok(Action::Push(Handler::GBTreeModel(Default::default())))
                }
                other => Err(ParseError::schema(format!(
                    "unexpected object key in gradient_booster: {other}"
                ))),
            },
            Event::EndObject(_) => {
                if !self.name_checked {
                    return Err(ParseError::schema("gradient_booster missing name"));
                }
                Ok(Action::Pop(PoppedValue::Trees(std::mem::take(
                    &mut self.trees,
                ))))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in gradient_booster: {other:?}"
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
