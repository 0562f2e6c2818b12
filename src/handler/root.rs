//! Spec §4.13 — the handler installed at the bottom of the stack. It
//! never pops itself (spec §4.1: the dispatcher's `pop` would underflow
//! past it); instead it just absorbs the finished model when the
//! top-level object's handler finishes and pops.

use crate::error::ParseError;
use crate::event::Event;
use crate::model::Ensemble;

use super::xgboost_model::XGBoostModelHandler;
use super::{Action, Handler, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct RootHandler {
    result: Option<Ensemble>,
    opened: bool,
}

impl RootHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::StartObject if !self.opened => {
                self.opened = true;
                Ok(Action::Push(Handler::XGBoostModel(
                    XGBoostModelHandler::default(),
                )))
            }
            other => Err(ParseError::schema(format!(
                "expected a single top-level JSON object, found {other:?}"
            ))),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        if let PoppedValue::Model(model) = value {
            self.result = Some(model);
        }
        Ok(())
    }

    pub(crate) fn take_result(&mut self) -> Option<Ensemble> {
        self.result.take()
    }
}
