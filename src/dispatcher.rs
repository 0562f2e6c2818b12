//! Spec §4.1 — the event dispatcher: owns the handler stack and routes
//! each [`Event`] to whichever handler is on top, acting on the
//! [`Action`] it returns. This is the pushdown automaton spec §9 asks for
//! in place of recursive-descent parsing hidden in the call stack.

use crate::error::ParseError;
use crate::event::Event;
use crate::handler::{Action, Handler, PoppedValue, RootHandler};
use crate::model::Ensemble;

pub(crate) struct Dispatcher {
    stack: Vec<Handler>,
    last_popped: Option<PoppedValue>,
    pending_error: Option<ParseError>,
}

impl Dispatcher {
    pub(crate) fn new() -> Self {
        Self {
            stack: vec![Handler::Root(RootHandler::default())],
            last_popped: None,
            pending_error: None,
        }
    }

    /// Forward one event to the top of the stack and act on the result.
    /// A child's finished value is handed to the handler beneath it via
    /// `absorb`, never stored back through a reference to the child.
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        let action = self
            .stack
            .last_mut()
            .expect("handler stack is never empty")
            .handle(event)?;

        match action {
            Action::Continue => {}
            Action::Push(handler) => self.stack.push(handler),
            Action::Pop(value) => {
                self.stack.pop();
                self.last_popped = Some(value.clone());
                match self.stack.last_mut() {
                    Some(parent) => parent.absorb(value)?,
                    None => return Err(ParseError::schema("handler stack underflow on pop")),
                }
            }
        }
        Ok(())
    }

    /// Stash a structured error recovered from a handler before it was
    /// forced through `serde::de::Error::custom` to satisfy serde_json's
    /// `Visitor` contract. See [`crate::parser`].
    pub(crate) fn stash_error(&mut self, err: ParseError) {
        self.pending_error = Some(err);
    }

    pub(crate) fn take_pending_error(&mut self) -> Option<ParseError> {
        self.pending_error.take()
    }

    /// The finished model, once the top-level object has popped back into
    /// the root handler.
    pub(crate) fn get_result(&mut self) -> Option<Ensemble> {
        match self.stack.first_mut() {
            Some(Handler::Root(root)) => root.take_result(),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn push_for_test(&mut self, handler: Handler) {
        self.stack.push(handler);
    }

    #[cfg(test)]
    pub(crate) fn pop_for_test(&mut self) -> Option<PoppedValue> {
        self.last_popped.take()
    }
}
