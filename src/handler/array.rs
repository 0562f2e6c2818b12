//! Spec §4.4 — scalar-mode array accumulator. Element-handler mode (arrays
//! of objects) is specific to `trees` and lives in `reg_tree::TreeArrayHandler`
//! instead, since it is the only array of objects this schema has.

use crate::error::ParseError;
use crate::event::Event;

use super::{Action, PoppedValue};

/// Scalar types an XGBoost array of numbers or booleans can widen/narrow
/// into. Overflow is not checked: the input is a trusted schema (spec §9).
pub(crate) trait ScalarElement: Copy {
    fn from_event(event: &Event<'_>) -> Option<Self>;
    fn into_popped(values: Vec<Self>) -> PoppedValue;
}

impl ScalarElement for f64 {
    fn from_event(event: &Event<'_>) -> Option<Self> {
        event.as_f64()
    }
    fn into_popped(values: Vec<Self>) -> PoppedValue {
        PoppedValue::F64Vec(values)
    }
}

impl ScalarElement for i32 {
    fn from_event(event: &Event<'_>) -> Option<Self> {
        event.as_i32()
    }
    fn into_popped(values: Vec<Self>) -> PoppedValue {
        PoppedValue::I32Vec(values)
    }
}

impl ScalarElement for bool {
    fn from_event(event: &Event<'_>) -> Option<Self> {
        event.as_bool()
    }
    fn into_popped(values: Vec<Self>) -> PoppedValue {
        PoppedValue::BoolVec(values)
    }
}

impl ScalarElement for u32 {
    fn from_event(event: &Event<'_>) -> Option<Self> {
        event.as_u32()
    }
    fn into_popped(values: Vec<Self>) -> PoppedValue {
        PoppedValue::U32Vec(values)
    }
}

#[derive(Debug, Default)]
pub(crate) struct ArrayHandler<T> {
    values: Vec<T>,
}

impl<T: ScalarElement> ArrayHandler<T> {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::EndArray(count) => {
                if count != self.values.len() {
                    return Err(ParseError::invariant(format!(
                        "array reported {count} elements but {} were read",
                        self.values.len()
                    )));
                }
                Ok(Action::Pop(T::into_popped(std::mem::take(&mut self.values))))
            }
            other => match T::from_event(&other) {
                Some(v) => {
                    self.values.push(v);
                    Ok(Action::Continue)
                }
                None => Err(ParseError::schema(format!(
                    "unexpected event in scalar array: {other:?}"
                ))),
            },
        }
    }
}
