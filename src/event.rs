//! The twelve JSON events forwarded from the tokenizer to the handler stack.
//!
//! This mirrors a SAX-style reader's handler interface: every scalar,
//! container boundary, and key the tokenizer produces becomes one
//! [`Event`], in document order, with no lookahead.

/// One token out of the JSON event stream.
///
/// `StartObject`/`StartArray` carry no payload; `EndObject`/`EndArray` carry
/// the member/element count the tokenizer observed (informational — only
/// [`crate::handler::reg_tree`] validates it against anything).
#[derive(Debug, Clone)]
pub enum Event<'a> {
    Null,
    Bool(bool),
    Int(i32),
    Uint(u32),
    Int64(i64),
    Uint64(u64),
    Double(f64),
    String(&'a str),
    Key(&'a str),
    StartObject,
    EndObject(usize),
    StartArray,
    EndArray(usize),
}

impl Event<'_> {
    /// Widen any integer or floating event to `f64`. Used by handlers whose
    /// target field is a float but whose input was written by XGBoost as a
    /// whole number (e.g. a `0` leaf threshold).
    pub(crate) fn as_f64(&self) -> Option<f64> {
        match *self {
            Event::Int(v) => Some(v as f64),
            Event::Uint(v) => Some(v as f64),
            Event::Int64(v) => Some(v as f64),
            Event::Uint64(v) => Some(v as f64),
            Event::Double(v) => Some(v),
            _ => None,
        }
    }

    /// Narrow any integer event to `i32`. Overflow is not checked: the
    /// input is a trusted schema, per spec.
    pub(crate) fn as_i32(&self) -> Option<i32> {
        match *self {
            Event::Int(v) => Some(v),
            Event::Uint(v) => Some(v as i32),
            Event::Int64(v) => Some(v as i32),
            Event::Uint64(v) => Some(v as i32),
            _ => None,
        }
    }

    pub(crate) fn as_u32(&self) -> Option<u32> {
        match *self {
            Event::Int(v) => Some(v as u32),
            Event::Uint(v) => Some(v),
            Event::Int64(v) => Some(v as u32),
            Event::Uint64(v) => Some(v as u32),
            _ => None,
        }
    }

    pub(crate) fn as_bool(&self) -> Option<bool> {
        match *self {
            Event::Bool(v) => Some(v),
            _ => None,
        }
    }
}
