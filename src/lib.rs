//! Streaming ingestion of XGBoost's JSON model dump into an in-memory,
//! host-library-agnostic tree-ensemble representation.
//!
//! The entry points ([`parse_slice`], [`parse_reader`], [`load_file`]) run
//! the document through a stack-based event dispatcher (see
//! [`dispatcher`]) rather than deserializing it into a DOM first: each
//! nesting level of the schema gets its own handler in the [`handler`]
//! module, pushed and popped as the underlying tokenizer opens and closes
//! JSON containers.

mod dest;
mod dispatcher;
mod error;
mod event;
mod handler;
mod map;
mod margin;
mod model;
mod parser;
mod pred_transform;

pub use dest::{DestNode, DestTree, Op};
pub use error::ParseError;
pub use model::{Ensemble, ModelParam, PredTransform};
pub use parser::{load_file, parse_reader, parse_slice};
