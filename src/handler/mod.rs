//! The handler hierarchy: a closed family of schema-specific state machines,
//! one per nesting level of the XGBoost JSON schema (spec §4).
//!
//! Each handler tracks the key most recently seen via a `Key` event
//! (`current_key`) and, on the next value event, either absorbs a scalar
//! directly ("assign-if-key-matches") or asks the dispatcher to push a
//! child handler for a nested container ("push-if-key-matches"). A
//! handler never holds a reference back into its parent or into the
//! model under construction: instead, when a child handler finishes (on
//! its own matching `EndObject`/`EndArray`) it returns the value it built,
//! the dispatcher pops it, and the parent absorbs that value into its own
//! accumulator. This is the "pure data flow" alternative spec §9 invites
//! in place of the original's weak back-reference from handler to
//! dispatcher.

mod array;
mod gbtree_model;
mod gradient_booster;
mod ignore;
mod learner;
mod learner_param;
mod objective;
mod reg_tree;
mod root;
mod tree_param;
mod xgboost_model;

use crate::dest::DestTree;
use crate::error::ParseError;
use crate::event::Event;
use crate::model::Ensemble;

pub(crate) use root::RootHandler;

/// What a handler wants the dispatcher to do after observing one event.
pub(crate) enum Action {
    /// The event was absorbed; no stack change.
    Continue,
    /// Install `child` as the new top of the handler stack.
    Push(Handler),
    /// This handler is finished: pop it and hand `value` to whatever
    /// handler is now on top.
    Pop(PoppedValue),
}

/// Everything a finished handler can have to say to its parent. One
/// variant per distinct output shape in the handler hierarchy; a parent
/// only ever expects one of these at a time, determined by which key it
/// pushed the now-finished child under.
#[derive(Clone)]
pub(crate) enum PoppedValue {
    None,
    F64Vec(Vec<f64>),
    I32Vec(Vec<i32>),
    BoolVec(Vec<bool>),
    U32Vec(Vec<u32>),
    NumNodes(i32),
    Tree(DestTree),
    Trees(Vec<DestTree>),
    Objective(String),
    LearnerParam {
        base_score: f32,
        num_class: i32,
        num_feature: i32,
    },
    Learner(learner::LearnerResult),
    Model(Ensemble),
}

/// The closed set of schema-specific state machines. Stored by value in
/// the dispatcher's stack (spec §9: "avoid trait-object indirection where
/// a closed set is known").
pub(crate) enum Handler {
    Ignore(ignore::IgnoreHandler),
    ArrayF64(array::ArrayHandler<f64>),
    ArrayI32(array::ArrayHandler<i32>),
    ArrayBool(array::ArrayHandler<bool>),
    ArrayU32(array::ArrayHandler<u32>),
    TreeArray(reg_tree::TreeArrayHandler),
    TreeParam(tree_param::TreeParamHandler),
    RegTree(reg_tree::RegTreeHandler),
    GBTreeModel(gbtree_model::GBTreeModelHandler),
    GradientBooster(gradient_booster::GradientBoosterHandler),
    Objective(objective::ObjectiveHandler),
    LearnerParam(learner_param::LearnerParamHandler),
    Learner(learner::LearnerHandler),
    XGBoostModel(xgboost_model::XGBoostModelHandler),
    Root(root::RootHandler),
}

impl Handler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match self {
            Handler::Ignore(h) => h.handle(event),
            Handler::ArrayF64(h) => h.handle(event),
            Handler::ArrayI32(h) => h.handle(event),
            Handler::ArrayBool(h) => h.handle(event),
            Handler::ArrayU32(h) => h.handle(event),
            Handler::TreeArray(h) => h.handle(event),
            Handler::TreeParam(h) => h.handle(event),
            Handler::RegTree(h) => h.handle(event),
            Handler::GBTreeModel(h) => h.handle(event),
            Handler::GradientBooster(h) => h.handle(event),
            Handler::Objective(h) => h.handle(event),
            Handler::LearnerParam(h) => h.handle(event),
            Handler::Learner(h) => h.handle(event),
            Handler::XGBoostModel(h) => h.handle(event),
            Handler::Root(h) => h.handle(event),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        match self {
            Handler::Ignore(_) => Ok(()),
            Handler::ArrayF64(_) | Handler::ArrayI32(_) | Handler::ArrayBool(_) | Handler::ArrayU32(_) => {
                // Scalar-mode arrays never push children, so they never absorb.
                Ok(())
            }
            Handler::TreeArray(h) => h.absorb(value),
            Handler::TreeParam(_) => Ok(()),
            Handler::RegTree(h) => h.absorb(value),
            Handler::GBTreeModel(h) => h.absorb(value),
            Handler::GradientBooster(h) => h.absorb(value),
            Handler::Objective(_) => Ok(()),
            Handler::LearnerParam(_) => Ok(()),
            Handler::Learner(h) => h.absorb(value),
            Handler::XGBoostModel(h) => h.absorb(value),
            Handler::Root(h) => h.absorb(value),
        }
    }
}
