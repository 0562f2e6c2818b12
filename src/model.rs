//! The parsed result: scalar model parameters plus the reshaped trees.

use serde::{Deserialize, Serialize};

use crate::dest::DestTree;

/// The prediction-transform slot populated from the objective name (spec
/// §1, §4.11). Selection logic lives in [`crate::pred_transform`]; this
/// crate only wires the call site, since numerical evaluation of trees is
/// itself out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredTransform {
    Identity,
    Sigmoid,
    SoftMax,
    /// An objective this crate does not recognize. Carried through rather
    /// than rejected: picking a transform is the host library's job, not
    /// a schema violation on our part.
    Unrecognized(String),
}

/// Scalar parameters read out of `learner_model_param` plus two bits set
/// by the top-level object (spec §3 "Model output").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParam {
    pub global_bias: f32,
    pub num_output_group: i32,
    pub num_feature: i32,
    pub random_forest_flag: bool,
    pub pred_transform: PredTransform,
}

/// The complete, owned result of parsing one XGBoost JSON document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ensemble {
    pub param: ModelParam,
    pub trees: Vec<DestTree>,
}

impl Ensemble {
    pub(crate) fn new(param: ModelParam, trees: Vec<DestTree>) -> Self {
        Self { param, trees }
    }
}
