//! Spec §4.9 — `learner`: joins the three scalar/structural pieces
//! (`learner_model_param`, `gradient_booster`, `objective`) into one
//! intermediate result the enclosing `xgboost_model` handler turns into
//! the public [`crate::Ensemble`]. `attributes` is the one schema-recognized
//! key with nowhere to go (spec §4.9): pushed to `IgnoreHandler` and
//! discarded, since this crate's output has no field for it.

use crate::dest::DestTree;
use crate::error::ParseError;
use crate::event::Event;
use crate::model::PredTransform;
use crate::pred_transform;

use super::{Action, Handler, PoppedValue};

/// What a finished `learner` object hands up to `xgboost_model`: everything
/// needed to build an [`crate::Ensemble`] except the two fields only the
/// top-level object knows (`random_forest_flag`, and whether `global_bias`
/// still needs the margin transform).
#[derive(Debug, Clone)]
pub(crate) struct LearnerResult {
    pub(crate) trees: Vec<DestTree>,
    pub(crate) global_bias: f32,
    pub(crate) num_output_group: i32,
    pub(crate) num_feature: i32,
    pub(crate) pred_transform: PredTransform,
}

#[derive(Debug, Default)]
pub(crate) struct LearnerHandler {
    current_key: String,
    objective: Option<String>,
    trees: Vec<DestTree>,
    base_score: Option<f32>,
    num_output_group: Option<i32>,
    num_feature: Option<i32>,
}

impl LearnerHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::StartObject => match self.current_key.as_str() {
                "learner_model_param" => Ok(Action::Push(Handler::LearnerParam(Default::default()))),
                "gradient_booster" => Ok(Action::Push(Handler::GradientBooster(Default::default()))),
                "objective" => Ok(Action::Push(Handler::Objective(Default::default()))),
                "attributes" => Ok(Action::Push(Handler::Ignore(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected object key in learner: {other}"
                ))),
            },
            Event::EndObject(_) => {
                let objective = self
                    .objective
                    .take()
                    .ok_or_else(|| ParseError::schema("learner missing objective"))?;
                let base_score = self
                    .base_score
                    .ok_or_else(|| ParseError::schema("learner missing learner_model_param"))?;

                Ok(Action::Pop(PoppedValue::Learner(LearnerResult {
                    trees: std::mem::take(&mut self.trees),
                    global_bias: base_score,
                    num_output_group: self.num_output_group.unwrap_or(1).max(1),
                    num_feature: self.num_feature.unwrap_or(0),
                    pred_transform: pred_transform::select(&objective),
                })))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in learner: {other:?}"
            ))),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        match value {
            PoppedValue::Objective(name) => self.objective = Some(name),
            PoppedValue::Trees(trees) => self.trees = trees,
            PoppedValue::LearnerParam {
                base_score,
                num_class,
                num_feature,
            } => {
                self.base_score = Some(base_score);
                self.num_output_group = Some(num_class);
                self.num_feature = Some(num_feature);
            }
            _ => {}
        }
        Ok(())
    }
}
