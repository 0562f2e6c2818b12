//! Spec §4.2 — the top-level object: exactly two members, `version` and
//! `learner`. `version[0]` gates the base-score-to-margin transform (spec
//! §4.12, §8 scenario 1): XGBoost wrote raw probabilities as `base_score`
//! before 1.0 and margins from 1.0 onward, and the JSON model dump itself
//! is the only place that distinction survives.

use crate::error::ParseError;
use crate::event::Event;
use crate::margin::base_score_to_margin;
use crate::model::{Ensemble, ModelParam};

use super::learner::LearnerResult;
use super::{Action, Handler, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct XGBoostModelHandler {
    current_key: String,
    member_count: usize,
    version: Vec<u32>,
    learner: Option<LearnerResult>,
}

impl XGBoostModelHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                self.member_count += 1;
                Ok(Action::Continue)
            }
            Event::StartArray => match self.current_key.as_str() {
                "version" => Ok(Action::Push(Handler::ArrayU32(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected array key at top level: {other}"
                ))),
            },
            Event::StartObject => match self.current_key.as_str() {
                "learner" => Ok(Action::Push(Handler::Learner(Default::default()))),
                other => Err(ParseError::schema(format!(
                    "unexpected object key at top level: {other}"
                ))),
            },
            Event::EndObject(_) => {
                if self.member_count != 2 {
                    return Err(ParseError::schema(format!(
                        "top-level object must have exactly 2 members (version, learner), found {}",
                        self.member_count
                    )));
                }
                let learner = self
                    .learner
                    .take()
                    .ok_or_else(|| ParseError::schema("top-level object missing learner"))?;
                let version0 = *self
                    .version
                    .first()
                    .ok_or_else(|| ParseError::schema("top-level object missing version"))?;

                let global_bias = if version0 >= 1 {
                    base_score_to_margin(learner.global_bias)
                } else {
                    learner.global_bias
                };

                let param = ModelParam {
                    global_bias,
                    num_output_group: learner.num_output_group,
                    num_feature: learner.num_feature,
                    random_forest_flag: false,
                    pred_transform: learner.pred_transform,
                };

                Ok(Action::Pop(PoppedValue::Model(Ensemble::new(
                    param,
                    learner.trees,
                ))))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event at top level: {other:?}"
            ))),
        }
    }

    pub(crate) fn absorb(&mut self, value: PoppedValue) -> Result<(), ParseError> {
        match value {
            PoppedValue::U32Vec(v) => self.version = v,
            PoppedValue::Learner(l) => self.learner = Some(l),
            _ => {}
        }
        Ok(())
    }
}
