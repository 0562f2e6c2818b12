//! Spec §4.10 — `learner_model_param`. Every value is written as a decimal
//! string, like `tree_param` (spec §4.5). `base_score` lenience is an open
//! question spec §9 leaves to the implementer: a value that fails to parse
//! is logged and defaulted rather than rejected, since a cosmetic base
//! score should not sink an otherwise well-formed model.

use crate::error::ParseError;
use crate::event::Event;

use super::{Action, PoppedValue};

#[derive(Debug, Default)]
pub(crate) struct LearnerParamHandler {
    current_key: String,
    base_score: Option<f32>,
    num_class: Option<i32>,
    num_feature: Option<i32>,
}

impl LearnerParamHandler {
    pub(crate) fn handle(&mut self, event: Event<'_>) -> Result<Action, ParseError> {
        match event {
            Event::Key(key) => {
                self.current_key = key.to_owned();
                Ok(Action::Continue)
            }
            Event::String(s) => match self.current_key.as_str() {
                "base_score" => {
                    self.base_score = Some(match s.parse::<f32>() {
                        Ok(v) => v,
                        Err(_) => {
                            log::warn!(
                                "learner_model_param.base_score {s:?} is not a decimal number, defaulting to 0.0"
                            );
                            0.0
                        }
                    });
                    Ok(Action::Continue)
                }
                "num_class" => {
                    let n: i32 = s.parse().map_err(|_| {
                        ParseError::schema(format!("num_class is not an integer: {s:?}"))
                    })?;
                    self.num_class = Some(n);
                    Ok(Action::Continue)
                }
                "num_feature" => {
                    let n: i32 = s.parse().map_err(|_| {
                        ParseError::schema(format!("num_feature is not an integer: {s:?}"))
                    })?;
                    self.num_feature = Some(n);
                    Ok(Action::Continue)
                }
                other => Err(ParseError::schema(format!(
                    "unexpected key in learner_model_param: {other}"
                ))),
            },
            Event::EndObject(_) => {
                let base_score = self
                    .base_score
                    .ok_or_else(|| ParseError::schema("learner_model_param missing base_score"))?;
                Ok(Action::Pop(PoppedValue::LearnerParam {
                    base_score,
                    num_class: self.num_class.unwrap_or(1).max(1),
                    num_feature: self.num_feature.unwrap_or(0),
                }))
            }
            other => Err(ParseError::schema(format!(
                "unexpected event in learner_model_param: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn param(events: &[Event<'_>]) -> (f32, i32, i32) {
        let mut h = LearnerParamHandler::default();
        for e in events {
            h.handle(e.clone()).unwrap();
        }
        match h.handle(Event::EndObject(events.len() / 2)).unwrap() {
            Action::Pop(PoppedValue::LearnerParam {
                base_score,
                num_class,
                num_feature,
            }) => (base_score, num_class, num_feature),
            _ => panic!("expected a LearnerParam"),
        }
    }

    #[test]
    fn reads_decimal_strings() {
        let (base_score, num_class, num_feature) = param(&[
            Event::Key("base_score"),
            Event::String("0.5"),
            Event::Key("num_class"),
            Event::String("3"),
            Event::Key("num_feature"),
            Event::String("10"),
        ]);
        assert_eq!(base_score, 0.5);
        assert_eq!(num_class, 3);
        assert_eq!(num_feature, 10);
    }

    #[test]
    fn num_class_zero_is_coerced_to_one() {
        let (_, num_class, _) = param(&[
            Event::Key("base_score"),
            Event::String("0.5"),
            Event::Key("num_class"),
            Event::String("0"),
        ]);
        assert_eq!(num_class, 1);
    }

    #[test]
    fn unparseable_base_score_defaults_rather_than_fails() {
        let (base_score, _, _) = param(&[Event::Key("base_score"), Event::String("not-a-number")]);
        assert_eq!(base_score, 0.0);
    }

    #[test]
    fn unrecognized_key_fails() {
        let mut h = LearnerParamHandler::default();
        h.handle(Event::Key("num_target")).unwrap();
        let err = h.handle(Event::String("1")).unwrap_err();
        assert!(err.to_string().contains("num_target"));
    }
}
