//! The tokenizer-to-event bridge (spec §1: "an off-the-shelf JSON
//! tokenizer is in scope; writing one is not"). `EventPump` rides
//! `serde_json`'s `Deserializer`/`Visitor` protocol purely as a pull
//! parser: every scalar it visits and every container boundary it opens
//! or closes is translated into one [`Event`] and forwarded to the
//! [`Dispatcher`], which does the actual interpreting. No `Value` tree is
//! ever materialized.

use std::fs::File;
use std::io::Read as _;
use std::path::Path;

use serde::de::{DeserializeSeed, Deserializer as _, Error as _, MapAccess, SeqAccess, Visitor};

use crate::dispatcher::Dispatcher;
use crate::error::ParseError;
use crate::event::Event;
use crate::model::Ensemble;

struct EventPump<'d> {
    dispatcher: &'d mut Dispatcher,
}

/// Forward one event to the dispatcher, converting a structured
/// [`ParseError`] into whatever error type the calling `Deserializer`
/// needs, and stashing the original so the top-level caller can recover
/// it once `serde_json` has unwound.
fn forward<'d, E: serde::de::Error>(dispatcher: &'d mut Dispatcher, event: Event<'_>) -> Result<(), E> {
    match dispatcher.handle(event) {
        Ok(()) => Ok(()),
        Err(err) => {
            let message = err.to_string();
            dispatcher.stash_error(err);
            Err(E::custom(message))
        }
    }
}

impl<'de, 'd> DeserializeSeed<'de> for EventPump<'d> {
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<(), D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'd> Visitor<'de> for EventPump<'d> {
    type Value = ();

    fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_unit<E>(self) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        forward(self.dispatcher, Event::Null)
    }

    fn visit_bool<E>(self, v: bool) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        forward(self.dispatcher, Event::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        let event = match i32::try_from(v) {
            Ok(v32) => Event::Int(v32),
            Err(_) => Event::Int64(v),
        };
        forward(self.dispatcher, event)
    }

    fn visit_u64<E>(self, v: u64) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        let event = match u32::try_from(v) {
            Ok(v32) => Event::Uint(v32),
            Err(_) => Event::Uint64(v),
        };
        forward(self.dispatcher, event)
    }

    fn visit_f64<E>(self, v: f64) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        forward(self.dispatcher, Event::Double(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        forward(self.dispatcher, Event::String(v))
    }

    fn visit_string<E>(self, v: String) -> Result<(), E>
    where
        E: serde::de::Error,
    {
        forward(self.dispatcher, Event::String(&v))
    }

    fn visit_map<A>(self, mut map: A) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        forward(self.dispatcher, Event::StartObject)?;
        let mut count = 0usize;
        while let Some(key) = map.next_key::<String>()? {
            forward(self.dispatcher, Event::Key(&key))?;
            map.next_value_seed(EventPump {
                dispatcher: &mut *self.dispatcher,
            })?;
            count += 1;
        }
        forward(self.dispatcher, Event::EndObject(count))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<(), A::Error>
    where
        A: SeqAccess<'de>,
    {
        forward(self.dispatcher, Event::StartArray)?;
        let mut count = 0usize;
        while seq
            .next_element_seed(EventPump {
                dispatcher: &mut *self.dispatcher,
            })?
            .is_some()
        {
            count += 1;
        }
        forward(self.dispatcher, Event::EndArray(count))
    }
}

/// Pump a single serde `Deserializer` through the dispatcher, recovering
/// the structured [`ParseError`] stashed during the pump if the pump
/// aborted partway through.
fn pump<'de, D>(deserializer: D, dispatcher: &mut Dispatcher) -> Result<(), ParseError>
where
    D: serde::de::Deserializer<'de, Error = serde_json::Error>,
{
    let pump = EventPump { dispatcher };
    match DeserializeSeed::deserialize(pump, deserializer) {
        Ok(()) => Ok(()),
        Err(json_err) => Err(dispatcher.take_pending_error().unwrap_or_else(|| {
            ParseError::MalformedJson {
                line: json_err.line(),
                column: json_err.column(),
                source: json_err,
            }
        })),
    }
}

/// Test-only entry point that pumps a `serde_json::Value` already parsed
/// into memory through the dispatcher. Production parsing always streams
/// from bytes via [`parse_slice`]/[`parse_reader`]; this exists only so
/// handler unit tests can build input with `serde_json::json!` instead of
/// formatting literal JSON text.
#[cfg(test)]
pub(crate) fn pump_value(value: &serde_json::Value, dispatcher: &mut Dispatcher) -> Result<(), ParseError> {
    pump(value, dispatcher)
}

fn finish(dispatcher: &mut Dispatcher) -> Result<Ensemble, ParseError> {
    dispatcher
        .get_result()
        .ok_or_else(|| ParseError::schema("document ended without producing a model"))
}

/// Parse an XGBoost JSON model dump from an in-memory byte slice.
pub fn parse_slice(bytes: &[u8]) -> anyhow::Result<Ensemble> {
    use anyhow::Context;

    let mut de = serde_json::Deserializer::from_slice(bytes);
    let mut dispatcher = Dispatcher::new();
    pump(&mut de, &mut dispatcher).context("failed to parse XGBoost JSON model")?;
    finish(&mut dispatcher).context("failed to parse XGBoost JSON model")
}

/// Parse an XGBoost JSON model dump, streaming it from `reader` without
/// materializing the whole document in memory first.
pub fn parse_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Ensemble> {
    use anyhow::Context;

    let mut de = serde_json::Deserializer::from_reader(reader);
    let mut dispatcher = Dispatcher::new();
    pump(&mut de, &mut dispatcher).context("failed to parse XGBoost JSON model")?;
    finish(&mut dispatcher).context("failed to parse XGBoost JSON model")
}

/// Parse an XGBoost JSON model dump from a file on disk.
pub fn load_file(path: impl AsRef<Path>) -> anyhow::Result<Ensemble> {
    use anyhow::Context;

    let path = path.as_ref();
    let mut file = File::open(path).map_err(|source| ParseError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|source| ParseError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
    parse_slice(&bytes).with_context(|| format!("failed to parse XGBoost model at {}", path.display()))
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn minimal_model() -> serde_json::Value {
        json!({
            "version": [1, 7, 0],
            "learner": {
                "learner_model_param": {
                    "base_score": "0.5",
                    "num_class": "0",
                    "num_feature": "2"
                },
                "gradient_booster": {
                    "name": "gbtree",
                    "model": {
                        "gbtree_model_param": {"num_trees": "1", "num_parallel_tree": "1"},
                        "tree_info": [0],
                        "trees": [
                            {
                                "tree_param": {"num_nodes": "1", "num_feature": "2", "size_leaf_vector": "0"},
                                "id": 0,
                                "loss_changes": [0.0],
                                "sum_hessian": [4.0],
                                "base_weights": [0.0],
                                "leaf_child_counts": [0],
                                "left_children": [-1],
                                "right_children": [-1],
                                "parents": [-1],
                                "split_indices": [0],
                                "split_conditions": [0.2],
                                "default_left": [false],
                                "categories": [],
                                "categories_nodes": [],
                                "categories_segments": [],
                                "categories_sizes": [],
                                "split_type": [0]
                            }
                        ]
                    }
                },
                "objective": {"name": "binary:logistic"},
                "attributes": {}
            }
        })
    }

    #[test]
    fn parses_a_minimal_model_end_to_end() {
        let doc = minimal_model();
        let bytes = serde_json::to_vec(&doc).unwrap();
        let ensemble = parse_slice(&bytes).unwrap();

        assert_eq!(ensemble.trees.len(), 1);
        assert_eq!(ensemble.param.num_output_group, 1);
        assert_eq!(ensemble.param.num_feature, 2);
        assert!(!ensemble.param.random_forest_flag);
        // version[0] == 1, so base_score went through the margin transform.
        assert!((ensemble.param.global_bias - 0.0).abs() < 1e-6);
    }

    #[test]
    fn pre_one_dot_oh_version_keeps_base_score_as_is() {
        let mut doc = minimal_model();
        doc["version"] = json!([0, 90, 0]);
        let bytes = serde_json::to_vec(&doc).unwrap();
        let ensemble = parse_slice(&bytes).unwrap();

        assert_eq!(ensemble.param.global_bias, 0.5);
    }

    #[test]
    fn unsupported_booster_fails() {
        let mut doc = minimal_model();
        doc["learner"]["gradient_booster"]["name"] = json!("gblinear");
        let bytes = serde_json::to_vec(&doc).unwrap();
        let err = parse_slice(&bytes).unwrap_err();
        assert!(err.to_string().contains("gblinear") || err.to_string().contains("gbtree"));
    }

    #[test]
    fn missing_version_fails_member_count_check() {
        let mut doc = minimal_model();
        doc.as_object_mut().unwrap().remove("version");
        let bytes = serde_json::to_vec(&doc).unwrap();
        let err = parse_slice(&bytes).unwrap_err();
        assert!(err.to_string().contains("2 members"));
    }

    #[test]
    fn malformed_json_is_reported_with_position() {
        let err = parse_slice(b"{\"version\": [1, ").unwrap_err();
        assert!(err.to_string().contains("line"));
    }
}
