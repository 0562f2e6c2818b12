//! Prediction-transform selection keyed by objective name (spec §4.11).
//!
//! Spec §1 scopes the selection *logic* out ("only the call site is
//! specified"); generalized here from the teacher's own `Objective` enum
//! (`reg:squarederror`, `binary:logistic`, catch-all `Other`) into a small
//! real table, since a call site with nothing behind it isn't testable.

use crate::model::PredTransform;

pub(crate) fn select(objective: &str) -> PredTransform {
    match objective {
        "reg:squarederror" | "reg:squaredlogerror" | "reg:linear" | "reg:pseudohubererror" => {
            PredTransform::Identity
        }
        "binary:logistic" | "binary:logitraw" => PredTransform::Sigmoid,
        "multi:softprob" | "multi:softmax" => PredTransform::SoftMax,
        other => PredTransform::Unrecognized(other.to_owned()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn recognizes_documented_objectives() {
        assert_eq!(select("reg:squarederror"), PredTransform::Identity);
        assert_eq!(select("binary:logistic"), PredTransform::Sigmoid);
        assert_eq!(select("multi:softprob"), PredTransform::SoftMax);
    }

    #[test]
    fn carries_unknown_objectives_through() {
        assert_eq!(
            select("rank:pairwise"),
            PredTransform::Unrecognized("rank:pairwise".to_owned())
        );
    }
}
