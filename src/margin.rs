//! The XGBoost≥1.0 base-score-to-margin transform (spec §4.12, §8 scenario 1).
//!
//! Spec §6 lists this as consumed from the destination library rather than
//! specified here; §8 pins its behavior down precisely enough
//! (`margin_transform(0.5) == 0.0`) that there is only one formula it can
//! be — XGBoost's own logit of the base score.

/// Maps a raw `base_score` (a probability in `(0, 1)` for the logistic
/// objectives this format was designed for) into margin space.
pub(crate) fn base_score_to_margin(base_score: f32) -> f32 {
    -((1.0 / base_score - 1.0).ln())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn midpoint_maps_to_zero_margin() {
        assert!((base_score_to_margin(0.5) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn is_monotonic_increasing() {
        assert!(base_score_to_margin(0.6) > base_score_to_margin(0.5));
        assert!(base_score_to_margin(0.4) < base_score_to_margin(0.5));
    }
}
