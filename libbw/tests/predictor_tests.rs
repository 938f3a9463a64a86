//! Predictor and codec state tests for bw
use libbw_audio::codec::{ActivityTracker, CodecState, Predictor};
use libbw_audio::core::range_coder::RangeEncoder;
use libbw_audio::core::types::{INITIAL_WEIGHTS, NUM_TAPS, WEIGHT_LIMIT};
use proptest::prelude::*;

#[test]
fn test_prediction_tracks_history() {
    let mut p = Predictor::new();
    for _ in 0..NUM_TAPS {
        p.push(100);
    }
    let expected = (100 * INITIAL_WEIGHTS.iter().sum::<i32>()) >> 12;
    assert_eq!(p.predict(), expected);
}

#[test]
fn test_quiet_stream_stays_in_quiet_context() {
    let mut encoder = RangeEncoder::new();
    let mut state = CodecState::new();
    for _ in 0..500 {
        assert_eq!(state.context(), 0);
        state.encode_sample(&mut encoder, 10);
    }
}

#[test]
fn test_loud_transient_raises_context() {
    let mut encoder = RangeEncoder::new();
    let mut state = CodecState::new();
    state.encode_sample(&mut encoder, 0);
    state.encode_sample(&mut encoder, 20_000);
    // |residual| of ~312 buckets against a running average of ~30
    assert_eq!(state.context(), 3);
    assert!(state.avg_mag() > 30.0);
}

#[test]
fn test_commit_updates_prev_q_and_history() {
    let mut state = CodecState::new();
    state.commit(7, 0);
    assert_eq!(state.prev_q(), 7);
    assert_eq!(state.history()[0], 7);
    assert_eq!(state.prev_mag(), 7);

    let pred = state.predict();
    state.commit(3, pred);
    assert_eq!(state.prev_q(), 7 + 3 - pred);
    assert_eq!(state.history()[..2], [3 - pred, 7]);
}

#[test]
fn test_activity_tracker_default() {
    let a = ActivityTracker::default();
    assert_eq!(a.context(), 0);
    assert_eq!(a.prev_mag(), 0);
}

proptest! {
    #[test]
    fn prop_weights_stay_bounded(
        ops in prop::collection::vec((-2000i32..2000, -2000i32..2000), 0..5000)
    ) {
        let mut p = Predictor::new();
        for (delta, err) in ops {
            p.adapt(err);
            p.push(delta);
            prop_assert!(p.weights().iter().all(|w| w.abs() <= WEIGHT_LIMIT));
        }
    }

    #[test]
    fn prop_state_weights_bounded(samples in prop::collection::vec(any::<i16>(), 0..3000)) {
        let mut encoder = RangeEncoder::new();
        let mut state = CodecState::new();
        for s in samples {
            state.encode_sample(&mut encoder, s);
            prop_assert!(state.weights().iter().all(|w| w.abs() <= WEIGHT_LIMIT));
            prop_assert!(state.avg_mag() >= 1.0);
        }
    }
}
