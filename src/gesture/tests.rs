use super::testing::HandBuilder;
use super::*;

fn recognizer() -> GestureRecognizer {
    GestureRecognizer::new(RecognizerOptions::default())
}

fn feed(recognizer: &mut GestureRecognizer, gesture: GestureType, frames: usize) -> Vec<Recognition> {
    let hand = HandBuilder::pose(gesture).build();
    (0..frames)
        .map(|_| recognizer.recognize_gesture(&hand, None))
        .collect()
}

#[test]
fn test_each_pose_is_classified() {
    for gesture in GestureType::RECOGNIZABLE {
        let mut rec = recognizer();
        let first = feed(&mut rec, gesture, 1)[0];
        assert_eq!(first.gesture, gesture, "pose for {gesture}");
        assert!(first.confidence >= 0.75, "{gesture}: {}", first.confidence);
    }
}

#[test]
fn test_unknown_pose_is_none() {
    let mut rec = recognizer();
    let result = feed(&mut rec, GestureType::None, 1)[0];
    assert_eq!(result.gesture, GestureType::None);
    assert_eq!(result.state, GestureState::None);
}

#[test]
fn test_fist_held_four_frames_fires_clear_on_third() {
    let mut rec = recognizer();
    let states: Vec<_> = feed(&mut rec, GestureType::Clear, 4)
        .into_iter()
        .map(|r| (r.gesture, r.state))
        .collect();
    assert_eq!(
        states,
        vec![
            (GestureType::Clear, GestureState::InProgress),
            (GestureType::Clear, GestureState::InProgress),
            (GestureType::Clear, GestureState::Completed),
            (GestureType::None, GestureState::None),
        ]
    );
}

#[test]
fn test_clear_held_for_window_fires_exactly_once() {
    let mut rec = recognizer();
    let mut results = feed(&mut rec, GestureType::Clear, 3);
    results.extend(feed(&mut rec, GestureType::Clear, 20));
    let fired = results
        .iter()
        .filter(|r| r.fired(GestureType::Clear))
        .count();
    assert_eq!(fired, 1);
}

#[test]
fn test_draw_reports_in_progress_every_frame() {
    let mut rec = recognizer();
    for result in feed(&mut rec, GestureType::Draw, 12) {
        assert_eq!(result.gesture, GestureType::Draw);
        assert_eq!(result.state, GestureState::InProgress);
    }
}

#[test]
fn test_pose_change_rearms_gesture() {
    let mut rec = recognizer();
    feed(&mut rec, GestureType::Undo, 3);
    assert_eq!(rec.last_fired(), Some(GestureType::Undo));

    feed(&mut rec, GestureType::None, 1);
    assert_eq!(rec.last_fired(), None);

    let again = feed(&mut rec, GestureType::Undo, 3);
    assert!(again[2].fired(GestureType::Undo));
}

#[test]
fn test_interrupted_hold_restarts_count() {
    let mut rec = recognizer();
    feed(&mut rec, GestureType::Save, 2);
    feed(&mut rec, GestureType::None, 1);
    let results = feed(&mut rec, GestureType::Save, 2);
    assert!(results.iter().all(|r| r.state == GestureState::InProgress));
}

#[test]
fn test_low_confidence_reports_none() {
    let mut rec = GestureRecognizer::new(RecognizerOptions {
        detection_threshold: 0.999,
        ..RecognizerOptions::default()
    });
    let hand = HandBuilder::pose(GestureType::Select).build();
    let result = rec.recognize_gesture(&hand, None);
    assert_eq!(result.gesture, GestureType::None);
    assert!(result.confidence > 0.9 && result.confidence < 0.999);
}

#[test]
fn test_supplied_finger_state_overrides_geometry() {
    let mut rec = recognizer();
    let hand = HandBuilder::pose(GestureType::Draw).build();
    let redo_bits = FingerState([false, true, true, true, false]);
    let result = rec.recognize_gesture(&hand, Some(redo_bits));
    // Middle and ring are curled in the geometry, so the redo match scores low.
    assert_eq!(result.gesture, GestureType::None);
    assert!(result.confidence > 0.0 && result.confidence < 0.75);
}

#[test]
fn test_precedence_is_configurable() {
    // With the pinch threshold huge, the open hand also reads as a pinch.
    let open = HandBuilder::pose(GestureType::Save).build();

    let mut default_order = GestureRecognizer::new(RecognizerOptions {
        pinch_threshold: 10.0,
        ..RecognizerOptions::default()
    });
    assert_eq!(
        default_order.recognize_gesture(&open, None).gesture,
        GestureType::Select
    );

    let mut save_first = GestureRecognizer::new(RecognizerOptions {
        pinch_threshold: 10.0,
        precedence: vec![GestureType::Save],
        ..RecognizerOptions::default()
    });
    assert_eq!(
        save_first.recognize_gesture(&open, None).gesture,
        GestureType::Save
    );
}

#[test]
fn test_normalize_precedence_dedups_and_completes() {
    let order = normalize_precedence(&[
        GestureType::Save,
        GestureType::None,
        GestureType::Save,
        GestureType::Clear,
    ]);
    assert_eq!(order.len(), DEFAULT_PRECEDENCE.len());
    assert_eq!(order[0], GestureType::Save);
    assert_eq!(order[1], GestureType::Clear);
    assert_eq!(order[2], GestureType::Draw);
}

#[test]
fn test_hand_loss_drops_candidate() {
    let mut rec = recognizer();
    feed(&mut rec, GestureType::Redo, 2);
    let lost = rec.hand_lost();
    assert_eq!(lost.gesture, GestureType::None);
    assert_eq!(rec.history_len(), 0);

    let results = feed(&mut rec, GestureType::Redo, 2);
    assert!(results.iter().all(|r| r.state == GestureState::InProgress));
}

#[test]
fn test_latch_survives_short_dropout() {
    let mut rec = recognizer();
    feed(&mut rec, GestureType::Clear, 3);
    rec.hand_lost();
    rec.hand_lost();
    let results = feed(&mut rec, GestureType::Clear, 5);
    assert!(results.iter().all(|r| !r.fired(GestureType::Clear)));
}

#[test]
fn test_latch_released_after_missing_frames() {
    let mut rec = recognizer();
    feed(&mut rec, GestureType::Clear, 3);
    for _ in 0..5 {
        rec.hand_lost();
    }
    assert_eq!(rec.last_fired(), None);
    let results = feed(&mut rec, GestureType::Clear, 3);
    assert!(results[2].fired(GestureType::Clear));
}

#[test]
fn test_history_is_bounded() {
    let mut rec = recognizer();
    feed(&mut rec, GestureType::Draw, 100);
    assert_eq!(rec.history_len(), 30);
}

#[test]
fn test_debounce_window_of_one_fires_immediately() {
    let mut rec = GestureRecognizer::new(RecognizerOptions {
        debounce_frames: 0,
        ..RecognizerOptions::default()
    });
    assert_eq!(rec.options().debounce_frames, 1);
    assert!(feed(&mut rec, GestureType::ToolChange, 1)[0].fired(GestureType::ToolChange));
}

#[test]
fn test_recognition_is_scale_and_position_invariant() {
    let mut rec = recognizer();
    let hand = HandBuilder::pose(GestureType::Undo)
        .scale(2.5)
        .at(640.0, 500.0)
        .build();
    assert_eq!(rec.recognize_gesture(&hand, None).gesture, GestureType::Undo);
}
