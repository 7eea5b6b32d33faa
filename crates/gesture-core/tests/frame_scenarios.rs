use gesturemouse_gesture_core::drag::DragState;
use gesturemouse_gesture_core::FrameInterpreter;
use gesturemouse_hand_model::{
    HandFrame, HandLandmarks, Landmark, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
    PINKY_TIP, RING_PIP, RING_TIP, THUMB_TIP,
};
use gesturemouse_hand_model::PointerCommand::{self, *};
use gesturemouse_platform_core::{CursorPosition, ScreenSize};

const MS: u64 = 1_000_000;
const FRAME: u64 = 33 * MS;

/// A hand with the given fingers extended and the thumb tucked away from
/// every fingertip.
fn posture(index: bool, middle: bool, ring: bool, pinky: bool) -> HandLandmarks {
    let tip_y = |up: bool| if up { 0.30 } else { 0.70 };
    HandLandmarks::default()
        .with(THUMB_TIP, Landmark::new(0.10, 0.95))
        .with(INDEX_TIP, Landmark::new(0.40, tip_y(index)))
        .with(INDEX_PIP, Landmark::new(0.40, 0.50))
        .with(MIDDLE_TIP, Landmark::new(0.46, tip_y(middle)))
        .with(MIDDLE_PIP, Landmark::new(0.46, 0.50))
        .with(RING_TIP, Landmark::new(0.52, tip_y(ring)))
        .with(RING_PIP, Landmark::new(0.52, 0.50))
        .with(PINKY_TIP, Landmark::new(0.58, tip_y(pinky)))
        .with(PINKY_PIP, Landmark::new(0.58, 0.50))
}

fn fist() -> HandFrame {
    HandFrame::Present(posture(false, false, false, false))
}

fn open_hand() -> HandFrame {
    HandFrame::Present(posture(true, true, true, true))
}

/// Open hand with the thumb touching the index tip.
fn pinch() -> HandFrame {
    let hand = posture(true, true, true, true);
    let index = hand.index_tip();
    HandFrame::Present(hand.with(THUMB_TIP, Landmark::new(index.x + 0.02, index.y)))
}

/// Open hand with the thumb touching the pinky tip.
fn pinky_pinch() -> HandFrame {
    let hand = posture(true, true, true, true);
    let pinky = hand.pinky_tip();
    HandFrame::Present(hand.with(THUMB_TIP, Landmark::new(pinky.x, pinky.y + 0.02)))
}

fn interpreter() -> FrameInterpreter {
    FrameInterpreter::new(
        ScreenSize::new(1920, 1080),
        CursorPosition::new(960.0, 540.0),
        0,
    )
}

fn feed(interp: &mut FrameInterpreter, frames: &[(u64, HandFrame)]) -> Vec<Vec<PointerCommand>> {
    frames
        .iter()
        .map(|(t, frame)| interp.process(frame, *t).commands)
        .collect()
}

#[test]
fn fist_fist_open_presses_then_releases() {
    let mut interp = interpreter();
    let out = feed(
        &mut interp,
        &[(0, fist()), (FRAME, fist()), (2 * FRAME, open_hand())],
    );
    assert_eq!(out, vec![vec![MouseDown], vec![], vec![MouseUp]]);
    assert_eq!(interp.drag_state(), DragState::Released);
}

#[test]
fn ambiguous_hand_shapes_hold_drag_state() {
    let mut interp = interpreter();
    let ambiguous = [
        posture(true, false, false, false),
        posture(true, true, true, false),
        posture(false, true, false, true),
    ];

    for (i, hand) in ambiguous.iter().enumerate() {
        let out = interp.process(&HandFrame::Present(*hand), i as u64 * FRAME);
        assert!(out.commands.is_empty());
    }
    assert_eq!(interp.drag_state(), DragState::Released);

    let mut t = 10 * FRAME;
    assert_eq!(interp.process(&fist(), t).commands, vec![MouseDown]);
    for hand in &ambiguous {
        t += FRAME;
        assert!(interp.process(&HandFrame::Present(*hand), t).commands.is_empty());
    }
    assert_eq!(interp.drag_state(), DragState::Dragging);
}

#[test]
fn lost_tracking_releases_drag_within_one_frame_of_timeout() {
    let mut interp = interpreter();
    assert_eq!(interp.process(&fist(), 0).commands, vec![MouseDown]);

    let mut releases = Vec::new();
    let mut t = 0;
    while t <= 400 * MS + FRAME {
        t += FRAME;
        let outcome = interp.process(&HandFrame::Absent, t);
        if outcome.safety_release {
            releases.push((t, outcome.commands));
        }
    }

    assert_eq!(releases.len(), 1);
    let (at, commands) = &releases[0];
    assert_eq!(commands, &vec![MouseUp]);
    assert!(*at > 400 * MS && *at <= 400 * MS + FRAME);
}

#[test]
fn steady_hand_keeps_drag_alive() {
    let mut interp = interpreter();
    for i in 0..60 {
        interp.process(&fist(), i * FRAME);
    }
    assert_eq!(interp.drag_state(), DragState::Dragging);
    assert_eq!(interp.safety().releases(), 0);
}

#[test]
fn repeated_pinch_and_pinky_pinch_respect_shared_cooldown() {
    let mut interp = interpreter();
    let out = feed(
        &mut interp,
        &[
            (0, pinch()),
            (100 * MS, open_hand()),
            (300 * MS, pinch()),
            (400 * MS, pinky_pinch()),
            (700 * MS, pinky_pinch()),
        ],
    );

    let actions: Vec<PointerCommand> = out.into_iter().flatten().collect();
    assert_eq!(actions, vec![Click, RightClick]);
}

#[test]
fn scroll_grip_scrolls_vertically_when_offset_is_mostly_vertical() {
    let hand = posture(true, false, false, false);
    let index = hand.index_tip();
    // index minus thumb is roughly (0.01, 0.051)
    let thumb = Landmark::new(index.x - 0.01, index.y - 0.051);
    let frame = HandFrame::Present(hand.with(THUMB_TIP, thumb));

    let mut interp = interpreter();
    let out = interp.process(&frame, 0).commands;
    assert_eq!(out, vec![Click, Scroll { amount: -6 }]);
}

#[test]
fn double_click_pause_keeps_safety_monitor_and_drag_alive() {
    let mut interp = interpreter();
    assert_eq!(interp.process(&fist(), 0).commands, vec![MouseDown]);

    // index and middle close together while pointing
    let hand = posture(true, true, false, false).with(MIDDLE_TIP, Landmark::new(0.41, 0.30));
    let together = HandFrame::Present(hand);

    let first = interp.process(&together, FRAME);
    assert_eq!(first.commands.last(), Some(&DoubleClick));

    // inside the pause: nothing is dispatched, but sightings still count
    let mut t = FRAME;
    while t < FRAME + 400 * MS {
        t += FRAME;
        let outcome = interp.process(&together, t);
        if t - FRAME <= 400 * MS {
            assert!(outcome.suppressed);
            assert!(outcome.commands.is_empty());
        }
    }
    assert_eq!(interp.drag_state(), DragState::Dragging);
    assert_eq!(interp.safety().releases(), 0);

    // tracking loss during a pause still releases the drag
    let outcome = interp.process(&HandFrame::Absent, t + 401 * MS);
    assert_eq!(outcome.commands, vec![MouseUp]);
}
