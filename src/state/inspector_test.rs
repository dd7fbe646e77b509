use super::*;
use crate::state::test_helpers;

fn open_on(id: &str) -> InspectorState {
    let mut s = InspectorState::default();
    s.open(test_helpers::record(id)).unwrap();
    s
}

// =============================================================================
// open / close
// =============================================================================

#[test]
fn default_is_closed_without_selection_or_sample() {
    let s = InspectorState::default();
    assert_eq!(s.phase(), InspectorPhase::Closed);
    assert!(s.selection().is_none());
    assert!(s.zoom().is_none());
}

#[test]
fn open_selects_record_idle() {
    let s = open_on("abc");
    assert_eq!(s.phase(), InspectorPhase::Idle);
    assert_eq!(s.selection().map(|r| r.id.as_str()), Some("abc"));
    assert_eq!(s.zoom(), Some(ZoomSample::default()));
}

#[test]
fn open_while_open_is_rejected() {
    let mut s = open_on("abc");
    let err = s.open(test_helpers::record("def")).unwrap_err();
    assert_eq!(err, InspectorError::InvalidTransition { event: "open", phase: InspectorPhase::Idle });
    assert_eq!(s.selection().map(|r| r.id.as_str()), Some("abc"));
}

#[test]
fn open_then_close_restores_pre_open_condition() {
    let before = InspectorState::default();
    let mut s = before.clone();
    s.open(test_helpers::record("abc")).unwrap();
    s.close();
    assert_eq!(s, before);
}

#[test]
fn close_while_zooming_clears_everything() {
    let mut s = open_on("abc");
    s.pointer_move(40.0, 60.0).unwrap();
    s.close();
    assert_eq!(s, InspectorState::Closed);
    assert!(s.zoom().is_none());
}

#[test]
fn close_when_closed_is_noop() {
    let mut s = InspectorState::default();
    s.close();
    assert_eq!(s.phase(), InspectorPhase::Closed);
}

// =============================================================================
// pointer events
// =============================================================================

#[test]
fn pointer_enter_starts_zooming() {
    let mut s = open_on("abc");
    s.pointer_enter().unwrap();
    assert_eq!(s.phase(), InspectorPhase::Zooming);
    assert_eq!(s.zoom(), Some(ZoomSample { x_percent: 0.0, y_percent: 0.0, active: true }));
}

#[test]
fn pointer_move_stores_position() {
    let mut s = open_on("abc");
    s.pointer_enter().unwrap();
    s.pointer_move(25.5, 75.0).unwrap();
    assert_eq!(s.zoom(), Some(ZoomSample { x_percent: 25.5, y_percent: 75.0, active: true }));
}

#[test]
fn pointer_move_while_idle_enters_zooming() {
    let mut s = open_on("abc");
    s.pointer_move(50.0, 50.0).unwrap();
    assert_eq!(s.phase(), InspectorPhase::Zooming);
    assert_eq!(s.zoom(), Some(ZoomSample { x_percent: 50.0, y_percent: 50.0, active: true }));
}

#[test]
fn pointer_move_clamps_out_of_range() {
    let mut s = open_on("abc");
    s.pointer_enter().unwrap();
    s.pointer_move(-5.0, 150.0).unwrap();
    let zoom = s.zoom().unwrap();
    assert!((zoom.x_percent - 0.0).abs() < f64::EPSILON);
    assert!((zoom.y_percent - 100.0).abs() < f64::EPSILON);
}

#[test]
fn pointer_move_non_finite_is_clamped() {
    let mut s = open_on("abc");
    s.pointer_move(f64::NAN, f64::INFINITY).unwrap();
    let zoom = s.zoom().unwrap();
    assert!((zoom.x_percent - 0.0).abs() < f64::EPSILON);
    assert!((zoom.y_percent - 100.0).abs() < f64::EPSILON);
}

#[test]
fn pointer_leave_resets_after_any_moves() {
    let mut s = open_on("abc");
    s.pointer_enter().unwrap();
    for (x, y) in [(10.0, 20.0), (99.0, 1.0), (-3.0, 250.0), (50.0, 50.0)] {
        s.pointer_move(x, y).unwrap();
    }
    s.pointer_leave().unwrap();
    assert_eq!(s.phase(), InspectorPhase::Idle);
    assert_eq!(s.zoom(), Some(ZoomSample { x_percent: 0.0, y_percent: 0.0, active: false }));
}

#[test]
fn pointer_events_while_closed_are_rejected() {
    let mut s = InspectorState::default();
    assert!(matches!(s.pointer_enter(), Err(InspectorError::InvalidTransition { event: "pointer_enter", .. })));
    assert!(matches!(s.pointer_move(1.0, 1.0), Err(InspectorError::InvalidTransition { .. })));
    assert!(matches!(s.pointer_leave(), Err(InspectorError::InvalidTransition { .. })));
    assert_eq!(s, InspectorState::Closed);
}

// =============================================================================
// download
// =============================================================================

#[test]
fn download_request_uses_source_url_and_author() {
    let s = open_on("abc");
    let req = s.download_request().unwrap();
    assert_eq!(req.source_url, "https://picsum.photos/id/abc/4000/3000");
    assert_eq!(req.filename, "Image_by_Author abc.jpg");
}

#[test]
fn download_request_keeps_zoom_state() {
    let mut s = open_on("abc");
    s.pointer_move(30.0, 40.0).unwrap();
    let before = s.clone();
    s.download_request().unwrap();
    assert_eq!(s, before);
}

#[test]
fn download_request_when_closed_is_rejected() {
    let s = InspectorState::default();
    let err = s.download_request().unwrap_err();
    assert_eq!(err, InspectorError::InvalidTransition { event: "download", phase: InspectorPhase::Closed });
}

#[test]
fn download_filename_replaces_path_separators() {
    assert_eq!(download_filename("Alejandro Escamilla"), "Image_by_Alejandro Escamilla.jpg");
    assert_eq!(download_filename("a/b\\c:d"), "Image_by_a_b_c_d.jpg");
    assert_eq!(download_filename("  padded  "), "Image_by_padded.jpg");
}
