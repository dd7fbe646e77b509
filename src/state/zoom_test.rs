use super::*;
use crate::state::test_helpers;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn active(x: f64, y: f64) -> ZoomSample {
    ZoomSample { x_percent: x, y_percent: y, active: true }
}

#[test]
fn inactive_sample_hides_magnifier() {
    let m = Magnifier::default();
    let record = test_helpers::record("abc");
    assert!(m.viewport(&record, &ZoomSample::default()).is_none());
}

#[test]
fn background_scales_by_zoom_factor_keeping_aspect() {
    let m = Magnifier::default();
    // 4000x3000 record: aspect 4:3.
    let record = test_helpers::record("abc");
    let vp = m.viewport(&record, &active(0.0, 0.0)).unwrap();
    assert!(approx(vp.background_size.0, 1200.0));
    assert!(approx(vp.background_size.1, 900.0));
}

#[test]
fn top_left_sample_has_zero_offset() {
    let m = Magnifier::default();
    let vp = m.viewport(&test_helpers::record("abc"), &active(0.0, 0.0)).unwrap();
    assert!(approx(vp.offset.0, 0.0));
    assert!(approx(vp.offset.1, 0.0));
    assert_eq!(vp.source_pixel, (0, 0));
}

#[test]
fn center_sample_centers_background() {
    let m = Magnifier::default();
    let vp = m.viewport(&test_helpers::record("abc"), &active(50.0, 50.0)).unwrap();
    // (400 - 1200) / 2, (300 - 900) / 2
    assert!(approx(vp.offset.0, -400.0));
    assert!(approx(vp.offset.1, -300.0));
    assert_eq!(vp.position_percent, (50.0, 50.0));
    assert_eq!(vp.source_pixel, (2000, 1500));
}

#[test]
fn bottom_right_sample_aligns_far_edges() {
    let m = Magnifier::default();
    let vp = m.viewport(&test_helpers::record("abc"), &active(100.0, 100.0)).unwrap();
    assert!(approx(vp.offset.0, -800.0));
    assert!(approx(vp.offset.1, -600.0));
    assert_eq!(vp.source_pixel, (3999, 2999));
}

#[test]
fn percent_of_converts_offsets() {
    assert!(approx(percent_of(50.0, 200.0), 25.0));
    assert!(approx(percent_of(200.0, 200.0), 100.0));
    assert!(approx(percent_of(10.0, 0.0), 0.0));
}
