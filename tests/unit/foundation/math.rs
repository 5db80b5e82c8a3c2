use super::*;

#[test]
fn lerp_hits_endpoints_exactly() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(4.0, -2.0);
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 0.0), a);
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 1.0), b);
    assert_eq!(<Point as Lerp>::lerp(&a, &b, 0.5), Point::new(2.5, 0.0));
}

#[test]
fn snap_only_touches_near_integers() {
    let mut t = 0.0;
    for _ in 0..60 {
        t += 1.0 / 60.0;
    }
    assert_eq!(snap_time(t), 1.0);
    assert_eq!(snap_time(0.5), 0.5);
    assert_eq!(snap_time(2.0 - 1e-6), 2.0 - 1e-6);
}

#[test]
fn clamp_handles_non_finite_and_bounds() {
    assert_eq!(clamp_time(f64::NAN, 4), 0.0);
    assert_eq!(clamp_time(f64::INFINITY, 4), 0.0);
    assert_eq!(clamp_time(-1.0, 4), 0.0);
    assert_eq!(clamp_time(9.0, 4), 4.0);
    assert_eq!(clamp_time(2.5, 4), 2.5);
}

#[test]
fn time_split_brackets_and_blends() {
    let s = TimeSplit::new(1.25, 3);
    assert_eq!((s.t0, s.t1), (1, 2));
    assert!((s.alpha - 0.25).abs() < 1e-12);
    assert!(!s.is_on_timestep());

    let s = TimeSplit::new(2.0, 3);
    assert_eq!((s.t0, s.t1, s.alpha), (2, 3, 0.0));
    assert!(s.is_on_timestep());

    let s = TimeSplit::new(3.0, 3);
    assert_eq!((s.t0, s.t1, s.alpha), (3, 3, 0.0));

    let s = TimeSplit::new(0.0, 0);
    assert_eq!((s.t0, s.t1, s.alpha), (0, 0, 0.0));
}
