use super::*;

#[test]
fn orientation_angles_are_fixed() {
    assert_eq!(Orientation::None.angle(), 0.0);
    assert_eq!(Orientation::XPlus.angle(), 0.0);
    assert_eq!(Orientation::XMinus.angle(), PI);
    assert_eq!(Orientation::YMinus.angle(), -FRAC_PI_2);
    assert_eq!(Orientation::YPlus.angle(), FRAC_PI_2);
}

#[test]
fn orientation_tokens_round_trip_through_serde_names() {
    for (token, o) in [
        ("X_MINUS", Orientation::XMinus),
        ("X_PLUS", Orientation::XPlus),
        ("Y_MINUS", Orientation::YMinus),
        ("Y_PLUS", Orientation::YPlus),
    ] {
        assert_eq!(Orientation::from_token(token), o);
        assert_eq!(serde_json::to_string(&o).unwrap(), format!("\"{token}\""));
    }
    assert_eq!(Orientation::from_token("Z_PLUS"), Orientation::None);
}

#[test]
fn coordinate_is_a_set_key_by_value() {
    let mut set = std::collections::HashSet::new();
    set.insert(Coordinate::new(3, 4));
    assert!(set.contains(&Coordinate::new(3, 4)));
    assert!(!set.contains(&Coordinate::new(4, 3)));
    assert_eq!(Coordinate::new(3, 4).to_string(), "(3, 4)");
    assert_eq!(Coordinate::new(3, 4).to_point(), Point::new(3.0, 4.0));
}
