use super::*;

#[test]
fn parses_plain_and_prefixed_lines() {
    let s = Solution::parse("0:(0,0),(2,1),\n1:(1,0),(2,2),\n").unwrap();
    assert_eq!(s.agent_count(), 2);
    assert_eq!(s.last_timestep(), 1);
    assert!(!s.is_orientation_aware());
    assert_eq!(s.pose(1, 1), Pose::at(2, 2));
    assert_eq!(s.position(0, 1), Point::new(2.0, 1.0));
}

#[test]
fn parses_orientation_entries() {
    let s = Solution::parse("(0,0,X_PLUS),(1,1,Y_MINUS)\n(1,0,Y_PLUS),(1,1,X_MINUS)").unwrap();
    assert!(s.is_orientation_aware());
    assert_eq!(s.pose(0, 0).orientation, Orientation::XPlus);
    assert_eq!(s.pose(1, 1).orientation, Orientation::XMinus);
}

#[test]
fn tolerates_whitespace_inside_entries() {
    let s = Solution::parse("( 3 , 4 ), (5,6 , Y_PLUS )").unwrap();
    assert_eq!(s.pose(0, 0), Pose::at(3, 4));
    assert_eq!(
        s.pose(0, 1),
        Pose::new(Coordinate::new(5, 6), Orientation::YPlus)
    );
}

#[test]
fn empty_line_is_malformed_with_line_number() {
    let err = Solution::parse("(0,0)\nnothing here\n(1,1)").unwrap_err();
    assert!(matches!(err, VisError::MalformedSolution(_)));
    assert!(err.to_string().contains("line 2"));

    assert!(matches!(
        Solution::parse(""),
        Err(VisError::MalformedSolution(_))
    ));
}

#[test]
fn agent_count_must_be_constant() {
    let err = Solution::parse("(0,0),(1,1)\n(0,1)").unwrap_err();
    assert!(matches!(err, VisError::MalformedSolution(_)));

    let err = Solution::new(vec![vec![Pose::at(0, 0)], vec![]]).unwrap_err();
    assert!(matches!(err, VisError::MalformedSolution(_)));
}

#[test]
fn negative_coordinates_never_match() {
    assert!(Solution::parse("(-1,0)").is_err());
}

#[test]
fn bounds_are_checked_against_map() {
    let map = GridMap::new(3, 2, []).unwrap();
    let ok = Solution::parse("(0,0)\n(2,1)").unwrap();
    assert!(ok.validate_bounds(&map).is_ok());

    let bad = Solution::parse("(0,0)\n(3,1)").unwrap();
    let err = bad.validate_bounds(&map).unwrap_err();
    assert!(matches!(err, VisError::OutOfBoundsSolution(_)));
    assert!(err.to_string().contains("timestep 1"));

    let bad_y = Solution::parse("(0,2)").unwrap();
    assert!(bad_y.validate_bounds(&map).is_err());
}

#[test]
fn goals_are_final_positions() {
    let s = Solution::parse("(0,0),(5,5)\n(1,0),(5,4)\n(2,0),(5,3)").unwrap();
    assert_eq!(
        s.goals(),
        vec![Coordinate::new(2, 0), Coordinate::new(5, 3)]
    );
    assert_eq!(s.configuration(99), s.configuration(2));
}
