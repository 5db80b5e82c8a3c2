use super::*;

const SMALL: &str = "type octile\nheight 2\nwidth 3\nmap\n..@\nT..\n";

#[test]
fn parses_movingai_layout() {
    let map = GridMap::parse(SMALL).unwrap();
    assert_eq!(map.width(), 3);
    assert_eq!(map.height(), 2);
    assert!(map.is_obstacle(Coordinate::new(2, 0)));
    assert!(map.is_obstacle(Coordinate::new(0, 1)));
    assert!(!map.is_obstacle(Coordinate::new(1, 1)));
    assert_eq!(
        map.obstacles(),
        vec![Coordinate::new(2, 0), Coordinate::new(0, 1)]
    );
}

#[test]
fn contains_checks_both_axes() {
    let map = GridMap::parse(SMALL).unwrap();
    assert!(map.contains(Coordinate::new(2, 1)));
    assert!(!map.contains(Coordinate::new(3, 0)));
    assert!(!map.contains(Coordinate::new(0, 2)));
}

#[test]
fn crlf_input_is_accepted() {
    let map = GridMap::parse(&SMALL.replace('\n', "\r\n")).unwrap();
    assert_eq!(map.width(), 3);
}

#[test]
fn height_mismatch_is_malformed() {
    let err = GridMap::parse("type octile\nheight 3\nwidth 3\nmap\n...\n...\n").unwrap_err();
    assert!(matches!(err, VisError::MalformedMap(_)));
    assert!(err.to_string().contains("check height"));
}

#[test]
fn width_mismatch_is_malformed() {
    let err = GridMap::parse("type octile\nheight 2\nwidth 3\nmap\n...\n....\n").unwrap_err();
    assert!(err.to_string().contains("check width"));
}

#[test]
fn short_or_garbled_header_is_malformed() {
    assert!(matches!(
        GridMap::parse("type octile\nheight 1\n"),
        Err(VisError::MalformedMap(_))
    ));
    assert!(matches!(
        GridMap::parse("type octile\nheight x\nwidth 1\nmap\n.\n"),
        Err(VisError::MalformedMap(_))
    ));
}

#[test]
fn new_rejects_obstacles_outside_grid() {
    assert!(GridMap::new(2, 2, [Coordinate::new(1, 1)]).is_ok());
    assert!(GridMap::new(2, 2, [Coordinate::new(2, 0)]).is_err());
}
