use super::*;
use std::f64::consts::{FRAC_PI_2, PI};

fn straight_line() -> Solution {
    Solution::parse("(0,0),(4,4)\n(1,0),(4,3)\n(2,0),(4,2)").unwrap()
}

#[test]
fn integer_times_return_exact_configurations() {
    let s = straight_line();
    for t in 0..=s.last_timestep() {
        let poses = interpolate(&s, t as f64);
        assert_eq!(poses.len(), s.agent_count());
        for (agent, pose) in poses.iter().enumerate() {
            assert_eq!(pose.position, s.position(t, agent));
            assert_eq!(pose.rotation, None);
        }
    }
}

#[test]
fn fractional_times_blend_per_axis() {
    let s = straight_line();
    let poses = interpolate(&s, 1.25);
    assert_eq!(poses[0].position, Point::new(1.25, 0.0));
    assert_eq!(poses[1].position, Point::new(4.0, 2.75));
}

#[test]
fn end_of_timeline_has_no_blend() {
    let s = straight_line();
    let poses = interpolate(&s, 2.0);
    assert_eq!(poses[0].position, Point::new(2.0, 0.0));
}

#[test]
fn rotation_is_linear_not_shortest_arc() {
    let s = Solution::parse("(1,1,X_MINUS)\n(1,1,Y_MINUS)").unwrap();
    let mid = interpolate(&s, 0.5)[0].rotation.unwrap();
    // π → −π/2 passes through π/4 (the X_PLUS side) instead of 5π/4.
    assert!((mid - (PI + (-FRAC_PI_2 - PI) * 0.5)).abs() < 1e-12);
    assert!((mid - PI / 4.0).abs() < 1e-12);

    let end = interpolate(&s, 1.0)[0].rotation.unwrap();
    assert_eq!(end, -FRAC_PI_2);
}

#[test]
fn single_agent_position_matches_batch() {
    let s = straight_line();
    let split = TimeSplit::new(0.6, s.last_timestep());
    let batch = interpolate(&s, 0.6);
    for agent in 0..s.agent_count() {
        assert_eq!(agent_position(&s, split, agent), batch[agent].position);
    }
}
