use super::*;
use crate::playback::interpolate::interpolate;

fn walker() -> Solution {
    // Agent 0 walks right along y=0, agent 1 walks down along x=9.
    let lines: Vec<String> = (0..=6).map(|t| format!("({t},0),(9,{t})")).collect();
    Solution::parse(&lines.join("\n")).unwrap()
}

fn assert_consistent(acc: &TrailAccumulator, s: &Solution, time: f64) {
    let poses = interpolate(s, time);
    for (agent, trail) in acc.trails().iter().enumerate() {
        assert_eq!(trail.committed().len(), time.floor() as usize);
        for (t, seg) in trail.committed().iter().enumerate() {
            assert_eq!(seg.p0, s.position(t, agent));
            assert_eq!(seg.p1, s.position(t + 1, agent));
        }
        if let Some(head) = trail.head() {
            assert_eq!(head, poses[agent].position);
        }
    }
}

#[test]
fn committed_count_tracks_floor_of_time() {
    let s = walker();
    let mut acc = TrailAccumulator::new(s.agent_count());
    for time in [0.0, 0.5, 1.0, 2.75, 6.0] {
        acc.update(&s, time);
        assert_consistent(&acc, &s, time);
    }
}

#[test]
fn partial_segment_spans_floor_to_now() {
    let s = walker();
    let mut acc = TrailAccumulator::new(s.agent_count());
    acc.update(&s, 2.5);
    let partial = acc.trails()[0].partial().unwrap();
    assert_eq!(partial.p0, Point::new(2.0, 0.0));
    assert_eq!(partial.p1, Point::new(2.5, 0.0));

    acc.update(&s, 3.0);
    assert_eq!(acc.trails()[0].partial(), None);

    acc.update(&s, 6.0);
    assert_eq!(acc.trails()[1].partial(), None);
    assert_eq!(acc.committed_count(), 6);
}

#[test]
fn update_is_idempotent() {
    let s = walker();
    let mut acc = TrailAccumulator::new(s.agent_count());
    acc.update(&s, 3.4);
    let first = acc.clone();
    acc.update(&s, 3.4);
    assert_eq!(acc, first);
}

#[test]
fn backward_then_forward_seek_matches_direct_advance() {
    let s = walker();

    let mut direct = TrailAccumulator::new(s.agent_count());
    direct.update(&s, 5.0);

    let mut seeking = TrailAccumulator::new(s.agent_count());
    seeking.update(&s, 5.0);
    seeking.update(&s, 2.0);
    assert_eq!(seeking.committed_count(), 2);
    assert_consistent(&seeking, &s, 2.0);
    seeking.update(&s, 5.0);

    assert_eq!(seeking.committed_count(), 5);
    assert_eq!(seeking.trails()[0].partial(), None);
    assert_eq!(seeking, direct);
}

#[test]
fn reset_clears_and_resizes() {
    let s = walker();
    let mut acc = TrailAccumulator::new(s.agent_count());
    acc.update(&s, 4.0);
    acc.reset(3);
    assert_eq!(acc.trails().len(), 3);
    assert_eq!(acc.committed_count(), 0);
}

#[test]
fn mismatched_agent_count_is_resized_on_update() {
    let s = walker();
    let mut acc = TrailAccumulator::default();
    acc.update(&s, 1.5);
    assert_eq!(acc.trails().len(), 2);
    assert_consistent(&acc, &s, 1.5);
}
