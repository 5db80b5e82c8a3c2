use crate::foundation::core::Point;

/// Distance under which a continuous time is treated as sitting exactly on a timestep.
pub(crate) const TIME_EPSILON: f64 = 1e-9;

pub(crate) trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

/// Snap `t` onto the nearest integer when float accumulation left it within [`TIME_EPSILON`].
pub(crate) fn snap_time(t: f64) -> f64 {
    let r = t.round();
    if (t - r).abs() < TIME_EPSILON { r } else { t }
}

/// Clamp into `[0, last]`; non-finite input collapses to `0`.
pub(crate) fn clamp_time(t: f64, last: usize) -> f64 {
    if !t.is_finite() {
        return 0.0;
    }
    t.clamp(0.0, last as f64)
}

/// A continuous time decomposed into the bracketing timesteps and the blend factor between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct TimeSplit {
    pub(crate) t0: usize,
    pub(crate) t1: usize,
    pub(crate) alpha: f64,
}

impl TimeSplit {
    pub(crate) fn new(time: f64, last: usize) -> Self {
        let time = clamp_time(time, last);
        let t0 = (time.floor() as usize).min(last);
        if t0 == last {
            return Self {
                t0,
                t1: last,
                alpha: 0.0,
            };
        }
        Self {
            t0,
            t1: t0 + 1,
            alpha: time - t0 as f64,
        }
    }

    /// `true` when the time sits exactly on a timestep (including the final one).
    pub(crate) fn is_on_timestep(self) -> bool {
        self.alpha == 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
