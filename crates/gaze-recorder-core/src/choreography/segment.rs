/// Screen axis moved by a [`Segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal, 0 is left and 1 is right.
    X,
    /// Vertical, 0 is top and 1 is bottom.
    Y,
}

/// Normalized screen position of the guidance marker.
///
/// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidancePosition {
    /// Horizontal coordinate in `[0, 1]`.
    pub x: f64,
    /// Vertical coordinate in `[0, 1]`.
    pub y: f64,
}

impl GuidancePosition {
    /// Create a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub(crate) fn with_axis(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
        }
    }
}

/// One step of a choreography: over `[start, end)` seconds, move `axis`
/// linearly from `from` to `to` while the other axis holds still.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start time in seconds since recording began (inclusive).
    pub start: f64,
    /// End time in seconds since recording began (exclusive).
    pub end: f64,
    /// Axis being moved.
    pub axis: Axis,
    /// Axis value at `start`.
    pub from: f64,
    /// Axis value approached as time reaches `end`.
    pub to: f64,
}

impl Segment {
    /// Create a segment.
    pub const fn new(start: f64, end: f64, axis: Axis, from: f64, to: f64) -> Self {
        Self {
            start,
            end,
            axis,
            from,
            to,
        }
    }

    /// Axis value at time `t`.
    pub fn value_at(&self, t: f64) -> f64 {
        lerp(t, self.from, self.to, self.start, self.end)
    }
}

/// Linear interpolation of `t` in `[t0, t1]` onto `[a, b]`.
pub fn lerp(t: f64, a: f64, b: f64, t0: f64, t1: f64) -> f64 {
    a + (t - t0) / (t1 - t0) * (b - a)
}
