use crate::{
    CaptureError, CoreResult,
    choreography::{Axis, GuidancePosition, Segment},
};

use std::panic::Location;

use error_location::ErrorLocation;

const EDGE_NEAR: f64 = 0.01;
const EDGE_FAR: f64 = 0.99;

/// A fixed, time-ordered sequence of guidance marker movements.
///
/// Position is a pure function of elapsed time, so the animation does not
/// depend on the render frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Choreography {
    initial: GuidancePosition,
    segments: Vec<Segment>,
    /// Held position at the start of each segment.
    anchors: Vec<GuidancePosition>,
}

impl Choreography {
    /// Build a choreography, validating the segments.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidChoreography`] when there are no
    /// segments, a value or time is not finite, a value lies outside
    /// `[0, 1]`, a segment is empty or reversed, or segments overlap or
    /// are out of order.
    #[track_caller]
    pub fn new(initial: GuidancePosition, segments: Vec<Segment>) -> CoreResult<Self> {
        let caller = Location::caller();
        let invalid = |reason: String| CaptureError::InvalidChoreography {
            reason,
            location: ErrorLocation::from(caller),
        };

        if segments.is_empty() {
            return Err(invalid("no segments".to_string()));
        }

        if !in_unit_range(initial.x) || !in_unit_range(initial.y) {
            return Err(invalid(format!(
                "initial position ({}, {}) outside the screen",
                initial.x, initial.y
            )));
        }

        let mut previous_end = 0.0;
        for (i, segment) in segments.iter().enumerate() {
            if !segment.start.is_finite() || !segment.end.is_finite() {
                return Err(invalid(format!("segment {i} has a non-finite time")));
            }
            if segment.end <= segment.start {
                return Err(invalid(format!(
                    "segment {i} ends at {} before it starts at {}",
                    segment.end, segment.start
                )));
            }
            if segment.start < 0.0 {
                return Err(invalid(format!(
                    "segment {i} starts at negative time {}",
                    segment.start
                )));
            }
            if segment.start < previous_end {
                return Err(invalid(format!(
                    "segment {i} starts at {} before the previous one ends at {previous_end}",
                    segment.start
                )));
            }
            if !in_unit_range(segment.from) || !in_unit_range(segment.to) {
                return Err(invalid(format!("segment {i} moves outside the screen")));
            }
            previous_end = segment.end;
        }

        Ok(Self::from_parts(initial, segments))
    }

    /// The guidance path used for gaze recordings: trace the screen
    /// border clockwise from the top-left corner over ten seconds.
    pub fn reference() -> Self {
        Self::from_parts(
            GuidancePosition::new(EDGE_NEAR, EDGE_NEAR),
            vec![
                Segment::new(0.0, 3.0, Axis::X, EDGE_NEAR, EDGE_FAR),
                Segment::new(3.0, 5.0, Axis::Y, EDGE_NEAR, EDGE_FAR),
                Segment::new(5.0, 8.0, Axis::X, EDGE_FAR, EDGE_NEAR),
                Segment::new(8.0, 10.0, Axis::Y, EDGE_FAR, EDGE_NEAR),
            ],
        )
    }

    fn from_parts(initial: GuidancePosition, segments: Vec<Segment>) -> Self {
        let mut anchors = Vec::with_capacity(segments.len());
        let mut held = initial;
        for segment in &segments {
            anchors.push(held);
            held = held.with_axis(segment.axis, segment.to);
        }

        Self {
            initial,
            segments,
            anchors,
        }
    }

    /// Marker position before recording starts.
    pub fn initial(&self) -> GuidancePosition {
        self.initial
    }

    /// The movement steps in time order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total length in seconds.
    pub fn duration(&self) -> f64 {
        self.segments.last().map_or(0.0, |s| s.end)
    }

    /// Marker position `elapsed` seconds into the recording, or `None`
    /// once the choreography is complete.
    pub fn position_at(&self, elapsed: f64) -> Option<GuidancePosition> {
        if elapsed.is_nan() || elapsed >= self.duration() {
            return None;
        }

        let started = self.segments.partition_point(|s| s.start <= elapsed);
        let Some(index) = started.checked_sub(1) else {
            return Some(self.initial);
        };

        let segment = &self.segments[index];
        let anchor = self.anchors[index];

        if elapsed < segment.end {
            Some(anchor.with_axis(segment.axis, segment.value_at(elapsed)))
        } else {
            // Between segments the marker rests where the last one ended.
            Some(anchor.with_axis(segment.axis, segment.to))
        }
    }
}

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
