mod segment;
mod trajectory;

pub use {
    segment::{Axis, GuidancePosition, Segment, lerp},
    trajectory::Choreography,
};
