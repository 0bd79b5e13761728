use crate::input::StickVector;
use std::f64::consts::TAU;

/// What the stick currently points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTarget {
    pub selected_index: usize,
    /// Radians in `[0, 2π)`.
    pub angle: f64,
}

impl CursorTarget {
    pub fn new(selected_index: usize, angle: f64) -> Self {
        Self {
            selected_index,
            angle,
        }
    }
}

pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative angles up to TAU itself
    if normalized >= TAU { 0.0 } else { normalized }
}

pub fn segment_width(count: usize) -> f64 {
    TAU / count as f64
}

/// Nearest of `count` equally spaced segments, segment `i` centered at
/// `i * 2π / count`. An angle exactly between two segments goes to the lower
/// index, which for the boundary just below 2π is segment 0.
pub fn segment_index(angle: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let position = normalize_angle(angle) / segment_width(count) + 0.5;
    let upper = position.floor();
    let upper_index = upper as usize % count;
    if position == upper {
        let lower_index = (upper_index + count - 1) % count;
        Some(upper_index.min(lower_index))
    } else {
        Some(upper_index)
    }
}

/// `None` when there is nothing to point at or the stick sits inside the
/// deadzone.
pub fn target_from_stick(stick: StickVector, deadzone: f64, count: usize) -> Option<CursorTarget> {
    if stick.magnitude() <= deadzone {
        return None;
    }
    let angle = stick.angle();
    segment_index(angle, count).map(|index| CursorTarget::new(index, angle))
}
