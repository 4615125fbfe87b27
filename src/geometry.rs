//! Proportional avatar geometry
//!
//! Every pixel value is `round(container_width * ratio)`, rounded half away
//! from zero (`f64::round`) on each product independently. Rotation and
//! border radius never take part.

use crate::types::{BorderConfig, DimensionState};

/// Compute avatar size and offsets for a container width.
/// Returns None when the width is not measurable yet (zero or negative).
pub fn compute(container_width_px: i32, config: &BorderConfig) -> Option<DimensionState> {
    if container_width_px <= 0 {
        return None;
    }

    let width = f64::from(container_width_px);
    Some(DimensionState {
        container_width_px,
        avatar_size_px: scale(width, config.avatar_scale),
        top_offset_px: scale(width, config.top_offset_ratio),
        left_offset_px: scale(width, config.left_offset_ratio),
    })
}

/// Replace `state` with a fresh computation.
/// Unmeasurable widths leave the prior state untouched and return false.
pub fn recompute(state: &mut Option<DimensionState>, container_width_px: i32, config: &BorderConfig) -> bool {
    match compute(container_width_px, config) {
        Some(next) => {
            *state = Some(next);
            true
        }
        None => false,
    }
}

/// Width to lay out against: the measured width, or the integer prefix of the
/// requested display size when the container reports nothing.
pub fn resolve_width(measured_px: i32, size: &str) -> i32 {
    if measured_px > 0 {
        measured_px
    } else {
        parse_size_px(size).unwrap_or(0)
    }
}

/// Leading integer of a CSS-like size string ("150px" -> 150)
pub fn parse_size_px(size: &str) -> Option<i32> {
    let trimmed = size.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i32>().ok().map(|n| sign * n)
}

fn scale(width: f64, ratio: f64) -> i32 {
    // Float-to-int `as` saturates and maps NaN to 0
    (width * ratio).round() as i32
}
