//! Slice arithmetic for monitor axes and border compensation.
//!
//! Slice sizes and offsets are rounded to the nearest pixel with ties going
//! to the even neighbour, so `1001 / 2` yields `500` and `1003 / 2` yields
//! `502`. Adjacent slots may therefore leave a one pixel gap or overlap by one
//! pixel, never more.

use crate::models::geometry::{BorderInsets, Rect};
use crate::models::tile_action::SliceScheme;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("Slice scheme '{0}' is not supported")]
    UnsupportedScheme(SliceScheme),
}

/// Pure slice and inset computations
pub struct GeometryCalculator;

impl GeometryCalculator {
    /// Extent of one slice of `dimension`
    pub fn slice_size(dimension: i32, scheme: SliceScheme) -> Result<i32, GeometryError> {
        match scheme {
            SliceScheme::Full => Ok(dimension),
            _ => {
                let denominator = denominator_of(scheme)?;
                Ok(saturate(div_round_half_even(dimension as i64, denominator as i64)))
            }
        }
    }

    /// Distance from the start of the axis to the start of `slot`. Slots at or
    /// beyond the denominator are not rejected and land past the axis end;
    /// offsets too large for `i32` saturate at `i32::MAX`.
    pub fn slice_offset(dimension: i32, scheme: SliceScheme, slot: u32) -> Result<i32, GeometryError> {
        match scheme {
            SliceScheme::Full => Ok(0),
            _ => {
                let denominator = denominator_of(scheme)?;
                let numerator = dimension as i64 * slot as i64;
                Ok(saturate(div_round_half_even(numerator, denominator as i64)))
            }
        }
    }

    /// Invisible border thickness around a window: how far the raw (legacy)
    /// frame extends beyond the visible frame on each edge
    pub fn border_insets(visible: Rect, legacy: Rect) -> BorderInsets {
        BorderInsets {
            left: visible.left - legacy.left,
            top: visible.top - legacy.top,
            right: legacy.right - visible.right,
            bottom: legacy.bottom - visible.bottom,
        }
    }
}

fn denominator_of(scheme: SliceScheme) -> Result<i32, GeometryError> {
    scheme
        .denominator()
        .ok_or(GeometryError::UnsupportedScheme(scheme))
}

/// Narrow to `i32`, clamping at its bounds instead of wrapping
fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// `numerator / denominator` rounded to nearest, ties to even. `denominator` must be positive.
fn div_round_half_even(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator.div_euclid(denominator);
    let remainder = numerator.rem_euclid(denominator);

    match (remainder * 2).cmp(&denominator) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient.rem_euclid(2) == 0 => quotient,
        Ordering::Equal => quotient + 1,
    }
}
