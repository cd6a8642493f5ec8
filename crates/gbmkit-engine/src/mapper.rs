//! World to canvas coordinate mapping.
//!
//! World coordinates are `(time, value)` with value growing upward.
//! Canvas coordinates are pixels with (0,0) at the top-left and y growing
//! downward.
//!
//! Formula:
//! ```text
//! x = (time  - x.min) * width  / (x.max - x.min)
//! y = height - (value - y.min) * height / (y.max - y.min)
//! ```

use gbmkit_core::{
    CanvasPoint, ComputationError, ParameterError, Range, Result, WorldPoint,
};

use crate::cancel::CancelScope;

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Create a canvas size, rejecting zero, negative or non-finite sides.
    pub fn new(width: f64, height: f64) -> std::result::Result<Self, ParameterError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(ParameterError::InvalidCanvas { width, height });
        }
        Ok(Self { width, height })
    }
}

fn check_range(axis: &'static str, range: &Range) -> std::result::Result<(), ComputationError> {
    if range.is_degenerate() {
        return Err(ComputationError::DegenerateRange {
            axis,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

/// Map one world point onto the canvas.
pub fn project(
    point: WorldPoint,
    canvas: CanvasSize,
    range_x: &Range,
    range_y: &Range,
) -> std::result::Result<CanvasPoint, ComputationError> {
    check_range("x", range_x)?;
    check_range("y", range_y)?;

    let x = (point.time - range_x.min) * canvas.width / range_x.extent();
    let y = canvas.height - (point.value - range_y.min) * canvas.height / range_y.extent();

    if !x.is_finite() || !y.is_finite() {
        return Err(ComputationError::NonFiniteProjection { x, y });
    }
    Ok(CanvasPoint::new(x, y))
}

/// Inverse of [`project`] for the same canvas and ranges.
pub fn unproject(
    point: CanvasPoint,
    canvas: CanvasSize,
    range_x: &Range,
    range_y: &Range,
) -> std::result::Result<WorldPoint, ComputationError> {
    check_range("x", range_x)?;
    check_range("y", range_y)?;

    let time = point.x * range_x.extent() / canvas.width + range_x.min;
    let value = (canvas.height - point.y) * range_y.extent() / canvas.height + range_y.min;
    Ok(WorldPoint::new(time, value))
}

/// Project a whole path, checking `cancel` before and after the work.
///
/// A cancellation observed after the last point still discards the result,
/// so callers never store a projection made after a stop request.
pub fn project_path(
    points: &[WorldPoint],
    canvas: CanvasSize,
    range_x: &Range,
    range_y: &Range,
    cancel: &CancelScope,
) -> Result<Vec<CanvasPoint>> {
    cancel.checkpoint(0, points.len())?;

    let projected = points
        .iter()
        .map(|p| project(*p, canvas, range_x, range_y))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    cancel.checkpoint(projected.len(), points.len())?;
    Ok(projected)
}
