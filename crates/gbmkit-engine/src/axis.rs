//! Value-axis range tracking.

use gbmkit_core::Range;

/// Fraction of each bound's own magnitude added when widening.
pub const PADDING_FRACTION: f64 = 0.05;

/// Holds the value-axis range of a run and widens it as paths escape it.
///
/// The range only ever grows during a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRangeTracker {
    range: Range,
}

impl AxisRangeTracker {
    pub fn new(range: Range) -> Self {
        Self { range }
    }

    pub fn range(&self) -> Range {
        self.range
    }

    /// Feed one path's values. Returns the new range if it had to widen.
    pub fn observe<I>(&mut self, values: I) -> Option<Range>
    where
        I: IntoIterator<Item = f64>,
    {
        let widened = widen(&self.range, values)?;
        self.range = widened;
        Some(widened)
    }
}

impl Default for AxisRangeTracker {
    fn default() -> Self {
        Self::new(Range::default())
    }
}

/// Decide whether `values` escape `range` and, if so, compute padded bounds.
///
/// Padding is `min - min * 0.05` and `max + max * 0.05`. For a negative
/// minimum this pulls the bound toward zero; that behaviour is kept as is.
pub fn widen<I>(range: &Range, values: I) -> Option<Range>
where
    I: IntoIterator<Item = f64>,
{
    let (lo, hi) = values
        .into_iter()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    if lo >= range.min && hi <= range.max {
        return None;
    }

    let new_min = range.min.min(lo);
    let new_max = range.max.max(hi);
    Some(Range::new(
        new_min - new_min * PADDING_FRACTION,
        new_max + new_max * PADDING_FRACTION,
    ))
}
