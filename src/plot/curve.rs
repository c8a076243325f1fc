use crate::foundation::core::{BezPath, Point};
use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Stiffness of a fitted curve on each side of an anchor. Both must be `>= 1`; larger values
/// pull the control points closer to the anchors (tighter, more angular curves).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bend {
    /// Divisor for the control point entering an anchor.
    pub entry: f64,
    /// Divisor for the control point leaving an anchor.
    pub exit: f64,
}

impl Bend {
    /// Equal entry and exit stiffness.
    pub const fn uniform(k: f64) -> Self {
        Self { entry: k, exit: k }
    }
}

/// Fit a cubic path through `points` in order.
///
/// Segment `i-1 -> i` uses
/// `c1 = p[i-1] + (p[i] - p[i-2]) / exit` and `c2 = p[i] - (p[i+1] - p[i-1]) / entry`,
/// substituting the nearest existing anchor for `p[i-2]` and `p[i+1]` at the ends.
pub fn fit_curve(points: &[Point], bend: Bend, closed: bool) -> AudiogramResult<BezPath> {
    if points.len() < 3 {
        return Err(AudiogramError::input(format!(
            "curve fitting needs at least 3 points, got {}",
            points.len()
        )));
    }
    if !(bend.entry >= 1.0 && bend.exit >= 1.0) {
        return Err(AudiogramError::input(format!(
            "bend coefficients must be >= 1, got entry={} exit={}",
            bend.entry, bend.exit
        )));
    }

    let last = points.len() - 1;
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for i in 1..=last {
        let prev_prev = points[i.saturating_sub(2)];
        let prev = points[i - 1];
        let curr = points[i];
        let next = points[(i + 1).min(last)];

        let c1 = prev + (curr - prev_prev) / bend.exit;
        let c2 = curr - (next - prev) / bend.entry;
        path.curve_to(c1, c2, curr);
    }
    if closed {
        path.close_path();
    }
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/plot/curve.rs"]
mod tests;
