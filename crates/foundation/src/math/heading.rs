//! Compass headings in degrees clockwise from north.

/// Default smoothing factor applied by [`HeadingSmoother`].
pub const DEFAULT_HEADING_SMOOTHING: f64 = 0.25;

/// Wraps `heading` into `[0, 360)`. Non-finite input has no heading.
pub fn normalize_heading(heading: f64) -> Option<f64> {
    if !heading.is_finite() {
        return None;
    }
    let wrapped = heading.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    Some(if wrapped >= 360.0 { 0.0 } else { wrapped })
}

/// Derives a heading from a device orientation reading.
///
/// A native compass value wins; otherwise `alpha` (counter-clockwise) is
/// converted to a clockwise heading.
pub fn heading_from_orientation(compass: Option<f64>, alpha: Option<f64>) -> Option<f64> {
    if let Some(h) = compass.and_then(normalize_heading) {
        return Some(h);
    }
    let alpha = alpha.filter(|a| a.is_finite())?;
    normalize_heading(360.0 - alpha)
}

/// Signed shortest rotation from `from` to `to`, in `[-180, 180)`.
pub fn shortest_arc(from: f64, to: f64) -> f64 {
    (to - from + 180.0).rem_euclid(360.0) - 180.0
}

/// Exponential smoothing of headings along the shortest arc.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingSmoother {
    factor: f64,
    current: Option<f64>,
}

impl Default for HeadingSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_SMOOTHING)
    }
}

impl HeadingSmoother {
    /// `factor` is clamped into `(0, 1]`; `1.0` disables smoothing.
    pub fn new(factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(f64::EPSILON, 1.0)
        } else {
            DEFAULT_HEADING_SMOOTHING
        };
        Self {
            factor,
            current: None,
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn current(&self) -> Option<f64> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Feeds a raw reading and returns the smoothed heading.
    ///
    /// The first reading is taken as-is. Invalid readings leave the state
    /// unchanged.
    pub fn update(&mut self, raw: f64) -> Option<f64> {
        let Some(target) = normalize_heading(raw) else {
            return self.current;
        };
        let next = match self.current {
            None => target,
            Some(current) => {
                let step = shortest_arc(current, target) * self.factor;
                normalize_heading(current + step).unwrap_or(target)
            }
        };
        self.current = Some(next);
        self.current
    }
}
