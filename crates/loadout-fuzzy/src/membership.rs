use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;

/// Triangular membership: `1` at `x == b`, `0` outside the open interval
/// `(a, c)`, linear in between.
///
/// Shoulder shapes (`a == b` or `b == c`) never divide by zero because the
/// degenerate ramp is unreachable; `a == b == c` is a point indicator at `b`.
/// A `NaN` input propagates to a `NaN` degree.
#[allow(clippy::float_cmp)]
pub fn trimf(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x == b {
        return 1.0;
    }
    if x <= a || x >= c {
        return 0.0;
    }
    if x > a && x < b {
        return (x - a) / (b - a);
    }
    (c - x) / (c - b)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, FuzzyError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(FuzzyError::NonFiniteBreakpoint { a, b, c });
        }
        if a > b || b > c {
            return Err(FuzzyError::InvalidBreakpoints { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    pub fn degree(&self, x: f64) -> f64 {
        trimf(x, self.a, self.b, self.c)
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    pub fn peak(&self) -> f64 {
        self.b
    }

    /// Closed interval outside of which the degree is zero.
    pub fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }
}
