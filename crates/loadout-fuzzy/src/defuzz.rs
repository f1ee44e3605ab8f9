use serde::Serialize;

use crate::aggregate::Aggregated;
use crate::error::FuzzyError;
use crate::rules::{clip, or};
use crate::variable::{FuzzyVariable, Label, Universe};

/// Sample count used for centroid reduction unless configured otherwise.
/// More samples lower the quantization error at a linear cost.
pub const DEFAULT_CENTROID_SAMPLES: usize = 101;

/// Composite output membership: every output term clipped at its
/// aggregated degree, combined by max. Cheap to sample repeatedly.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputCurve<O: Label> {
    aggregated: Aggregated<O>,
    output: FuzzyVariable<O>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub degree: f64,
}

impl<O: Label> OutputCurve<O> {
    pub fn new(aggregated: Aggregated<O>, output: FuzzyVariable<O>) -> Self {
        Self { aggregated, output }
    }

    pub fn aggregated(&self) -> &Aggregated<O> {
        &self.aggregated
    }

    pub fn universe(&self) -> Universe {
        self.output.universe()
    }

    pub fn sample(&self, x: f64) -> f64 {
        self.output.terms().fold(0.0, |acc, (label, shape)| {
            or(acc, clip(self.aggregated.degree(label), shape.degree(x)))
        })
    }

    /// Evenly spaced samples across the output universe, endpoints included.
    pub fn points(&self, samples: usize) -> Vec<CurvePoint> {
        grid(self.universe(), samples)
            .map(|x| CurvePoint {
                x,
                degree: self.sample(x),
            })
            .collect()
    }
}

/// Discrete centroid over a fixed number of evenly spaced samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Centroid {
    samples: usize,
}

impl Centroid {
    pub fn new(samples: usize) -> Result<Self, FuzzyError> {
        if samples < 2 {
            return Err(FuzzyError::TooFewSamples(samples));
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// `Σ x·m(x) / Σ m(x)`, or `0` when the curve is zero everywhere.
    #[allow(clippy::float_cmp)]
    pub fn reduce(&self, universe: Universe, curve: impl Fn(f64) -> f64) -> f64 {
        let (num, den) = grid(universe, self.samples).fold((0.0, 0.0), |(num, den), x| {
            let m = curve(x);
            (num + x * m, den + m)
        });
        if den == 0.0 {
            0.0
        } else {
            num / den
        }
    }

    pub fn crisp<O: Label>(&self, curve: &OutputCurve<O>) -> f64 {
        self.reduce(curve.universe(), |x| curve.sample(x))
    }
}

impl Default for Centroid {
    fn default() -> Self {
        Self {
            samples: DEFAULT_CENTROID_SAMPLES,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn grid(universe: Universe, samples: usize) -> impl Iterator<Item = f64> {
    let step = universe.width() / samples.saturating_sub(1).max(1) as f64;
    (0..samples).map(move |i| universe.min + step * i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Firing;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Want {
        Low,
        Mid,
        Top,
    }

    impl Label for Want {
        const ALL: &'static [Self] = &[Want::Low, Want::Mid, Want::Top];

        fn name(self) -> &'static str {
            match self {
                Want::Low => "low",
                Want::Mid => "mid",
                Want::Top => "top",
            }
        }
    }

    fn output() -> FuzzyVariable<Want> {
        FuzzyVariable::from_breakpoints(
            "want",
            Universe::PERCENT,
            &[
                (Want::Low, (0.0, 0.0, 33.0)),
                (Want::Mid, (15.0, 50.0, 85.0)),
                (Want::Top, (67.0, 100.0, 100.0)),
            ],
        )
        .expect("valid output")
    }

    fn curve(strengths: &[(Want, f64)]) -> OutputCurve<Want> {
        let firings = strengths
            .iter()
            .map(|(conclusion, strength)| Firing {
                rule: "test",
                conclusion: *conclusion,
                strength: *strength,
            })
            .collect::<Vec<_>>();
        OutputCurve::new(Aggregated::from_firings(&firings), output())
    }

    #[test]
    fn curve_is_clipped_at_aggregated_degree() {
        let c = curve(&[(Want::Mid, 0.4)]);
        assert_eq!(c.sample(50.0), 0.4);
        assert_eq!(c.sample(5.0), 0.0);
        assert!((c.sample(25.0) - 10.0 / 35.0).abs() < 1e-12);
    }

    #[test]
    fn overlapping_terms_combine_by_max() {
        let c = curve(&[(Want::Low, 1.0), (Want::Mid, 1.0)]);
        let x = 25.0;
        let expected = (8.0_f64 / 33.0).max(10.0 / 35.0);
        assert!((c.sample(x) - expected).abs() < 1e-12);
    }

    #[test]
    fn silent_curve_defuzzifies_to_zero() {
        let c = curve(&[]);
        assert_eq!(Centroid::default().crisp(&c), 0.0);
    }

    #[test]
    fn symmetric_term_centroid_is_its_peak() {
        let c = curve(&[(Want::Mid, 1.0)]);
        assert!((Centroid::default().crisp(&c) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn shoulder_term_centroid_matches_reference() {
        let c = curve(&[(Want::Top, 1.0)]);
        let crisp = Centroid::default().crisp(&c);
        assert!((crisp - 89.333_333).abs() < 1e-4, "got {crisp}");
    }

    #[test]
    fn more_samples_approach_continuous_centroid() {
        let c = curve(&[(Want::Top, 1.0)]);
        let coarse = Centroid::new(11).expect("valid").crisp(&c);
        let fine = Centroid::new(1001).expect("valid").crisp(&c);
        let exact = (67.0 + 100.0 + 100.0) / 3.0;
        assert!((fine - exact).abs() < (coarse - exact).abs());
    }

    #[test]
    fn rejects_fewer_than_two_samples() {
        assert_eq!(Centroid::new(1), Err(FuzzyError::TooFewSamples(1)));
        assert_eq!(Centroid::new(0), Err(FuzzyError::TooFewSamples(0)));
        assert_eq!(Centroid::new(2).map(|c| c.samples()), Ok(2));
    }

    #[test]
    fn points_cover_universe_endpoints() {
        let c = curve(&[(Want::Low, 1.0)]);
        let points = c.points(DEFAULT_CENTROID_SAMPLES);
        assert_eq!(points.len(), 101);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[0].degree, 1.0);
        assert_eq!(points[100].x, 100.0);
        assert_eq!(points[37].x, 37.0);
    }

    #[test]
    fn nan_degree_propagates_to_score() {
        let c = curve(&[(Want::Mid, f64::NAN)]);
        assert!(Centroid::default().crisp(&c).is_nan());
    }
}
