use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::FuzzyError;
use crate::fuzzify::Memberships;
use crate::membership::Triangle;

/// A closed set of linguistic terms for one variable.
///
/// `ALL` lists the terms in ascending order; the derived `Ord` must agree
/// with it so that maps keyed by a label iterate low to high.
pub trait Label: Copy + Ord + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub min: f64,
    pub max: f64,
}

impl Universe {
    pub const PERCENT: Universe = Universe {
        min: 0.0,
        max: 100.0,
    };

    pub fn new(min: f64, max: f64) -> Result<Self, FuzzyError> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(FuzzyError::InvalidUniverse { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::PERCENT
    }
}

/// A named variable whose terms are triangular membership functions.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyVariable<L: Label> {
    name: &'static str,
    universe: Universe,
    terms: Vec<(L, Triangle)>,
}

impl<L: Label> FuzzyVariable<L> {
    /// Every label in `L::ALL` must be given exactly once.
    pub fn new(
        name: &'static str,
        universe: Universe,
        terms: impl IntoIterator<Item = (L, Triangle)>,
    ) -> Result<Self, FuzzyError> {
        let mut collected: Vec<(L, Triangle)> = Vec::with_capacity(L::ALL.len());
        for (label, shape) in terms {
            if collected.iter().any(|(seen, _)| *seen == label) {
                return Err(FuzzyError::DuplicateTerm {
                    variable: name,
                    term: label.name(),
                });
            }
            collected.push((label, shape));
        }

        for label in L::ALL {
            if !collected.iter().any(|(seen, _)| seen == label) {
                return Err(FuzzyError::MissingTerm {
                    variable: name,
                    term: label.name(),
                });
            }
        }

        collected.sort_by_key(|(label, _)| *label);
        Ok(Self {
            name,
            universe,
            terms: collected,
        })
    }

    /// Builds a variable from raw `(a, b, c)` breakpoints.
    pub fn from_breakpoints(
        name: &'static str,
        universe: Universe,
        terms: &[(L, (f64, f64, f64))],
    ) -> Result<Self, FuzzyError> {
        let shapes = terms
            .iter()
            .map(|(label, (a, b, c))| Triangle::new(*a, *b, *c).map(|shape| (*label, shape)))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, universe, shapes)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn universe(&self) -> Universe {
        self.universe
    }

    pub fn term(&self, label: L) -> Option<&Triangle> {
        self.terms
            .iter()
            .find(|(seen, _)| *seen == label)
            .map(|(_, shape)| shape)
    }

    pub fn terms(&self) -> impl Iterator<Item = (L, &Triangle)> + '_ {
        self.terms.iter().map(|(label, shape)| (*label, shape))
    }

    /// Degree of every term at `x`. No clamping is applied.
    pub fn fuzzify(&self, x: f64) -> Memberships<L> {
        self.terms
            .iter()
            .map(|(label, shape)| (*label, shape.degree(x)))
            .collect()
    }
}
