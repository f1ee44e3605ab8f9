use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::variable::Label;

/// Degree per term of one variable, produced fresh by
/// [`FuzzyVariable::fuzzify`](crate::FuzzyVariable::fuzzify).
#[derive(Debug, Clone, PartialEq)]
pub struct Memberships<L: Label> {
    degrees: BTreeMap<L, f64>,
}

impl<L: Label> Memberships<L> {
    /// Unknown terms read as `0`.
    pub fn degree(&self, label: L) -> f64 {
        self.degrees.get(&label).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (L, f64)> + '_ {
        self.degrees.iter().map(|(label, degree)| (*label, *degree))
    }

    /// Term with the highest degree; ties resolve to the lowest label.
    pub fn dominant(&self) -> Option<(L, f64)> {
        self.iter().fold(None, |best, (label, degree)| match best {
            Some((_, top)) if degree <= top => best,
            _ if degree.is_nan() => best,
            _ => Some((label, degree)),
        })
    }
}

impl<L: Label> FromIterator<(L, f64)> for Memberships<L> {
    fn from_iter<T: IntoIterator<Item = (L, f64)>>(iter: T) -> Self {
        Self {
            degrees: iter.into_iter().collect(),
        }
    }
}

impl<L: Label> Serialize for Memberships<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(label, degree)| (label.name(), degree)))
    }
}
