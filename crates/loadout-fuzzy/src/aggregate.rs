use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::rules::{or, Firing};
use crate::variable::Label;

/// One degree per output term: the strongest firing concluding it.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregated<O: Label> {
    degrees: BTreeMap<O, f64>,
}

impl<O: Label> Aggregated<O> {
    /// Max-aggregation. Terms no rule concludes stay at `0`; reinforcing
    /// rules saturate at the strongest one rather than adding up.
    pub fn from_firings(firings: &[Firing<O>]) -> Self {
        let mut degrees: BTreeMap<O, f64> = O::ALL.iter().map(|label| (*label, 0.0)).collect();
        for firing in firings {
            let slot = degrees.entry(firing.conclusion).or_insert(0.0);
            *slot = or(*slot, firing.strength);
        }
        Self { degrees }
    }

    pub fn degree(&self, label: O) -> f64 {
        self.degrees.get(&label).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (O, f64)> + '_ {
        self.degrees.iter().map(|(label, degree)| (*label, *degree))
    }

    /// True when no rule fired at all.
    #[allow(clippy::float_cmp)]
    pub fn is_silent(&self) -> bool {
        self.degrees.values().all(|degree| *degree == 0.0)
    }
}

impl<O: Label> Serialize for Aggregated<O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(label, degree)| (label.name(), degree)))
    }
}
