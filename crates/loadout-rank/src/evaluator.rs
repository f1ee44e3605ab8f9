use std::sync::Arc;

use rayon::prelude::*;

use crate::candidates::{Candidate, WeaponProfile};
use crate::terms::{WeaponRules, WeaponSystem};
use crate::types::{Score, SweepAxis, SweepPoint};

pub const SWEEP_FIRST: u32 = 1;
pub const SWEEP_LAST: u32 = 100;

/// Binds one candidate's rules to the shared inference system.
#[derive(Debug, Clone)]
pub struct CandidateEvaluator {
    candidate: Candidate,
    system: Arc<WeaponSystem>,
}

impl CandidateEvaluator {
    pub fn new(candidate: Candidate, system: Arc<WeaponSystem>) -> Self {
        Self { candidate, system }
    }

    pub fn id(&self) -> &'static str {
        self.candidate.id
    }

    pub fn profile(&self) -> &WeaponProfile {
        &self.candidate.profile
    }

    pub fn rules(&self) -> &WeaponRules {
        &self.candidate.rules
    }

    pub fn evaluate(&self, distance: f64, ammo: f64) -> Score {
        let inference = self.system.infer(&self.candidate.rules, distance, ammo);
        tracing::debug!(
            candidate = self.candidate.id,
            distance,
            ammo,
            desirability = inference.crisp,
            "candidate evaluated"
        );

        Score {
            candidate: self.candidate.id,
            desirability: inference.crisp,
            distance: inference.first,
            ammo: inference.second,
            firings: inference.firings,
            curve: inference.curve,
        }
    }

    /// Performance curve: one input stepped over `1..=100` while the other
    /// stays at `fixed`. Points are independent and come back in order.
    pub fn sweep(&self, axis: SweepAxis, fixed: f64) -> Vec<SweepPoint> {
        (SWEEP_FIRST..=SWEEP_LAST)
            .into_par_iter()
            .map(|step| {
                let x = f64::from(step);
                let score = match axis {
                    SweepAxis::Distance => self.evaluate(x, fixed),
                    SweepAxis::Ammo => self.evaluate(fixed, x),
                };
                SweepPoint {
                    x,
                    desirability: score.desirability,
                }
            })
            .collect()
    }
}
