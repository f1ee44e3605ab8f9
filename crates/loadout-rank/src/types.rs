use loadout_fuzzy::{Aggregated, CurvePoint, Firing, Memberships, OutputCurve};
use serde::{Deserialize, Serialize};

use crate::terms::{Ammo, Desirability, Distance};

/// Coarse reading of a crisp score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub const MEDIUM_FLOOR: f64 = 33.0;
    pub const HIGH_FLOOR: f64 = 67.0;

    /// `NaN` reads as `Low`.
    pub fn of(score: f64) -> Self {
        if score >= Self::HIGH_FLOOR {
            ScoreBand::High
        } else if score >= Self::MEDIUM_FLOOR {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Medium => "medium",
            ScoreBand::High => "high",
        }
    }
}

/// One candidate's evaluation at one input pair.
#[derive(Debug, Clone)]
pub struct Score {
    pub candidate: &'static str,
    pub desirability: f64,
    pub distance: Memberships<Distance>,
    pub ammo: Memberships<Ammo>,
    pub firings: Vec<Firing<Desirability>>,
    pub curve: OutputCurve<Desirability>,
}

impl Score {
    pub fn aggregated(&self) -> &Aggregated<Desirability> {
        self.curve.aggregated()
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.desirability)
    }

    /// Composite output membership at `x`, without re-running any rule.
    pub fn sample(&self, x: f64) -> f64 {
        self.curve.sample(x)
    }

    pub fn curve_points(&self, samples: usize) -> Vec<CurvePoint> {
        self.curve.points(samples)
    }
}

/// Scores for one input pair, best first.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub distance: f64,
    pub ammo: f64,
    pub entries: Vec<Score>,
}

impl Ranking {
    /// `None` only when no candidate is registered.
    pub fn recommendation(&self) -> Option<&Score> {
        self.entries.first()
    }

    pub fn recommended_id(&self) -> Option<&'static str> {
        self.recommendation().map(|score| score.candidate)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.entries.iter().map(|score| score.candidate).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
    Distance,
    Ammo,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub x: f64,
    pub desirability: f64,
}
