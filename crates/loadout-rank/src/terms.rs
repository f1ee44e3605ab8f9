//! Linguistic variables shared by every weapon.

use loadout_fuzzy::{
    Centroid, FuzzyVariable, InferenceSystem, Label, RuleTable, Universe,
};
use serde::{Deserialize, Serialize};

use crate::error::LoadoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Near,
    Medium,
    Far,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ammo {
    Low,
    Medium,
    High,
}

/// Output terms, ordered from least to most desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Desirability {
    Undesirable,
    Desirable,
    Essential,
}

impl Label for Distance {
    const ALL: &'static [Self] = &[Distance::Near, Distance::Medium, Distance::Far];

    fn name(self) -> &'static str {
        match self {
            Distance::Near => "near",
            Distance::Medium => "medium",
            Distance::Far => "far",
        }
    }
}

impl Label for Ammo {
    const ALL: &'static [Self] = &[Ammo::Low, Ammo::Medium, Ammo::High];

    fn name(self) -> &'static str {
        match self {
            Ammo::Low => "low",
            Ammo::Medium => "medium",
            Ammo::High => "high",
        }
    }
}

impl Label for Desirability {
    const ALL: &'static [Self] = &[
        Desirability::Undesirable,
        Desirability::Desirable,
        Desirability::Essential,
    ];

    fn name(self) -> &'static str {
        match self {
            Desirability::Undesirable => "undesirable",
            Desirability::Desirable => "desirable",
            Desirability::Essential => "essential",
        }
    }
}

pub type WeaponSystem = InferenceSystem<Distance, Ammo, Desirability>;
pub type WeaponRules = RuleTable<Distance, Ammo, Desirability>;

pub fn distance_variable() -> Result<FuzzyVariable<Distance>, LoadoutError> {
    Ok(FuzzyVariable::from_breakpoints(
        "distance",
        Universe::PERCENT,
        &[
            (Distance::Near, (0.0, 0.0, 25.0)),
            (Distance::Medium, (15.0, 50.0, 85.0)),
            (Distance::Far, (75.0, 100.0, 100.0)),
        ],
    )?)
}

pub fn ammo_variable() -> Result<FuzzyVariable<Ammo>, LoadoutError> {
    Ok(FuzzyVariable::from_breakpoints(
        "ammo",
        Universe::PERCENT,
        &[
            (Ammo::Low, (0.0, 0.0, 30.0)),
            (Ammo::Medium, (20.0, 50.0, 80.0)),
            (Ammo::High, (70.0, 100.0, 100.0)),
        ],
    )?)
}

pub fn desirability_variable() -> Result<FuzzyVariable<Desirability>, LoadoutError> {
    Ok(FuzzyVariable::from_breakpoints(
        "desirability",
        Universe::PERCENT,
        &[
            (Desirability::Undesirable, (0.0, 0.0, 33.0)),
            (Desirability::Desirable, (15.0, 50.0, 85.0)),
            (Desirability::Essential, (67.0, 100.0, 100.0)),
        ],
    )?)
}

pub fn weapon_system(centroid_samples: usize) -> Result<WeaponSystem, LoadoutError> {
    Ok(InferenceSystem::new(
        distance_variable()?,
        ammo_variable()?,
        desirability_variable()?,
        Centroid::new(centroid_samples)?,
    ))
}
