pub mod pistol;
pub mod rifle;
pub mod rocket_launcher;

use serde::Serialize;

use crate::terms::WeaponRules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeaponProfile {
    pub display_name: &'static str,
    pub effective_range: &'static str,
    pub ammo_dependency: &'static str,
}

/// A scored option: identifier, presentation profile and its own rules.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: &'static str,
    pub profile: WeaponProfile,
    pub rules: WeaponRules,
}

impl Candidate {
    pub fn new(id: &'static str, profile: WeaponProfile, rules: WeaponRules) -> Self {
        Self { id, profile, rules }
    }
}

/// The built-in weapons in registration order. Ties in ranking keep this
/// order.
pub fn builtin() -> Vec<Candidate> {
    vec![
        Candidate::new(
            pistol::ID,
            WeaponProfile {
                display_name: "Pistol",
                effective_range: "short/medium",
                ammo_dependency: "medium",
            },
            pistol::rules(),
        ),
        Candidate::new(
            rifle::ID,
            WeaponProfile {
                display_name: "Rifle",
                effective_range: "long",
                ammo_dependency: "high",
            },
            rifle::rules(),
        ),
        Candidate::new(
            rocket_launcher::ID,
            WeaponProfile {
                display_name: "Rocket Launcher",
                effective_range: "medium",
                ammo_dependency: "low",
            },
            rocket_launcher::rules(),
        ),
    ]
}
