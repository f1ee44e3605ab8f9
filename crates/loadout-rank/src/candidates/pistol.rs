use loadout_fuzzy::{and, or, Rule};

use crate::terms::{Ammo, Desirability, Distance, WeaponRules};

pub const ID: &str = "pistol";

/// Close-quarters sidearm: strong up close, useless at range.
pub fn rules() -> WeaponRules {
    WeaponRules::new(vec![
        Rule::new(
            "distance is near AND (ammo is medium OR ammo is high)",
            Desirability::Essential,
            |d, m| {
                and(
                    d.degree(Distance::Near),
                    or(m.degree(Ammo::Medium), m.degree(Ammo::High)),
                )
            },
        ),
        Rule::new(
            "distance is near AND ammo is low",
            Desirability::Desirable,
            |d, m| and(d.degree(Distance::Near), m.degree(Ammo::Low)),
        ),
        Rule::new(
            "distance is medium AND (ammo is medium OR ammo is high)",
            Desirability::Desirable,
            |d, m| {
                and(
                    d.degree(Distance::Medium),
                    or(m.degree(Ammo::Medium), m.degree(Ammo::High)),
                )
            },
        ),
        Rule::new(
            "distance is far OR (distance is medium AND ammo is low)",
            Desirability::Undesirable,
            |d, m| {
                or(
                    d.degree(Distance::Far),
                    and(d.degree(Distance::Medium), m.degree(Ammo::Low)),
                )
            },
        ),
    ])
}
