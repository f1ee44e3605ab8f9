use loadout_fuzzy::{and, or, Rule};

use crate::terms::{Ammo, Desirability, Distance, WeaponRules};

pub const ID: &str = "rifle";

pub fn rules() -> WeaponRules {
    WeaponRules::new(vec![
        Rule::new(
            "distance is far AND ammo is high",
            Desirability::Essential,
            |d, m| and(d.degree(Distance::Far), m.degree(Ammo::High)),
        ),
        Rule::new(
            "distance is far AND ammo is medium",
            Desirability::Desirable,
            |d, m| and(d.degree(Distance::Far), m.degree(Ammo::Medium)),
        ),
        Rule::new(
            "distance is far AND ammo is low",
            Desirability::Desirable,
            |d, m| and(d.degree(Distance::Far), m.degree(Ammo::Low)),
        ),
        Rule::new(
            "distance is medium AND (ammo is high OR ammo is medium)",
            Desirability::Desirable,
            |d, m| {
                and(
                    d.degree(Distance::Medium),
                    or(m.degree(Ammo::High), m.degree(Ammo::Medium)),
                )
            },
        ),
        Rule::new(
            "(distance is near OR distance is medium) AND ammo is low",
            Desirability::Undesirable,
            |d, m| {
                and(
                    or(d.degree(Distance::Near), d.degree(Distance::Medium)),
                    m.degree(Ammo::Low),
                )
            },
        ),
        Rule::new(
            "distance is near AND (ammo is low OR ammo is medium)",
            Desirability::Undesirable,
            |d, m| {
                and(
                    d.degree(Distance::Near),
                    or(m.degree(Ammo::Low), m.degree(Ammo::Medium)),
                )
            },
        ),
    ])
}
