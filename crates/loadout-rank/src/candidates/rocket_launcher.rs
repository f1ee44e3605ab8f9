use loadout_fuzzy::{and, or, Rule};

use crate::terms::{Ammo, Desirability, Distance, WeaponRules};

pub const ID: &str = "rocket_launcher";

/// Area weapon: only worth it at medium range, where splash cannot hurt
/// the shooter and the target is still reachable.
pub fn rules() -> WeaponRules {
    WeaponRules::new(vec![
        Rule::new(
            "distance is medium AND (ammo is low OR ammo is medium)",
            Desirability::Essential,
            |d, m| {
                and(
                    d.degree(Distance::Medium),
                    or(m.degree(Ammo::Low), m.degree(Ammo::Medium)),
                )
            },
        ),
        Rule::new(
            "distance is medium AND ammo is high",
            Desirability::Desirable,
            |d, m| and(d.degree(Distance::Medium), m.degree(Ammo::High)),
        ),
        Rule::new(
            "distance is near OR distance is far",
            Desirability::Undesirable,
            |d, _| or(d.degree(Distance::Near), d.degree(Distance::Far)),
        ),
    ])
}
