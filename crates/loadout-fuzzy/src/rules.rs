use serde::{Serialize, Serializer};

use crate::fuzzify::Memberships;
use crate::variable::Label;

/// Product t-norm.
pub fn and(a: f64, b: f64) -> f64 {
    a * b
}

/// Maximum t-conorm. Unlike `f64::max`, a `NaN` operand yields `NaN`.
pub fn or(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    a.max(b)
}

/// Minimum, `NaN`-propagating like [`or`].
pub fn clip(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    a.min(b)
}

pub type Antecedent<A, B> = fn(&Memberships<A>, &Memberships<B>) -> f64;

#[derive(Clone, Copy)]
pub struct Rule<A: Label, B: Label, O: Label> {
    pub description: &'static str,
    pub conclusion: O,
    pub antecedent: Antecedent<A, B>,
}

impl<A: Label, B: Label, O: Label> std::fmt::Debug for Rule<A, B, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("description", &self.description)
            .field("conclusion", &self.conclusion)
            .finish()
    }
}

impl<A: Label, B: Label, O: Label> Rule<A, B, O> {
    pub fn new(description: &'static str, conclusion: O, antecedent: Antecedent<A, B>) -> Self {
        Self {
            description,
            conclusion,
            antecedent,
        }
    }

    pub fn fire(&self, first: &Memberships<A>, second: &Memberships<B>) -> Firing<O> {
        Firing {
            rule: self.description,
            conclusion: self.conclusion,
            strength: (self.antecedent)(first, second),
        }
    }
}

/// Outcome of one rule for one input pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Firing<O: Label> {
    pub rule: &'static str,
    pub conclusion: O,
    pub strength: f64,
}

impl<O: Label> Serialize for Firing<O> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Firing", 3)?;
        state.serialize_field("rule", self.rule)?;
        state.serialize_field("conclusion", self.conclusion.name())?;
        state.serialize_field("strength", &self.strength)?;
        state.end()
    }
}

/// Ordered rule list owned by one candidate. Order never changes the
/// aggregated result.
#[derive(Debug, Clone)]
pub struct RuleTable<A: Label, B: Label, O: Label> {
    rules: Vec<Rule<A, B, O>>,
}

impl<A: Label, B: Label, O: Label> RuleTable<A, B, O> {
    pub fn new(rules: Vec<Rule<A, B, O>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule<A, B, O>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn fire_all(&self, first: &Memberships<A>, second: &Memberships<B>) -> Vec<Firing<O>> {
        self.rules
            .iter()
            .map(|rule| rule.fire(first, second))
            .collect()
    }
}

impl<A: Label, B: Label, O: Label> FromIterator<Rule<A, B, O>> for RuleTable<A, B, O> {
    fn from_iter<T: IntoIterator<Item = Rule<A, B, O>>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Side {
        Left,
        Right,
    }

    impl Label for Side {
        const ALL: &'static [Self] = &[Side::Left, Side::Right];

        fn name(self) -> &'static str {
            match self {
                Side::Left => "left",
                Side::Right => "right",
            }
        }
    }

    fn inputs() -> (Memberships<Side>, Memberships<Side>) {
        (
            [(Side::Left, 0.6), (Side::Right, 0.2)].into_iter().collect(),
            [(Side::Left, 0.5), (Side::Right, 0.9)].into_iter().collect(),
        )
    }

    #[test]
    fn combinators_stay_in_unit_interval() {
        let grid = [0.0, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
        for a in grid {
            for b in grid {
                for v in [and(a, b), or(a, b), clip(a, b)] {
                    assert!((0.0..=1.0).contains(&v), "a={a} b={b} -> {v}");
                }
            }
        }
        assert_eq!(and(0.5, 0.4), 0.2);
        assert_eq!(or(0.5, 0.4), 0.5);
        assert_eq!(clip(0.5, 0.4), 0.4);
    }

    #[test]
    fn nan_propagates_through_or_and_clip() {
        assert!(or(f64::NAN, 0.3).is_nan());
        assert!(or(0.3, f64::NAN).is_nan());
        assert!(clip(f64::NAN, 1.0).is_nan());
        assert!(and(f64::NAN, 0.0).is_nan());
    }

    #[test]
    fn table_fires_every_rule_in_order() {
        let table: RuleTable<Side, Side, Side> = [
            Rule::new("x.left AND y.right", Side::Right, |x, y| {
                and(x.degree(Side::Left), y.degree(Side::Right))
            }),
            Rule::new("x.right OR y.left", Side::Left, |x, y| {
                or(x.degree(Side::Right), y.degree(Side::Left))
            }),
        ]
        .into_iter()
        .collect();

        let (x, y) = inputs();
        let firings = table.fire_all(&x, &y);
        assert_eq!(table.len(), 2);
        assert_eq!(firings.len(), 2);
        assert!((firings[0].strength - 0.54).abs() < 1e-12);
        assert_eq!(firings[0].conclusion, Side::Right);
        assert_eq!(firings[1].strength, 0.5);
        assert_eq!(firings[1].rule, "x.right OR y.left");
    }

    #[test]
    fn firing_serializes_with_label_names() {
        let firing = Firing {
            rule: "x.left",
            conclusion: Side::Left,
            strength: 0.25,
        };
        let json = serde_json::to_value(firing).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"rule": "x.left", "conclusion": "left", "strength": 0.25})
        );
    }
}
