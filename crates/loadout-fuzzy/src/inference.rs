use crate::aggregate::Aggregated;
use crate::defuzz::{Centroid, OutputCurve};
use crate::fuzzify::Memberships;
use crate::rules::{Firing, RuleTable};
use crate::variable::{FuzzyVariable, Label};

/// Two-input Mamdani system: shared variables and centroid settings that
/// any number of rule tables can be run against.
#[derive(Debug, Clone)]
pub struct InferenceSystem<A: Label, B: Label, O: Label> {
    first: FuzzyVariable<A>,
    second: FuzzyVariable<B>,
    output: FuzzyVariable<O>,
    centroid: Centroid,
}

/// Everything one pass through the pipeline produced.
#[derive(Debug, Clone)]
pub struct Inference<A: Label, B: Label, O: Label> {
    pub first: Memberships<A>,
    pub second: Memberships<B>,
    pub firings: Vec<Firing<O>>,
    pub curve: OutputCurve<O>,
    pub crisp: f64,
}

impl<A: Label, B: Label, O: Label> Inference<A, B, O> {
    pub fn aggregated(&self) -> &Aggregated<O> {
        self.curve.aggregated()
    }
}

impl<A: Label, B: Label, O: Label> InferenceSystem<A, B, O> {
    pub fn new(
        first: FuzzyVariable<A>,
        second: FuzzyVariable<B>,
        output: FuzzyVariable<O>,
        centroid: Centroid,
    ) -> Self {
        Self {
            first,
            second,
            output,
            centroid,
        }
    }

    /// Fuzzify, fire, aggregate, defuzzify. Inputs are not range checked.
    pub fn infer(&self, rules: &RuleTable<A, B, O>, first: f64, second: f64) -> Inference<A, B, O> {
        let first = self.first.fuzzify(first);
        let second = self.second.fuzzify(second);
        let firings = rules.fire_all(&first, &second);
        let aggregated = Aggregated::from_firings(&firings);
        let curve = OutputCurve::new(aggregated, self.output.clone());
        let crisp = self.centroid.crisp(&curve);

        Inference {
            first,
            second,
            firings,
            curve,
            crisp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{and, Rule};
    use crate::variable::Universe;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Tri {
        Lo,
        Mid,
        Hi,
    }

    impl Label for Tri {
        const ALL: &'static [Self] = &[Tri::Lo, Tri::Mid, Tri::Hi];

        fn name(self) -> &'static str {
            match self {
                Tri::Lo => "lo",
                Tri::Mid => "mid",
                Tri::Hi => "hi",
            }
        }
    }

    fn variable(name: &'static str) -> FuzzyVariable<Tri> {
        FuzzyVariable::from_breakpoints(
            name,
            Universe::PERCENT,
            &[
                (Tri::Lo, (0.0, 0.0, 50.0)),
                (Tri::Mid, (0.0, 50.0, 100.0)),
                (Tri::Hi, (50.0, 100.0, 100.0)),
            ],
        )
        .expect("valid variable")
    }

    fn system() -> InferenceSystem<Tri, Tri, Tri> {
        InferenceSystem::new(
            variable("x"),
            variable("y"),
            variable("out"),
            Centroid::default(),
        )
    }

    fn rules() -> RuleTable<Tri, Tri, Tri> {
        RuleTable::new(vec![
            Rule::new("x.hi AND y.hi", Tri::Hi, |x, y| {
                and(x.degree(Tri::Hi), y.degree(Tri::Hi))
            }),
            Rule::new("x.lo", Tri::Lo, |x, _| x.degree(Tri::Lo)),
        ])
    }

    #[test]
    fn pipeline_exposes_each_stage() {
        let out = system().infer(&rules(), 100.0, 100.0);
        assert_eq!(out.first.degree(Tri::Hi), 1.0);
        assert_eq!(out.second.degree(Tri::Hi), 1.0);
        assert_eq!(out.firings.len(), 2);
        assert_eq!(out.aggregated().degree(Tri::Hi), 1.0);
        assert_eq!(out.aggregated().degree(Tri::Lo), 0.0);
        assert!(out.crisp > 50.0);
        assert_eq!(out.curve.sample(100.0), 1.0);
    }

    #[test]
    fn no_activation_scores_zero() {
        let out = system().infer(&rules(), 50.0, 0.0);
        assert!(out.aggregated().is_silent());
        assert_eq!(out.crisp, 0.0);
    }

    #[test]
    fn repeated_inference_is_identical() {
        let sys = system();
        let table = rules();
        let a = sys.infer(&table, 73.0, 88.0);
        let b = sys.infer(&table, 73.0, 88.0);
        assert_eq!(a.crisp.to_bits(), b.crisp.to_bits());
        assert_eq!(a.curve, b.curve);
    }

    #[test]
    fn empty_rule_table_scores_zero() {
        let out = system().infer(&RuleTable::new(Vec::new()), 10.0, 10.0);
        assert_eq!(out.crisp, 0.0);
        assert!(out.firings.is_empty());
    }
}
