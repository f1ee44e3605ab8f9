pub mod aggregate;
pub mod defuzz;
pub mod error;
pub mod fuzzify;
pub mod inference;
pub mod membership;
pub mod rules;
pub mod variable;

pub use aggregate::*;
pub use defuzz::*;
pub use error::FuzzyError;
pub use fuzzify::*;
pub use inference::*;
pub use membership::*;
pub use rules::{and, clip, or, Antecedent, Firing, Rule, RuleTable};
pub use variable::*;
