use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("invalid triangle breakpoints: a={a}, b={b}, c={c} (expected a <= b <= c)")]
    InvalidBreakpoints { a: f64, b: f64, c: f64 },

    #[error("triangle breakpoints must be finite: a={a}, b={b}, c={c}")]
    NonFiniteBreakpoint { a: f64, b: f64, c: f64 },

    #[error("invalid universe: [{min}, {max}]")]
    InvalidUniverse { min: f64, max: f64 },

    #[error("variable {variable} declares term {term} more than once")]
    DuplicateTerm {
        variable: &'static str,
        term: &'static str,
    },

    #[error("variable {variable} is missing term {term}")]
    MissingTerm {
        variable: &'static str,
        term: &'static str,
    },

    #[error("centroid needs at least 2 samples, got {0}")]
    TooFewSamples(usize),
}
