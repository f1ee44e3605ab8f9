pub mod candidates;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod ranking;
pub mod registry;
pub mod terms;
pub mod types;

pub use candidates::{Candidate, WeaponProfile};
pub use config::*;
pub use error::LoadoutError;
pub use evaluator::*;
pub use registry::*;
pub use terms::*;
pub use types::*;
