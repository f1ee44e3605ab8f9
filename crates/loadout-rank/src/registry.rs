use std::sync::Arc;

use crate::candidates::{self, Candidate};
use crate::config::EngineConfig;
use crate::error::LoadoutError;
use crate::evaluator::CandidateEvaluator;
use crate::ranking;
use crate::terms::weapon_system;
use crate::types::Ranking;

/// Ordered, immutable set of candidates sharing one inference system.
#[derive(Debug, Clone)]
pub struct Registry {
    evaluators: Vec<CandidateEvaluator>,
}

impl Registry {
    pub fn new(config: &EngineConfig, candidates: Vec<Candidate>) -> Result<Self, LoadoutError> {
        config.validate()?;
        let system = Arc::new(weapon_system(config.centroid_samples)?);

        let mut evaluators: Vec<CandidateEvaluator> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if evaluators.iter().any(|e| e.id() == candidate.id) {
                return Err(LoadoutError::Config(format!(
                    "candidate {} registered twice",
                    candidate.id
                )));
            }
            evaluators.push(CandidateEvaluator::new(candidate, Arc::clone(&system)));
        }

        Ok(Self { evaluators })
    }

    pub fn evaluators(&self) -> &[CandidateEvaluator] {
        &self.evaluators
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&CandidateEvaluator, LoadoutError> {
        self.evaluators
            .iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| LoadoutError::UnknownCandidate(id.to_string()))
    }

    pub fn rank(&self, distance: f64, ammo: f64) -> Ranking {
        ranking::rank(&self.evaluators, distance, ammo)
    }
}

/// Registry holding the built-in weapons.
pub fn build_registry(config: &EngineConfig) -> Result<Registry, LoadoutError> {
    let registry = Registry::new(config, candidates::builtin())?;
    tracing::info!(
        candidates = registry.len(),
        centroid_samples = config.centroid_samples,
        "loadout registry ready"
    );
    Ok(registry)
}
