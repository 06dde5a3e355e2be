use comalg_core::AlgebraError;
use serde::{Deserialize, Serialize};

use crate::checker::{AssociatedPrimesIdentity, ProjectiveEquivalence};
use crate::hash::stable_hash_string;
use crate::serde::to_canonical_json_bytes;
use crate::theorem::TheoremStatement;

/// Both theorem checks for a single scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario name.
    pub name: String,
    /// Ring name.
    pub ring: String,
    /// Structure of the module, e.g. `Z/(6)`.
    pub module: String,
    /// Projective ⇔ locally free check.
    pub projective_equivalence: ProjectiveEquivalence,
    /// `⋂ Ass(M) = √Ann(M)` check.
    pub associated_primes_identity: AssociatedPrimesIdentity,
}

impl ScenarioOutcome {
    /// Returns whether both theorems held for this scenario.
    pub fn holds(&self) -> bool {
        self.projective_equivalence.equivalence_holds
            && self.associated_primes_identity.identity_holds
    }
}

/// Aggregated report over a batch of scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    /// Content-addressed hash of the theorems and outcomes.
    pub analysis_hash: String,
    /// Theorems evaluated for every scenario.
    pub theorems: Vec<TheoremStatement>,
    /// Per-scenario outcomes in evaluation order.
    pub outcomes: Vec<ScenarioOutcome>,
    /// Whether every outcome holds.
    pub all_hold: bool,
}

impl CheckReport {
    /// Constructs a report while computing the stable hash.
    pub fn new(
        theorems: Vec<TheoremStatement>,
        outcomes: Vec<ScenarioOutcome>,
    ) -> Result<Self, AlgebraError> {
        let analysis_hash = stable_hash_string(&(&theorems, &outcomes))?;
        let all_hold = outcomes.iter().all(ScenarioOutcome::holds);
        Ok(Self {
            analysis_hash,
            theorems,
            outcomes,
            all_hold,
        })
    }

    /// Outcomes reporting a counterexample.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.holds())
    }

    /// Persists the report as canonical JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AlgebraError> {
        to_canonical_json_bytes(self)
    }
}
