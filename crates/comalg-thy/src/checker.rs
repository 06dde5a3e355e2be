use comalg_core::{AlgebraError, Ideal, IdealSummary, RingHandle};
use comalg_module::{LocalFreeness, Module, PrimeScope, Projectivity};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::{CheckReport, ScenarioOutcome};
use crate::scenario::{ScenarioFile, ScenarioSpec};
use crate::theorem::{catalogue, TheoremStatement};

/// Computed evidence behind each condition of [`ProjectiveEquivalence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectiveWitnesses {
    /// Ext¹ verdict for condition (1).
    pub projectivity: Projectivity,
    /// Localization verdict over all primes, condition (2).
    pub at_primes: LocalFreeness,
    /// Localization verdict over all maximal ideals, condition (3).
    pub at_maximals: LocalFreeness,
}

/// Result of checking projective ⇔ locally free for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectiveEquivalence {
    /// Condition (1): the module is projective.
    pub projective: bool,
    /// Condition (2): free after localizing at every prime.
    pub locally_free_at_primes: bool,
    /// Condition (3): free after localizing at every maximal ideal.
    pub locally_free_at_maximals: bool,
    /// Whether the three computed conditions agree.
    pub equivalence_holds: bool,
    /// Evidence for each condition, when computed from a module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub witnesses: Option<ProjectiveWitnesses>,
}

impl ProjectiveEquivalence {
    /// Derives the equivalence flag from three independently obtained conditions.
    pub fn from_conditions(
        projective: bool,
        locally_free_at_primes: bool,
        locally_free_at_maximals: bool,
    ) -> Self {
        Self {
            projective,
            locally_free_at_primes,
            locally_free_at_maximals,
            equivalence_holds: projective == locally_free_at_primes
                && locally_free_at_primes == locally_free_at_maximals,
            witnesses: None,
        }
    }
}

/// An associated prime with the element it annihilates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedPrimeSummary {
    /// The prime ideal.
    pub prime: IdealSummary,
    /// Coefficients of a nonzero element whose annihilator is `prime`.
    pub witness: Vec<i64>,
}

/// Result of checking `⋂ Ass(M) = √Ann(M)` for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedPrimesIdentity {
    /// `Ann(M)`.
    pub annihilator: IdealSummary,
    /// `√Ann(M)`.
    pub radical_of_annihilator: IdealSummary,
    /// `Ass(M)` with witnesses.
    pub associated_primes: Vec<AssociatedPrimeSummary>,
    /// `⋂ Ass(M)`.
    pub intersection: IdealSummary,
    /// Whether both sides generate the same ideal.
    pub identity_holds: bool,
}

/// Evaluates the three conditions of the projective equivalence independently.
pub fn check_projective_equivalence(
    ring: &RingHandle,
    module: &Module,
) -> Result<ProjectiveEquivalence, AlgebraError> {
    let projectivity = module.is_projective(ring)?;
    let at_primes = module.is_locally_free(ring, PrimeScope::AllPrimes)?;
    let at_maximals = module.is_locally_free(ring, PrimeScope::AllMaximals)?;
    let mut result = ProjectiveEquivalence::from_conditions(
        projectivity.holds(),
        at_primes.holds(),
        at_maximals.holds(),
    );
    if !result.equivalence_holds {
        warn!(
            ring = %ring,
            module = %module,
            projective = result.projective,
            at_primes = result.locally_free_at_primes,
            at_maximals = result.locally_free_at_maximals,
            "projective equivalence fails"
        );
    }
    result.witnesses = Some(ProjectiveWitnesses {
        projectivity,
        at_primes,
        at_maximals,
    });
    Ok(result)
}

/// Computes both `⋂ Ass(M)` and `√Ann(M)` and compares them.
pub fn check_associated_primes_identity(
    ring: &RingHandle,
    module: &Module,
) -> Result<AssociatedPrimesIdentity, AlgebraError> {
    ring.ensure_same(module.ring())?;
    let annihilator = module.annihilator()?;
    let radical = annihilator.radical();
    let associated = module.associated_primes()?;
    let intersection = Ideal::intersect_all(ring, associated.iter().map(|assoc| &assoc.prime))?;
    let identity_holds = intersection == radical;
    if !identity_holds {
        warn!(
            ring = %ring,
            module = %module,
            intersection = %intersection,
            radical = %radical,
            "associated primes identity fails"
        );
    }
    Ok(AssociatedPrimesIdentity {
        annihilator: annihilator.summary(),
        radical_of_annihilator: radical.summary(),
        associated_primes: associated
            .iter()
            .map(|assoc| AssociatedPrimeSummary {
                prime: assoc.prime.summary(),
                witness: assoc.witness.coefficients().to_vec(),
            })
            .collect(),
        intersection: intersection.summary(),
        identity_holds,
    })
}

/// Runs both theorem checks over scenarios and assembles a report.
#[derive(Debug, Clone)]
pub struct TheoremChecker {
    theorems: Vec<TheoremStatement>,
}

impl Default for TheoremChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TheoremChecker {
    /// Creates a checker for the full theorem catalogue.
    pub fn new() -> Self {
        Self {
            theorems: catalogue(),
        }
    }

    /// Theorems evaluated for every scenario.
    pub fn theorems(&self) -> &[TheoremStatement] {
        &self.theorems
    }

    /// Builds the scenario's ring and module and checks both theorems.
    pub fn check_scenario(
        &self,
        scenario: &ScenarioSpec,
    ) -> Result<ScenarioOutcome, AlgebraError> {
        info!(scenario = %scenario.name, "checking scenario");
        let (ring, module) = scenario.build()?;
        let projective_equivalence = check_projective_equivalence(&ring, &module)?;
        let associated_primes_identity = check_associated_primes_identity(&ring, &module)?;
        let outcome = ScenarioOutcome {
            name: scenario.name.clone(),
            ring: ring.name().to_string(),
            module: module.describe()?,
            projective_equivalence,
            associated_primes_identity,
        };
        info!(scenario = %scenario.name, holds = outcome.holds(), "scenario checked");
        Ok(outcome)
    }

    /// Checks every scenario in order. The first error aborts the run.
    pub fn run(&self, file: &ScenarioFile) -> Result<CheckReport, AlgebraError> {
        file.validate()?;
        let outcomes = file
            .scenarios
            .iter()
            .map(|scenario| self.check_scenario(scenario))
            .collect::<Result<Vec<_>, _>>()?;
        CheckReport::new(self.theorems.clone(), outcomes)
    }
}
