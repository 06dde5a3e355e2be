#![deny(missing_docs)]
#![doc = "Theorem checks for finitely generated modules over Noetherian rings."]

/// Projective equivalence and associated primes checks, plus the batch runner.
pub mod checker;
/// Canonical hashing helpers.
pub mod hash;
/// Aggregated check reports.
pub mod report;
/// YAML scenario configuration.
pub mod scenario;
/// Canonical JSON helpers.
pub mod serde;
/// Theorem statements evaluated by the checker.
pub mod theorem;

pub use checker::{
    check_associated_primes_identity, check_projective_equivalence, AssociatedPrimeSummary,
    AssociatedPrimesIdentity, ProjectiveEquivalence, ProjectiveWitnesses, TheoremChecker,
};
pub use report::{CheckReport, ScenarioOutcome};
pub use scenario::{ModuleSpec, ScenarioFile, ScenarioSpec};
pub use theorem::{catalogue, TheoremStatement};
