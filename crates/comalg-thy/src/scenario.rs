use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use comalg_core::{AlgebraError, ErrorInfo, Ring, RingKind};
use comalg_module::Module;
use serde::{Deserialize, Serialize};
use tracing::debug;

fn config_error(code: &str, message: impl Into<String>) -> AlgebraError {
    AlgebraError::Config(ErrorInfo::new(code, message.into()))
}

/// Presentation of the module under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Generator symbols.
    pub generators: Vec<String>,
    /// Relation rows, one coefficient per generator.
    #[serde(default)]
    pub relations: Vec<Vec<i64>>,
}

/// A (ring, module) pair to run both theorem checks against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Unique scenario name.
    pub name: String,
    /// Ring family.
    pub ring: RingKind,
    /// Noetherian tag recorded on the constructed ring.
    #[serde(default = "ScenarioSpec::default_assume_noetherian")]
    pub assume_noetherian: bool,
    /// Module presentation.
    pub module: ModuleSpec,
}

impl ScenarioSpec {
    fn default_assume_noetherian() -> bool {
        true
    }

    /// Scenario for the cyclic module `A/(d)`.
    pub fn cyclic(name: &str, ring: RingKind, d: i64) -> Self {
        Self {
            name: name.to_string(),
            ring,
            assume_noetherian: true,
            module: ModuleSpec {
                name: None,
                generators: vec!["e".to_string()],
                relations: vec![vec![d]],
            },
        }
    }

    /// Scenario for the free module `A^rank`.
    pub fn free(name: &str, ring: RingKind, rank: usize) -> Self {
        Self {
            name: name.to_string(),
            ring,
            assume_noetherian: true,
            module: ModuleSpec {
                name: None,
                generators: (1..=rank).map(|idx| format!("e{idx}")).collect(),
                relations: Vec::new(),
            },
        }
    }

    /// Constructs the ring and the module, validating the presentation.
    pub fn build(&self) -> Result<(Ring, Module), AlgebraError> {
        let generators = if self.ring.modulus() == 1 {
            Vec::new()
        } else {
            vec!["1".to_string()]
        };
        let ring = Ring::new(
            self.ring.default_name(),
            self.ring,
            generators,
            self.assume_noetherian,
        )?;
        let mut module = Module::new(
            &ring,
            self.module.generators.clone(),
            self.module.relations.clone(),
        )?;
        if let Some(name) = &self.module.name {
            module = module.with_name(name.clone());
        }
        debug!(scenario = %self.name, ring = %ring, module = %module, "built scenario");
        Ok((ring, module))
    }
}

/// Batch of scenarios, as read from YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioFile {
    /// Scenarios in evaluation order.
    pub scenarios: Vec<ScenarioSpec>,
}

impl ScenarioFile {
    /// The default scenario set used when no file is supplied.
    pub fn builtin() -> Self {
        let z = RingKind::Integers;
        Self {
            scenarios: vec![
                ScenarioSpec::cyclic("z-mod-6", z, 6),
                ScenarioSpec::cyclic("z-mod-4", z, 4),
                ScenarioSpec::free("z-cubed", z, 3),
                ScenarioSpec::cyclic("z6-mod-2", RingKind::IntegersMod { modulus: 6 }, 2),
                ScenarioSpec::cyclic("z4-mod-2", RingKind::IntegersMod { modulus: 4 }, 2),
            ],
        }
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(input: &str) -> Result<Self, AlgebraError> {
        let file: Self = serde_yaml::from_str(input)
            .map_err(|err| config_error("scenario-parse", err.to_string()))?;
        file.validate()?;
        Ok(file)
    }

    /// Reads and validates a YAML scenario file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AlgebraError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|err| {
            AlgebraError::Config(
                ErrorInfo::new("scenario-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::from_yaml_str(&input)
    }

    /// Rejects empty batches and repeated scenario names.
    pub fn validate(&self) -> Result<(), AlgebraError> {
        if self.scenarios.is_empty() {
            return Err(config_error("empty-scenarios", "scenario file lists no scenarios"));
        }
        let mut seen = BTreeSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(AlgebraError::Config(
                    ErrorInfo::new("duplicate-scenario", "scenario names must be unique")
                        .with_context("name", scenario.name.clone()),
                ));
            }
        }
        Ok(())
    }
}
