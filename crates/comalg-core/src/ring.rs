//! Commutative rings with exact principal ideal arithmetic.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::arith;
use crate::errors::{AlgebraError, ErrorInfo};
use crate::ideal::Ideal;

/// Concrete ring families supported by the element arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RingKind {
    /// The integers `Z`.
    Integers,
    /// The residue ring `Z/nZ` for `n >= 1`.
    IntegersMod {
        /// Modulus `n`; `1` yields the zero ring.
        modulus: i64,
    },
}

impl RingKind {
    /// Characteristic of the ring viewed as a quotient of `Z` (`0` for `Z` itself).
    pub fn modulus(&self) -> i64 {
        match self {
            RingKind::Integers => 0,
            RingKind::IntegersMod { modulus } => *modulus,
        }
    }

    /// Conventional display name for the ring family.
    pub fn default_name(&self) -> String {
        match self {
            RingKind::Integers => "Z".to_string(),
            RingKind::IntegersMod { modulus } => format!("Z/{modulus}Z"),
        }
    }
}

#[derive(Debug)]
struct RingData {
    name: String,
    kind: RingKind,
    generators: Vec<String>,
    noetherian: bool,
}

/// Shared, immutable reference to a ring.
///
/// Ideals and modules hold a handle to their owning ring. Two handles compare
/// equal only when they point at the same ring instance: rings built
/// separately are distinct even when their kinds agree.
#[derive(Clone)]
pub struct RingHandle(Arc<RingData>);

impl PartialEq for RingHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for RingHandle {}

impl fmt::Debug for RingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingHandle")
            .field("name", &self.0.name)
            .field("kind", &self.0.kind)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for RingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Prime spectrum as far as the ring can enumerate it.
#[derive(Debug, Clone, PartialEq)]
pub enum Spectrum {
    /// Every prime ideal of the ring.
    Finite(Vec<Ideal>),
    /// The ring has infinitely many primes; callers must pick the relevant ones.
    Infinite,
}

impl RingHandle {
    /// Display name of the ring.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Ring family.
    pub fn kind(&self) -> RingKind {
        self.0.kind
    }

    /// Characteristic (`0` for `Z`).
    pub fn modulus(&self) -> i64 {
        self.0.kind.modulus()
    }

    /// Ordered generator symbols of the ring.
    pub fn generators(&self) -> &[String] {
        &self.0.generators
    }

    /// Returns the Noetherian tag recorded at construction.
    ///
    /// This is an assumption supplied by whoever built the ring. No ascending
    /// chain verification takes place, so a `true` here is only as reliable as
    /// the constructor call that set it.
    pub fn is_noetherian(&self) -> bool {
        self.0.noetherian
    }

    /// Returns whether `x` lies in the element domain of the ring.
    ///
    /// For `Z` this is every `i64` except `i64::MIN`; for `Z/nZ` it is the
    /// canonical residues `0..n`.
    pub fn contains(&self, x: i64) -> bool {
        match self.modulus() {
            0 => x != i64::MIN,
            m => (0..m).contains(&x),
        }
    }

    /// Canonical representative of `x` in the ring.
    pub fn reduce(&self, x: i64) -> i64 {
        match self.modulus() {
            0 => x,
            m => x.rem_euclid(m),
        }
    }

    /// Non-negative generator of the principal ideal `(x)`, as a divisor of the modulus.
    pub fn ideal_generator(&self, x: i64) -> i64 {
        arith::gcd(self.reduce(x), self.modulus())
    }

    /// Returns whether this is the zero ring `Z/1Z`.
    pub fn is_trivial(&self) -> bool {
        self.modulus() == 1
    }

    /// Krull dimension; `None` for the zero ring, which has no primes.
    pub fn krull_dimension(&self) -> Option<usize> {
        match self.modulus() {
            0 => Some(1),
            1 => None,
            _ => Some(0),
        }
    }

    /// Prime spectrum of the ring.
    pub fn spectrum(&self) -> Spectrum {
        match self.modulus() {
            0 => Spectrum::Infinite,
            m => Spectrum::Finite(
                arith::prime_divisors(m)
                    .into_iter()
                    .map(|p| Ideal::from_integer(self, p))
                    .collect(),
            ),
        }
    }

    /// Returns a domain error when `other` is not this ring.
    pub fn ensure_same(&self, other: &RingHandle) -> Result<(), AlgebraError> {
        if self == other {
            return Ok(());
        }
        Err(AlgebraError::Domain(
            ErrorInfo::new("ring-mismatch", "operands belong to different rings")
                .with_context("expected", self.name())
                .with_context("found", other.name()),
        ))
    }
}

/// A commutative ring together with its append-only registry of ideals.
#[derive(Debug, Clone)]
pub struct Ring {
    handle: RingHandle,
    ideals: Vec<Ideal>,
}

impl Ring {
    /// Creates a ring from its kind, generator symbols and Noetherian tag.
    pub fn new(
        name: impl Into<String>,
        kind: RingKind,
        generators: Vec<String>,
        noetherian: bool,
    ) -> Result<Self, AlgebraError> {
        let name = name.into();
        if let RingKind::IntegersMod { modulus } = kind {
            if modulus < 1 {
                return Err(AlgebraError::Domain(
                    ErrorInfo::new("zero-modulus", "residue rings need a modulus of at least 1")
                        .with_context("modulus", modulus.to_string())
                        .with_hint("use RingKind::Integers for Z"),
                ));
            }
        }
        if generators.is_empty() && kind.modulus() != 1 {
            return Err(AlgebraError::Domain(
                ErrorInfo::new("empty-generators", "non-trivial rings need a generator")
                    .with_context("ring", name.clone()),
            ));
        }
        Ok(Self::build(name, kind, generators, noetherian))
    }

    fn build(name: String, kind: RingKind, generators: Vec<String>, noetherian: bool) -> Self {
        debug!(ring = %name, ?kind, noetherian, "constructed ring");
        Self {
            handle: RingHandle(Arc::new(RingData {
                name,
                kind,
                generators,
                noetherian,
            })),
            ideals: Vec::new(),
        }
    }

    /// The integers, tagged Noetherian.
    pub fn integers() -> Self {
        let kind = RingKind::Integers;
        Self::build(kind.default_name(), kind, vec!["1".to_string()], true)
    }

    /// The residue ring `Z/nZ`, tagged Noetherian.
    pub fn integers_mod(modulus: i64) -> Result<Self, AlgebraError> {
        let kind = RingKind::IntegersMod { modulus };
        let generators = if modulus == 1 {
            Vec::new()
        } else {
            vec!["1".to_string()]
        };
        Self::new(kind.default_name(), kind, generators, true)
    }

    /// Shared handle to the ring.
    pub fn handle(&self) -> &RingHandle {
        &self.handle
    }

    /// Appends an ideal to the registry.
    ///
    /// Fails with a domain error when the ideal was built over another ring.
    pub fn add_ideal(&mut self, ideal: Ideal) -> Result<(), AlgebraError> {
        self.handle.ensure_same(ideal.ring())?;
        debug!(ring = %self.handle, ideal = %ideal, "registered ideal");
        self.ideals.push(ideal);
        Ok(())
    }

    /// Registered ideals in insertion order.
    pub fn ideals(&self) -> &[Ideal] {
        &self.ideals
    }

    /// Registered ideals that are prime.
    pub fn prime_ideals(&self) -> Vec<&Ideal> {
        self.ideals.iter().filter(|ideal| ideal.is_prime()).collect()
    }

    /// Registered ideals that are maximal.
    pub fn maximal_ideals(&self) -> Vec<&Ideal> {
        self.ideals
            .iter()
            .filter(|ideal| ideal.is_maximal())
            .collect()
    }
}

impl Deref for Ring {
    type Target = RingHandle;

    fn deref(&self) -> &RingHandle {
        &self.handle
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.handle, f)
    }
}
