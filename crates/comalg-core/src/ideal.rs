//! Finitely generated ideals over principal ideal rings.
//!
//! Every ring supported here is a quotient `Z/(m)` (with `m = 0` for `Z`), so
//! an ideal is determined by a single non-negative divisor `g` of `m`: the
//! generator of its preimage in `Z`. All operations reduce to gcd/lcm
//! arithmetic on that divisor, while the generator set the caller supplied is
//! kept for inspection.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::arith;
use crate::errors::{AlgebraError, ErrorInfo};
use crate::ring::RingHandle;

fn element_outside(ring: &RingHandle, x: i64) -> AlgebraError {
    AlgebraError::Domain(
        ErrorInfo::new(
            "element-outside-domain",
            "generator is not an element of the owning ring",
        )
        .with_context("ring", ring.name())
        .with_context("element", x.to_string()),
    )
}

/// An ideal of a ring, compared by the ideal it generates.
#[derive(Debug, Clone)]
pub struct Ideal {
    ring: RingHandle,
    generators: BTreeSet<i64>,
    divisor: i64,
}

/// Serializable snapshot of an [`Ideal`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealSummary {
    /// Name of the owning ring.
    pub ring: String,
    /// Canonical generator as a ring element.
    pub generator: i64,
    /// Human readable form, e.g. `(6)`.
    pub display: String,
    /// Whether the ideal is prime.
    pub prime: bool,
    /// Whether the ideal is maximal.
    pub maximal: bool,
}

impl Ideal {
    /// Builds the ideal generated by `generators`.
    ///
    /// Fails with a domain error when a generator is outside the ring's element
    /// domain. The empty generator set yields the zero ideal.
    pub fn new(
        ring: &RingHandle,
        generators: impl IntoIterator<Item = i64>,
    ) -> Result<Self, AlgebraError> {
        let mut set = BTreeSet::new();
        let mut divisor = ring.modulus();
        for x in generators {
            if !ring.contains(x) {
                return Err(element_outside(ring, x));
            }
            divisor = arith::gcd(divisor, x);
            set.insert(x);
        }
        Ok(Self {
            ring: ring.clone(),
            generators: set,
            divisor,
        })
    }

    /// Principal ideal `(x)` for an element `x` of the ring.
    pub fn principal(ring: &RingHandle, x: i64) -> Result<Self, AlgebraError> {
        Self::new(ring, [x])
    }

    /// Ideal generated by the image of the integer `n` under `Z -> A`.
    pub fn from_integer(ring: &RingHandle, n: i64) -> Self {
        let divisor = ring.ideal_generator(n);
        let mut generators = BTreeSet::new();
        generators.insert(ring.reduce(divisor));
        Self {
            ring: ring.clone(),
            generators,
            divisor,
        }
    }

    /// The zero ideal.
    pub fn zero(ring: &RingHandle) -> Self {
        Self::from_integer(ring, 0)
    }

    /// The unit ideal `(1)`.
    pub fn unit(ring: &RingHandle) -> Self {
        Self::from_integer(ring, 1)
    }

    /// Owning ring.
    pub fn ring(&self) -> &RingHandle {
        &self.ring
    }

    /// Generator set as supplied at construction.
    pub fn generators(&self) -> &BTreeSet<i64> {
        &self.generators
    }

    /// Canonical generator as an element of the ring.
    pub fn generator(&self) -> i64 {
        self.ring.reduce(self.divisor)
    }

    /// Non-negative generator of the preimage of the ideal in `Z`.
    pub fn divisor(&self) -> i64 {
        self.divisor
    }

    /// Returns whether this is the zero ideal.
    pub fn is_zero(&self) -> bool {
        self.divisor == self.ring.modulus()
    }

    /// Returns whether this is the unit ideal.
    pub fn is_unit(&self) -> bool {
        self.divisor == 1
    }

    /// Returns whether the element `x` lies in the ideal.
    pub fn contains_element(&self, x: i64) -> bool {
        arith::divides(self.divisor, self.ring.reduce(x))
    }

    /// Returns whether `other ⊆ self`. Ideals over different rings are never comparable.
    pub fn contains(&self, other: &Ideal) -> bool {
        self.ring == other.ring && arith::divides(self.divisor, other.divisor)
    }

    /// Returns whether `self ⊆ other`.
    pub fn is_subset_of(&self, other: &Ideal) -> bool {
        other.contains(self)
    }

    /// Intersection `self ∩ other`.
    pub fn intersect(&self, other: &Ideal) -> Result<Ideal, AlgebraError> {
        self.ring.ensure_same(&other.ring)?;
        let divisor = arith::lcm(self.divisor, other.divisor)?;
        Ok(Self::from_integer(&self.ring, divisor))
    }

    /// Intersection of a finite family; the empty family yields the unit ideal.
    pub fn intersect_all<'a>(
        ring: &RingHandle,
        ideals: impl IntoIterator<Item = &'a Ideal>,
    ) -> Result<Ideal, AlgebraError> {
        ideals
            .into_iter()
            .try_fold(Self::unit(ring), |acc, ideal| acc.intersect(ideal))
    }

    /// Sum `self + other`.
    pub fn sum(&self, other: &Ideal) -> Result<Ideal, AlgebraError> {
        self.ring.ensure_same(&other.ring)?;
        Ok(Self::from_integer(
            &self.ring,
            arith::gcd(self.divisor, other.divisor),
        ))
    }

    /// Product `self · other`.
    pub fn product(&self, other: &Ideal) -> Result<Ideal, AlgebraError> {
        self.ring.ensure_same(&other.ring)?;
        let divisor = match self.ring.modulus() {
            0 => arith::checked_mul(self.divisor, other.divisor)?,
            m => {
                let wide = i128::from(self.divisor) * i128::from(other.divisor) % i128::from(m);
                // The remainder is below `m`.
                wide as i64
            }
        };
        Ok(Self::from_integer(&self.ring, divisor))
    }

    /// Radical `√I = { x : xⁿ ∈ I for some n ≥ 1 }`.
    pub fn radical(&self) -> Ideal {
        Self::from_integer(&self.ring, arith::squarefree_kernel(self.divisor))
    }

    /// Least `n ≥ 1` with `xⁿ ∈ I`, or `None` when no power of `x` lies in `I`.
    pub fn contains_power_of(&self, x: i64) -> Option<u32> {
        let x = self.ring.reduce(x);
        if self.contains_element(x) {
            return Some(1);
        }
        if self.divisor == 0 {
            return None;
        }
        let mut needed = 1;
        for (p, exp) in arith::factorize(self.divisor) {
            let v = arith::valuation(p, x).unwrap_or(u32::MAX);
            if v == 0 {
                return None;
            }
            needed = needed.max(exp.div_ceil(v));
        }
        Some(needed)
    }

    /// Returns whether the ideal is prime: `A/I` is a domain.
    pub fn is_prime(&self) -> bool {
        self.divisor == 0 || arith::is_prime(self.divisor)
    }

    /// Returns whether the ideal is maximal: `A/I` is a field.
    pub fn is_maximal(&self) -> bool {
        arith::is_prime(self.divisor)
    }

    /// Serializable snapshot of the ideal.
    pub fn summary(&self) -> IdealSummary {
        IdealSummary {
            ring: self.ring.name().to_string(),
            generator: self.generator(),
            display: self.to_string(),
            prime: self.is_prime(),
            maximal: self.is_maximal(),
        }
    }
}

impl PartialEq for Ideal {
    fn eq(&self, other: &Self) -> bool {
        self.contains(other) && other.contains(self)
    }
}

impl Eq for Ideal {}

impl Hash for Ideal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.divisor.hash(state);
    }
}

impl fmt::Display for Ideal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.generator())
    }
}
