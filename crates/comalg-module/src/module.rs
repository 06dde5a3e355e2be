//! Finitely presented modules and their annihilator data.

use std::cell::OnceCell;
use std::fmt;

use comalg_core::arith;
use comalg_core::{AlgebraError, ErrorInfo, Ideal, RingHandle};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::smith::{smith_normal_form, too_large, SmithForm};

fn shape_error(message: impl Into<String>, expected: usize, found: usize) -> AlgebraError {
    AlgebraError::Domain(
        ErrorInfo::new("relation-shape", message.into())
            .with_context("expected", expected.to_string())
            .with_context("found", found.to_string()),
    )
}

fn coefficient_outside(ring: &RingHandle, value: i64) -> AlgebraError {
    AlgebraError::Domain(
        ErrorInfo::new(
            "element-outside-domain",
            "coefficient is not an element of the module's ring",
        )
        .with_context("ring", ring.name())
        .with_context("element", value.to_string()),
    )
}

/// Element of a module, written in the module's generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleElement {
    coefficients: Vec<i64>,
}

impl ModuleElement {
    /// Coefficient of each generator.
    pub fn coefficients(&self) -> &[i64] {
        &self.coefficients
    }
}

/// Structure theorem data for a module: `A^r ⊕ A/(t₁) ⊕ … ⊕ A/(tₖ)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Non-unit invariant factors in divisibility order, as integers.
    /// A factor equal to the ring's modulus is a free summand.
    pub invariant_factors: Vec<i64>,
    /// Number of free summands.
    pub free_rank: usize,
    /// Factors of the proper cyclic summands `A/(t)` with `(t) ≠ 0`.
    pub torsion: Vec<i64>,
}

/// A prime in `Ass(M)` together with an element whose annihilator it is.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociatedPrime {
    /// The associated prime.
    pub prime: Ideal,
    /// Nonzero element with `Ann(witness) = prime`.
    pub witness: ModuleElement,
}

/// A finitely presented module `A^k → A^g → M → 0` over a ring.
///
/// Derived data (Smith form, annihilator, associated primes) is computed on
/// first use and cached for the lifetime of the value.
#[derive(Debug, Clone)]
pub struct Module {
    ring: RingHandle,
    name: Option<String>,
    generators: Vec<String>,
    relations: Vec<Vec<i64>>,
    smith: OnceCell<SmithForm>,
    annihilator: OnceCell<Ideal>,
    associated_primes: OnceCell<Vec<AssociatedPrime>>,
}

impl Module {
    /// Builds a module from generator names and relation rows.
    ///
    /// Every relation must have one coefficient per generator, and every
    /// coefficient must lie in the ring's element domain.
    pub fn new(
        ring: &RingHandle,
        generators: Vec<String>,
        relations: Vec<Vec<i64>>,
    ) -> Result<Self, AlgebraError> {
        for row in &relations {
            if row.len() != generators.len() {
                return Err(shape_error(
                    "relation length differs from the number of generators",
                    generators.len(),
                    row.len(),
                ));
            }
            if let Some(&bad) = row.iter().find(|&&value| !ring.contains(value)) {
                return Err(coefficient_outside(ring, bad));
            }
        }
        Ok(Self {
            ring: ring.clone(),
            name: None,
            generators,
            relations,
            smith: OnceCell::new(),
            annihilator: OnceCell::new(),
            associated_primes: OnceCell::new(),
        })
    }

    /// Free module `A^rank`.
    pub fn free(ring: &RingHandle, rank: usize) -> Self {
        let generators = (1..=rank).map(|idx| format!("e{idx}")).collect();
        Self {
            ring: ring.clone(),
            name: None,
            generators,
            relations: Vec::new(),
            smith: OnceCell::new(),
            annihilator: OnceCell::new(),
            associated_primes: OnceCell::new(),
        }
    }

    /// Cyclic module `A/(d)`.
    pub fn cyclic(ring: &RingHandle, d: i64) -> Result<Self, AlgebraError> {
        Self::new(ring, vec!["e".to_string()], vec![vec![d]])
    }

    /// Quotient `A/I` of the ring by an ideal over the same ring.
    pub fn quotient(ring: &RingHandle, ideal: &Ideal) -> Result<Self, AlgebraError> {
        ring.ensure_same(ideal.ring())?;
        let relations = ideal.generators().iter().map(|&g| vec![g]).collect();
        Self::new(ring, vec!["e".to_string()], relations)
    }

    /// Direct sum `self ⊕ other`, presented block-diagonally.
    pub fn direct_sum(&self, other: &Module) -> Result<Self, AlgebraError> {
        self.ring.ensure_same(&other.ring)?;
        let left = self.generators.len();
        let right = other.generators.len();
        let generators = self
            .generators
            .iter()
            .chain(other.generators.iter())
            .cloned()
            .collect();
        let mut relations = Vec::with_capacity(self.relations.len() + other.relations.len());
        for row in &self.relations {
            let mut padded = row.clone();
            padded.resize(left + right, 0);
            relations.push(padded);
        }
        for row in &other.relations {
            let mut padded = vec![0; left];
            padded.extend_from_slice(row);
            relations.push(padded);
        }
        Self::new(&self.ring, generators, relations)
    }

    /// Attaches a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, if one was attached.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Owning ring.
    pub fn ring(&self) -> &RingHandle {
        &self.ring
    }

    /// Generator names in presentation order.
    pub fn generator_names(&self) -> &[String] {
        &self.generators
    }

    /// Relation rows as supplied.
    pub fn relations(&self) -> &[Vec<i64>] {
        &self.relations
    }

    /// Builds an element from generator coefficients.
    pub fn element(&self, coefficients: Vec<i64>) -> Result<ModuleElement, AlgebraError> {
        if coefficients.len() != self.generators.len() {
            return Err(shape_error(
                "element length differs from the number of generators",
                self.generators.len(),
                coefficients.len(),
            ));
        }
        if let Some(&bad) = coefficients.iter().find(|&&c| !self.ring.contains(c)) {
            return Err(coefficient_outside(&self.ring, bad));
        }
        Ok(ModuleElement { coefficients })
    }

    /// The `index`-th generator as an element.
    pub fn generator(&self, index: usize) -> Option<ModuleElement> {
        if index >= self.generators.len() {
            return None;
        }
        let coefficients = (0..self.generators.len())
            .map(|idx| i64::from(idx == index))
            .collect();
        Some(ModuleElement { coefficients })
    }

    pub(crate) fn smith(&self) -> Result<&SmithForm, AlgebraError> {
        if let Some(form) = self.smith.get() {
            return Ok(form);
        }
        let columns = self.generators.len();
        let modulus = self.ring.modulus();
        let mut rows = self.relations.clone();
        // Over Z/nZ the module is presented as a Z-module killed by n.
        if modulus > 0 {
            for idx in 0..columns {
                let mut row = vec![0; columns];
                row[idx] = modulus;
                rows.push(row);
            }
        }
        let form = smith_normal_form(&rows, columns)?;
        debug!(
            ring = %self.ring,
            rows = rows.len(),
            columns,
            diagonal = ?form.diagonal,
            "computed smith normal form"
        );
        Ok(self.smith.get_or_init(|| form))
    }

    /// Decomposes the module into free and cyclic torsion summands.
    pub fn decomposition(&self) -> Result<Decomposition, AlgebraError> {
        let modulus = self.ring.modulus();
        let invariant_factors: Vec<i64> = self
            .smith()?
            .diagonal
            .iter()
            .copied()
            .filter(|&d| d != 1)
            .collect();
        let free_rank = invariant_factors.iter().filter(|&&d| d == modulus).count();
        let torsion = invariant_factors
            .iter()
            .copied()
            .filter(|&d| d != modulus)
            .collect();
        Ok(Decomposition {
            invariant_factors,
            free_rank,
            torsion,
        })
    }

    /// Human readable structure, e.g. `Z^2 ⊕ Z/(6)`.
    pub fn describe(&self) -> Result<String, AlgebraError> {
        let decomposition = self.decomposition()?;
        let ring = self.ring.name();
        let mut parts = Vec::new();
        match decomposition.free_rank {
            0 => {}
            1 => parts.push(ring.to_string()),
            rank => parts.push(format!("{ring}^{rank}")),
        }
        for t in &decomposition.torsion {
            parts.push(format!("{ring}/({t})"));
        }
        if parts.is_empty() {
            return Ok("0".to_string());
        }
        Ok(parts.join(" ⊕ "))
    }

    /// Smith coordinates `x·V` of an element.
    fn coordinates(&self, element: &ModuleElement) -> Result<Vec<BigInt>, AlgebraError> {
        if element.coefficients.len() != self.generators.len() {
            return Err(shape_error(
                "element belongs to a module with a different number of generators",
                self.generators.len(),
                element.coefficients.len(),
            ));
        }
        Ok(self.smith()?.coordinates(&element.coefficients))
    }

    /// Annihilator ideal `{ r : r·x = 0 }` of a single element.
    pub fn annihilator_of(&self, element: &ModuleElement) -> Result<Ideal, AlgebraError> {
        let coords = self.coordinates(element)?;
        let form = self.smith()?;
        let mut order = 1;
        for (&d, y) in form.diagonal.iter().zip(&coords) {
            let component = match d {
                1 => 1,
                0 if y.is_zero() => 1,
                0 => 0,
                d => {
                    let residue = y.mod_floor(&BigInt::from(d));
                    let residue = residue.to_i64().ok_or_else(|| too_large(&residue))?;
                    d / arith::gcd(d, residue)
                }
            };
            order = arith::lcm(order, component)?;
        }
        Ok(Ideal::from_integer(&self.ring, order))
    }

    /// Returns whether the element is zero in the module.
    pub fn is_zero(&self, element: &ModuleElement) -> Result<bool, AlgebraError> {
        Ok(self.annihilator_of(element)?.is_unit())
    }

    /// Returns whether `ideal` kills every generator of the module.
    pub fn annihilates(&self, ideal: &Ideal) -> Result<bool, AlgebraError> {
        for index in 0..self.generators.len() {
            if let Some(generator) = self.generator(index) {
                if !self.annihilator_of(&generator)?.contains(ideal) {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Annihilator `Ann(M) = { r : r·m = 0 for every generator m }`, cached.
    pub fn annihilator(&self) -> Result<&Ideal, AlgebraError> {
        if let Some(ann) = self.annihilator.get() {
            return Ok(ann);
        }
        let mut order = 1;
        for &d in &self.smith()?.diagonal {
            order = arith::lcm(order, d)?;
        }
        let ann = Ideal::from_integer(&self.ring, order);
        debug!(ring = %self.ring, annihilator = %ann, "computed annihilator");
        Ok(self.annihilator.get_or_init(|| ann))
    }

    /// Associated primes `Ass(M)`, each with a witness element, cached.
    ///
    /// Candidates come from the cyclic summands: for `A/(d)` and a prime
    /// `p | d` the element `(d/p)·e` has annihilator `(p)`, and a free summand
    /// contributes `(0)` over a domain. Each reported prime is the computed
    /// annihilator of its witness.
    pub fn associated_primes(&self) -> Result<&[AssociatedPrime], AlgebraError> {
        if let Some(primes) = self.associated_primes.get() {
            return Ok(primes);
        }
        let form = self.smith()?;
        let mut found: Vec<AssociatedPrime> = Vec::new();
        for (k, &d) in form.diagonal.iter().enumerate() {
            if d == 1 {
                continue;
            }
            let scales: Vec<i64> = if d == 0 {
                vec![1]
            } else {
                arith::prime_divisors(d).into_iter().map(|p| d / p).collect()
            };
            for scale in scales {
                let coefficients = form
                    .scaled_basis_vector(k, scale)?
                    .into_iter()
                    .map(|c| self.ring.reduce(c))
                    .collect();
                let witness = ModuleElement { coefficients };
                let prime = self.annihilator_of(&witness)?;
                if !prime.is_prime() || found.iter().any(|known| known.prime == prime) {
                    continue;
                }
                found.push(AssociatedPrime { prime, witness });
            }
        }
        found.sort_by_key(|assoc| assoc.prime.divisor());
        debug!(
            ring = %self.ring,
            primes = ?found.iter().map(|a| a.prime.to_string()).collect::<Vec<_>>(),
            "computed associated primes"
        );
        Ok(self.associated_primes.get_or_init(|| found))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "M({} generators)", self.generators.len()),
        }
    }
}
