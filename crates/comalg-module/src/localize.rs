//! Localization of modules at prime ideals.
//!
//! Localizing `Z/(m)` at a prime `(p)` gives `Z_(p)/(p^e)` with `e = v_p(m)`
//! (`e = ∞` for `Z`, and `Q` at the zero prime). A cyclic summand `A/(d)`
//! localizes to `A_p/(p^v)` with `v = v_p(d)`: zero when `v = 0`, free of
//! rank one when `v = e`, and a non-free torsion module otherwise.

use comalg_core::arith;
use comalg_core::{AlgebraError, ErrorInfo, Ideal, IdealSummary, RingHandle, Spectrum};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ext::require_noetherian;
use crate::module::Module;

/// Which primes a local freeness check ranges over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimeScope {
    /// Every prime ideal.
    AllPrimes,
    /// Every maximal ideal.
    AllMaximals,
}

/// The localized module `Mₚ` over `Aₚ`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalModule {
    /// Prime at which the module was localized.
    pub prime: IdealSummary,
    /// Description of the local ring `Aₚ`.
    pub local_ring: String,
    /// Number of summands isomorphic to `Aₚ`.
    pub free_rank: usize,
    /// Exponents `v` of the non-free summands `Aₚ/(p^v)`.
    pub torsion_exponents: Vec<u32>,
}

impl LocalModule {
    /// Returns whether `Mₚ` is free over `Aₚ`.
    pub fn is_free(&self) -> bool {
        self.torsion_exponents.is_empty()
    }
}

/// Local rank of a module at one prime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalRank {
    /// The prime.
    pub prime: IdealSummary,
    /// Rank of the free module `Mₚ`.
    pub rank: usize,
}

/// Outcome of a local freeness check.
///
/// The rank is reported per prime because it may differ between components
/// of a disconnected spectrum; there is no single global rank to rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocalFreeness {
    /// `Mₚ` is free at every inspected prime.
    LocallyFree {
        /// Primes covered by the check.
        scope: PrimeScope,
        /// Local rank at each inspected prime.
        ranks: Vec<LocalRank>,
    },
    /// A prime at which the localization is not free.
    NotLocallyFree {
        /// Primes covered by the check.
        scope: PrimeScope,
        /// The offending localization.
        local: LocalModule,
    },
}

impl LocalFreeness {
    /// Returns whether the module is locally free over the scope.
    pub fn holds(&self) -> bool {
        matches!(self, LocalFreeness::LocallyFree { .. })
    }
}

fn local_ring_name(modulus: i64, p: i64) -> String {
    if p == 0 {
        return "Q".to_string();
    }
    match arith::valuation(p, modulus) {
        None => format!("Z_({p})"),
        Some(e) => format!("Z/{}Z", p.pow(e)),
    }
}

impl Module {
    /// Localizes the module at a prime ideal of its ring.
    pub fn localize(&self, prime: &Ideal) -> Result<LocalModule, AlgebraError> {
        self.ring().ensure_same(prime.ring())?;
        if !prime.is_prime() {
            return Err(AlgebraError::Domain(
                ErrorInfo::new("not-prime", "localization needs a prime ideal")
                    .with_context("ideal", prime.to_string())
                    .with_context("ring", self.ring().name()),
            ));
        }
        let modulus = self.ring().modulus();
        let p = prime.divisor();
        let local_exponent = arith::valuation(p, modulus);
        let mut free_rank = 0;
        let mut torsion_exponents = Vec::new();
        for d in self.decomposition()?.invariant_factors {
            if p == 0 {
                // Over Q only the free summands survive.
                if d == 0 {
                    free_rank += 1;
                }
                continue;
            }
            match arith::valuation(p, d) {
                Some(0) => {}
                v if v == local_exponent => free_rank += 1,
                Some(v) => torsion_exponents.push(v),
                None => free_rank += 1,
            }
        }
        let local = LocalModule {
            prime: prime.summary(),
            local_ring: local_ring_name(modulus, p),
            free_rank,
            torsion_exponents,
        };
        debug!(prime = %prime, free = local.is_free(), rank = local.free_rank, "localized module");
        Ok(local)
    }

    /// Primes at which freeness is inspected.
    ///
    /// Finite spectra are enumerated completely. Over `Z` the inspected
    /// primes are `(0)` (for the prime scope), the support of the torsion,
    /// and the least prime outside the support, which stands in for every
    /// other prime since all of them localize the torsion away.
    fn primes_in_scope(&self, ring: &RingHandle, scope: PrimeScope) -> Result<Vec<Ideal>, AlgebraError> {
        let primes = match ring.spectrum() {
            Spectrum::Finite(primes) => primes,
            Spectrum::Infinite => {
                let mut support: Vec<i64> = Vec::new();
                for t in self.decomposition()?.torsion {
                    for p in arith::prime_divisors(t) {
                        if !support.contains(&p) {
                            support.push(p);
                        }
                    }
                }
                support.sort_unstable();
                let generic = arith::least_prime_outside(&support);
                let mut primes = vec![Ideal::zero(ring)];
                primes.extend(support.into_iter().map(|p| Ideal::from_integer(ring, p)));
                primes.push(Ideal::from_integer(ring, generic));
                primes
            }
        };
        Ok(primes
            .into_iter()
            .filter(|prime| scope == PrimeScope::AllPrimes || prime.is_maximal())
            .collect())
    }

    /// Decides whether `Mₚ` is free over `Aₚ` for every prime in `scope`.
    pub fn is_locally_free(
        &self,
        ring: &RingHandle,
        scope: PrimeScope,
    ) -> Result<LocalFreeness, AlgebraError> {
        ring.ensure_same(self.ring())?;
        require_noetherian(ring, "localization")?;
        let mut ranks = Vec::new();
        for prime in self.primes_in_scope(ring, scope)? {
            let local = self.localize(&prime)?;
            if !local.is_free() {
                return Ok(LocalFreeness::NotLocallyFree { scope, local });
            }
            ranks.push(LocalRank {
                prime: local.prime,
                rank: local.free_rank,
            });
        }
        Ok(LocalFreeness::LocallyFree { scope, ranks })
    }
}
