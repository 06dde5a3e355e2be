//! Ext¹ for cyclic modules and the projectivity test built on it.
//!
//! Over `A = Z/(m)` (with `m = 0` for `Z`) the cyclic module `A/(d)` has the
//! free resolution `… → A --(m/d)--> A --d--> A → A/(d) → 0`, which gives
//! `Ext¹(A/(d), N) = N[d] / (m/d)·N`. For `m = 0` the resolution stops after
//! one step and the group is `N / d·N`.

use comalg_core::arith;
use comalg_core::{AlgebraError, ErrorInfo, RingHandle};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::module::Module;

fn not_a_divisor(modulus: i64, value: i64) -> AlgebraError {
    AlgebraError::Domain(
        ErrorInfo::new("not-a-divisor", "cyclic factor must divide the ring modulus")
            .with_context("modulus", modulus.to_string())
            .with_context("factor", value.to_string()),
    )
}

pub(crate) fn require_noetherian(ring: &RingHandle, operation: &str) -> Result<(), AlgebraError> {
    if ring.is_noetherian() {
        return Ok(());
    }
    Err(AlgebraError::Unsupported(
        ErrorInfo::new(
            "not-noetherian",
            format!("{operation} needs a ring tagged Noetherian"),
        )
        .with_context("ring", ring.name())
        .with_hint("construct the ring with the Noetherian tag if the assumption holds"),
    ))
}

/// Order of `Ext¹_A(A/(d), A/(q))` for `A = Z/(modulus)`.
///
/// `d` and `q` are ideal generators in divisor form: non-negative divisors of
/// `modulus` (any non-negative integers when `modulus = 0`, where `q = 0`
/// means `N = A`). An order of `1` means the group vanishes.
pub fn ext1_order(modulus: i64, d: i64, q: i64) -> Result<i64, AlgebraError> {
    if modulus > 0 {
        for value in [d, q] {
            if value <= 0 || modulus % value != 0 {
                return Err(not_a_divisor(modulus, value));
            }
        }
    }
    if d == 1 || d == modulus {
        return Ok(1);
    }
    if modulus == 0 {
        return Ok(arith::gcd(d, q));
    }
    let kernel = arith::gcd(d, q);
    let image = q / arith::gcd(modulus / d, q);
    Ok(kernel / image)
}

/// Divisor form of the first syzygy `Ω(A/(d)) = d·A`.
pub fn syzygy_divisor(modulus: i64, d: i64) -> i64 {
    if d == modulus {
        1
    } else if modulus == 0 {
        0
    } else {
        modulus / d
    }
}

/// Outcome of the projectivity test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Projectivity {
    /// Every cyclic summand splits off a free module.
    Projective {
        /// Rank of the free part.
        free_rank: usize,
        /// Proper cyclic summands, each a direct factor of the ring.
        summands: Vec<i64>,
    },
    /// Witness that `Ext¹(M, Ω M) ≠ 0`.
    NotProjective {
        /// Factor `d` of the summand `A/(d)` that fails to split.
        summand: i64,
        /// Divisor form `q` of the syzygy `A/(q)` used as the test module.
        syzygy: i64,
        /// Order of `Ext¹(A/(d), A/(q))`.
        ext_order: i64,
    },
}

impl Projectivity {
    /// Returns whether the module is projective.
    pub fn holds(&self) -> bool {
        matches!(self, Projectivity::Projective { .. })
    }
}

impl Module {
    /// Decides projectivity by computing `Ext¹(M, Ω M)` summand by summand.
    ///
    /// A module is projective iff the sequence `0 → Ω M → F → M → 0` splits,
    /// which happens iff its class in `Ext¹(M, Ω M)` vanishes; the diagonal
    /// terms `Ext¹(A/(d), Ω A/(d))` vanish exactly when every summand splits.
    pub fn is_projective(&self, ring: &RingHandle) -> Result<Projectivity, AlgebraError> {
        ring.ensure_same(self.ring())?;
        require_noetherian(ring, "Ext computation")?;
        let modulus = ring.modulus();
        let decomposition = self.decomposition()?;
        for &d in &decomposition.torsion {
            let syzygy = syzygy_divisor(modulus, d);
            let ext_order = ext1_order(modulus, d, syzygy)?;
            if ext_order > 1 {
                debug!(ring = %ring, summand = d, syzygy, ext_order, "summand does not split");
                return Ok(Projectivity::NotProjective {
                    summand: d,
                    syzygy,
                    ext_order,
                });
            }
        }
        Ok(Projectivity::Projective {
            free_rank: decomposition.free_rank,
            summands: decomposition.torsion,
        })
    }
}
