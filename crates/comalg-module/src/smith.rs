//! Smith normal form over `Z` with tracked column operations.
//!
//! Elimination runs on arbitrary precision integers, so intermediate growth
//! never fails. Only the results are brought back to `i64`: the diagonal, and
//! witness vectors after reduction against the Hermite basis of the relations.

use comalg_core::{AlgebraError, ErrorInfo};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

/// Dense row-major matrix of arbitrary precision integers.
pub type Matrix = Vec<Vec<BigInt>>;

/// Result of reducing a relation matrix `R` to `D = U·R·V`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmithForm {
    /// Diagonal entries `d₀ | d₁ | …`, padded with zeros to the column count.
    pub diagonal: Vec<i64>,
    /// Column transform `V`. A coefficient row `x` has Smith coordinates `x·V`.
    ///
    /// Column `k` is reduced modulo `d_k` when `d_k > 0`, since only that
    /// residue of the coordinate is meaningful.
    pub transform: Matrix,
    /// Inverse of the unreduced transform; row `k` expresses the `k`-th Smith
    /// basis vector in the original generators.
    pub inverse: Matrix,
    /// Hermite basis of the relation lattice, used to shorten vectors.
    pub lattice: Matrix,
}

pub(crate) fn too_large(value: &BigInt) -> AlgebraError {
    AlgebraError::Domain(
        ErrorInfo::new("overflow", "result exceeds the i64 element range")
            .with_context("value", value.to_string()),
    )
}

fn to_i64(value: &BigInt) -> Result<i64, AlgebraError> {
    value.to_i64().ok_or_else(|| too_large(value))
}

fn identity(n: usize) -> Matrix {
    (0..n)
        .map(|row| (0..n).map(|col| BigInt::from(u8::from(row == col))).collect())
        .collect()
}

fn widen(rows: &[Vec<i64>]) -> Matrix {
    rows.iter()
        .map(|row| row.iter().copied().map(BigInt::from).collect())
        .collect()
}

/// `target -= q · source`
fn sub_scaled(target: &mut [BigInt], source: &[BigInt], q: &BigInt) {
    for (t, s) in target.iter_mut().zip(source) {
        *t -= q * s;
    }
}

struct Reducer {
    a: Matrix,
    v: Matrix,
    v_inv: Matrix,
    rows: usize,
    cols: usize,
}

impl Reducer {
    fn swap_cols(&mut self, i: usize, j: usize) {
        for row in &mut self.a {
            row.swap(i, j);
        }
        for row in &mut self.v {
            row.swap(i, j);
        }
        self.v_inv.swap(i, j);
    }

    fn sub_row(&mut self, target: usize, source: usize, q: &BigInt) {
        let source_row = self.a[source].clone();
        sub_scaled(&mut self.a[target], &source_row, q);
    }

    /// `col[target] -= q · col[source]`, mirrored on `V` and `V⁻¹`.
    fn sub_col(&mut self, target: usize, source: usize, q: &BigInt) {
        for row in self.a.iter_mut().chain(self.v.iter_mut()) {
            let delta = q * &row[source];
            row[target] -= delta;
        }
        let target_row = self.v_inv[target].clone();
        for (entry, t) in self.v_inv[source].iter_mut().zip(&target_row) {
            *entry += q * t;
        }
    }

    fn smallest_in_submatrix(&self, t: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for i in t..self.rows {
            for j in t..self.cols {
                let value = &self.a[i][j];
                if value.is_zero() {
                    continue;
                }
                let better = match best {
                    Some((bi, bj)) => value.magnitude() < self.a[bi][bj].magnitude(),
                    None => true,
                };
                if better {
                    best = Some((i, j));
                }
            }
        }
        best
    }

    /// Moves the smallest non-zero entry of row `t` or column `t` onto the pivot.
    fn reseat_pivot(&mut self, t: usize) {
        let mut best = (t, t);
        for i in t..self.rows {
            let value = &self.a[i][t];
            if !value.is_zero() && value.magnitude() < self.a[best.0][best.1].magnitude() {
                best = (i, t);
            }
        }
        for j in t..self.cols {
            let value = &self.a[t][j];
            if !value.is_zero() && value.magnitude() < self.a[best.0][best.1].magnitude() {
                best = (t, j);
            }
        }
        self.a.swap(t, best.0);
        self.swap_cols(t, best.1);
    }

    fn reduce_at(&mut self, t: usize) {
        loop {
            let pivot = self.a[t][t].clone();
            let mut dirty = false;
            for i in t + 1..self.rows {
                if !self.a[i][t].is_zero() {
                    let q = self.a[i][t].div_floor(&pivot);
                    self.sub_row(i, t, &q);
                    dirty |= !self.a[i][t].is_zero();
                }
            }
            for j in t + 1..self.cols {
                if !self.a[t][j].is_zero() {
                    let q = self.a[t][j].div_floor(&pivot);
                    self.sub_col(j, t, &q);
                    dirty |= !self.a[t][j].is_zero();
                }
            }
            if dirty {
                self.reseat_pivot(t);
                continue;
            }
            let offending = (t + 1..self.rows).find(|&i| {
                (t + 1..self.cols).any(|j| !self.a[i][j].is_multiple_of(&pivot))
            });
            match offending {
                Some(i) => self.sub_row(t, i, &BigInt::from(-1)),
                None => break,
            }
        }
        if self.a[t][t].is_negative() {
            for entry in &mut self.a[t] {
                *entry = -&*entry;
            }
        }
    }
}

/// Row-style Hermite normal form: positive pivots, entries above each pivot
/// reduced into `[0, pivot)`, zero rows dropped.
fn hermite_basis(mut a: Matrix, columns: usize) -> Matrix {
    let mut rank = 0;
    for col in 0..columns {
        loop {
            let pivot = (rank..a.len())
                .filter(|&i| !a[i][col].is_zero())
                .min_by(|&x, &y| a[x][col].magnitude().cmp(a[y][col].magnitude()));
            let Some(pivot) = pivot else {
                break;
            };
            a.swap(rank, pivot);
            let head = a[rank].clone();
            let mut clean = true;
            for row in a.iter_mut().skip(rank + 1) {
                if !row[col].is_zero() {
                    let q = row[col].div_floor(&head[col]);
                    sub_scaled(row, &head, &q);
                    clean &= row[col].is_zero();
                }
            }
            if clean {
                break;
            }
        }
        if rank >= a.len() || a[rank][col].is_zero() {
            continue;
        }
        if a[rank][col].is_negative() {
            for entry in &mut a[rank] {
                *entry = -&*entry;
            }
        }
        let head = a[rank].clone();
        for row in a.iter_mut().take(rank) {
            let q = row[col].div_floor(&head[col]);
            sub_scaled(row, &head, &q);
        }
        rank += 1;
    }
    a.truncate(rank);
    a
}

impl SmithForm {
    /// Smith coordinates `x·V` of a coefficient row.
    pub fn coordinates(&self, coefficients: &[i64]) -> Vec<BigInt> {
        let mut coords = vec![BigInt::zero(); self.diagonal.len()];
        for (&x, row) in coefficients.iter().zip(&self.transform) {
            if x == 0 {
                continue;
            }
            let x = BigInt::from(x);
            for (coord, v) in coords.iter_mut().zip(row) {
                *coord += &x * v;
            }
        }
        coords
    }

    /// Shortens `vector` by the relation lattice without changing the element
    /// it represents, then narrows it to `i64`.
    pub fn reduce_to_element(&self, mut vector: Vec<BigInt>) -> Result<Vec<i64>, AlgebraError> {
        for row in &self.lattice {
            let Some(col) = row.iter().position(|entry| !entry.is_zero()) else {
                continue;
            };
            let q = vector[col].div_floor(&row[col]);
            if !q.is_zero() {
                sub_scaled(&mut vector, row, &q);
            }
        }
        vector.iter().map(to_i64).collect()
    }

    /// `scale` times the `k`-th Smith basis vector, shortened to an element.
    pub fn scaled_basis_vector(&self, k: usize, scale: i64) -> Result<Vec<i64>, AlgebraError> {
        let scale = BigInt::from(scale);
        let vector = self.inverse[k].iter().map(|entry| entry * &scale).collect();
        self.reduce_to_element(vector)
    }
}

/// Reduces the relation rows (each of length `columns`) to Smith normal form.
///
/// Only column operations are tracked, since they are the ones that change
/// the module's basis; row operations merely recombine relations.
pub fn smith_normal_form(relations: &[Vec<i64>], columns: usize) -> Result<SmithForm, AlgebraError> {
    let rows = widen(relations);
    let mut reducer = Reducer {
        a: rows.clone(),
        v: identity(columns),
        v_inv: identity(columns),
        rows: relations.len(),
        cols: columns,
    };
    let steps = reducer.rows.min(reducer.cols);
    let mut rank = 0;
    while rank < steps {
        let Some((i, j)) = reducer.smallest_in_submatrix(rank) else {
            break;
        };
        reducer.a.swap(rank, i);
        reducer.swap_cols(rank, j);
        reducer.reduce_at(rank);
        rank += 1;
    }
    let diagonal = (0..columns)
        .map(|k| {
            if k < rank {
                to_i64(&reducer.a[k][k])
            } else {
                Ok(0)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut transform = reducer.v;
    for (k, &d) in diagonal.iter().enumerate() {
        if d > 0 {
            let modulus = BigInt::from(d);
            for row in &mut transform {
                row[k] = row[k].mod_floor(&modulus);
            }
        }
    }
    Ok(SmithForm {
        diagonal,
        transform,
        inverse: reducer.v_inv,
        lattice: hermite_basis(rows, columns),
    })
}
