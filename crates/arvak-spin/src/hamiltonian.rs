//! Sparse Pauli-sum Hamiltonians.
//!
//! A Hamiltonian is a sum of weighted Pauli strings over a fixed register:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ.
//!
//! [`Hamiltonian::simplify`] is the merge step every assembled operator goes
//! through: strings with identical operator content are summed (keeping the
//! position of their first occurrence) and entries whose merged coefficient
//! lies within [`Tolerance`] of zero are removed.
//!
//! # Example
//!
//! ```rust
//! use arvak_spin::hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString, Tolerance};
//!
//! // H = 1.0·Z₀Z₁ + 0.5·X₀ − 0.5·X₀
//! let h = Hamiltonian::from_terms(2, vec![
//!     HamiltonianTerm::new(1.0, PauliString::from_ops([(0, PauliOp::Z), (1, PauliOp::Z)])),
//!     HamiltonianTerm::new(0.5, PauliString::from_ops([(0, PauliOp::X)])),
//!     HamiltonianTerm::new(-0.5, PauliString::from_ops([(0, PauliOp::X)])),
//! ]).unwrap();
//! let h = h.simplify(Tolerance::default());
//! assert_eq!(h.n_terms(), 1);
//! ```

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{SpinError, SpinResult};
use crate::term::{PauliAxis, Term};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// One-character label.
    pub fn symbol(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

/// Zero-test tolerance used when simplifying and filtering operators.
///
/// A coefficient `c` counts as zero when `|c| <= atol + rtol * scale`,
/// where `scale` is the largest coefficient magnitude among the terms being
/// merged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Absolute floor.
    pub atol: f64,
    /// Multiple of the largest input magnitude.
    pub rtol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            atol: 1e-12,
            rtol: 16.0 * f64::EPSILON,
        }
    }
}

impl Tolerance {
    /// Create a tolerance, rejecting negative or non-finite values.
    pub fn new(atol: f64, rtol: f64) -> SpinResult<Self> {
        let tol = Self { atol, rtol };
        tol.validate()?;
        Ok(tol)
    }

    /// Exact comparison: only coefficients equal to zero are dropped.
    pub fn exact() -> Self {
        Self {
            atol: 0.0,
            rtol: 0.0,
        }
    }

    /// Check both components are finite and non-negative.
    pub fn validate(&self) -> SpinResult<()> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(self.atol) && ok(self.rtol) {
            Ok(())
        } else {
            Err(SpinError::InvalidTolerance {
                atol: self.atol,
                rtol: self.rtol,
            })
        }
    }

    /// Zero threshold for a term set whose largest magnitude is `scale`.
    pub fn threshold(&self, scale: f64) -> f64 {
        self.atol + self.rtol * scale
    }

    /// True if `value` is zero relative to `scale`.
    pub fn is_negligible(&self, value: f64, scale: f64) -> bool {
        value.abs() <= self.threshold(scale)
    }
}

/// A tensor product of Pauli operators on named qubits.
///
/// Stored as a sorted `Vec<(qubit_index, PauliOp)>` with Identity terms
/// omitted.  Qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PauliStringRepr")]
pub struct PauliString {
    /// Non-identity terms, sorted by qubit index ascending.
    ops: Vec<(u32, PauliOp)>,
}

impl PauliString {
    /// Construct a PauliString from an iterator of (qubit, op) pairs.
    ///
    /// Identity operators are dropped; the remaining ops are sorted by qubit.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> Self {
        let mut v: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        v.sort_by_key(|(q, _)| *q);
        Self { ops: v }
    }

    /// Return the non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity string.
    pub fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|(q, _)| *q)
    }

    /// Qubits acted on, ascending.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.ops.iter().map(|(q, _)| *q)
    }

    /// Lattice family of this string, if it is a one- or two-site
    /// string of a single repeated Pauli.
    pub fn axis(&self) -> Option<PauliAxis> {
        let (_, first) = *self.ops.first()?;
        if self.ops.iter().any(|(_, op)| *op != first) {
            return None;
        }
        PauliAxis::from_pauli(first, self.ops.len())
    }

    /// Dense label over `n_qubits` with qubit 0 as the rightmost character.
    pub fn label(&self, n_qubits: u32) -> String {
        let mut chars = vec!['I'; n_qubits as usize];
        for &(q, op) in &self.ops {
            if let Some(slot) = (n_qubits as usize)
                .checked_sub(q as usize + 1)
                .and_then(|i| chars.get_mut(i))
            {
                *slot = op.symbol();
            }
        }
        chars.into_iter().collect()
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HamiltonianTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl HamiltonianTerm {
    /// Create a new term.
    pub fn new(coeff: f64, pauli: PauliString) -> Self {
        Self { coeff, pauli }
    }

    /// Lattice family of the underlying string.
    pub fn axis(&self) -> Option<PauliAxis> {
        self.pauli.axis()
    }
}

impl From<&Term> for HamiltonianTerm {
    fn from(term: &Term) -> Self {
        Self::new(term.coeff(), term.pauli_string())
    }
}

/// A sum-of-Pauli-strings Hamiltonian on a fixed number of qubits.
///
/// H = Σ_k  c_k · P_k
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HamiltonianRepr")]
pub struct Hamiltonian {
    n_qubits: u32,
    terms: Vec<HamiltonianTerm>,
}

/// Wire form of [`PauliString`]; re-sorted on the way in.
#[derive(Deserialize)]
struct PauliStringRepr {
    ops: Vec<(u32, PauliOp)>,
}

impl From<PauliStringRepr> for PauliString {
    fn from(repr: PauliStringRepr) -> Self {
        PauliString::from_ops(repr.ops)
    }
}

/// Wire form of [`Hamiltonian`]; qubit indices are checked on the way in.
#[derive(Deserialize)]
struct HamiltonianRepr {
    n_qubits: u32,
    terms: Vec<HamiltonianTerm>,
}

impl TryFrom<HamiltonianRepr> for Hamiltonian {
    type Error = SpinError;

    fn try_from(repr: HamiltonianRepr) -> SpinResult<Self> {
        Hamiltonian::from_terms(repr.n_qubits, repr.terms)
    }
}

impl Hamiltonian {
    /// The zero operator on `n_qubits`.
    pub fn zero(n_qubits: u32) -> Self {
        Self {
            n_qubits,
            terms: Vec::new(),
        }
    }

    /// Create from weighted Pauli strings, checking every qubit index.
    pub fn from_terms(n_qubits: u32, terms: Vec<HamiltonianTerm>) -> SpinResult<Self> {
        for term in &terms {
            if let Some(q) = term.pauli.max_qubit().filter(|&q| q >= n_qubits) {
                return Err(SpinError::QubitOutOfRange { qubit: q, n_qubits });
            }
        }
        Ok(Self { n_qubits, terms })
    }

    /// Create from lattice terms, validating each one against the chain.
    ///
    /// The result is not simplified; duplicates are kept as separate entries.
    pub fn from_sparse_terms<'a>(
        n_qubits: u32,
        terms: impl IntoIterator<Item = &'a Term>,
    ) -> SpinResult<Self> {
        let terms = terms
            .into_iter()
            .map(|t| {
                t.validate(n_qubits)?;
                Ok(HamiltonianTerm::from(t))
            })
            .collect::<SpinResult<Vec<_>>>()?;
        Ok(Self { n_qubits, terms })
    }

    /// Number of qubits the operator acts on.
    pub fn n_qubits(&self) -> u32 {
        self.n_qubits
    }

    /// All terms.
    pub fn terms(&self) -> &[HamiltonianTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms at all.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Spectral norm upper bound: Σ |c_k|.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().fold(0.0, |acc, t| acc + t.coeff.abs())
    }

    /// Largest coefficient magnitude, 0 for an empty operator.
    pub fn max_abs_coeff(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).fold(0.0, f64::max)
    }

    /// Summed coefficient of `pauli`, 0 if absent.
    pub fn coefficient_of(&self, pauli: &PauliString) -> f64 {
        self.terms
            .iter()
            .filter(|t| &t.pauli == pauli)
            .fold(0.0, |acc, t| acc + t.coeff)
    }

    /// True if every coefficient is within `tol.atol` of zero.
    ///
    /// An empty operator is zero.
    pub fn is_zero(&self, tol: Tolerance) -> bool {
        self.terms.iter().all(|t| t.coeff.abs() <= tol.atol)
    }

    /// Merge duplicate Pauli strings and drop negligible coefficients.
    ///
    /// Merged entries take the position of the first occurrence of their
    /// string. The zero threshold is relative to the largest input magnitude,
    /// so exact cancellations and rounding residue are both removed.
    #[must_use]
    pub fn simplify(&self, tol: Tolerance) -> Self {
        self.simplify_relative_to(tol, self.max_abs_coeff())
    }

    /// [`simplify`](Self::simplify) against an externally fixed `scale`.
    ///
    /// Operators cut from one larger term set must share that set's scale,
    /// or the same coefficient can survive in one piece and vanish in another.
    #[must_use]
    pub fn simplify_relative_to(&self, tol: Tolerance, scale: f64) -> Self {
        let mut index: FxHashMap<&PauliString, usize> = FxHashMap::default();
        let mut merged: Vec<HamiltonianTerm> = Vec::with_capacity(self.terms.len());

        for term in &self.terms {
            match index.get(&term.pauli) {
                Some(&slot) => merged[slot].coeff += term.coeff,
                None => {
                    index.insert(&term.pauli, merged.len());
                    merged.push(term.clone());
                }
            }
        }
        merged.retain(|t| !tol.is_negligible(t.coeff, scale));

        Self {
            n_qubits: self.n_qubits,
            terms: merged,
        }
    }

    /// Sum several operators on the same register and simplify the result.
    pub fn sum<'a>(
        n_qubits: u32,
        parts: impl IntoIterator<Item = &'a Hamiltonian>,
        tol: Tolerance,
    ) -> SpinResult<Self> {
        let terms = parts
            .into_iter()
            .flat_map(|h| h.terms.iter().cloned())
            .collect();
        Ok(Self::from_terms(n_qubits, terms)?.simplify(tol))
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hamiltonian ({} terms, {} qubits):",
            self.n_terms(),
            self.n_qubits
        )?;
        for term in &self.terms {
            writeln!(f, "  {}  {:+.6}", term.pauli.label(self.n_qubits), term.coeff)?;
        }
        Ok(())
    }
}
