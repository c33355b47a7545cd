//! Single Pauli interaction terms.
//!
//! A [`Term`] is one entry of a term list before assembly: an axis label
//! (`X`, `Y`, `Z`, `XX`, `YY`, `ZZ`), the ordered sites it acts on, and a
//! real coefficient. Site order is kept exactly as generated, so the
//! periodic wraparound bond reads `(n-1, 0)`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SpinError, SpinResult};
use crate::hamiltonian::{PauliOp, PauliString};

/// Pauli interaction family of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliAxis {
    /// On-site X field.
    X,
    /// On-site Y field.
    Y,
    /// On-site Z field.
    Z,
    /// X⊗X coupling.
    XX,
    /// Y⊗Y coupling.
    YY,
    /// Z⊗Z coupling.
    ZZ,
}

impl PauliAxis {
    /// All six families in canonical assembly order.
    pub const ALL: [PauliAxis; 6] = [
        PauliAxis::XX,
        PauliAxis::YY,
        PauliAxis::ZZ,
        PauliAxis::X,
        PauliAxis::Y,
        PauliAxis::Z,
    ];

    /// Number of sites a term of this axis acts on.
    pub fn arity(self) -> usize {
        if self.is_two_site() { 2 } else { 1 }
    }

    /// True for the coupling families.
    pub fn is_two_site(self) -> bool {
        matches!(self, PauliAxis::XX | PauliAxis::YY | PauliAxis::ZZ)
    }

    /// The single-qubit Pauli applied on every site of the term.
    pub fn pauli(self) -> PauliOp {
        match self {
            PauliAxis::X | PauliAxis::XX => PauliOp::X,
            PauliAxis::Y | PauliAxis::YY => PauliOp::Y,
            PauliAxis::Z | PauliAxis::ZZ => PauliOp::Z,
        }
    }

    /// Label as written in term lists.
    pub fn label(self) -> &'static str {
        match self {
            PauliAxis::X => "X",
            PauliAxis::Y => "Y",
            PauliAxis::Z => "Z",
            PauliAxis::XX => "XX",
            PauliAxis::YY => "YY",
            PauliAxis::ZZ => "ZZ",
        }
    }

    /// Recover the axis from a Pauli and an arity.
    pub fn from_pauli(op: PauliOp, arity: usize) -> Option<Self> {
        match (op, arity) {
            (PauliOp::X, 1) => Some(PauliAxis::X),
            (PauliOp::Y, 1) => Some(PauliAxis::Y),
            (PauliOp::Z, 1) => Some(PauliAxis::Z),
            (PauliOp::X, 2) => Some(PauliAxis::XX),
            (PauliOp::Y, 2) => Some(PauliAxis::YY),
            (PauliOp::Z, 2) => Some(PauliAxis::ZZ),
            _ => None,
        }
    }
}

impl fmt::Display for PauliAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One Pauli interaction: `coeff · axis(sites)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    axis: PauliAxis,
    sites: Vec<u32>,
    coeff: f64,
}

impl Term {
    /// Create a term without checking it against a chain length.
    ///
    /// Use [`Term::validate`] before handing it to an assembler.
    pub fn new(axis: PauliAxis, sites: Vec<u32>, coeff: f64) -> Self {
        Self { axis, sites, coeff }
    }

    /// Shorthand: two-site coupling on `(i, j)`.
    pub fn pair(axis: PauliAxis, i: u32, j: u32, coeff: f64) -> Self {
        Self::new(axis, vec![i, j], coeff)
    }

    /// Shorthand: on-site field on `i`.
    pub fn site(axis: PauliAxis, i: u32, coeff: f64) -> Self {
        Self::new(axis, vec![i], coeff)
    }

    /// Interaction family.
    pub fn axis(&self) -> PauliAxis {
        self.axis
    }

    /// Sites in generation order.
    pub fn sites(&self) -> &[u32] {
        &self.sites
    }

    /// Real coefficient.
    pub fn coeff(&self) -> f64 {
        self.coeff
    }

    /// Check arity, site range and distinctness against an `n_qubits` chain.
    pub fn validate(&self, n_qubits: u32) -> SpinResult<()> {
        if self.sites.len() != self.axis.arity() {
            return Err(SpinError::ArityMismatch {
                axis: self.axis,
                expected: self.axis.arity(),
                got: self.sites.len(),
            });
        }
        if let Some(&site) = self.sites.iter().find(|&&s| s >= n_qubits) {
            return Err(SpinError::SiteOutOfRange {
                axis: self.axis,
                site,
                n_qubits,
            });
        }
        if let &[a, b] = self.sites.as_slice() {
            if a == b {
                return Err(SpinError::CoincidentSites {
                    axis: self.axis,
                    site: a,
                });
            }
        }
        Ok(())
    }

    /// Operator content of this term, independent of site order.
    pub fn pauli_string(&self) -> PauliString {
        let op = self.axis.pauli();
        PauliString::from_ops(self.sites.iter().map(|&q| (q, op)))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', {:?}, {})", self.axis, self.sites, self.coeff)
    }
}
