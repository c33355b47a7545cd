//! Term-list generation for 1D spin chains.
//!
//! Every generator is a pure function of the chain length and the
//! coupling or field value. Generation order matters: parity grouping puts
//! the k-th term of a family in the even or odd bucket by k alone.
//!
//! | Topology          | Pairs generated                                  |
//! |-------------------|--------------------------------------------------|
//! | nearest-neighbour | `(i, i+1)` for `i < n-1`, then `(n-1, 0)` if PBC |
//! | power-law         | every `(i, j)` with `i < j`, `i` outer           |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::term::{PauliAxis, Term};

/// Nearest-neighbour bonds for one two-site family.
///
/// The periodic wraparound `(n-1, 0)` is appended after the open-chain
/// bonds. For `n = 2` it duplicates bond `(0, 1)` as an operator; the
/// assembler merges the two.
pub fn nearest_neighbor_bonds(axis: PauliAxis, n_qubits: u32, coupling: f64, periodic: bool) -> Vec<Term> {
    let mut terms: Vec<Term> = (0..n_qubits.saturating_sub(1))
        .map(|i| Term::pair(axis, i, i + 1, coupling))
        .collect();
    if periodic && n_qubits >= 2 {
        terms.push(Term::pair(axis, n_qubits - 1, 0, coupling));
    }
    terms
}

/// All-to-all bonds with coefficient `coupling · |i-j|^(-alpha)`.
///
/// A zero coupling gives exact zeros even where the decay overflows.
pub fn power_law_bonds(axis: PauliAxis, n_qubits: u32, coupling: f64, alpha: f64) -> Vec<Term> {
    let strength = move |distance| {
        if coupling == 0.0 {
            0.0
        } else {
            coupling * decay(distance, alpha)
        }
    };
    (0..n_qubits)
        .flat_map(|i| ((i + 1)..n_qubits).map(move |j| Term::pair(axis, i, j, strength(j - i))))
        .collect()
}

/// `distance^(-alpha)`, exactly 1 at unit distance.
fn decay(distance: u32, alpha: f64) -> f64 {
    if distance == 1 {
        1.0
    } else {
        f64::from(distance).powf(-alpha)
    }
}

/// One on-site term per qubit, coefficient given by `field(site)`.
pub fn onsite_fields(axis: PauliAxis, n_qubits: u32, field: impl Fn(u32) -> f64) -> Vec<Term> {
    (0..n_qubits).map(|i| Term::site(axis, i, field(i))).collect()
}

/// The six generated term families of a lattice model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TermFamilies {
    /// X⊗X couplings.
    pub xx: Vec<Term>,
    /// Y⊗Y couplings.
    pub yy: Vec<Term>,
    /// Z⊗Z couplings.
    pub zz: Vec<Term>,
    /// X fields.
    pub x: Vec<Term>,
    /// Y fields.
    pub y: Vec<Term>,
    /// Z fields.
    pub z: Vec<Term>,
}

impl TermFamilies {
    /// Build the families from a coupling generator and a field generator.
    pub fn generate(
        mut bonds: impl FnMut(PauliAxis) -> Vec<Term>,
        mut fields: impl FnMut(PauliAxis) -> Vec<Term>,
    ) -> Self {
        let families = Self {
            xx: bonds(PauliAxis::XX),
            yy: bonds(PauliAxis::YY),
            zz: bonds(PauliAxis::ZZ),
            x: fields(PauliAxis::X),
            y: fields(PauliAxis::Y),
            z: fields(PauliAxis::Z),
        };
        debug!(
            n_bonds = families.xx.len(),
            n_fields = families.x.len(),
            "generated term families"
        );
        families
    }

    /// The list for one family.
    pub fn family(&self, axis: PauliAxis) -> &[Term] {
        match axis {
            PauliAxis::XX => &self.xx,
            PauliAxis::YY => &self.yy,
            PauliAxis::ZZ => &self.zz,
            PauliAxis::X => &self.x,
            PauliAxis::Y => &self.y,
            PauliAxis::Z => &self.z,
        }
    }

    /// All families in assembly order: XX, YY, ZZ, X, Y, Z.
    pub fn iter(&self) -> impl Iterator<Item = (PauliAxis, &[Term])> + '_ {
        PauliAxis::ALL.into_iter().map(move |axis| (axis, self.family(axis)))
    }

    /// All terms in assembly order.
    pub fn all_terms(&self) -> impl Iterator<Item = &Term> + '_ {
        self.iter().flat_map(|(_, terms)| terms.iter())
    }

    /// Total number of generated terms.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, terms)| terms.len()).sum()
    }

    /// Largest coefficient magnitude over every family, 0 when empty.
    ///
    /// The zero threshold of the full Hamiltonian and of every group cut
    /// from these families is taken relative to this value.
    pub fn max_abs_coeff(&self) -> f64 {
        self.all_terms().map(|t| t.coeff().abs()).fold(0.0, f64::max)
    }

    /// True if no family holds any term.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
