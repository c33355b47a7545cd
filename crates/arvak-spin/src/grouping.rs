//! Term groupings for product-formula scheduling.
//!
//! Two strategies split a model's terms into sub-Hamiltonians:
//!
//! - **Axis grouping** collects each Pauli axis with its coupling family,
//!   `{XX ∪ X}`, `{YY ∪ Y}`, `{ZZ ∪ Z}`. Terms inside a group commute on
//!   distinct sites. Groups whose coefficients all vanish are dropped.
//! - **Parity grouping** takes the even-indexed and odd-indexed entries of
//!   every family (by generation position, not by qubit index) into two
//!   groups for a two-phase brick-wall step. Both groups are always present.
//!
//! Both strategies read the raw term families, not the assembled
//! Hamiltonian, and each candidate group is assembled on its own. The zero
//! threshold is fixed by the largest coefficient over all families, the
//! same scale the full Hamiltonian is simplified against.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembly::assemble_scaled;
use crate::error::{SpinError, SpinResult};
use crate::hamiltonian::{Hamiltonian, Tolerance};
use crate::lattice::TermFamilies;
use crate::term::{PauliAxis, Term};

/// Identifies a group within a [`Grouping`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKey {
    /// `XX` couplings and `X` fields.
    X,
    /// `YY` couplings and `Y` fields.
    Y,
    /// `ZZ` couplings and `Z` fields.
    Z,
    /// Even generation positions.
    Even,
    /// Odd generation positions.
    Odd,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GroupKey::X => "x",
            GroupKey::Y => "y",
            GroupKey::Z => "z",
            GroupKey::Even => "even",
            GroupKey::Odd => "odd",
        };
        f.write_str(name)
    }
}

/// An ordered list of sub-Hamiltonians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GroupingRepr")]
pub struct Grouping {
    keys: Vec<GroupKey>,
    groups: Vec<Hamiltonian>,
}

/// Wire form of [`Grouping`]; keys and groups must pair up.
#[derive(Deserialize)]
struct GroupingRepr {
    keys: Vec<GroupKey>,
    groups: Vec<Hamiltonian>,
}

impl TryFrom<GroupingRepr> for Grouping {
    type Error = SpinError;

    fn try_from(repr: GroupingRepr) -> SpinResult<Self> {
        if repr.keys.len() != repr.groups.len() {
            return Err(SpinError::GroupingMismatch {
                keys: repr.keys.len(),
                groups: repr.groups.len(),
            });
        }
        Ok(Self {
            keys: repr.keys,
            groups: repr.groups,
        })
    }
}

impl Grouping {
    fn from_pairs(pairs: Vec<(GroupKey, Hamiltonian)>) -> Self {
        let (keys, groups) = pairs.into_iter().unzip();
        Self { keys, groups }
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if no group survived.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys in order.
    pub fn keys(&self) -> &[GroupKey] {
        &self.keys
    }

    /// Sub-Hamiltonians in order.
    pub fn groups(&self) -> &[Hamiltonian] {
        &self.groups
    }

    /// Iterate `(key, group)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (GroupKey, &Hamiltonian)> + '_ {
        self.keys.iter().copied().zip(self.groups.iter())
    }

    /// The group stored under `key`, if present.
    pub fn get(&self, key: GroupKey) -> Option<&Hamiltonian> {
        self.iter().find(|(k, _)| *k == key).map(|(_, h)| h)
    }

    /// Consume into the bare list of sub-Hamiltonians.
    pub fn into_groups(self) -> Vec<Hamiltonian> {
        self.groups
    }
}

impl Index<usize> for Grouping {
    type Output = Hamiltonian;

    fn index(&self, index: usize) -> &Hamiltonian {
        &self.groups[index]
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grouping ({} groups):", self.len())?;
        for (key, group) in self.iter() {
            write!(f, "[{key}] {group}")?;
        }
        Ok(())
    }
}

/// Split terms by Pauli axis, dropping groups that sum to zero.
pub fn group_by_axis(n_qubits: u32, families: &TermFamilies, tol: Tolerance) -> SpinResult<Grouping> {
    let candidates = [
        (GroupKey::X, PauliAxis::XX, PauliAxis::X),
        (GroupKey::Y, PauliAxis::YY, PauliAxis::Y),
        (GroupKey::Z, PauliAxis::ZZ, PauliAxis::Z),
    ];

    let scale = families.max_abs_coeff();
    let mut kept = Vec::with_capacity(candidates.len());
    for (key, pair_axis, site_axis) in candidates {
        let group = assemble_scaled(
            n_qubits,
            [families.family(pair_axis), families.family(site_axis)],
            tol,
            scale,
        )?;
        if group.is_zero(tol) {
            debug!(%key, "dropping zero axis group");
            continue;
        }
        kept.push((key, group));
    }
    Ok(Grouping::from_pairs(kept))
}

/// Split every family by generation position into `[even, odd]`.
///
/// Always returns exactly two groups, even when one is empty.
pub fn group_by_parity(n_qubits: u32, families: &TermFamilies, tol: Tolerance) -> SpinResult<Grouping> {
    let mut even: Vec<Term> = Vec::new();
    let mut odd: Vec<Term> = Vec::new();
    for (_, terms) in families.iter() {
        even.extend(terms.iter().step_by(2).cloned());
        odd.extend(terms.iter().skip(1).step_by(2).cloned());
    }
    debug!(n_even = even.len(), n_odd = odd.len(), "split terms by parity");

    let scale = families.max_abs_coeff();
    Ok(Grouping::from_pairs(vec![
        (GroupKey::Even, assemble_scaled(n_qubits, [even.as_slice()], tol, scale)?),
        (GroupKey::Odd, assemble_scaled(n_qubits, [odd.as_slice()], tol, scale)?),
    ]))
}
