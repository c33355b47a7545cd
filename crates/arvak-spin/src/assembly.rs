//! Merging term lists into a simplified Hamiltonian.

use tracing::trace;

use crate::error::SpinResult;
use crate::hamiltonian::{Hamiltonian, Tolerance};
use crate::term::Term;

/// Concatenate `lists` in the given order and simplify the result.
///
/// Duplicate operators are summed and negligible entries dropped by
/// [`Hamiltonian::simplify`], relative to the largest input magnitude.
/// Every term is validated against `n_qubits` first, so one bad term
/// aborts the whole assembly.
pub fn assemble<'a>(
    n_qubits: u32,
    lists: impl IntoIterator<Item = &'a [Term]>,
    tol: Tolerance,
) -> SpinResult<Hamiltonian> {
    let raw = Hamiltonian::from_sparse_terms(n_qubits, lists.into_iter().flatten())?;
    let scale = raw.max_abs_coeff();
    Ok(finish(raw, tol, scale))
}

/// [`assemble`] with the zero threshold fixed by `scale`.
///
/// Used for every operator cut from one model, so a coefficient is kept or
/// dropped the same way whichever group it lands in.
pub fn assemble_scaled<'a>(
    n_qubits: u32,
    lists: impl IntoIterator<Item = &'a [Term]>,
    tol: Tolerance,
    scale: f64,
) -> SpinResult<Hamiltonian> {
    let raw = Hamiltonian::from_sparse_terms(n_qubits, lists.into_iter().flatten())?;
    Ok(finish(raw, tol, scale))
}

fn finish(raw: Hamiltonian, tol: Tolerance, scale: f64) -> Hamiltonian {
    let simplified = raw.simplify_relative_to(tol, scale);
    trace!(
        n_qubits = raw.n_qubits(),
        raw_terms = raw.n_terms(),
        simplified_terms = simplified.n_terms(),
        scale,
        "assembled Hamiltonian"
    );
    simplified
}
