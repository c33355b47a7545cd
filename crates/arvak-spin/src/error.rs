//! Error types for the spin crate.

use thiserror::Error;

use crate::config::ConfigError;
use crate::term::PauliAxis;

/// Broad classification of a [`SpinError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller asked for something this crate does not support, or gave
    /// malformed model parameters.
    Configuration,
    /// A structural invariant was broken (bad qubit count, bad site index).
    Invariant,
}

/// Errors produced while building lattice Hamiltonians.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpinError {
    /// A non-empty random field was shorter than the chain.
    #[error("random field has {got} entries but the chain has {n_qubits} sites; need at least {n_qubits}")]
    RandomFieldTooShort {
        /// Length of the supplied random field.
        got: usize,
        /// Number of sites in the chain.
        n_qubits: u32,
    },

    /// Periodic boundary requested on a topology that does not define one.
    #[error("periodic boundary is not defined for the {model} model")]
    PeriodicUnsupported {
        /// Model name.
        model: &'static str,
    },

    /// Tolerance values must be finite and non-negative.
    #[error("invalid tolerance: atol={atol}, rtol={rtol}")]
    InvalidTolerance {
        /// Absolute tolerance.
        atol: f64,
        /// Relative tolerance.
        rtol: f64,
    },

    /// A model parameter is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFiniteParameter {
        /// Parameter name as written in a model file.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Finite parameters produced a NaN or infinite coefficient.
    #[error("{axis} term on sites {sites:?} has non-finite coefficient {coeff}")]
    NonFiniteCoefficient {
        /// Axis of the offending term.
        axis: PauliAxis,
        /// Sites of the offending term.
        sites: Vec<u32>,
        /// The generated coefficient.
        coeff: f64,
    },

    /// Model configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Chains need at least two sites.
    #[error("a spin chain needs at least 2 qubits, got {0}")]
    TooFewQubits(u32),

    /// A term references a site outside `[0, n_qubits)`.
    #[error("{axis} term references site {site} but the chain only has {n_qubits} sites")]
    SiteOutOfRange {
        /// Axis of the offending term.
        axis: PauliAxis,
        /// The offending site index.
        site: u32,
        /// Number of sites in the chain.
        n_qubits: u32,
    },

    /// A Pauli string references a qubit index that is out of range.
    #[error("Pauli string references qubit {qubit} but the operator only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the operator.
        n_qubits: u32,
    },

    /// A two-site term acts twice on the same site.
    #[error("{axis} term acts twice on site {site}")]
    CoincidentSites {
        /// Axis of the offending term.
        axis: PauliAxis,
        /// The repeated site.
        site: u32,
    },

    /// Site tuple length does not match the axis arity.
    #[error("{axis} term needs {expected} sites, got {got}")]
    ArityMismatch {
        /// Axis of the offending term.
        axis: PauliAxis,
        /// Arity of the axis.
        expected: usize,
        /// Number of sites supplied.
        got: usize,
    },

    /// A grouping pairs a different number of keys and groups.
    #[error("grouping has {keys} keys but {groups} groups")]
    GroupingMismatch {
        /// Number of keys.
        keys: usize,
        /// Number of groups.
        groups: usize,
    },
}

impl SpinError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpinError::RandomFieldTooShort { .. }
            | SpinError::PeriodicUnsupported { .. }
            | SpinError::InvalidTolerance { .. }
            | SpinError::NonFiniteParameter { .. }
            | SpinError::NonFiniteCoefficient { .. }
            | SpinError::Config(_) => ErrorKind::Configuration,
            SpinError::TooFewQubits(_)
            | SpinError::SiteOutOfRange { .. }
            | SpinError::QubitOutOfRange { .. }
            | SpinError::CoincidentSites { .. }
            | SpinError::ArityMismatch { .. }
            | SpinError::GroupingMismatch { .. } => ErrorKind::Invariant,
        }
    }

    /// True for [`ErrorKind::Configuration`] errors.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

/// Result type for spin-lattice operations.
pub type SpinResult<T> = Result<T, SpinError>;
