//! Lattice models: parameters in, Hamiltonian and groupings out.
//!
//! A model is built in one pass. Parameters are validated, the six term
//! families are generated, the full Hamiltonian is assembled, and both
//! groupings are computed. Any failure aborts construction; nothing is
//! exposed from a partially built model.
//!
//! ```rust
//! use arvak_spin::model::{LatticeModel, NearestNeighbor1d, NearestNeighborParams};
//!
//! let model = NearestNeighbor1d::new(NearestNeighborParams::new(4)).unwrap();
//! assert_eq!(model.n_qubits(), 4);
//! assert_eq!(model.families().xx.len(), 3);
//! assert_eq!(model.parity_grouping().len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assembly::assemble_scaled;
use crate::disorder::RandomField;
use crate::error::{SpinError, SpinResult};
use crate::grouping::{Grouping, group_by_axis, group_by_parity};
use crate::hamiltonian::{Hamiltonian, PauliOp, Tolerance};
use crate::lattice::{TermFamilies, nearest_neighbor_bonds, onsite_fields, power_law_bonds};
use crate::term::PauliAxis;

/// Two-site coupling constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Couplings {
    /// XX coupling.
    pub jx: f64,
    /// YY coupling.
    pub jy: f64,
    /// ZZ coupling.
    pub jz: f64,
}

impl Couplings {
    /// Create coupling constants.
    pub fn new(jx: f64, jy: f64, jz: f64) -> Self {
        Self { jx, jy, jz }
    }

    /// The constant for one coupling family.
    pub fn along(&self, axis: PauliAxis) -> f64 {
        match axis.pauli() {
            PauliOp::X => self.jx,
            PauliOp::Y => self.jy,
            _ => self.jz,
        }
    }

    fn check_finite(&self) -> SpinResult<()> {
        check_finite("jx", self.jx)?;
        check_finite("jy", self.jy)?;
        check_finite("jz", self.jz)
    }
}

impl Default for Couplings {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// On-site field strengths. Fields left out of a config file are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fields {
    /// X field.
    pub hx: f64,
    /// Y field.
    pub hy: f64,
    /// Z field.
    pub hz: f64,
}

impl Fields {
    /// Create field strengths.
    pub fn new(hx: f64, hy: f64, hz: f64) -> Self {
        Self { hx, hy, hz }
    }

    /// The strength for one field family.
    pub fn along(&self, axis: PauliAxis) -> f64 {
        match axis.pauli() {
            PauliOp::X => self.hx,
            PauliOp::Y => self.hy,
            _ => self.hz,
        }
    }

    fn check_finite(&self) -> SpinResult<()> {
        check_finite("hx", self.hx)?;
        check_finite("hy", self.hy)?;
        check_finite("hz", self.hz)
    }
}

fn default_nn_fields() -> Fields {
    Fields::new(0.2, 0.0, 0.0)
}

fn default_power_law_fields() -> Fields {
    Fields::new(0.0, 0.0, 0.2)
}

fn default_alpha() -> f64 {
    4.0
}

/// Parameters of the nearest-neighbour XYZ chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestNeighborParams {
    /// Number of sites.
    pub n_qubits: u32,
    /// Coupling constants.
    #[serde(default)]
    pub couplings: Couplings,
    /// Field strengths.
    #[serde(default = "default_nn_fields")]
    pub fields: Fields,
    /// Couple site `n-1` back to site 0.
    #[serde(default)]
    pub periodic: bool,
    /// Per-site field offsets; empty for no disorder.
    #[serde(default)]
    pub rand_field: Vec<f64>,
    /// Zero tolerance for simplification and group filtering.
    #[serde(default)]
    pub tolerance: Tolerance,
    /// Render the Hamiltonian and groupings through the log at build time.
    #[serde(default)]
    pub verbose: bool,
}

impl NearestNeighborParams {
    /// Defaults: `J = 1` on every axis, `hx = 0.2`, `hy = hz = 0`, open chain.
    pub fn new(n_qubits: u32) -> Self {
        Self {
            n_qubits,
            couplings: Couplings::default(),
            fields: default_nn_fields(),
            periodic: false,
            rand_field: Vec::new(),
            tolerance: Tolerance::default(),
            verbose: false,
        }
    }

    /// Set the coupling constants.
    #[must_use]
    pub fn with_couplings(mut self, jx: f64, jy: f64, jz: f64) -> Self {
        self.couplings = Couplings::new(jx, jy, jz);
        self
    }

    /// Set the field strengths.
    #[must_use]
    pub fn with_fields(mut self, hx: f64, hy: f64, hz: f64) -> Self {
        self.fields = Fields::new(hx, hy, hz);
        self
    }

    /// Toggle the periodic boundary.
    #[must_use]
    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// Set the per-site field offsets.
    #[must_use]
    pub fn with_random_field(mut self, rand_field: Vec<f64>) -> Self {
        self.rand_field = rand_field;
        self
    }

    /// Set the zero tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Toggle build-time rendering.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check qubit count, parameter finiteness and tolerance, in that order.
    ///
    /// The random field is checked when the model is built.
    pub fn validate(&self) -> SpinResult<()> {
        check_qubits(self.n_qubits)?;
        self.couplings.check_finite()?;
        self.fields.check_finite()?;
        self.tolerance.validate()
    }
}

/// Parameters of the power-law long-range chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerLawParams {
    /// Number of sites.
    pub n_qubits: u32,
    /// Decay exponent: bond `(i, j)` is scaled by `|i-j|^(-alpha)`.
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Coupling constants.
    #[serde(default)]
    pub couplings: Couplings,
    /// Field strengths.
    #[serde(default = "default_power_law_fields")]
    pub fields: Fields,
    /// Rejected when true; the long-range chain has no periodic form.
    #[serde(default)]
    pub periodic: bool,
    /// Zero tolerance for simplification and group filtering.
    #[serde(default)]
    pub tolerance: Tolerance,
    /// Render the Hamiltonian and groupings through the log at build time.
    #[serde(default)]
    pub verbose: bool,
}

impl PowerLawParams {
    /// Defaults: `alpha = 4`, `J = 1` on every axis, `hz = 0.2`, open chain.
    pub fn new(n_qubits: u32) -> Self {
        Self {
            n_qubits,
            alpha: default_alpha(),
            couplings: Couplings::default(),
            fields: default_power_law_fields(),
            periodic: false,
            tolerance: Tolerance::default(),
            verbose: false,
        }
    }

    /// Set the decay exponent.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the coupling constants.
    #[must_use]
    pub fn with_couplings(mut self, jx: f64, jy: f64, jz: f64) -> Self {
        self.couplings = Couplings::new(jx, jy, jz);
        self
    }

    /// Set the field strengths.
    #[must_use]
    pub fn with_fields(mut self, hx: f64, hy: f64, hz: f64) -> Self {
        self.fields = Fields::new(hx, hy, hz);
        self
    }

    /// Request a periodic boundary (construction will fail).
    #[must_use]
    pub fn with_periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// Set the zero tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Toggle build-time rendering.
    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Check qubit count, boundary, parameter finiteness and tolerance, in
    /// that order.
    pub fn validate(&self) -> SpinResult<()> {
        check_qubits(self.n_qubits)?;
        if self.periodic {
            return Err(SpinError::PeriodicUnsupported {
                model: PowerLaw::NAME,
            });
        }
        check_finite("alpha", self.alpha)?;
        self.couplings.check_finite()?;
        self.fields.check_finite()?;
        self.tolerance.validate()
    }
}

/// Read-only outputs shared by every lattice model.
pub trait LatticeModel {
    /// Short model name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Number of sites.
    fn n_qubits(&self) -> u32;

    /// The generated term families, in generation order.
    fn families(&self) -> &TermFamilies;

    /// The full simplified Hamiltonian.
    fn hamiltonian(&self) -> &Hamiltonian;

    /// 0 to 3 groups keyed X, Y, Z.
    fn axis_grouping(&self) -> &Grouping;

    /// Exactly two groups, `[even, odd]`.
    fn parity_grouping(&self) -> &Grouping;
}

#[derive(Debug, Clone)]
struct Built {
    families: TermFamilies,
    hamiltonian: Hamiltonian,
    axis: Grouping,
    parity: Grouping,
}

impl Built {
    fn new(
        name: &'static str,
        n_qubits: u32,
        families: TermFamilies,
        tol: Tolerance,
        verbose: bool,
    ) -> SpinResult<Self> {
        // Finite parameters can still overflow, e.g. a steep negative alpha.
        if let Some(term) = families.all_terms().find(|t| !t.coeff().is_finite()) {
            return Err(SpinError::NonFiniteCoefficient {
                axis: term.axis(),
                sites: term.sites().to_vec(),
                coeff: term.coeff(),
            });
        }

        let scale = families.max_abs_coeff();
        let hamiltonian = assemble_scaled(
            n_qubits,
            families.iter().map(|(_, terms)| terms),
            tol,
            scale,
        )?;
        let axis = group_by_axis(n_qubits, &families, tol)?;
        let parity = group_by_parity(n_qubits, &families, tol)?;

        info!(
            model = name,
            n_qubits,
            n_terms = hamiltonian.n_terms(),
            n_axis_groups = axis.len(),
            "built lattice model"
        );
        if verbose {
            info!("The Hamiltonian:\n{hamiltonian}");
            info!("The xyz grouping:\n{axis}");
            info!("The parity grouping:\n{parity}");
        }

        Ok(Self {
            families,
            hamiltonian,
            axis,
            parity,
        })
    }
}

fn check_qubits(n_qubits: u32) -> SpinResult<()> {
    if n_qubits < 2 {
        return Err(SpinError::TooFewQubits(n_qubits));
    }
    Ok(())
}

fn check_finite(name: &'static str, value: f64) -> SpinResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SpinError::NonFiniteParameter { name, value })
    }
}

/// Nearest-neighbour XYZ chain with optional random fields.
///
/// H = Σ_i (Jx X_i X_{i+1} + Jy Y_i Y_{i+1} + Jz Z_i Z_{i+1})
///   + Σ_i (1 + r_i)(hx X_i + hy Y_i + hz Z_i)
#[derive(Debug, Clone)]
pub struct NearestNeighbor1d {
    params: NearestNeighborParams,
    random_field: RandomField,
    built: Built,
}

impl NearestNeighbor1d {
    /// Model name.
    pub const NAME: &'static str = "nearest_neighbor_1d";

    /// Validate `params` and build the model.
    pub fn new(params: NearestNeighborParams) -> SpinResult<Self> {
        let n = params.n_qubits;
        params.validate()?;
        let random_field = RandomField::new(&params.rand_field, n)?;
        debug!(
            n_qubits = n,
            periodic = params.periodic,
            disordered = !random_field.is_empty(),
            "building nearest-neighbour chain"
        );

        let families = TermFamilies::generate(
            |axis| nearest_neighbor_bonds(axis, n, params.couplings.along(axis), params.periodic),
            |axis| {
                let h = params.fields.along(axis);
                onsite_fields(axis, n, |site| random_field.modulate(h, site))
            },
        );
        let built = Built::new(Self::NAME, n, families, params.tolerance, params.verbose)?;

        Ok(Self {
            params,
            random_field,
            built,
        })
    }

    /// The parameters the model was built from.
    pub fn params(&self) -> &NearestNeighborParams {
        &self.params
    }

    /// The validated disorder pattern, one offset per site.
    pub fn random_field(&self) -> &RandomField {
        &self.random_field
    }
}

impl LatticeModel for NearestNeighbor1d {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn n_qubits(&self) -> u32 {
        self.params.n_qubits
    }

    fn families(&self) -> &TermFamilies {
        &self.built.families
    }

    fn hamiltonian(&self) -> &Hamiltonian {
        &self.built.hamiltonian
    }

    fn axis_grouping(&self) -> &Grouping {
        &self.built.axis
    }

    fn parity_grouping(&self) -> &Grouping {
        &self.built.parity
    }
}

/// Open chain with all-to-all couplings decaying as `|i-j|^(-alpha)`.
///
/// H = Σ_{i<j} |i-j|^(-α) (Jx X_i X_j + Jy Y_i Y_j + Jz Z_i Z_j)
///   + Σ_i (hx X_i + hy Y_i + hz Z_i)
#[derive(Debug, Clone)]
pub struct PowerLaw {
    params: PowerLawParams,
    built: Built,
}

impl PowerLaw {
    /// Model name.
    pub const NAME: &'static str = "power_law";

    /// Validate `params` and build the model.
    pub fn new(params: PowerLawParams) -> SpinResult<Self> {
        let n = params.n_qubits;
        params.validate()?;
        debug!(n_qubits = n, alpha = params.alpha, "building power-law chain");

        let families = TermFamilies::generate(
            |axis| power_law_bonds(axis, n, params.couplings.along(axis), params.alpha),
            |axis| {
                let h = params.fields.along(axis);
                onsite_fields(axis, n, |_| h)
            },
        );
        let built = Built::new(Self::NAME, n, families, params.tolerance, params.verbose)?;

        Ok(Self { params, built })
    }

    /// The parameters the model was built from.
    pub fn params(&self) -> &PowerLawParams {
        &self.params
    }
}

impl LatticeModel for PowerLaw {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn n_qubits(&self) -> u32 {
        self.params.n_qubits
    }

    fn families(&self) -> &TermFamilies {
        &self.built.families
    }

    fn hamiltonian(&self) -> &Hamiltonian {
        &self.built.hamiltonian
    }

    fn axis_grouping(&self) -> &Grouping {
        &self.built.axis
    }

    fn parity_grouping(&self) -> &Grouping {
        &self.built.parity
    }
}

/// Either lattice model, as produced from a configuration file.
#[derive(Debug, Clone)]
pub enum SpinModel {
    /// Nearest-neighbour chain.
    NearestNeighbor(NearestNeighbor1d),
    /// Power-law chain.
    PowerLaw(PowerLaw),
}

impl SpinModel {
    fn inner(&self) -> &dyn LatticeModel {
        match self {
            SpinModel::NearestNeighbor(m) => m,
            SpinModel::PowerLaw(m) => m,
        }
    }
}

impl LatticeModel for SpinModel {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn n_qubits(&self) -> u32 {
        self.inner().n_qubits()
    }

    fn families(&self) -> &TermFamilies {
        self.inner().families()
    }

    fn hamiltonian(&self) -> &Hamiltonian {
        self.inner().hamiltonian()
    }

    fn axis_grouping(&self) -> &Grouping {
        self.inner().axis_grouping()
    }

    fn parity_grouping(&self) -> &Grouping {
        self.inner().parity_grouping()
    }
}

impl From<NearestNeighbor1d> for SpinModel {
    fn from(model: NearestNeighbor1d) -> Self {
        SpinModel::NearestNeighbor(model)
    }
}

impl From<PowerLaw> for SpinModel {
    fn from(model: PowerLaw) -> Self {
        SpinModel::PowerLaw(model)
    }
}
