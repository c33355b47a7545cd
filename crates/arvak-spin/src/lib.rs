//! `arvak-spin`: spin-lattice Hamiltonians and term groupings.
//!
//! Builds symbolic Hamiltonians for 1D spin chains and splits their terms
//! into sub-Hamiltonians for product-formula time evolution:
//!
//! - **Nearest-neighbour XYZ chain** with open or periodic boundary and
//!   optional random-field disorder
//! - **Power-law chain** with all-to-all couplings decaying as `|i-j|^(-α)`
//!
//! Each model exposes the full simplified Hamiltonian, an **axis grouping**
//! (`{XX ∪ X}`, `{YY ∪ Y}`, `{ZZ ∪ Z}`, zero groups dropped) and a **parity
//! grouping** (`[even, odd]` by generation position, always two groups).
//!
//! # Quick start
//!
//! ```rust
//! use arvak_spin::{LatticeModel, NearestNeighbor1d, NearestNeighborParams};
//!
//! // 4-site Heisenberg chain in a transverse field hx = 0.2
//! let model = NearestNeighbor1d::new(NearestNeighborParams::new(4)).unwrap();
//!
//! assert_eq!(model.hamiltonian().n_terms(), 3 * 3 + 4);
//! assert_eq!(model.axis_grouping().len(), 3);
//! assert_eq!(model.parity_grouping().len(), 2);
//! ```

pub mod assembly;
pub mod config;
pub mod disorder;
pub mod error;
pub mod grouping;
pub mod hamiltonian;
pub mod lattice;
pub mod model;
pub mod term;

pub use assembly::{assemble, assemble_scaled};
pub use config::{ConfigError, ModelConfig};
pub use disorder::RandomField;
pub use error::{ErrorKind, SpinError, SpinResult};
pub use grouping::{GroupKey, Grouping, group_by_axis, group_by_parity};
pub use hamiltonian::{Hamiltonian, HamiltonianTerm, PauliOp, PauliString, Tolerance};
pub use lattice::TermFamilies;
pub use model::{
    Couplings, Fields, LatticeModel, NearestNeighbor1d, NearestNeighborParams, PowerLaw,
    PowerLawParams, SpinModel,
};
pub use term::{PauliAxis, Term};
