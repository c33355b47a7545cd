//! Nearest-neighbour chain command implementation.

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use arvak_spin::{NearestNeighbor1d, NearestNeighborParams, RandomField};

use super::common::{OutputFormat, print_model};

/// Flag values for the `nn` command.
pub struct Options {
    pub qubits: u32,
    pub couplings: (f64, f64, f64),
    pub fields: (f64, f64, f64),
    pub periodic: bool,
    pub rand_field: Vec<f64>,
    pub disorder_width: Option<f64>,
    pub seed: u64,
    pub verbose: bool,
}

impl Options {
    fn into_params(self) -> Result<NearestNeighborParams> {
        let rand_field = match self.disorder_width {
            Some(width) if !(width.is_finite() && width >= 0.0) => {
                anyhow::bail!("Disorder width must be finite and non-negative, got {width}")
            }
            Some(width) => {
                debug!(width, seed = self.seed, "sampling random field");
                let mut rng = StdRng::seed_from_u64(self.seed);
                RandomField::sample_uniform(self.qubits, width, &mut rng)
                    .offsets()
                    .to_vec()
            }
            None => self.rand_field,
        };

        let (jx, jy, jz) = self.couplings;
        let (hx, hy, hz) = self.fields;
        Ok(NearestNeighborParams::new(self.qubits)
            .with_couplings(jx, jy, jz)
            .with_fields(hx, hy, hz)
            .with_periodic(self.periodic)
            .with_random_field(rand_field)
            .with_verbose(self.verbose))
    }
}

/// Execute the nn command.
pub fn execute(options: Options, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let model = NearestNeighbor1d::new(options.into_params()?)?;
    print_model(&model, format)
}
