//! Power-law chain command implementation.

use anyhow::Result;

use arvak_spin::{PowerLaw, PowerLawParams};

use super::common::{OutputFormat, print_model};

/// Flag values for the `power-law` command.
pub struct Options {
    pub qubits: u32,
    pub alpha: f64,
    pub couplings: (f64, f64, f64),
    pub fields: (f64, f64, f64),
    pub periodic: bool,
    pub verbose: bool,
}

/// Execute the power-law command.
pub fn execute(options: Options, format: &str) -> Result<()> {
    let format = OutputFormat::parse(format)?;
    let (jx, jy, jz) = options.couplings;
    let (hx, hy, hz) = options.fields;
    let params = PowerLawParams::new(options.qubits)
        .with_alpha(options.alpha)
        .with_couplings(jx, jy, jz)
        .with_fields(hx, hy, hz)
        .with_periodic(options.periodic)
        .with_verbose(options.verbose);

    let model = PowerLaw::new(params)?;
    print_model(&model, format)
}
