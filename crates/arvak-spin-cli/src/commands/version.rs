//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - spin-lattice Hamiltonians and term groupings",
        style("Arvak Spin").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Models:");
    println!("  nn         Nearest-neighbour XYZ chain with optional random fields");
    println!("  power-law  Long-range chain with |i-j|^(-alpha) couplings");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/arvak").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
