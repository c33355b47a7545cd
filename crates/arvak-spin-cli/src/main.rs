//! Arvak Spin Command-Line Interface
//!
//! Builds spin-lattice Hamiltonians from a YAML model description or from
//! flags, and prints the Hamiltonian with its axis and parity groupings.
//!
//! ```text
//! arvak-spin build --config chain.yaml --format json
//! arvak-spin nn --qubits 6 --periodic --hz 0.5
//! arvak-spin power-law --qubits 8 --alpha 1.5
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{build, nn, power_law, version};

/// Arvak Spin - spin-lattice Hamiltonians and Trotter term groupings
#[derive(Parser)]
#[command(name = "arvak-spin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a model from a YAML description
    Build {
        /// Model file (defaults to a 4-site nearest-neighbour chain)
        #[arg(short, long)]
        config: Option<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Build a nearest-neighbour XYZ chain
    Nn {
        /// Number of sites
        #[arg(short = 'n', long)]
        qubits: u32,

        /// XX coupling
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        jx: f64,

        /// YY coupling
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        jy: f64,

        /// ZZ coupling
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        jz: f64,

        /// X field
        #[arg(long, default_value = "0.2", allow_negative_numbers = true)]
        hx: f64,

        /// Y field
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        hy: f64,

        /// Z field
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        hz: f64,

        /// Couple the last site back to the first
        #[arg(long)]
        periodic: bool,

        /// Per-site field offsets, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        rand_field: Vec<f64>,

        /// Sample offsets uniformly in [-width, width] instead
        #[arg(long, conflicts_with = "rand_field")]
        disorder_width: Option<f64>,

        /// Seed for --disorder-width
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Build a power-law long-range chain
    PowerLaw {
        /// Number of sites
        #[arg(short = 'n', long)]
        qubits: u32,

        /// Decay exponent
        #[arg(short, long, default_value = "4.0", allow_negative_numbers = true)]
        alpha: f64,

        /// XX coupling
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        jx: f64,

        /// YY coupling
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        jy: f64,

        /// ZZ coupling
        #[arg(long, default_value = "1.0", allow_negative_numbers = true)]
        jz: f64,

        /// X field
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        hx: f64,

        /// Y field
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        hy: f64,

        /// Z field
        #[arg(long, default_value = "0.2", allow_negative_numbers = true)]
        hz: f64,

        /// Request a periodic boundary (rejected for this model)
        #[arg(long)]
        periodic: bool,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Build { config, format } => build::execute(config.as_deref(), &format),

        Commands::Nn {
            qubits,
            jx,
            jy,
            jz,
            hx,
            hy,
            hz,
            periodic,
            rand_field,
            disorder_width,
            seed,
            format,
        } => nn::execute(
            nn::Options {
                qubits,
                couplings: (jx, jy, jz),
                fields: (hx, hy, hz),
                periodic,
                rand_field,
                disorder_width,
                seed,
                verbose: cli.verbose > 0,
            },
            &format,
        ),

        Commands::PowerLaw {
            qubits,
            alpha,
            jx,
            jy,
            jz,
            hx,
            hy,
            hz,
            periodic,
            format,
        } => power_law::execute(
            power_law::Options {
                qubits,
                alpha,
                couplings: (jx, jy, jz),
                fields: (hx, hy, hz),
                periodic,
                verbose: cli.verbose > 0,
            },
            &format,
        ),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
