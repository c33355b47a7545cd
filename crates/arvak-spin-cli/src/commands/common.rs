//! Shared helpers for CLI commands.

use anyhow::Result;
use console::style;
use serde::Serialize;

use arvak_spin::{Grouping, Hamiltonian, LatticeModel};

/// How a built model is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    /// Parse a `--format` value.
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown format: '{other}'. Available: table, json"),
        }
    }
}

/// One weighted Pauli label.
#[derive(Debug, Serialize)]
pub struct TermReport {
    pub label: String,
    pub coeff: f64,
}

/// One named group.
#[derive(Debug, Serialize)]
pub struct GroupReport {
    pub key: String,
    pub terms: Vec<TermReport>,
}

/// JSON view of a built model.
#[derive(Debug, Serialize)]
pub struct ModelReport {
    pub model: &'static str,
    pub n_qubits: u32,
    pub lambda: f64,
    pub hamiltonian: Vec<TermReport>,
    pub axis_grouping: Vec<GroupReport>,
    pub parity_grouping: Vec<GroupReport>,
}

impl ModelReport {
    pub fn new(model: &dyn LatticeModel) -> Self {
        Self {
            model: model.name(),
            n_qubits: model.n_qubits(),
            lambda: model.hamiltonian().lambda(),
            hamiltonian: term_reports(model.hamiltonian()),
            axis_grouping: group_reports(model.axis_grouping()),
            parity_grouping: group_reports(model.parity_grouping()),
        }
    }
}

fn term_reports(h: &Hamiltonian) -> Vec<TermReport> {
    h.terms()
        .iter()
        .map(|t| TermReport {
            label: t.pauli.label(h.n_qubits()),
            coeff: t.coeff,
        })
        .collect()
}

fn group_reports(grouping: &Grouping) -> Vec<GroupReport> {
    grouping
        .iter()
        .map(|(key, h)| GroupReport {
            key: key.to_string(),
            terms: term_reports(h),
        })
        .collect()
}

/// Print a built model in the requested format.
pub fn print_model(model: &dyn LatticeModel, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&ModelReport::new(model))
                .map_err(|e| anyhow::anyhow!("JSON serialization failed: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Table => print_table(model),
    }
    Ok(())
}

fn print_table(model: &dyn LatticeModel) {
    let h = model.hamiltonian();
    println!(
        "{} Built {} on {} qubits ({} terms, lambda = {:.6})",
        style("✓").green().bold(),
        style(model.name()).cyan(),
        model.n_qubits(),
        h.n_terms(),
        h.lambda()
    );

    println!("\n{}", style("The Hamiltonian:").bold());
    print!("{h}");

    println!("\n{}", style("The xyz grouping:").bold());
    print_grouping(model.axis_grouping());

    println!("\n{}", style("The parity grouping:").bold());
    print_grouping(model.parity_grouping());
}

fn print_grouping(grouping: &Grouping) {
    if grouping.is_empty() {
        println!("  {}", style("(no groups)").dim());
        return;
    }
    for (key, h) in grouping.iter() {
        println!(
            "  {} {} terms",
            style(format!("[{key}]")).yellow(),
            h.n_terms()
        );
        for term in h.terms() {
            println!(
                "    {}  {:+.6}",
                style(term.pauli.label(h.n_qubits())).cyan(),
                term.coeff
            );
        }
    }
}
