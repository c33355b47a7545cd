//! Random-field disorder on on-site fields.
//!
//! The field on site `i` is scaled by `1 + r_i`. An empty disorder pattern
//! means no disorder. A pattern covering at least every site is accepted
//! and any entries past the last site are ignored. A partial pattern is
//! rejected; it is never padded or cut short.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SpinError, SpinResult};

/// Per-site field offsets validated against a chain length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomField {
    offsets: Vec<f64>,
}

impl RandomField {
    /// No disorder: every multiplier is 1.
    pub fn none() -> Self {
        Self {
            offsets: Vec::new(),
        }
    }

    /// Validate `offsets` against an `n_qubits` chain.
    ///
    /// Entries beyond `n_qubits - 1` are discarded. Retained entries must be
    /// finite.
    pub fn new(offsets: &[f64], n_qubits: u32) -> SpinResult<Self> {
        let n = n_qubits as usize;
        match offsets.len() {
            0 => Ok(Self::none()),
            len if len >= n => {
                if let Some(&value) = offsets[..n].iter().find(|r| !r.is_finite()) {
                    return Err(SpinError::NonFiniteParameter {
                        name: "rand_field",
                        value,
                    });
                }
                Ok(Self {
                    offsets: offsets[..n].to_vec(),
                })
            }
            len => Err(SpinError::RandomFieldTooShort { got: len, n_qubits }),
        }
    }

    /// Draw offsets uniformly from `[-width, width]` for every site.
    pub fn sample_uniform<R: Rng + ?Sized>(n_qubits: u32, width: f64, rng: &mut R) -> Self {
        let width = width.abs();
        let offsets = (0..n_qubits)
            .map(|_| {
                if width == 0.0 {
                    0.0
                } else {
                    rng.gen_range(-width..=width)
                }
            })
            .collect();
        Self { offsets }
    }

    /// True when no disorder is applied.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// The retained offsets, one per site (empty when there is no disorder).
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Field multiplier on `site`.
    pub fn multiplier(&self, site: u32) -> f64 {
        self.offsets.get(site as usize).map_or(1.0, |r| r + 1.0)
    }

    /// Disorder-scaled field strength on `site`.
    pub fn modulate(&self, field: f64, site: u32) -> f64 {
        self.multiplier(site) * field
    }
}

impl Default for RandomField {
    fn default() -> Self {
        Self::none()
    }
}

/// One-shot form: validate `rand_field` and scale `field` on `site`.
pub fn modulate(field: f64, site: u32, rand_field: &[f64], n_qubits: u32) -> SpinResult<f64> {
    Ok(RandomField::new(rand_field, n_qubits)?.modulate(field, site))
}
