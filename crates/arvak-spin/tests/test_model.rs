//! Tests for model construction.

use arvak_spin::{
    ErrorKind, GroupKey, LatticeModel, ModelConfig, NearestNeighbor1d, NearestNeighborParams,
    PauliAxis, PauliOp, PauliString, PowerLaw, PowerLawParams, SpinError, SpinModel, Term,
    Tolerance,
};

fn bond_sites(terms: &[Term]) -> Vec<Vec<u32>> {
    terms.iter().map(|t| t.sites().to_vec()).collect()
}

// ---------------------------------------------------------------------------
// Nearest-neighbour chain
// ---------------------------------------------------------------------------

#[test]
fn nn_default_four_site_chain() {
    let model = NearestNeighbor1d::new(NearestNeighborParams::new(4)).unwrap();
    let fam = model.families();

    for axis in [PauliAxis::XX, PauliAxis::YY, PauliAxis::ZZ] {
        assert_eq!(
            bond_sites(fam.family(axis)),
            vec![vec![0, 1], vec![1, 2], vec![2, 3]]
        );
    }
    assert_eq!(fam.x.len(), 4);
    assert!(fam.x.iter().all(|t| t.coeff() == 0.2));
    assert!(fam.y.iter().chain(&fam.z).all(|t| t.coeff() == 0.0));

    assert_eq!(model.n_qubits(), 4);
    assert_eq!(model.hamiltonian().n_qubits(), 4);
    assert_eq!(model.hamiltonian().n_terms(), 13);
    assert_eq!(
        model.axis_grouping().keys(),
        &[GroupKey::X, GroupKey::Y, GroupKey::Z]
    );
    assert_eq!(model.parity_grouping().len(), 2);
}

#[test]
fn nn_family_sizes() {
    for n in 2..8 {
        let open = NearestNeighbor1d::new(NearestNeighborParams::new(n)).unwrap();
        let pbc = NearestNeighbor1d::new(NearestNeighborParams::new(n).with_periodic(true)).unwrap();
        for axis in [PauliAxis::XX, PauliAxis::YY, PauliAxis::ZZ] {
            assert_eq!(open.families().family(axis).len(), (n - 1) as usize);
            assert_eq!(pbc.families().family(axis).len(), n as usize);
            assert_eq!(pbc.families().family(axis).last().unwrap().sites(), &[n - 1, 0]);
        }
        for axis in [PauliAxis::X, PauliAxis::Y, PauliAxis::Z] {
            assert_eq!(open.families().family(axis).len(), n as usize);
        }
    }
}

#[test]
fn nn_two_site_periodic_merges_duplicate_bond() {
    let model = NearestNeighbor1d::new(
        NearestNeighborParams::new(2)
            .with_periodic(true)
            .with_fields(0.0, 0.0, 0.0),
    )
    .unwrap();
    let h = model.hamiltonian();
    assert_eq!(h.n_terms(), 3);
    assert!(h.terms().iter().all(|t| t.coeff == 2.0));
}

#[test]
fn nn_random_field_scales_every_onsite_family() {
    let params = NearestNeighborParams::new(3)
        .with_fields(1.0, 2.0, -1.0)
        .with_random_field(vec![0.5, 0.0, -0.5, 100.0]);
    let model = NearestNeighbor1d::new(params).unwrap();
    let coeffs = |terms: &[Term]| terms.iter().map(Term::coeff).collect::<Vec<_>>();

    assert_eq!(coeffs(&model.families().x), vec![1.5, 1.0, 0.5]);
    assert_eq!(coeffs(&model.families().y), vec![3.0, 2.0, 1.0]);
    assert_eq!(coeffs(&model.families().z), vec![-1.5, -1.0, -0.5]);
    assert_eq!(model.random_field().offsets(), &[0.5, 0.0, -0.5]);
    // Couplings are untouched by disorder.
    assert!(model.families().xx.iter().all(|t| t.coeff() == 1.0));
}

#[test]
fn nn_short_random_field_aborts_construction() {
    let params = NearestNeighborParams::new(4).with_random_field(vec![0.1, 0.2, 0.3]);
    let err = NearestNeighbor1d::new(params).unwrap_err();
    assert!(matches!(
        err,
        SpinError::RandomFieldTooShort {
            got: 3,
            n_qubits: 4
        }
    ));
    assert!(err.is_configuration());
}

#[test]
fn nn_disorder_can_cancel_a_site_field() {
    let params = NearestNeighborParams::new(3)
        .with_couplings(0.0, 0.0, 0.0)
        .with_random_field(vec![-1.0, -1.0, -1.0]);
    let model = NearestNeighbor1d::new(params).unwrap();
    assert!(model.hamiltonian().is_empty());
    assert!(model.axis_grouping().is_empty());
    assert_eq!(model.parity_grouping().len(), 2);
}

#[test]
fn too_few_qubits_is_invariant_violation() {
    for n in [0, 1] {
        let err = NearestNeighbor1d::new(NearestNeighborParams::new(n)).unwrap_err();
        assert!(matches!(err, SpinError::TooFewQubits(m) if m == n));
        assert_eq!(err.kind(), ErrorKind::Invariant);
        assert!(PowerLaw::new(PowerLawParams::new(n)).is_err());
    }
}

#[test]
fn invalid_tolerance_aborts_construction() {
    let tol = Tolerance {
        atol: -1.0,
        rtol: 0.0,
    };
    let err = NearestNeighbor1d::new(NearestNeighborParams::new(3).with_tolerance(tol)).unwrap_err();
    assert!(matches!(err, SpinError::InvalidTolerance { .. }));
}

#[test]
fn nn_weak_coupling_dropped_consistently_everywhere() {
    // Jz sits far below the zero threshold set by Jx.
    let model = NearestNeighbor1d::new(
        NearestNeighborParams::new(3)
            .with_couplings(1e8, 0.0, 1e-7)
            .with_fields(0.0, 0.0, 0.0),
    )
    .unwrap();
    let zz01 = PauliString::from_ops([(0, PauliOp::Z), (1, PauliOp::Z)]);

    assert_eq!(model.hamiltonian().n_terms(), 2);
    assert_eq!(model.hamiltonian().coefficient_of(&zz01), 0.0);
    assert_eq!(model.axis_grouping().keys(), &[GroupKey::X]);
    for group in model.parity_grouping().groups() {
        assert_eq!(group.coefficient_of(&zz01), 0.0);
        assert!(group.terms().iter().all(|t| t.coeff == 1e8));
    }
}

#[test]
fn nn_weak_coupling_kept_consistently_everywhere() {
    // 1e-3 clears the threshold set by 1e8, in every group and in the full operator.
    let model = NearestNeighbor1d::new(
        NearestNeighborParams::new(3)
            .with_couplings(1e8, 0.0, 1e-3)
            .with_fields(0.0, 0.0, 0.0),
    )
    .unwrap();
    let full = model.hamiltonian();
    assert_eq!(full.n_terms(), 4);
    assert_eq!(model.axis_grouping().keys(), &[GroupKey::X, GroupKey::Z]);
    for grouping in [model.axis_grouping(), model.parity_grouping()] {
        let n_terms: usize = grouping.groups().iter().map(|g| g.n_terms()).sum();
        assert_eq!(n_terms, full.n_terms());
        for term in grouping.groups().iter().flat_map(|g| g.terms()) {
            assert_eq!(full.coefficient_of(&term.pauli), term.coeff);
        }
    }
}

#[test]
fn non_finite_nn_parameters_are_rejected() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let cases = [
            ("jx", NearestNeighborParams::new(3).with_couplings(value, 1.0, 1.0)),
            ("jz", NearestNeighborParams::new(3).with_couplings(1.0, 1.0, value)),
            ("hy", NearestNeighborParams::new(3).with_fields(0.0, value, 0.0)),
            ("rand_field", NearestNeighborParams::new(3).with_random_field(vec![0.1, value, 0.1])),
        ];
        for (expected, params) in cases {
            let err = NearestNeighbor1d::new(params).unwrap_err();
            assert!(
                matches!(err, SpinError::NonFiniteParameter { name, .. } if name == expected),
                "{expected}: {err}"
            );
            assert!(err.is_configuration());
        }
    }
}

#[test]
fn non_finite_entries_past_the_chain_are_ignored() {
    let params = NearestNeighborParams::new(2).with_random_field(vec![0.1, 0.2, f64::NAN]);
    let model = NearestNeighbor1d::new(params).unwrap();
    assert_eq!(model.random_field().offsets(), &[0.1, 0.2]);
}

#[test]
fn verbose_build_succeeds() {
    let model =
        NearestNeighbor1d::new(NearestNeighborParams::new(3).with_verbose(true)).unwrap();
    assert_eq!(model.params().n_qubits, 3);
    assert!(model.params().verbose);
}

// ---------------------------------------------------------------------------
// Power-law chain
// ---------------------------------------------------------------------------

#[test]
fn power_law_default_chain() {
    let model = PowerLaw::new(PowerLawParams::new(4)).unwrap();
    let fam = model.families();
    assert_eq!(fam.xx.len(), 6);
    assert_eq!(fam.zz.len(), 6);
    assert!(fam.z.iter().all(|t| t.coeff() == 0.2));
    assert!(fam.x.iter().all(|t| t.coeff() == 0.0));

    // (0, 3) decays as 3^-4.
    let far = fam.xx.iter().find(|t| t.sites() == [0, 3]).unwrap();
    assert!((far.coeff() - 1.0 / 81.0).abs() < 1e-15);

    // 18 couplings + 4 Z fields.
    assert_eq!(model.hamiltonian().n_terms(), 22);
    assert_eq!(model.axis_grouping().len(), 3);
    assert_eq!(model.parity_grouping().len(), 2);
}

#[test]
fn power_law_periodic_always_fails() {
    for n in [2, 3, 7] {
        for alpha in [0.0, 1.5, 4.0, -2.0] {
            let params = PowerLawParams::new(n).with_alpha(alpha).with_periodic(true);
            let err = PowerLaw::new(params).unwrap_err();
            assert!(matches!(err, SpinError::PeriodicUnsupported { .. }));
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }
}

#[test]
fn non_finite_power_law_parameters_are_rejected() {
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let cases = [
            ("alpha", PowerLawParams::new(4).with_alpha(value)),
            ("jy", PowerLawParams::new(4).with_couplings(1.0, value, 1.0)),
            ("hx", PowerLawParams::new(4).with_fields(value, 0.0, 0.0)),
        ];
        for (expected, params) in cases {
            let err = PowerLaw::new(params).unwrap_err();
            assert!(
                matches!(err, SpinError::NonFiniteParameter { name, .. } if name == expected),
                "{expected}: {err}"
            );
            assert_eq!(err.kind(), ErrorKind::Configuration);
        }
    }
}

#[test]
fn power_law_overflowing_decay_is_rejected() {
    let params = PowerLawParams::new(10).with_alpha(-1000.0);
    let err = PowerLaw::new(params).unwrap_err();
    match err {
        SpinError::NonFiniteCoefficient { axis, sites, coeff } => {
            // 2^1000 is still finite; 3^1000 is not.
            assert_eq!(axis, PauliAxis::XX);
            assert_eq!(sites, vec![0, 3]);
            assert!(coeff.is_infinite());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn power_law_overflow_is_harmless_without_couplings() {
    let params = PowerLawParams::new(10)
        .with_alpha(-1000.0)
        .with_couplings(0.0, 0.0, 0.0);
    let model = PowerLaw::new(params).unwrap();
    assert_eq!(model.hamiltonian().n_terms(), 10);
    assert_eq!(model.axis_grouping().keys(), &[GroupKey::Z]);
}

#[test]
fn power_law_without_couplings_keeps_only_fields() {
    let params = PowerLawParams::new(3)
        .with_couplings(0.0, 0.0, 0.0)
        .with_fields(0.0, 0.0, 1.0);
    let model = PowerLaw::new(params).unwrap();
    assert_eq!(model.axis_grouping().keys(), &[GroupKey::Z]);
    assert_eq!(model.hamiltonian().n_terms(), 3);
    assert!((model.params().alpha - 4.0).abs() < f64::EPSILON);
}

#[test]
fn power_law_parity_follows_generation_order() {
    // XX family for n = 3: (0,1), (0,2), (1,2).
    let params = PowerLawParams::new(3)
        .with_alpha(1.0)
        .with_couplings(1.0, 0.0, 0.0)
        .with_fields(0.0, 0.0, 0.0);
    let model = PowerLaw::new(params).unwrap();
    let even = &model.parity_grouping()[0];
    let odd = &model.parity_grouping()[1];
    assert_eq!(even.n_terms(), 2);
    assert_eq!(odd.n_terms(), 1);
    assert_eq!(odd.terms()[0].pauli.qubits().collect::<Vec<_>>(), vec![0, 2]);
    assert!((odd.terms()[0].coeff - 0.5).abs() < 1e-15);
}

// ---------------------------------------------------------------------------
// SpinModel and configuration
// ---------------------------------------------------------------------------

#[test]
fn spin_model_dispatches() {
    let nn: SpinModel = NearestNeighbor1d::new(NearestNeighborParams::new(3))
        .unwrap()
        .into();
    let pl: SpinModel = PowerLaw::new(PowerLawParams::new(3)).unwrap().into();
    assert_eq!(nn.name(), "nearest_neighbor_1d");
    assert_eq!(pl.name(), "power_law");
    assert_eq!(nn.families().xx.len(), 2);
    assert_eq!(pl.families().xx.len(), 3);
}

#[test]
fn config_builds_same_model_as_params() {
    let yaml = "\
model: nearest_neighbor
n_qubits: 5
couplings: { jx: 0.5, jy: 0.5, jz: 1.0 }
fields: { hx: 0.0, hz: 0.3 }
periodic: true
rand_field: [0.1, 0.2, 0.3, 0.4, 0.5]
";
    let from_config = ModelConfig::from_yaml_str(yaml).unwrap().build().unwrap();
    let direct = NearestNeighbor1d::new(
        NearestNeighborParams::new(5)
            .with_couplings(0.5, 0.5, 1.0)
            .with_fields(0.0, 0.0, 0.3)
            .with_periodic(true)
            .with_random_field(vec![0.1, 0.2, 0.3, 0.4, 0.5]),
    )
    .unwrap();
    assert_eq!(from_config.hamiltonian(), direct.hamiltonian());
    assert_eq!(from_config.axis_grouping(), direct.axis_grouping());
    assert_eq!(from_config.parity_grouping(), direct.parity_grouping());
}

#[test]
fn config_short_random_field_fails_at_build() {
    let yaml = "model: nearest_neighbor\nn_qubits: 4\nrand_field: [0.1]\n";
    let err = ModelConfig::from_yaml_str(yaml).unwrap().build().unwrap_err();
    assert!(matches!(err, SpinError::RandomFieldTooShort { .. }));
}

#[test]
fn models_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<NearestNeighbor1d>();
    assert_send_sync::<PowerLaw>();
    assert_send_sync::<SpinModel>();
    assert_send_sync::<ModelConfig>();
}

#[test]
fn models_build_independently_across_threads() {
    let handles: Vec<_> = (2..6)
        .map(|n| {
            std::thread::spawn(move || {
                NearestNeighbor1d::new(NearestNeighborParams::new(n).with_periodic(true))
                    .map(|m| m.hamiltonian().n_terms())
            })
        })
        .collect();
    for (handle, n) in handles.into_iter().zip(2usize..) {
        let n_terms = handle.join().unwrap().unwrap();
        // n = 2 merges the wraparound into the open bond.
        let bonds = if n == 2 { 3 } else { 3 * n };
        assert_eq!(n_terms, bonds + n);
    }
}
