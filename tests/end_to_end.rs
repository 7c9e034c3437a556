use alp_kinetics::collision::CollisionIntegrals;
use alp_kinetics::constants::PhysicalConstants;
use alp_kinetics::distribution::DistributionModel;
use alp_kinetics::domain::{DistortionConfig, MomentumGrid, X_POINTS};
use alp_kinetics::error::KineticsError;
use alp_kinetics::observable::{delta_neff, distribution_on_grid};
use alp_kinetics::sweep::sweep;

fn distorted_model() -> DistributionModel {
    DistributionModel::new(DistortionConfig {
        enabled: true,
        rank: 39,
    })
    .unwrap()
}

#[test]
fn full_range_sweep_is_finite_and_ordered() {
    let constants = PhysicalConstants::default();
    let model = distorted_model();
    let integrals = CollisionIntegrals::new(&constants, &model).unwrap();

    let flow = sweep(&integrals, 1e3, 1e-4, 50).unwrap();
    assert_eq!(flow.len(), 50);
    assert!(flow.failed_indices().is_empty());

    let temps = flow.temperatures.points();
    assert_eq!(temps[0], 1e3);
    assert_eq!(temps[49], 1e-4);
    assert!(temps.windows(2).all(|w| w[0] > w[1]));

    for value in flow.values() {
        assert!(value.is_finite());
        assert!(value >= 0.0);
    }
}

#[test]
fn neff_of_late_time_distribution_is_positive() {
    let model = distorted_model();
    let grid = MomentumGrid::standard();
    assert_eq!(grid.len(), X_POINTS);

    let f = distribution_on_grid(&model, &grid, 1e-4).unwrap();
    let neff = delta_neff(&grid, &f, 1.0).unwrap();
    assert!(neff.is_finite());
    assert!(neff > 0.0);

    // The distortion suppresses the occupation, so the thermal value bounds it.
    let thermal = distribution_on_grid(&DistributionModel::thermal(), &grid, 1e-4).unwrap();
    assert!(neff < delta_neff(&grid, &thermal, 1.0).unwrap());
}

#[test]
fn unknown_lepton_name_is_rejected() {
    let constants = PhysicalConstants::default();
    let model = distorted_model();
    let integrals = CollisionIntegrals::new(&constants, &model).unwrap();

    let err = integrals.rate_leptonic_by_name(1.0, 1.0, "neutrino").unwrap_err();
    assert!(matches!(err, KineticsError::UnknownChannel(_)));
    assert!(integrals.rate_leptonic_by_name(1.0, 1.0, "muon").unwrap() > 0.0);
}
