use alp_kinetics::collision::CollisionIntegrals;
use alp_kinetics::constants::PhysicalConstants;
use alp_kinetics::distribution::{DistributionModel, fermi_dirac};
use alp_kinetics::domain::DistortionConfig;
use proptest::prelude::*;

proptest! {
    #[test]
    fn occupations_stay_in_unit_interval(x in 1e-3f64..20.0, log_t in -4.0f64..6.0, rank in 1u32..200) {
        let t = 10f64.powf(log_t);
        let fd = fermi_dirac(x);
        prop_assert!(fd > 0.0 && fd < 1.0);

        let model = DistributionModel::new(DistortionConfig { enabled: true, rank }).unwrap();
        // Past ~709 the exponential overflows and the occupation is exactly 0.
        prop_assume!(x + model.distortion(x, t) < 700.0);
        let f = model.occupation(x, t);
        prop_assert!(f > 0.0 && f < 1.0);
        prop_assert!(f <= fd);
    }

    #[test]
    fn overflowing_exponent_gives_zero_not_nan(x in 1e-3f64..1e3, log_t in -4.0f64..6.0, rank in 2u32..200) {
        let model = DistributionModel::new(DistortionConfig { enabled: true, rank }).unwrap();
        let f = model.occupation(x, 10f64.powf(log_t));
        prop_assert!(!f.is_nan());
        prop_assert!((0.0..1.0).contains(&f));
    }

    #[test]
    fn disabled_model_is_fermi_dirac(x in 1e-3f64..50.0, t in 1e-4f64..1e4) {
        let model = DistributionModel::new(DistortionConfig { enabled: false, rank: 39 }).unwrap();
        prop_assert_eq!(model.occupation(x, t), fermi_dirac(x));
    }

    #[test]
    fn primakoff_rate_is_non_negative(x in 1e-3f64..20.0, log_t in -4.0f64..3.0) {
        let constants = PhysicalConstants::default();
        let model = DistributionModel::new(DistortionConfig::default()).unwrap();
        let integrals = CollisionIntegrals::new(&constants, &model).unwrap();
        let rate = integrals.rate_primakoff(x, 10f64.powf(log_t)).unwrap();
        prop_assert!(rate.is_finite());
        prop_assert!(rate >= 0.0);
    }
}
