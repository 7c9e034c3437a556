//! Adaptive Gauss–Kronrod quadrature.
//!
//! Each panel is evaluated with the 15-point Kronrod rule; the embedded 7-point
//! Gauss rule gives the local error estimate `|K15 - G7|`. The panel with the
//! largest error is bisected until the summed error satisfies
//! `err <= max(abs_tol, rel_tol * |I|)`.
//!
//! The integrand is called once per node and must be finite everywhere on
//! `[a, b]`; a non-finite sample aborts the integration with
//! [`QuadratureError::NonFinite`].

use thiserror::Error;

/// Kronrod abscissae on `[-1, 1]` (non-negative half, descending).
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod weights matching `XGK`.
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss weights for the odd-indexed Kronrod nodes `XGK[1], XGK[3], XGK[5], XGK[7]`.
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuadratureError {
    #[error("invalid interval [{a}, {b}]")]
    InvalidInterval { a: f64, b: f64 },

    #[error("integrand is not finite at x={x}")]
    NonFinite { x: f64 },

    #[error("no convergence after {limit} subdivisions (error estimate {error_estimate:e}, value {value:e})")]
    MaxSubdivisions {
        limit: usize,
        value: f64,
        error_estimate: f64,
    },
}

/// Tolerances and limits for [`integrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureOptions {
    pub rel_tol: f64,
    pub abs_tol: f64,
    pub max_subdivisions: usize,
}

impl Default for QuadratureOptions {
    fn default() -> Self {
        Self {
            rel_tol: 1e-8,
            abs_tol: 0.0,
            max_subdivisions: 200,
        }
    }
}

/// Integral value plus diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadratureEstimate {
    pub value: f64,
    pub error_estimate: f64,
    pub evaluations: usize,
    pub subintervals: usize,
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Integrate `f` over `[a, b]` adaptively.
pub fn integrate<F>(f: F, a: f64, b: f64, opts: &QuadratureOptions) -> Result<QuadratureEstimate, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite() && b > a) {
        return Err(QuadratureError::InvalidInterval { a, b });
    }

    let mut evaluations = 0usize;
    let first = kronrod_panel(&f, a, b, &mut evaluations)?;
    let mut panels = vec![first];
    let mut value = first.value;
    let mut error = first.error;

    loop {
        let target = opts.abs_tol.max(opts.rel_tol * value.abs());
        // Once the estimate sits at rounding level there is nothing left to refine.
        let roundoff = 50.0 * f64::EPSILON * value.abs();
        if error <= target || error <= roundoff {
            break;
        }
        if panels.len() >= opts.max_subdivisions {
            return Err(QuadratureError::MaxSubdivisions {
                limit: opts.max_subdivisions,
                value,
                error_estimate: error,
            });
        }

        let worst = worst_panel(&panels);
        let panel = panels.swap_remove(worst);
        let mid = 0.5 * (panel.a + panel.b);
        let left = kronrod_panel(&f, panel.a, mid, &mut evaluations)?;
        let right = kronrod_panel(&f, mid, panel.b, &mut evaluations)?;
        panels.push(left);
        panels.push(right);

        // Re-sum rather than update incrementally to avoid drift.
        value = panels.iter().map(|p| p.value).sum();
        error = panels.iter().map(|p| p.error).sum();
    }

    Ok(QuadratureEstimate {
        value,
        error_estimate: error,
        evaluations,
        subintervals: panels.len(),
    })
}

fn worst_panel(panels: &[Panel]) -> usize {
    let mut worst = 0;
    for (i, p) in panels.iter().enumerate().skip(1) {
        if p.error > panels[worst].error {
            worst = i;
        }
    }
    worst
}

fn kronrod_panel<F>(f: &F, a: f64, b: f64, evaluations: &mut usize) -> Result<Panel, QuadratureError>
where
    F: Fn(f64) -> f64,
{
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let sample = |x: f64, evaluations: &mut usize| -> Result<f64, QuadratureError> {
        *evaluations += 1;
        let y = f(x);
        if y.is_finite() {
            Ok(y)
        } else {
            Err(QuadratureError::NonFinite { x })
        }
    };

    let f_center = sample(center, evaluations)?;
    let mut kronrod = WGK[7] * f_center;
    let mut gauss = WG[3] * f_center;

    for j in 0..7 {
        let dx = half * XGK[j];
        let f_sum = sample(center - dx, evaluations)? + sample(center + dx, evaluations)?;
        kronrod += WGK[j] * f_sum;
        if j % 2 == 1 {
            gauss += WG[j / 2] * f_sum;
        }
    }

    Ok(Panel {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polynomial_is_exact_on_one_panel() {
        let est = integrate(|x| 3.0 * x * x, 0.0, 2.0, &QuadratureOptions::default()).unwrap();
        assert!((est.value - 8.0).abs() < 1e-12);
        assert_eq!(est.subintervals, 1);
        assert_eq!(est.evaluations, 15);
    }

    #[test]
    fn fermi_dirac_moment_matches_closed_form() {
        // ∫_0^∞ x^3/(e^x+1) dx = 7π^4/120; the tail beyond 60 is negligible.
        let exact = 7.0 * std::f64::consts::PI.powi(4) / 120.0;
        let est = integrate(|x| x.powi(3) / (x.exp() + 1.0), 0.0, 60.0, &QuadratureOptions::default()).unwrap();
        assert!(((est.value - exact) / exact).abs() < 1e-8, "got {}", est.value);
    }

    #[test]
    fn peaked_integrand_refines() {
        let est = integrate(|x| 1.0 / (1e-4 + x * x), -1.0, 1.0, &QuadratureOptions::default()).unwrap();
        let exact = 2.0 * (1.0_f64 / 1e-2).atan() / 1e-2;
        assert!(((est.value - exact) / exact).abs() < 1e-7);
        assert!(est.subintervals > 1);
    }

    #[test]
    fn non_finite_integrand_is_reported() {
        let err = integrate(|x| if x > 0.5 { f64::NAN } else { x }, 0.0, 1.0, &QuadratureOptions::default())
            .unwrap_err();
        assert!(matches!(err, QuadratureError::NonFinite { .. }));
    }

    #[test]
    fn subdivision_limit_is_reported() {
        let opts = QuadratureOptions {
            rel_tol: 1e-14,
            abs_tol: 0.0,
            max_subdivisions: 2,
        };
        let err = integrate(|x| x.abs().sqrt(), -1.0, 1.0, &opts).unwrap_err();
        assert!(matches!(err, QuadratureError::MaxSubdivisions { limit: 2, .. }));
    }

    #[test]
    fn inverted_interval_is_rejected() {
        assert_eq!(
            integrate(|x| x, 1.0, 0.0, &QuadratureOptions::default()).unwrap_err(),
            QuadratureError::InvalidInterval { a: 1.0, b: 0.0 }
        );
    }
}
