//! Numerical utilities: grids, special functions, quadrature.

pub mod grid;
pub mod quadrature;
pub mod special;
pub mod trapezoid;

pub use grid::log_space;
pub use quadrature::{QuadratureError, QuadratureEstimate, QuadratureOptions, integrate};
pub use special::{ZETA_3, riemann_zeta};
pub use trapezoid::trapz;
