//! Input/output helpers.
//!
//! - plain-text research log (`export`)
//! - flow JSON read/write (`flow`)

pub mod export;
pub mod flow;

pub use export::*;
pub use flow::*;
