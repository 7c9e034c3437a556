//! Formatted terminal output.
//!
//! Formatting lives in one place so:
//! - the numerical modules stay free of presentation code
//! - output changes are localized

pub mod format;

pub use format::*;
