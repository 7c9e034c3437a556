//! Export a plain-text research log.
//!
//! The log records when the run happened, the coupling bounds it used and the
//! terminal summary, so it can be archived next to the flow JSON.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::domain::Channel;
use crate::error::AppError;

/// Write the research log for a finished run.
pub fn write_research_log(path: &Path, run: &RunOutput, summary: &str) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create research log '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    let write_err = |e: std::io::Error| AppError::new(2, format!("Failed to write research log: {e}"));

    let rule = "-".repeat(61);
    writeln!(out, "ALP kinetic production log").map_err(write_err)?;
    writeln!(out, "{rule}").map_err(write_err)?;
    writeln!(out, "Generated : {}", Local::now().to_rfc3339()).map_err(write_err)?;
    writeln!(
        out,
        "Bounds    : fa_e > {:e} GeV | ga_gamma < {:e} GeV^-1",
        run.constants.coupling_bound(Channel::Electron),
        run.constants.coupling_bound(Channel::Photon)
    )
    .map_err(write_err)?;
    writeln!(
        out,
        "Flow      : {} temperatures, {} failed",
        run.flow.len(),
        run.flow.failed_indices().len()
    )
    .map_err(write_err)?;
    writeln!(out, "{rule}").map_err(write_err)?;
    write!(out, "{summary}").map_err(write_err)?;

    out.flush().map_err(write_err)?;
    Ok(())
}
