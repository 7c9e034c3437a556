//! Read/write flow JSON files.
//!
//! Flow JSON is the portable representation of a sweep:
//! - the configuration it was produced with
//! - the descending temperature grid
//! - one rate sample per temperature (converged value or failure reason)
//!
//! The schema is defined by `FlowFile`.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FlowResult, KineticConfig};
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowFile {
    pub tool: String,
    pub config: KineticConfig,
    pub flow: FlowResult,
}

/// Write a flow JSON file.
pub fn write_flow_json(path: &Path, flow: &FlowResult, config: &KineticConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create flow JSON '{}': {e}", path.display())))?;

    let doc = FlowFile {
        tool: "alp".to_string(),
        config: config.clone(),
        flow: flow.clone(),
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::new(2, format!("Failed to write flow JSON: {e}")))?;

    Ok(())
}

/// Read a flow JSON file.
pub fn read_flow_json(path: &Path) -> Result<FlowFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open flow JSON '{}': {e}", path.display())))?;
    let doc: FlowFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid flow JSON: {e}")))?;
    if doc.flow.samples.len() != doc.flow.temperatures.len() {
        return Err(AppError::new(
            2,
            format!(
                "Invalid flow JSON: {} samples for {} temperatures.",
                doc.flow.samples.len(),
                doc.flow.temperatures.len()
            ),
        ));
    }
    Ok(doc)
}
