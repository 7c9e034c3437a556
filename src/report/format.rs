use crate::app::pipeline::{NeffOutput, RunOutput};
use crate::constants::PhysicalConstants;
use crate::domain::{Channel, FlowResult, RateSample};
use crate::forecast::CredibleInterval;

/// Format the full run summary (configuration, flow, ΔNeff, forecast).
pub fn format_run_summary(run: &RunOutput) -> String {
    let config = &run.settings.kinetic;
    let mut out = String::new();

    out.push_str("=== alp - ALP kinetic production ===\n");
    out.push_str(&format!("Channel: {}\n", run.flow.channel));
    out.push_str(&format!(
        "Temperatures: {:e} -> {:e} GeV ({} steps)\n",
        config.t_start, config.t_end, config.temperature_steps
    ));
    if config.distortion_enabled {
        out.push_str(&format!("Distribution: distorted (rank {})\n", config.rank));
    } else {
        out.push_str("Distribution: Fermi-Dirac\n");
    }

    let failed = run.flow.failed_indices();
    out.push_str(&format!(
        "Flow: {} converged, {} failed\n",
        run.flow.len() - failed.len(),
        failed.len()
    ));
    if let Some((t, v)) = run.flow.converged().next() {
        out.push_str(&format!("  first: T={t:.4e} GeV  rate={v:.6e}\n"));
    }
    if let Some((t, v)) = run.flow.converged().last() {
        out.push_str(&format!("  last : T={t:.4e} GeV  rate={v:.6e}\n"));
    }
    out.push_str(&format!("UV distortion magnitude: {:.6e}\n", run.uv_distortion));
    out.push_str(&format_neff(&run.neff));

    if let Some(ci) = &run.forecast {
        out.push_str(&format_forecast(ci));
    }

    out
}

pub fn format_neff(neff: &NeffOutput) -> String {
    format!(
        "dNeff = {:.6} (distribution at T={:.4e} GeV, T_ref={} GeV)\n",
        neff.value, neff.distribution_t, neff.t_ref
    )
}

pub fn format_forecast(ci: &CredibleInterval) -> String {
    format!(
        "Forecast 95% CL for {} ({:?}): dNeff in [{:.4}, {:.4}], dNeff < {:.4} ({} / {} accepted)\n",
        ci.survey, ci.method, ci.lower, ci.upper, ci.upper, ci.accepted, ci.proposed
    )
}

/// Per-temperature table; at most `max_rows` evenly spaced rows (0 = all).
pub fn format_flow_table(flow: &FlowResult, max_rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>5} {:>14} {:>16} {:>12}", "idx", "T [GeV]", "rate", "err"));
    out.push('\n');
    out.push_str(&format!("{:-<5} {:-<14} {:-<16} {:-<12}", "", "", "", ""));
    out.push('\n');

    let n = flow.len();
    let stride = if max_rows == 0 || n <= max_rows {
        1
    } else {
        n.div_ceil(max_rows)
    };

    for (idx, (t, sample)) in flow
        .temperatures
        .points()
        .iter()
        .zip(flow.samples.iter())
        .enumerate()
    {
        if idx % stride != 0 && idx != n - 1 {
            continue;
        }
        let line = match sample {
            RateSample::Converged { value, error_estimate } => {
                format!("{idx:>5} {t:>14.6e} {value:>16.8e} {error_estimate:>12.3e}")
            }
            RateSample::Failed { reason } => format!("{idx:>5} {t:>14.6e} {:>16} {reason}", "FAILED"),
        };
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// Coupling bounds per channel.
pub fn format_couplings(constants: &PhysicalConstants) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<10} {:>14} {:>16}", "channel", "bound", "coupling"));
    out.push('\n');
    for channel in Channel::ALL {
        let unit = match channel {
            Channel::Photon => "GeV^-1",
            _ => "GeV",
        };
        out.push_str(&format!(
            "{:<10} {:>14} {:>16.6e}",
            channel.name(),
            format!("{:.3e} {unit}", constants.coupling_bound(channel)),
            constants.coupling(channel)
        ));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RateChannel, TemperatureGrid};

    fn flow() -> FlowResult {
        FlowResult {
            channel: RateChannel::Primakoff,
            temperatures: TemperatureGrid::descending(100.0, 1.0, 3).unwrap(),
            samples: vec![
                RateSample::Converged {
                    value: 1.0e-10,
                    error_estimate: 1e-20,
                },
                RateSample::Failed {
                    reason: "forced".to_string(),
                },
                RateSample::Converged {
                    value: 1.0e-18,
                    error_estimate: 1e-28,
                },
            ],
        }
    }

    #[test]
    fn flow_table_marks_failures() {
        let table = format_flow_table(&flow(), 0);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[3].contains("FAILED"));
        assert!(lines[3].ends_with("forced"));
    }

    #[test]
    fn flow_table_thins_rows_but_keeps_last() {
        let table = format_flow_table(&flow(), 1);
        let body: Vec<&str> = table.lines().skip(2).collect();
        assert_eq!(body.len(), 2);
        assert!(body[1].trim_start().starts_with('2'));
    }

    #[test]
    fn couplings_table_lists_every_channel() {
        let table = format_couplings(&PhysicalConstants::default());
        for channel in Channel::ALL {
            assert!(table.contains(channel.name()));
        }
        assert!(table.contains("GeV^-1"));
    }
}
