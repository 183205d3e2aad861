//! Deterministic synthetic hERG assays
//!
//! Used by the `demo` command, the integration tests and the benchmarks. The
//! generated trial has one control addition followed by one addition per
//! requested concentration, with current traces whose amplitude drops as the
//! concentration rises.

use crate::model::*;
use crate::schema::TED_FORMAT_VERSION;

const HOLDING_MV: f64 = -80.0;
const STEP_MV: f64 = 20.0;
const IC50_UM: f64 = 0.5;

/// Parameters of a synthetic trial
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticTrial {
    /// Number of experiments (one cell each)
    pub experiments: usize,

    /// Current traces recorded per experiment
    pub traces_per_experiment: u32,

    /// Samples per trace
    pub samples_per_trace: usize,

    /// Sampling period in ms
    pub sampling_interval_ms: f64,

    /// Time between consecutive traces in s
    pub trace_interval_s: f64,

    /// Drug concentrations in uM, applied in order after the control
    pub concentrations_um: Vec<f64>,
}

impl Default for SyntheticTrial {
    fn default() -> Self {
        Self {
            experiments: 2,
            traces_per_experiment: 12,
            samples_per_trace: 200,
            sampling_interval_ms: 0.5,
            trace_interval_s: 1.0,
            concentrations_um: vec![0.1, 1.0],
        }
    }
}

impl SyntheticTrial {
    /// Generate the trial
    pub fn build(&self) -> Trial {
        let mut trial = Trial::new(TED_FORMAT_VERSION, "Synthetic hERG assay");
        trial.study = Study {
            study_id: "SYN-HERG-001".to_string(),
            report: StudyReport::new(
                "Synthetic hERG block study",
                "1",
                "2022-03-01",
                "Generated dataset for format testing",
            ),
        };

        let mut device = Device::new(Id::new("QP-01"), "QPATCH", "QPatch 48", "Assay Software 6.0");
        device.cod_software_name = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let device_id = device.id.clone();
        trial.devices.push(device);
        trial.ljp = LiquidJunctionPotential::new(-8.8, "mV", LjpReportedVoltage::Vclamp);

        let command = self.voltage_command();
        let voltage_id = Id::new("PV-1");
        let duration = (command.len().saturating_sub(1)) as f64 * self.sampling_interval_ms;
        trial
            .protocols
            .push(Protocol::voltage(voltage_id.clone(), "Step-ramp", command).with_duration(duration, "ms"));

        let control = Liquid::new(Id::new("L-0"), "Control");
        let drug = Liquid::new(Id::new("L-1"), "Cisapride");
        trial.liquids.push(control.clone());
        trial.liquids.push(drug.clone());

        let mut additions = Vec::new();
        let mut control_protocol = LiquidProtocol::new(control, 0.0, "uM");
        control_protocol.concentration_type = ConcentrationType::Nominal;
        control_protocol.is_control = true;
        additions.push((Id::new("P-0"), 0.0));
        trial
            .protocols
            .push(Protocol::liquid(Id::new("P-0"), "Control", control_protocol));

        for (i, conc) in self.concentrations_um.iter().enumerate() {
            let id = Id::new(format!("P-{}", i + 1));
            let mut protocol = LiquidProtocol::new(drug.clone(), *conc, "uM");
            protocol.concentration_type = ConcentrationType::Nominal;
            trial.protocols.push(Protocol::liquid(
                id.clone(),
                format!("Cisapride {} uM", conc),
                protocol,
            ));
            additions.push((id, *conc));
        }

        // Windows scale with the trace: baseline before the step, peak at its end
        let trace_ms = self.samples_per_trace as f64 * self.sampling_interval_ms;
        let cursors = vec![
            Cursor::new("Peak", 0.6 * trace_ms, 0.74 * trace_ms, "ms", CursorType::Minimum),
            Cursor::new("Baseline", 0.01 * trace_ms, 0.2 * trace_ms, "ms", CursorType::Average),
        ];

        for e in 0..self.experiments {
            trial
                .experiments
                .push(self.experiment(e, &device_id, &voltage_id, &additions, &cursors));
        }

        trial
    }

    fn experiment(
        &self,
        index: usize,
        device: &Id,
        voltage: &Id,
        additions: &[(Id, f64)],
        cursors: &[Cursor],
    ) -> Experiment {
        let mut experiment = Experiment::new(
            Id::new(format!("EXP{:03}", index + 1)),
            device.clone(),
            format!("2022-03-01T{:02}:00:00", 9 + index % 10),
        );
        experiment.name = format!("Synthetic experiment {}", index + 1);

        let cell = Cell::new(
            Id::new(format!("CELL{:03}", index + 1)),
            vec![
                Property::new("Cm", "Membrane capacitance", format!("{}", 15 + index % 5), "pF"),
                Property::new("Rs", "Series resistance", "4.5", "MOhm"),
                Property::new("Rseal", "Seal resistance", "1200", "MOhm"),
            ],
        );
        let mut results = Results::new(cell, PatchType::Single, LeakMethod::SmallPulse);
        results.lab = "Synthetic lab".to_string();
        results.cursors = cursors.to_vec();

        let traces = self.traces_per_experiment.max(1);
        let per_addition = (traces as usize / additions.len().max(1)).max(1);
        let cell_scale = 1.0 + index as f64 * 0.1;

        for n in 1..=traces {
            let elapsed_s = f64::from(n - 1) * self.trace_interval_s;
            let addition = ((n as usize - 1) / per_addition).min(additions.len().saturating_sub(1));
            if (n as usize - 1) % per_addition == 0 && (n as usize - 1) / per_addition < additions.len() {
                experiment
                    .protocols
                    .push(ProtocolExecution::new(additions[addition].0.clone(), elapsed_s, "s"));
            }
            experiment
                .protocols
                .push(ProtocolExecution::new(voltage.clone(), elapsed_s, "s"));

            let concentration = additions.get(addition).map_or(0.0, |a| a.1);
            let waveform = self.current_trace(n, concentration, cell_scale);
            let mut result = TraceResult::new(n, n % 7 != 0, ResultType::Current, elapsed_s, "s", waveform);
            result.cursors = cursors
                .iter()
                .map(|c| {
                    let value = evaluate_cursor(&result.waveform, c);
                    c.evaluated(CursorResult::new(value, "pA"))
                })
                .collect();
            results.results.push(result);
        }

        experiment.results_sets.push(results);
        experiment
    }

    fn voltage_command(&self) -> Waveform {
        let n = self.samples_per_trace;
        let values = (0..n)
            .map(|i| {
                if i < n / 4 || i >= 3 * n / 4 {
                    HOLDING_MV
                } else {
                    STEP_MV
                }
            })
            .collect();
        let mut waveform = Waveform::from_physical(
            values,
            "mV",
            Quantity::new(0.0, "ms"),
            Quantity::new(self.sampling_interval_ms, "ms"),
            ResultType::Voltage,
        );
        waveform.sequence_type = SequenceType::Reconstructed;
        waveform.signal_name = "voltage".to_string();
        waveform.display_name = "Step voltage command".to_string();
        waveform
    }

    fn current_trace(&self, trace_number: u32, concentration: f64, cell_scale: f64) -> Waveform {
        let n = self.samples_per_trace;
        let block = 1.0 / (1.0 + concentration / IC50_UM);
        let amplitude = -120.0 * block * cell_scale;
        let tau = (n as f64 / 12.0).max(1.0);
        let values = (0..n)
            .map(|i| {
                let noise = ((i as f64 * 0.7 + f64::from(trace_number)).sin()) * 0.5;
                if i >= n / 4 && i < 3 * n / 4 {
                    let t = (i - n / 4) as f64;
                    amplitude * (1.0 - (-t / tau).exp()) + noise
                } else {
                    noise
                }
            })
            .collect();

        let mut waveform = Waveform::from_physical(
            values,
            "pA",
            Quantity::new(0.0, "ms"),
            Quantity::new(self.sampling_interval_ms, "ms"),
            ResultType::Current,
        );
        waveform.trace_number = Some(trace_number);
        waveform.signal_name = "CURRENT".to_string();
        waveform.display_name = "CURRENT".to_string();
        waveform
    }
}

/// Evaluate a cursor window on a waveform; NaN when the window holds no sample
pub fn evaluate_cursor(waveform: &Waveform, cursor: &Cursor) -> f64 {
    let window: Vec<f64> = waveform
        .time_values()
        .into_iter()
        .zip(waveform.physical_values())
        .filter(|(t, _)| *t >= cursor.start && *t <= cursor.end)
        .map(|(_, v)| v)
        .collect();
    if window.is_empty() {
        return f64::NAN;
    }

    match cursor.cursor_type {
        Some(CursorType::Maximum) => window.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        Some(CursorType::Minimum) => window.iter().copied().fold(f64::INFINITY, f64::min),
        _ => window.iter().sum::<f64>() / window.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_trial_shape() {
        let params = SyntheticTrial::default();
        let trial = params.build();

        assert_eq!(trial.experiments.len(), 2);
        assert_eq!(trial.trace_count(), 24);
        assert_eq!(trial.liquids.len(), 2);
        assert_eq!(trial.protocols.len(), 4);
        assert!(trial.intended_voltage_protocol().is_some());

        let experiment = &trial.experiments[0];
        let liquid_events = experiment
            .protocols
            .iter()
            .filter(|p| trial.protocol(&p.protocol).and_then(|p| p.as_liquid()).is_some())
            .count();
        assert_eq!(liquid_events, 3);
    }

    #[test]
    fn test_block_reduces_peak() {
        let trial = SyntheticTrial::default().build();
        let results = &trial.experiments[0].results_sets[0].results;
        let control_peak = results[0].cursor_value("Peak").unwrap();
        let drug_peak = results.last().unwrap().cursor_value("Peak").unwrap();
        assert!(control_peak < drug_peak);
    }

    #[test]
    fn test_evaluate_cursor_modes() {
        let waveform = Waveform::from_physical(
            vec![1.0, 5.0, 3.0, 9.0],
            "pA",
            Quantity::new(0.0, "ms"),
            Quantity::new(1.0, "ms"),
            ResultType::Current,
        );
        let max = Cursor::new("max", 0.0, 2.0, "ms", CursorType::Maximum);
        let min = Cursor::new("min", 1.0, 3.0, "ms", CursorType::Minimum);
        let avg = Cursor::new("avg", 0.0, 3.0, "ms", CursorType::Average);
        let empty = Cursor::new("none", 10.0, 20.0, "ms", CursorType::Average);

        assert_eq!(evaluate_cursor(&waveform, &max), 5.0);
        assert_eq!(evaluate_cursor(&waveform, &min), 3.0);
        assert_eq!(evaluate_cursor(&waveform, &avg), 4.5);
        assert!(evaluate_cursor(&waveform, &empty).is_nan());
    }
}
