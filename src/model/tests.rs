use super::*;

fn sample_trial() -> Trial {
    let mut trial = Trial::new("2022.03", "test trial");
    trial.devices.push(Device::new(Id::new("DEV"), "D1", "Model", "fw 1.0"));

    let waveform = Waveform::from_physical(
        vec![-80.0, 20.0, -80.0],
        "mV",
        Quantity::new(0.0, "ms"),
        Quantity::new(1.0, "ms"),
        ResultType::Voltage,
    );
    trial
        .protocols
        .push(Protocol::voltage(Id::new("PV-1"), "Step", waveform));

    let liquid = Liquid::new(Id::new("L-1"), "Cisapride");
    trial.liquids.push(liquid.clone());
    trial.protocols.push(Protocol::liquid(
        Id::new("P-1"),
        "Cisapride 0.1 uM",
        LiquidProtocol::new(liquid, 0.1, "uM"),
    ));
    trial
}

#[test]
fn test_id_composite_and_concatenated() {
    let plain = Id::new("EXP1");
    assert_eq!(plain.composite(), "EXP1");
    assert_eq!(plain.to_string(), "EXP1");

    let qualified = Id::with_extension("EXP1", "A");
    assert_eq!(qualified.composite(), "EXP1_A");
    assert_eq!(qualified.concatenated(), "EXP1A");
}

#[test]
fn test_trial_lookups() {
    let trial = sample_trial();

    assert!(trial.device(&Id::new("DEV")).is_some());
    assert!(trial.device(&Id::new("NOPE")).is_none());

    let protocol = trial.protocol(&Id::new("P-1")).unwrap();
    assert_eq!(protocol.protocol_type(), ProtocolType::Liquid);
    assert_eq!(protocol.as_liquid().unwrap().liquid.name, "Cisapride");
    assert!(protocol.as_voltage().is_none());

    let ivp = trial.intended_voltage_protocol().unwrap();
    assert_eq!(ivp.id, Id::new("PV-1"));
    assert_eq!(ivp.protocol_type(), ProtocolType::Voltage);
}

#[test]
fn test_cloned_trial_is_independent() {
    let original = sample_trial();
    let mut copy = original.clone();
    copy.liquids[0].name = "Changed".to_string();
    copy.devices.clear();

    assert_eq!(original.liquids[0].name, "Cisapride");
    assert_eq!(original.devices.len(), 1);
}

#[test]
fn test_leak_method_names() {
    assert_eq!(LeakMethod::None.as_ted_str(), "CIPA_LEAK_METHOD_NONE");
    assert_eq!(
        LeakMethod::from_ted_str("CIPA_LEAK_METHOD_SMALL_PULSE"),
        Some(LeakMethod::SmallPulse)
    );
    assert_eq!(LeakMethod::from_ted_str("sweep"), Some(LeakMethod::Sweep));
    assert_eq!(LeakMethod::from_ted_str("bogus"), None);
}

#[test]
fn test_result_type_names() {
    assert_eq!(ResultType::Current.as_ted_str(), "CIPA_RESULT_TYPE_CURRENT");
    assert_eq!(
        ResultType::from_ted_str("CIPA_RESULT_TYPE_CURRENT"),
        Some(ResultType::Current)
    );
    assert_eq!(ResultType::from_ted_str("voltage"), Some(ResultType::Voltage));
    assert_eq!(ResultType::from_signal_kind("current"), ResultType::Current);
    assert_eq!(ResultType::from_signal_kind("RESISTANCE"), ResultType::Unknown);
}

#[test]
fn test_concentration_and_cursor_types() {
    assert_eq!(ConcentrationType::Nominal.as_ted_str(), "NOMINAL");
    assert_eq!(
        ConcentrationType::from_ted_str("measured"),
        Some(ConcentrationType::Measured)
    );
    assert_eq!(ConcentrationType::from_ted_str("guess"), None);

    assert_eq!(CursorType::from_ted_str("Average"), Some(CursorType::Average));
    assert_eq!(CursorType::Minimum.as_ted_str(), "MINIMUM");
}

#[test]
fn test_property_type_from_code() {
    assert_eq!(PropertyType::from_code("Cm"), PropertyType::MembraneCapacitance);
    assert_eq!(PropertyType::from_code("Rseal"), PropertyType::SealResistance);
    assert_eq!(PropertyType::from_code("XYZ"), PropertyType::Unknown);

    let p = Property::new("Rs", "Series resistance", "5.2", "MOhm");
    assert_eq!(p.property_type, PropertyType::SeriesResistance);
}

#[test]
fn test_waveform_column_names() {
    let mut trace = Waveform::from_physical(
        vec![1.0, 2.0],
        "pA",
        Quantity::new(0.0, "ms"),
        Quantity::new(0.1, "ms"),
        ResultType::Current,
    );
    trace.trace_number = Some(12);
    assert_eq!(trace.column_name(), "Trace_#12_CURRENT_pA");

    let mut command = Waveform::from_physical(
        vec![-80.0],
        "mV",
        Quantity::new(0.0, "ms"),
        Quantity::new(0.1, "ms"),
        ResultType::Voltage,
    );
    assert_eq!(command.column_name(), "voltage_mV");
    command.signal_name = "Vcmd".to_string();
    assert_eq!(command.column_name(), "Vcmd_mV");
}

#[test]
fn test_waveform_physical_and_time_values() {
    let waveform = Waveform {
        head: Quantity::new(5.0, "ms"),
        increment: Quantity::new(0.5, "ms"),
        origin: Quantity::new(-10.0, "pA"),
        scale: Quantity::new(2.0, "pA"),
        digits: vec![0.0, 1.0, 10.0],
        ..Default::default()
    };

    assert_eq!(waveform.len(), 3);
    assert_eq!(waveform.unit(), "pA");
    assert_eq!(waveform.physical_values(), vec![-10.0, -8.0, 10.0]);
    assert_eq!(waveform.time_values(), vec![5.0, 5.5, 6.0]);
}

#[test]
fn test_cursor_evaluation() {
    let definition = Cursor::new("Peak", 10.0, 20.0, "ms", CursorType::Maximum);
    let evaluated = definition.evaluated(CursorResult::new(-42.0, "pA"));
    assert!(definition.result.is_none());

    let mut result = TraceResult::new(
        1,
        true,
        ResultType::Current,
        0.0,
        "ms",
        Waveform::default(),
    );
    result.cursors.push(evaluated);
    assert_eq!(result.cursor_value("Peak"), Some(-42.0));
    assert_eq!(result.cursor_value("Tail"), None);
}

#[test]
fn test_trial_serializes_to_json() {
    let mut trial = sample_trial();
    trial.ljp = LiquidJunctionPotential::new(-8.0, "mV", LjpReportedVoltage::Vcell);
    let json = serde_json::to_string(&trial).unwrap();
    let back: Trial = serde_json::from_str(&json).unwrap();
    assert_eq!(back.protocols, trial.protocols);
    assert_eq!(back.devices, trial.devices);
    assert_eq!(back.ljp, trial.ljp);
}
