//! Waveform tests for pulse-driver
//! These tests run on x86 host with std, driving the simulated timer tick by
//! tick and invoking the controller's handler whenever the interrupt asserts.

use pulse_driver::sim::SimTimer;
use pulse_driver::{
    CompareChannel, CompareTimer, ConfigError, CycleConfig, DutyCycle, Error, Level, OutputLine,
    RequestedThreshold, WaveformTimer, DUTY_OFF,
};

fn bring_up(requested: &RequestedThreshold) -> (WaveformTimer<'_, SimTimer>, DutyCycle<'_>) {
    pulse_driver::initialize(
        SimTimer::new(),
        CycleConfig::STANDARD,
        requested,
        OutputLine(8),
    )
    .unwrap()
}

/// Step the simulation, servicing the compare interrupt like the vector
/// table would
fn run(timer: &mut WaveformTimer<SimTimer>, ticks: u32) {
    for _ in 0..ticks {
        if timer.hardware_mut().tick() {
            timer.on_compare_match().unwrap();
        }
    }
}

fn active_threshold(timer: &WaveformTimer<SimTimer>) -> u32 {
    timer.hardware().compare(CompareChannel::Ch0)
}

/// High-time of each completed pulse, from the simulator's toggle log
fn pulse_widths(timer: &WaveformTimer<SimTimer>) -> Vec<u64> {
    let mut widths = Vec::new();
    let mut rise_at = 0u64;
    for record in timer.hardware().toggles.iter() {
        match record.level {
            Level::Low => widths.push(record.at - rise_at),
            Level::High => rise_at = record.at,
        }
    }
    widths
}

/// Counter values at which the duty compare register was rewritten
fn duty_write_counters(timer: &WaveformTimer<SimTimer>) -> Vec<u32> {
    timer
        .hardware()
        .writes
        .iter()
        .filter(|w| w.channel == CompareChannel::Ch0)
        .map(|w| w.counter)
        .collect()
}

#[test]
fn test_startup_at_minimum_duty() {
    let requested = RequestedThreshold::new(77);
    let (mut timer, _duty) = bring_up(&requested);

    // Bring-up discards any earlier request and seeds the minimum
    assert_eq!(requested.load(), 10);
    assert_eq!(active_threshold(&timer), 10);
    assert_eq!(timer.hardware().level(), Level::High);
    assert_eq!(timer.hardware().prescaler(), 4);

    run(&mut timer, 200);
    assert_eq!(pulse_widths(&timer), vec![10]);
    assert_eq!(timer.hardware().level(), Level::High);
}

#[test]
fn test_in_range_request_applies_within_one_cycle() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = bring_up(&requested);

    run(&mut timer, 5);
    duty.set(100);
    run(&mut timer, 395);

    assert_eq!(active_threshold(&timer), 100);
    assert_eq!(pulse_widths(&timer), vec![10, 100]);
}

#[test]
fn test_out_of_range_requests_fall_back_to_minimum() {
    for request in [9, 127, 0, u32::MAX, DUTY_OFF] {
        let requested = RequestedThreshold::new(0);
        let (mut timer, duty) = bring_up(&requested);

        run(&mut timer, 5);
        duty.set(request);
        run(&mut timer, 395);

        assert_eq!(active_threshold(&timer), 10, "request {}", request);
        assert_eq!(pulse_widths(&timer), vec![10, 10], "request {}", request);
    }
}

#[test]
fn test_repeated_requests_are_idempotent() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = bring_up(&requested);

    run(&mut timer, 5);
    duty.set(90);
    duty.set(90);
    duty.set(90);
    run(&mut timer, 595);

    assert_eq!(active_threshold(&timer), 90);
    assert_eq!(pulse_widths(&timer), vec![10, 90, 90]);
}

#[test]
fn test_last_request_before_safe_point_wins() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = bring_up(&requested);

    run(&mut timer, 5);
    duty.set(40);
    run(&mut timer, 95);
    duty.set(90);
    run(&mut timer, 300);

    assert_eq!(active_threshold(&timer), 90);
    assert_eq!(pulse_widths(&timer), vec![10, 90]);
}

#[test]
fn test_request_mid_pulse_does_not_tear() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = bring_up(&requested);

    // Request lands while the first pulse is still high; that pulse must
    // keep its width, and the change must land at the safe point only
    run(&mut timer, 3);
    duty.set(126);
    run(&mut timer, 397);

    assert_eq!(pulse_widths(&timer), vec![10, 126]);
    for counter in duty_write_counters(&timer) {
        assert_eq!(counter, 180);
    }
}

#[test]
fn test_boundary_sequence_over_consecutive_cycles() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = bring_up(&requested);

    run(&mut timer, 20);
    duty.set(10);
    run(&mut timer, 200);
    duty.set(126);
    run(&mut timer, 200);
    duty.set(10);
    run(&mut timer, 380);

    // Requests [10, 126, 10] show up as exactly that threshold sequence
    let widths = pulse_widths(&timer);
    assert_eq!(widths, vec![10, 10, 126, 10]);
    for counter in duty_write_counters(&timer) {
        assert_eq!(counter, 180);
    }
}

#[test]
fn test_spurious_handler_invocation_changes_nothing() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = bring_up(&requested);

    duty.set(126);
    // No safe-update event is pending; the handler must not apply anything
    timer.on_compare_match().unwrap();
    assert_eq!(active_threshold(&timer), 10);
}

#[test]
fn test_wide_preset_reaches_maximum() {
    let requested = RequestedThreshold::new(0);
    let (mut timer, duty) = pulse_driver::initialize(
        SimTimer::new(),
        CycleConfig::WIDE,
        &requested,
        OutputLine(8),
    )
    .unwrap();

    run(&mut timer, 5);
    duty.set(250);
    run(&mut timer, 507);

    assert_eq!(active_threshold(&timer), 250);
    assert_eq!(pulse_widths(&timer), vec![32, 250]);
}

#[test]
fn test_misordered_configuration_never_starts() {
    let requested = RequestedThreshold::new(0);
    let result = pulse_driver::initialize(
        SimTimer::new(),
        CycleConfig::new(10, 126, 90, 200, 4),
        &requested,
        OutputLine(8),
    );
    assert!(matches!(
        result.map(|_| ()),
        Err(Error::Config(ConfigError::BoundaryOrdering))
    ));

    let result = pulse_driver::initialize(
        SimTimer::new(),
        CycleConfig::new(0, 126, 180, 200, 4),
        &requested,
        OutputLine(8),
    );
    assert!(matches!(
        result.map(|_| ()),
        Err(Error::Config(ConfigError::ZeroLowBound))
    ));
}
