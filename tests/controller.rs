//! Controller scenarios: moves, arbitration, interlock and driver supervision.

mod common;

use common::{button_panel, coarse_config, Rig, ScriptedLimit, ScriptedSensor};
use stepper_lift::config::EmergencyStopPolicy;
use stepper_lift::floor::DropReason;
use stepper_lift::{
    CalibrationState, Correction, ElevatorConfig, ElevatorState, FloorButtons, FloorId,
    HealthReport, Millimeters, MoveOutcome, RequestOutcome, Timebase,
};

// =============================================================================
// Startup
// =============================================================================

#[test]
fn requests_before_homing_are_dropped() {
    let mut rig = Rig::new(coarse_config(), ScriptedLimit::at_ground());

    assert_eq!(rig.lift.calibration(), CalibrationState::Uncalibrated);
    assert_eq!(
        rig.lift.request_floor(FloorId(1)),
        RequestOutcome::Dropped(DropReason::NotCalibrated)
    );
    assert!(rig.lift.queue().is_idle());
    assert_eq!(rig.step.rising_edges(), 0);
}

#[test]
fn homing_configures_driver_and_enables_motor() {
    let rig = Rig::homed(coarse_config());

    assert_eq!(rig.lift.calibration(), CalibrationState::Calibrated);
    assert_eq!(rig.lift.position().height(), Some(Millimeters::ZERO));
    assert!(rig.enable.is_high());

    let writes = rig.lift.driver().registers().writes();
    assert_eq!(writes.len(), 4);
    // Bounce only, the limit was already asserted.
    assert_eq!(rig.step.rising_edges(), 10);
}

// =============================================================================
// Moves
// =============================================================================

#[test]
fn move_170mm_at_350_steps_per_mm() {
    let mut rig = Rig::homed(ElevatorConfig::default());
    let before = rig.step.rising_edges();

    assert_eq!(rig.lift.request_floor(FloorId(1)), RequestOutcome::Activated);
    let report = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();

    assert_eq!(
        report.outcome,
        MoveOutcome::Arrived {
            steps: 59_500,
            correction: Correction::Theoretical
        }
    );
    assert_eq!(rig.step.rising_edges() - before, 59_500);
    assert_eq!(rig.lift.position().height(), Some(Millimeters(170)));
    assert_eq!(rig.lift.current_floor(), Some(FloorId(1)));
    assert_eq!(rig.lift.state(), ElevatorState::Idle);
}

#[test]
fn sensor_reading_within_threshold_replaces_position() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(1));

    let report = rig
        .lift
        .dispatch(&mut ScriptedSensor::reading(166))
        .unwrap()
        .unwrap();

    assert_eq!(
        report.outcome,
        MoveOutcome::Arrived {
            steps: 340,
            correction: Correction::Sensed { reading_mm: 166 }
        }
    );
    assert_eq!(rig.lift.position().height(), Some(Millimeters(166)));
}

#[test]
fn sensor_reading_far_off_is_discarded() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(1));

    let mut sensor = ScriptedSensor::reading(230);
    let report = rig.lift.dispatch(&mut sensor).unwrap().unwrap();

    assert_eq!(sensor.samples(), 1);
    assert!(matches!(
        report.outcome,
        MoveOutcome::Arrived {
            correction: Correction::Discarded { reading_mm: 230 },
            ..
        }
    ));
    assert_eq!(rig.lift.position().height(), Some(Millimeters(170)));
}

#[test]
fn direction_line_follows_travel() {
    let mut rig = Rig::homed(coarse_config());

    rig.lift.request_floor(FloorId(2));
    rig.lift.dispatch(&mut ScriptedSensor::absent()).unwrap();
    assert!(!rig.dir.is_high(), "up is DIR low");

    rig.lift.request_floor(FloorId(1));
    rig.lift.dispatch(&mut ScriptedSensor::absent()).unwrap();
    assert!(rig.dir.is_high(), "down is DIR high");
    assert_eq!(rig.lift.position().height(), Some(Millimeters(170)));
}

#[test]
fn request_within_tolerance_emits_no_pulses() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(1));
    rig.lift.dispatch(&mut ScriptedSensor::absent()).unwrap();
    let before = rig.step.rising_edges();

    assert_eq!(
        rig.lift.request_height(Millimeters(175)),
        RequestOutcome::Activated
    );
    let report = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();

    assert_eq!(report.outcome, MoveOutcome::AlreadyThere);
    assert_eq!(rig.step.rising_edges(), before);
    assert!(rig.lift.queue().is_idle());
    assert_eq!(rig.lift.position().height(), Some(Millimeters(170)));
}

#[test]
fn settle_time_follows_arrival() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(1));

    let start = rig.lift.timebase_mut().now_ms();
    rig.lift.dispatch(&mut ScriptedSensor::absent()).unwrap();
    let elapsed = rig.lift.timebase_mut().now_ms() - start;

    assert!(elapsed >= 500);
}

// =============================================================================
// Arbitration
// =============================================================================

#[test]
fn third_distinct_request_is_dropped() {
    let mut rig = Rig::homed(coarse_config());

    assert_eq!(rig.lift.request_floor(FloorId(1)), RequestOutcome::Activated);
    assert_eq!(rig.lift.request_floor(FloorId(2)), RequestOutcome::Queued);
    assert_eq!(
        rig.lift.request_floor(FloorId(0)),
        RequestOutcome::Dropped(DropReason::PendingOccupied)
    );

    assert_eq!(rig.lift.queue().len(), 2);
    assert_eq!(rig.lift.queue().active(), Some(Millimeters(170)));
    assert_eq!(rig.lift.queue().pending(), Some(Millimeters(336)));
}

#[test]
fn pending_target_is_promoted_on_arrival() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(1));
    rig.lift.request_floor(FloorId(2));

    let first = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();
    assert_eq!(first.next, Some(Millimeters(336)));
    assert_eq!(rig.lift.queue().active(), Some(Millimeters(336)));
    assert_eq!(rig.lift.queue().pending(), None);

    let second = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();
    assert_eq!(second.target, Millimeters(336));
    assert_eq!(rig.lift.position().height(), Some(Millimeters(336)));
    assert!(rig.lift.queue().is_idle());
}

#[test]
fn satisfied_request_promotes_pending() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(0));
    rig.lift.request_floor(FloorId(1));

    let report = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();

    assert_eq!(report.outcome, MoveOutcome::AlreadyThere);
    assert_eq!(report.next, Some(Millimeters(170)));
}

// =============================================================================
// Interlock
// =============================================================================

#[test]
fn ground_contact_while_descending_recalibrates() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(2));
    rig.lift.dispatch(&mut ScriptedSensor::absent()).unwrap();

    rig.lift.request_floor(FloorId(0));
    rig.lift.request_floor(FloorId(1));
    rig.lift.limit_mut().arm(100);
    let before = rig.step.rising_edges();

    let report = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();

    assert_eq!(report.outcome, MoveOutcome::Recalibrated { steps: 101 });
    // Contact steps plus the recalibration bounce, short of the 672-step move.
    assert_eq!(rig.step.rising_edges() - before, 101 + 20);
    assert!(rig.step.rising_edges() - before < 672);
    assert_eq!(rig.lift.position().height(), Some(Millimeters::ZERO));
    assert!(rig.lift.queue().is_idle());
    assert_eq!(rig.lift.state(), ElevatorState::Idle);
    assert_eq!(rig.lift.calibration(), CalibrationState::Calibrated);
}

#[test]
fn upward_trip_holds_last_position() {
    let mut rig = Rig::homed(coarse_config());
    rig.lift.request_floor(FloorId(2));
    rig.lift.request_floor(FloorId(1));
    rig.lift.limit_mut().arm(50);

    let report = rig
        .lift
        .dispatch(&mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();

    assert_eq!(report.outcome, MoveOutcome::EmergencyStop { steps: 51 });
    assert!(rig.lift.queue().is_idle());
    assert_eq!(rig.lift.position().height(), Some(Millimeters::ZERO));
    assert_eq!(rig.lift.calibration(), CalibrationState::Calibrated);
}

#[test]
fn upward_trip_with_rehome_policy_requires_homing() {
    let mut config = coarse_config();
    config.homing.emergency_stop = EmergencyStopPolicy::Rehome;
    let mut rig = Rig::homed(config);
    rig.lift.request_floor(FloorId(1));
    rig.lift.limit_mut().arm(5);

    rig.lift.dispatch(&mut ScriptedSensor::absent()).unwrap();

    assert!(!rig.lift.position().is_known());
    assert_eq!(
        rig.lift.request_floor(FloorId(0)),
        RequestOutcome::Dropped(DropReason::NotCalibrated)
    );

    rig.lift.limit_mut().arm(3);
    rig.lift.home().unwrap();
    rig.lift.limit_mut().release();
    assert_eq!(rig.lift.request_floor(FloorId(1)), RequestOutcome::Activated);
}

// =============================================================================
// Control loop
// =============================================================================

#[test]
fn poll_serves_button_press() {
    let mut rig = Rig::homed(coarse_config());
    let (pins, handles) = button_panel::<3>();
    let mut buttons = FloorButtons::new(pins, &Default::default());

    handles[2].press();
    let tick = rig
        .lift
        .poll(&mut buttons, &mut ScriptedSensor::absent())
        .unwrap();

    assert_eq!(tick.request, Some((FloorId(2), RequestOutcome::Activated)));
    assert!(matches!(
        tick.movement.map(|m| m.outcome),
        Some(MoveOutcome::Arrived { steps: 672, .. })
    ));
    assert_eq!(rig.lift.position().height(), Some(Millimeters(336)));

    handles[2].release();
    let tick = rig
        .lift
        .poll(&mut buttons, &mut ScriptedSensor::absent())
        .unwrap();
    assert_eq!(tick.request, None);
    assert_eq!(tick.movement, None);
}

#[test]
fn poll_sleeps_when_idle() {
    let mut rig = Rig::homed(coarse_config());
    let start = rig.lift.timebase_mut().now_ms();

    rig.lift.poll(&mut (), &mut ()).unwrap();

    assert_eq!(rig.lift.timebase_mut().now_ms() - start, 10);
}

#[test]
fn driver_fault_is_healed_on_next_health_poll() {
    let mut rig = Rig::homed(coarse_config());
    let registers = rig.lift.driver_mut().registers_mut();
    registers.set_status(0x01);
    registers.clear_status_on_gstat(true);
    registers.clear_writes();
    let enable_writes = rig.enable.writes();

    let tick = rig.lift.poll(&mut (), &mut ()).unwrap();
    assert_eq!(tick.health, None);

    rig.lift.timebase_mut().advance_ms(2_000);
    let tick = rig.lift.poll(&mut (), &mut ()).unwrap();
    assert!(matches!(tick.health, Some(HealthReport::Reconfigured(_))));
    assert_eq!(rig.lift.driver().registers().writes().len(), 4);
    assert!(rig.enable.writes() > enable_writes);

    rig.lift.timebase_mut().advance_ms(2_000);
    let tick = rig.lift.poll(&mut (), &mut ()).unwrap();
    assert!(matches!(tick.health, Some(HealthReport::Healthy(_))));
}

#[test]
fn move_to_runs_immediately() {
    let mut rig = Rig::homed(coarse_config());

    let report = rig
        .lift
        .move_to(FloorId(1), &mut ScriptedSensor::absent())
        .unwrap()
        .unwrap();

    assert_eq!(report.target, Millimeters(170));
    assert_eq!(rig.lift.position().height(), Some(Millimeters(170)));
}
