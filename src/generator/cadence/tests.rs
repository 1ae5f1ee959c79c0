//! Unit tests for reload derivation and the periodic trigger state machine.
use super::*;
use crate::error::CadenceError;
use futures_util::Future;

/// 25 MHz core, the clock the cadence divisors were picked against.
const CPU_HZ: u32 = 25_000_000;

//==================================================================================CADENCE
#[test]
/// The two timed divisors land on 10 ms and 50 µs periods.
fn test_reload_for_timed_divisors() {
    assert_eq!(
        Cadence::Divided(PACED_DIVISOR).reload_ticks(CPU_HZ).unwrap(),
        250_000
    );
    assert_eq!(
        Cadence::Divided(FLOOD_DIVISOR).reload_ticks(CPU_HZ).unwrap(),
        1_250
    );
}

#[test]
/// Every-tick mode reloads after a single timer clock.
fn test_reload_every_tick() {
    assert_eq!(Cadence::EveryTick.reload_ticks(CPU_HZ).unwrap(), 1);
}

#[test]
/// A divisor of one is the degenerate boundary: valid, reload = full clock.
fn test_reload_divisor_one_is_valid() {
    assert_eq!(Cadence::Divided(1).reload_ticks(CPU_HZ).unwrap(), CPU_HZ);
}

#[test]
/// A divisor above the clock clamps to the minimum countdown of one.
fn test_reload_clamps_to_one() {
    assert_eq!(
        Cadence::Divided(CPU_HZ * 2).reload_ticks(CPU_HZ).unwrap(),
        1
    );
}

#[test]
/// Zero cannot produce a tick rate.
fn test_reload_zero_divisor_rejected() {
    assert!(matches!(
        Cadence::Divided(0).reload_ticks(CPU_HZ),
        Err(CadenceError::ZeroDivisor)
    ));
}

#[test]
/// Re-deriving the same cadence always yields the same reload.
fn test_reload_is_deterministic() {
    let first = Cadence::Divided(PACED_DIVISOR).reload_ticks(CPU_HZ).unwrap();
    let second = Cadence::Divided(PACED_DIVISOR).reload_ticks(CPU_HZ).unwrap();
    assert_eq!(first, second);
}

//==================================================================================PERIODIC_TRIGGER
/// Timer double recording every arm call.
#[derive(Default)]
struct RecordingTimer {
    armed_with: Option<u32>,
    arm_calls: u32,
}

impl TickTimer for RecordingTimer {
    fn arm(&mut self, reload_ticks: u32) {
        self.armed_with = Some(reload_ticks);
        self.arm_calls += 1;
    }

    fn tick(&mut self) -> impl Future<Output = ()> + '_ {
        async move {}
    }
}

#[test]
/// Construction leaves the trigger idle; enabling arms the timer once.
fn test_trigger_idle_until_enabled() {
    let mut trigger =
        PeriodicTrigger::new(RecordingTimer::default(), Cadence::Divided(PACED_DIVISOR), CPU_HZ)
            .unwrap();
    assert_eq!(trigger.state(), RunState::Idle);

    trigger.enable();
    assert_eq!(trigger.state(), RunState::Running);
    assert_eq!(trigger.reload_ticks(), 250_000);
}

#[test]
/// Re-enabling is idempotent: same reload, still running.
fn test_trigger_reenable_is_idempotent() {
    let mut trigger =
        PeriodicTrigger::new(RecordingTimer::default(), Cadence::Divided(PACED_DIVISOR), CPU_HZ)
            .unwrap();
    trigger.enable();
    trigger.enable();

    assert_eq!(trigger.state(), RunState::Running);
    assert_eq!(trigger.timer.arm_calls, 2);
    assert_eq!(trigger.timer.armed_with, Some(250_000));
}

#[test]
/// The degenerate maximum-rate configuration must not fail.
fn test_trigger_survives_every_tick_cadence() {
    let mut trigger =
        PeriodicTrigger::new(RecordingTimer::default(), Cadence::EveryTick, CPU_HZ).unwrap();
    trigger.enable();
    assert_eq!(trigger.timer.armed_with, Some(1));
}

#[test]
/// An invalid cadence surfaces at construction, not at arm time.
fn test_trigger_rejects_zero_divisor() {
    assert!(PeriodicTrigger::new(RecordingTimer::default(), Cadence::Divided(0), CPU_HZ).is_err());
}
