//! Transmit cadence: derivation of the timer reload value and the periodic
//! trigger state machine.
use crate::error::CadenceError;
use crate::transport::traits::tick_timer::TickTimer;

/// Divisor for a 10 ms tick (100 interrupts per second).
pub const PACED_DIVISOR: u32 = 100;

/// Divisor for a 50 µs tick (20 000 interrupts per second).
///
/// 50 µs is the time one maximum-size classic frame needs on the wire at
/// 1 Mbit/s, so this cadence keeps the bus permanently busy without
/// overrunning it.
pub const FLOOD_DIVISOR: u32 = 20_000;

//==================================================================================CADENCE
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Tick rate of the periodic trigger.
pub enum Cadence {
    /// One tick every `cpu_hz / divisor` processor clocks.
    Divided(u32),
    /// Reload of one: fire on every available timer tick, the maximum
    /// interrupt rate the timer can sustain. Submissions may outrun the
    /// controller at this rate; frames are dropped, the system stays live.
    EveryTick,
}

impl Cadence {
    /// Timer reload value for a core running at `cpu_hz`.
    ///
    /// Deterministic for a fixed clock input, so re-deriving the same
    /// cadence always arms the same period. A divisor of one is a valid
    /// boundary (reload = `cpu_hz`); a divisor of zero has no tick rate and
    /// is rejected.
    pub fn reload_ticks(&self, cpu_hz: u32) -> Result<u32, CadenceError> {
        match *self {
            Cadence::Divided(0) => Err(CadenceError::ZeroDivisor),
            // A divisor above the clock would truncate to zero; the
            // countdown needs at least one clock.
            Cadence::Divided(divisor) => Ok((cpu_hz / divisor).max(1)),
            Cadence::EveryTick => Ok(1),
        }
    }
}

//==================================================================================PERIODIC_TRIGGER
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Run state of the periodic trigger.
pub enum RunState {
    /// Configured but not yet armed.
    Idle,
    /// Armed and ticking. There is no way back within one boot cycle.
    Running,
}

/// Periodic trigger: a countdown timer armed with a precomputed reload
/// value.
///
/// The reload is computed once at construction and never changes at
/// runtime. The idle to running transition is one-directional; no stop
/// operation exists, the device ticks until external reset.
pub struct PeriodicTrigger<T: TickTimer> {
    timer: T,
    reload_ticks: u32,
    state: RunState,
}

impl<T: TickTimer> PeriodicTrigger<T> {
    /// Derive the reload value for `cadence` and wrap the timer.
    pub fn new(timer: T, cadence: Cadence, cpu_hz: u32) -> Result<Self, CadenceError> {
        Ok(Self {
            timer,
            reload_ticks: cadence.reload_ticks(cpu_hz)?,
            state: RunState::Idle,
        })
    }

    /// Arm the countdown. Calling this again re-arms the same reload value
    /// and leaves the steady-state cadence unchanged.
    pub fn enable(&mut self) {
        self.timer.arm(self.reload_ticks);
        self.state = RunState::Running;
    }

    /// Current run state.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Reload value armed into the timer.
    #[inline]
    pub fn reload_ticks(&self) -> u32 {
        self.reload_ticks
    }

    /// Wait for the next tick. Does not resolve before
    /// [`enable`](PeriodicTrigger::enable) has run.
    pub async fn wait_tick(&mut self) {
        self.timer.tick().await
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
