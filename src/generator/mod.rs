//! Generator assembly: cadence, traffic profiles, transmit trigger, status
//! monitoring, and the bring-up/run orchestration tying them to hardware.
pub mod cadence;
pub mod profile;
pub mod status;
pub mod trigger;

use crate::error::BringUpError;
use crate::fault::{DiscardFaults, Fault, FaultSink};
use crate::generator::cadence::{PeriodicTrigger, RunState};
use crate::generator::profile::TrafficProfile;
use crate::generator::trigger::TxTrigger;
use crate::transport::message_object::TxSlot;
use crate::transport::traits::can_controller::CanController;
use crate::transport::traits::tick_timer::TickTimer;
use crate::transport::{CAN_CONTROLLER_CLOCK_HZ, MAX_CLASSIC_PAYLOAD, TX_SLOT_INDEX};

/// Timer-driven CAN test-traffic generator.
///
/// Owns the controller, the periodic trigger, and the transmit state; the
/// tick path is the only writer of the shared message object. Construction
/// performs the full controller bring-up and claims the single transmit
/// slot, so at most one transmit path can exist per controller.
pub struct TrafficGenerator<'buf, C: CanController, T: TickTimer, F: FaultSink = DiscardFaults> {
    controller: C,
    pacer: PeriodicTrigger<T>,
    trigger: TxTrigger<'buf>,
    slot: TxSlot,
    faults: F,
}

impl<'buf, C, T> TrafficGenerator<'buf, C, T, DiscardFaults>
where
    C: CanController,
    T: TickTimer,
{
    /// Bring up the controller for `profile` and build a generator with the
    /// payload embedded in the message object.
    ///
    /// `cpu_hz` is the processor clock feeding the periodic timer; the CAN
    /// bit timing runs from the fixed controller clock instead.
    pub fn new(
        controller: C,
        timer: T,
        profile: TrafficProfile,
        cpu_hz: u32,
    ) -> Result<Self, BringUpError<C::Error>> {
        Self::assemble(controller, timer, profile, cpu_hz, None)
    }

    /// Same as [`new`](TrafficGenerator::new), but stage every payload
    /// through the caller-visible `buffer`.
    pub fn with_tx_buffer(
        controller: C,
        timer: T,
        profile: TrafficProfile,
        cpu_hz: u32,
        buffer: &'buf mut [u8; MAX_CLASSIC_PAYLOAD],
    ) -> Result<Self, BringUpError<C::Error>> {
        Self::assemble(controller, timer, profile, cpu_hz, Some(buffer))
    }

    fn assemble(
        mut controller: C,
        timer: T,
        profile: TrafficProfile,
        cpu_hz: u32,
        buffer: Option<&'buf mut [u8; MAX_CLASSIC_PAYLOAD]>,
    ) -> Result<Self, BringUpError<C::Error>> {
        bring_up(&mut controller, &profile)?;
        let pacer = PeriodicTrigger::new(timer, profile.cadence, cpu_hz)?;
        let trigger = match buffer {
            Some(buffer) => TxTrigger::with_buffer(profile, buffer),
            None => TxTrigger::new(profile),
        };
        Ok(Self {
            controller,
            pacer,
            trigger,
            slot: TxSlot::claim(TX_SLOT_INDEX),
            faults: DiscardFaults,
        })
    }
}

impl<'buf, C, T, F> TrafficGenerator<'buf, C, T, F>
where
    C: CanController,
    T: TickTimer,
    F: FaultSink,
{
    /// Replace the fault sink, e.g. to wire a real diagnostic channel
    /// instead of discarding driver faults.
    pub fn with_fault_sink<F2: FaultSink>(self, faults: F2) -> TrafficGenerator<'buf, C, T, F2> {
        TrafficGenerator {
            controller: self.controller,
            pacer: self.pacer,
            trigger: self.trigger,
            slot: self.slot,
            faults,
        }
    }

    /// Arm the periodic trigger. One-directional; re-arming the same
    /// cadence is idempotent.
    pub fn start(&mut self) {
        self.pacer.enable();
        #[cfg(feature = "defmt")]
        defmt::info!("Periodic trigger armed, reload {}", self.pacer.reload_ticks());
    }

    /// Wait one tick, then run the transmit trigger once.
    ///
    /// Returns `true` when a frame was submitted. Submit rejections go to
    /// the fault sink; nothing is retried.
    pub async fn step(&mut self) -> bool {
        self.pacer.wait_tick().await;
        match self.trigger.on_tick(&mut self.controller, &self.slot) {
            Ok(submitted) => {
                #[cfg(feature = "defmt")]
                if submitted {
                    defmt::trace!("Frame submitted, tick {}", self.trigger.tick_count());
                }
                submitted
            }
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Transmit submission rejected");
                self.faults.record(Fault::SubmitRejected);
                false
            }
        }
    }

    /// Run forever: the device transmits (or, once a bounded burst is
    /// spent, idles) until external reset.
    pub async fn run(&mut self) -> ! {
        self.start();
        loop {
            self.step().await;
        }
    }

    /// Run state of the periodic trigger.
    pub fn run_state(&self) -> RunState {
        self.pacer.state()
    }

    /// Ticks elapsed since the trigger was armed.
    pub fn tick_count(&self) -> u32 {
        self.trigger.tick_count()
    }

    /// Frames handed to the controller so far.
    pub fn frames_submitted(&self) -> u32 {
        self.trigger.frames_submitted()
    }

    /// The transmit trigger state.
    pub fn trigger(&self) -> &TxTrigger<'buf> {
        &self.trigger
    }

    /// Mutable access to the controller, e.g. to service its interrupt
    /// line with a [`StatusMonitor`](crate::generator::status::StatusMonitor).
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }
}

// Bring-up sequence: reset, bus timing, enable, interrupt arming. Processor
// clock and pin muxing are the platform's job and must have run already.
fn bring_up<C: CanController>(
    controller: &mut C,
    profile: &TrafficProfile,
) -> Result<(), BringUpError<C::Error>> {
    controller.init().map_err(BringUpError::Init)?;
    controller
        .set_bit_rate(CAN_CONTROLLER_CLOCK_HZ, profile.bit_rate_bps)
        .map_err(BringUpError::BitRate)?;
    controller.enable().map_err(BringUpError::Enable)?;
    controller.enable_interrupts().map_err(BringUpError::Interrupts)?;
    #[cfg(feature = "defmt")]
    defmt::info!("CAN controller up, bit rate {} bps", profile.bit_rate_bps);
    Ok(())
}
