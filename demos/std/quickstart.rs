//! Hosted quickstart: drive the generator against an in-memory controller
//! with the soft ticker and print every frame that would reach the bus.
//!
//! Run with `cargo run --example quickstart`.
use canburst::generator::profile::TrafficProfile;
use canburst::generator::status::StatusMonitor;
use canburst::generator::TrafficGenerator;
use canburst::transport::message_object::{TxMessageObject, TxSlot};
use canburst::transport::traits::can_controller::{
    CanController, ControllerStatus, InterruptCause,
};
use canburst::transport::traits::tick_timer::SoftTickTimer;
use static_cell::StaticCell;

/// Pretend 25 MHz core so the cadence math matches a real target.
const CPU_HZ: u32 = 25_000_000;

// The burst payload is staged through a 'static buffer, the way firmware
// would hand one to the generator at boot.
static TX_BUFFER: StaticCell<[u8; 8]> = StaticCell::new();

/// In-memory controller that prints instead of driving a transceiver.
#[derive(Default)]
struct PrintController {
    pending_status: bool,
}

impl CanController for PrintController {
    type Error = core::convert::Infallible;

    fn init(&mut self) -> Result<(), Self::Error> {
        println!("controller: init");
        Ok(())
    }

    fn set_bit_rate(&mut self, clock_hz: u32, bit_rate_bps: u32) -> Result<(), Self::Error> {
        println!("controller: {bit_rate_bps} bps from a {clock_hz} Hz clock");
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        println!("controller: on bus");
        Ok(())
    }

    fn enable_interrupts(&mut self) -> Result<(), Self::Error> {
        println!("controller: interrupts armed");
        Ok(())
    }

    fn load_tx(&mut self, slot: &TxSlot, object: &TxMessageObject) -> Result<(), Self::Error> {
        println!(
            "slot {} <- id 0x{:X} ({:?}) data {:?}",
            slot.index(),
            object.id,
            object.bus_id(),
            object.payload(),
        );
        Ok(())
    }

    fn interrupt_cause(&mut self) -> InterruptCause {
        if self.pending_status {
            InterruptCause::Status
        } else {
            InterruptCause::None
        }
    }

    fn read_status(&mut self) -> ControllerStatus {
        self.pending_status = false;
        ControllerStatus::ERROR_WARNING
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let timer = SoftTickTimer::new(CPU_HZ);
    let buffer = TX_BUFFER.init([0; 8]);

    let mut generator = TrafficGenerator::with_tx_buffer(
        PrintController::default(),
        timer,
        TrafficProfile::burst(),
        CPU_HZ,
        buffer,
    )
    .expect("bring-up cannot fail on the in-memory controller");

    generator.start();
    while !generator.trigger().is_exhausted() {
        generator.step().await;
    }
    println!(
        "burst complete: {} frames in {} ticks, bus now silent",
        generator.frames_submitted(),
        generator.tick_count(),
    );

    // The controller raised its status line: acknowledge it the way the
    // interrupt handler would.
    let mut monitor = StatusMonitor::new();
    generator.controller_mut().pending_status = true;
    let status = monitor.on_interrupt(generator.controller_mut());
    println!(
        "status serviced ({} total): {:?}",
        monitor.serviced(),
        status,
    );
}
