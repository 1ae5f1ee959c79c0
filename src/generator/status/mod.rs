//! Controller status servicing: acknowledge status/error interrupts so the
//! controller does not stall, and count every service for diagnostics.
use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::transport::traits::can_controller::{CanController, ControllerStatus, InterruptCause};

//==================================================================================STATUS_MONITOR
#[derive(Debug, Default)]
/// Exclusive-owner context for the controller interrupt path.
///
/// The only cause this generator distinguishes is the generic status/error
/// condition, acknowledged by reading the status register. Message-object
/// causes are deliberately not serviced (transmission correctness relies
/// on the periodic cadence, not on transmit-complete acknowledgment) and
/// take the same read-and-return path.
pub struct StatusMonitor {
    serviced: u32,
    last_status: ControllerStatus,
}

impl StatusMonitor {
    /// Fresh monitor with zeroed counters.
    pub const fn new() -> Self {
        Self {
            serviced: 0,
            last_status: ControllerStatus::from_bits(0),
        }
    }

    /// Service one controller interrupt.
    ///
    /// Reads the cause, acknowledges by reading the status register, and
    /// returns the snapshot. Skipping this on an asserted interrupt leaves
    /// the controller re-raising it forever.
    pub fn on_interrupt<C: CanController>(&mut self, controller: &mut C) -> ControllerStatus {
        let status = match controller.interrupt_cause() {
            // Status interrupt: the register read is the acknowledgment.
            InterruptCause::Status => controller.read_status(),
            // Anything else falls through to the same read and returns;
            // message-object events stay unserviced.
            InterruptCause::None | InterruptCause::MessageObject(_) => controller.read_status(),
        };
        self.serviced = self.serviced.wrapping_add(1);
        self.last_status = status;
        status
    }

    /// Interrupts serviced so far.
    #[inline]
    pub fn serviced(&self) -> u32 {
        self.serviced
    }

    /// Status captured by the most recent service.
    #[inline]
    pub fn last_status(&self) -> ControllerStatus {
        self.last_status
    }
}

//==================================================================================SHARED_MONITOR
/// [`StatusMonitor`] behind a critical-section mutex, for firmware that
/// services the controller from an interrupt handler while another context
/// inspects the counters.
///
/// `const`-constructible so it can live in a `static` handed to the handler
/// at registration time.
pub struct SharedStatusMonitor {
    inner: Mutex<CriticalSectionRawMutex, RefCell<StatusMonitor>>,
}

impl SharedStatusMonitor {
    /// Fresh shared monitor.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(StatusMonitor::new())),
        }
    }

    /// Service one interrupt inside a critical section.
    pub fn on_interrupt<C: CanController>(&self, controller: &mut C) -> ControllerStatus {
        self.inner
            .lock(|monitor| monitor.borrow_mut().on_interrupt(controller))
    }

    /// Interrupts serviced so far.
    pub fn serviced(&self) -> u32 {
        self.inner.lock(|monitor| monitor.borrow().serviced())
    }

    /// Status captured by the most recent service.
    pub fn last_status(&self) -> ControllerStatus {
        self.inner.lock(|monitor| monitor.borrow().last_status())
    }
}

impl Default for SharedStatusMonitor {
    fn default() -> Self {
        Self::new()
    }
}
