//! Reportable channel for driver-detected faults. The generator never
//! retries or escalates; it hands each fault to a sink so firmware can wire
//! a real diagnostic path instead of discarding them in a stubbed hook.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// A fault observed while the generator was running.
pub enum Fault {
    /// Driver parameter-assertion hook (debug builds).
    Assertion {
        /// Source file reported by the driver.
        file: &'static str,
        /// Line reported by the driver.
        line: u32,
    },
    /// The controller rejected a transmit submission.
    SubmitRejected,
}

/// Sink receiving generator faults. Implementations must not block.
pub trait FaultSink {
    /// Record one fault.
    fn record(&mut self, fault: Fault);
}

/// Sink discarding every fault, mirroring a stubbed debug hook.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardFaults;

impl FaultSink for DiscardFaults {
    fn record(&mut self, _fault: Fault) {}
}
