//! Minimal abstraction for a message-object CAN controller. Allows the
//! generator to drive register-level drivers as well as in-memory test
//! doubles.
use crate::transport::message_object::{TxMessageObject, TxSlot};

//==================================================================================INTERRUPT_CAUSE
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Cause reported by the controller's interrupt register.
pub enum InterruptCause {
    /// No interrupt pending.
    None,
    /// Generic status/error condition.
    Status,
    /// A numbered message object raised the interrupt.
    MessageObject(u8),
}

//==================================================================================CONTROLLER_STATUS
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Snapshot of the controller status register.
///
/// Reading the register through [`CanController::read_status`] acknowledges
/// a pending status interrupt, so holding a snapshot never keeps the line
/// asserted.
pub struct ControllerStatus(u32);

impl ControllerStatus {
    /// Last-error-code field mask (bits 0-2).
    pub const LEC_MASK: u32 = 0x0000_0007;
    /// A frame was transmitted successfully since the last read.
    pub const TX_OK: Self = Self(1 << 3);
    /// A frame was received successfully since the last read.
    pub const RX_OK: Self = Self(1 << 4);
    /// The controller is error-passive.
    pub const ERROR_PASSIVE: Self = Self(1 << 5);
    /// An error counter reached the warning threshold.
    pub const ERROR_WARNING: Self = Self(1 << 6);
    /// The controller is bus-off.
    pub const BUS_OFF: Self = Self(1 << 7);

    /// Wrap a raw register value.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw register value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Last error code (0 = no error).
    #[inline]
    pub const fn last_error_code(self) -> u8 {
        (self.0 & Self::LEC_MASK) as u8
    }
}

//==================================================================================CAN_CONTROLLER
/// Contract for the hardware CAN controller.
///
/// The generator calls the first four operations in a fixed order at
/// bring-up (`init`, `set_bit_rate`, `enable`, `enable_interrupts`), then
/// only [`load_tx`](CanController::load_tx) from the tick path and the
/// status accessors from the interrupt path.
pub trait CanController {
    /// Driver-level error type.
    type Error: core::fmt::Debug;

    /// Reset every message object and the controller state.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Configure the bus timing for `bit_rate_bps` given the controller
    /// clock `clock_hz`.
    fn set_bit_rate(&mut self, clock_hz: u32, bit_rate_bps: u32) -> Result<(), Self::Error>;

    /// Leave the init state and join the bus.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Arm the master and error interrupt sources.
    fn enable_interrupts(&mut self) -> Result<(), Self::Error>;

    /// Load `object` into `slot` as a transmit object and request
    /// transmission.
    ///
    /// This is a fire-and-forget register write: it must not wait for bus
    /// access, and a pending not-yet-sent frame in the slot is silently
    /// overwritten.
    fn load_tx(&mut self, slot: &TxSlot, object: &TxMessageObject) -> Result<(), Self::Error>;

    /// Cause of the currently pending interrupt, if any.
    fn interrupt_cause(&mut self) -> InterruptCause;

    /// Read the status register.
    ///
    /// The read acknowledges a pending status interrupt and clears the
    /// sticky TX/RX-ok bits.
    fn read_status(&mut self) -> ControllerStatus;
}
