//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (message-object shaping,
//! cadence derivation, controller bring-up).
use thiserror_no_std::Error;

#[derive(Error, Debug)]
/// Errors raised while shaping a transmit message object.
pub enum FrameError {
    /// Payload exceeds the classic CAN frame limit of eight bytes.
    #[error("Payload length {len} exceeds the classic CAN limit")]
    PayloadTooLong { len: usize },
}

#[derive(Error, Debug)]
/// Errors raised while deriving a timer reload value.
pub enum CadenceError {
    /// A divisor of zero produces no tick rate.
    #[error("Cadence divisor must be non-zero")]
    ZeroDivisor,
}

#[derive(Error, Debug)]
/// Failures during the controller bring-up sequence. Each variant names the
/// step that rejected the operation so firmware can tell where startup
/// stalled.
pub enum BringUpError<E: core::fmt::Debug> {
    /// Controller reset/initialization failed.
    #[error("Controller init failed: {0:?}")]
    Init(E),

    /// Bus timing could not be configured.
    #[error("Bit rate configuration failed: {0:?}")]
    BitRate(E),

    /// The controller refused to leave its init state.
    #[error("Controller enable failed: {0:?}")]
    Enable(E),

    /// Interrupt arming was rejected.
    #[error("Interrupt arming failed: {0:?}")]
    Interrupts(E),

    /// The requested cadence is invalid.
    #[error(transparent)]
    Cadence(#[from] CadenceError),
}
