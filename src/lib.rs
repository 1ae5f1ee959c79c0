//! `canburst` library: primitives required to emit fixed-pattern classic CAN
//! test frames at a timer-driven cadence in a `no_std` environment. The crate
//! exposes the transport layer (message object, controller and timer
//! abstractions), the generator logic (cadence, traffic profiles, transmit
//! trigger, status monitoring), and a reportable fault channel.
#![no_std]
//==================================================================================
/// Domain errors (message-object shaping, cadence derivation, bring-up).
pub mod error;
/// Reportable channel for driver-detected faults.
pub mod fault;
/// Generator logic: cadence, traffic profiles, transmit trigger, status
/// monitor, and the orchestration tying them to hardware.
pub mod generator;
/// Transport layer: the transmit message object, the hardware abstraction
/// traits, and the wire-level constants.
pub mod transport;
//==================================================================================
