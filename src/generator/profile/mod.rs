//! Selectable traffic profiles: identifier framing, payload pattern, bus
//! bit rate, cadence, and optional burst bound.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::generator::cadence::{Cadence, FLOOD_DIVISOR, PACED_DIVISOR};
use crate::transport::TEST_FRAME_ID;

/// Nominal bus rate for the paced profile (bit/s).
pub const BIT_RATE_250K: u32 = 250_000;

/// Bus rate for the fast profiles (bit/s).
pub const BIT_RATE_1M: u32 = 1_000_000;

/// Frames emitted by the burst profile before the bus goes permanently
/// silent.
pub const BURST_FRAME_LIMIT: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// One complete generator configuration.
///
/// The named constructors cover the shipped modes; the fields stay public
/// so bench setups can derive their own patterns.
pub struct TrafficProfile {
    /// Arbitration identifier for every frame.
    pub id: Id,
    /// First payload byte; the eight bytes ascend from this value.
    pub payload_base: u8,
    /// Tick rate of the periodic trigger.
    pub cadence: Cadence,
    /// Bus bit rate in bit/s.
    pub bit_rate_bps: u32,
    /// Stop transmitting once this many ticks have elapsed (`None` keeps
    /// transmitting forever).
    pub frame_limit: Option<u32>,
}

impl TrafficProfile {
    /// Steady pacing: standard framing, one frame every 10 ms at
    /// 250 kbit/s. Every tick transmits, payload `[1..=8]`.
    pub fn paced() -> Self {
        Self {
            id: Id::Standard(StandardId::new(TEST_FRAME_ID as u16).expect("0x10 fits 11 bits")),
            payload_base: 1,
            cadence: Cadence::Divided(PACED_DIVISOR),
            bit_rate_bps: BIT_RATE_250K,
            frame_limit: None,
        }
    }

    /// Saturation pacing: extended framing, one frame every 50 µs at
    /// 1 Mbit/s, i.e. back-to-back maximum-size frames on the wire. Payload
    /// `[1..=8]`.
    pub fn flood() -> Self {
        Self {
            id: Id::Extended(ExtendedId::new(TEST_FRAME_ID).expect("0x10 fits 29 bits")),
            payload_base: 1,
            cadence: Cadence::Divided(FLOOD_DIVISOR),
            bit_rate_bps: BIT_RATE_1M,
            frame_limit: None,
        }
    }

    /// Fixed-size burst: four extended frames as fast as the timer can
    /// tick, payload `[2..=9]`, then permanent silence. The cadence
    /// deliberately outruns the controller; overwritten submissions are
    /// accepted.
    pub fn burst() -> Self {
        Self {
            id: Id::Extended(ExtendedId::new(TEST_FRAME_ID).expect("0x10 fits 29 bits")),
            payload_base: 2,
            cadence: Cadence::EveryTick,
            bit_rate_bps: BIT_RATE_1M,
            frame_limit: Some(BURST_FRAME_LIMIT),
        }
    }
}
