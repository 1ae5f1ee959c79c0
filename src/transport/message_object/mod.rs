//! The reusable transmit message object and the capability standing for the
//! single hardware transmit slot.
use embedded_can::{ExtendedId, Id, StandardId};

use crate::error::FrameError;
use crate::transport::MAX_CLASSIC_PAYLOAD;

//==================================================================================OBJECT_FLAGS
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Flag bits carried by a message object, mirroring the controller's
/// message-control register layout.
pub struct ObjectFlags(u16);

impl ObjectFlags {
    /// No flag set: standard 11-bit framing.
    pub const NONE: Self = Self(0);
    /// The identifier uses the extended 29-bit format.
    pub const EXTENDED_ID: Self = Self(1 << 0);

    /// Raw register value.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` when every bit of `other` is set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

//==================================================================================TX_MESSAGE_OBJECT
#[derive(Clone, Debug)]
/// One outbound frame slot: identifier, acceptance mask, flags, length, and
/// payload.
///
/// The generator owns a single instance for the whole process lifetime and
/// overwrites it in place on every tick; nothing is reallocated per frame.
pub struct TxMessageObject {
    /// Arbitration identifier (raw, right-aligned).
    pub id: u32,
    /// Acceptance mask. Irrelevant for transmit objects and always written
    /// to zero; kept so TX and RX objects share one register layout.
    pub id_mask: u32,
    /// Flag bits (framing format).
    pub flags: ObjectFlags,
    /// Number of valid payload bytes (0 to 8).
    pub len: usize,
    /// Payload buffer. Classic CAN always provides eight bytes.
    pub data: [u8; MAX_CLASSIC_PAYLOAD],
}

impl TxMessageObject {
    /// Build an object for `id` with the given payload.
    ///
    /// Extended identifiers set [`ObjectFlags::EXTENDED_ID`]; the mask is
    /// zeroed. Fails when the payload exceeds eight bytes.
    pub fn new(id: Id, payload: &[u8]) -> Result<Self, FrameError> {
        if payload.len() > MAX_CLASSIC_PAYLOAD {
            return Err(FrameError::PayloadTooLong { len: payload.len() });
        }
        let (raw, flags) = match id {
            Id::Standard(id) => (id.as_raw() as u32, ObjectFlags::NONE),
            Id::Extended(id) => (id.as_raw(), ObjectFlags::EXTENDED_ID),
        };
        let mut data = [0u8; MAX_CLASSIC_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id: raw,
            id_mask: 0,
            flags,
            len: payload.len(),
            data,
        })
    }

    /// Empty object ready to be overwritten by the trigger.
    pub const fn empty() -> Self {
        Self {
            id: 0,
            id_mask: 0,
            flags: ObjectFlags::NONE,
            len: 0,
            data: [0; MAX_CLASSIC_PAYLOAD],
        }
    }

    /// Replace the payload in place, updating `len`.
    pub fn set_payload(&mut self, payload: &[u8]) -> Result<(), FrameError> {
        if payload.len() > MAX_CLASSIC_PAYLOAD {
            return Err(FrameError::PayloadTooLong { len: payload.len() });
        }
        self.data[..payload.len()].copy_from_slice(payload);
        self.len = payload.len();
        Ok(())
    }

    /// Reconstruct the bus identifier from the raw value and flags.
    pub fn bus_id(&self) -> Id {
        if self.flags.contains(ObjectFlags::EXTENDED_ID) {
            Id::Extended(
                ExtendedId::new(self.id & ExtendedId::MAX.as_raw()).expect("masked to 29 bits"),
            )
        } else {
            Id::Standard(
                StandardId::new(self.id as u16 & StandardId::MAX.as_raw())
                    .expect("masked to 11 bits"),
            )
        }
    }

    /// Valid payload bytes.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

//==================================================================================TX_SLOT
#[derive(Debug)]
/// Capability standing for the one hardware transmit slot.
///
/// Deliberately neither `Clone` nor `Copy`: bring-up claims it exactly
/// once, which keeps a second conflicting transmit path unrepresentable.
pub struct TxSlot {
    index: u8,
}

impl TxSlot {
    /// Claim the slot. Only the bring-up path mints this capability.
    pub(crate) const fn claim(index: u8) -> Self {
        Self { index }
    }

    /// Hardware slot number.
    #[inline]
    pub const fn index(&self) -> u8 {
        self.index
    }
}
