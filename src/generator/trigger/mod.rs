//! The transmit trigger: the decision and payload logic run on every
//! periodic tick.
use embedded_can::Id;

use crate::generator::profile::TrafficProfile;
use crate::transport::message_object::{ObjectFlags, TxMessageObject, TxSlot};
use crate::transport::traits::can_controller::CanController;
use crate::transport::MAX_CLASSIC_PAYLOAD;

/// Tick-driven transmit logic and the state it owns: the reusable message
/// object, the optional external payload buffer, and the tick counter.
///
/// One instance exists per generator and is written exclusively by the tick
/// path; the controller only reads the object at submission time. There is
/// no per-call isolation: a tick may overwrite a frame the controller has
/// not finished sending. That race is accepted: correctness of the cadence
/// relies on the timer period, not on transmit-complete acknowledgment.
pub struct TxTrigger<'buf> {
    profile: TrafficProfile,
    object: TxMessageObject,
    /// Caller-visible staging buffer; when present the payload is written
    /// here first and the object copies from it.
    scratch: Option<&'buf mut [u8; MAX_CLASSIC_PAYLOAD]>,
    tick_count: u32,
    frames_submitted: u32,
}

impl<'buf> TxTrigger<'buf> {
    /// Trigger with the payload embedded in the message object.
    pub fn new(profile: TrafficProfile) -> Self {
        Self {
            profile,
            object: TxMessageObject::empty(),
            scratch: None,
            tick_count: 0,
            frames_submitted: 0,
        }
    }

    /// Trigger staging its payload through `buffer`.
    ///
    /// The buffer outlives every individual tick, so its contents stay
    /// observable to the caller after each submission.
    pub fn with_buffer(
        profile: TrafficProfile,
        buffer: &'buf mut [u8; MAX_CLASSIC_PAYLOAD],
    ) -> Self {
        Self {
            profile,
            object: TxMessageObject::empty(),
            scratch: Some(buffer),
            tick_count: 0,
            frames_submitted: 0,
        }
    }

    /// Run one tick: decide, populate, submit.
    ///
    /// Returns `Ok(true)` when a frame was loaded into the slot and
    /// `Ok(false)` when the burst bound suppressed the transmission. The
    /// tick counter advances either way and is never reset.
    pub fn on_tick<C: CanController>(
        &mut self,
        controller: &mut C,
        slot: &TxSlot,
    ) -> Result<bool, C::Error> {
        let suppressed = matches!(
            self.profile.frame_limit,
            Some(limit) if self.tick_count >= limit
        );
        if suppressed {
            self.tick_count = self.tick_count.wrapping_add(1);
            return Ok(false);
        }

        self.populate();
        controller.load_tx(slot, &self.object)?;

        self.tick_count = self.tick_count.wrapping_add(1);
        self.frames_submitted = self.frames_submitted.wrapping_add(1);
        Ok(true)
    }

    // Overwrite the shared object in place with the profile's frame.
    fn populate(&mut self) {
        let (raw, flags) = match self.profile.id {
            Id::Standard(id) => (id.as_raw() as u32, ObjectFlags::NONE),
            Id::Extended(id) => (id.as_raw(), ObjectFlags::EXTENDED_ID),
        };
        self.object.id = raw;
        // Meaningless for a transmit object, written to zero anyway.
        self.object.id_mask = 0;
        self.object.flags = flags;
        self.object.len = MAX_CLASSIC_PAYLOAD;

        let base = self.profile.payload_base;
        match self.scratch.as_deref_mut() {
            Some(buffer) => {
                for (offset, byte) in buffer.iter_mut().enumerate() {
                    *byte = base.wrapping_add(offset as u8);
                }
                self.object.data = *buffer;
            }
            None => {
                for (offset, byte) in self.object.data.iter_mut().enumerate() {
                    *byte = base.wrapping_add(offset as u8);
                }
            }
        }
    }

    /// Ticks elapsed since startup. Monotonic during normal operation,
    /// wraps at `u32::MAX`.
    #[inline]
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Frames handed to the controller so far.
    #[inline]
    pub fn frames_submitted(&self) -> u32 {
        self.frames_submitted
    }

    /// `true` once a bounded profile has spent its burst; unbounded
    /// profiles never exhaust.
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self.profile.frame_limit,
            Some(limit) if self.tick_count >= limit
        )
    }

    /// The profile driving this trigger.
    #[inline]
    pub fn profile(&self) -> &TrafficProfile {
        &self.profile
    }

    /// The message object as last submitted.
    #[inline]
    pub fn object(&self) -> &TxMessageObject {
        &self.object
    }
}

//==================================================================================TESTS
#[cfg(test)]
#[path = "tests.rs"]
mod tests;
