//! Unit tests for the tick-driven transmit logic.
use super::*;
use crate::transport::traits::can_controller::{ControllerStatus, InterruptCause};
use crate::transport::TX_SLOT_INDEX;

/// Controller double capturing every submission.
#[derive(Default)]
struct CaptureController {
    submitted: [Option<(u8, TxMessageObject)>; 8],
    submit_count: usize,
    reject_submissions: bool,
}

impl CaptureController {
    fn last(&self) -> &TxMessageObject {
        let (_, object) = self.submitted[self.submit_count - 1]
            .as_ref()
            .expect("no submission recorded");
        object
    }
}

#[derive(Debug)]
struct Rejected;

impl CanController for CaptureController {
    type Error = Rejected;

    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_bit_rate(&mut self, _clock_hz: u32, _bit_rate_bps: u32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enable_interrupts(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn load_tx(&mut self, slot: &TxSlot, object: &TxMessageObject) -> Result<(), Self::Error> {
        if self.reject_submissions {
            return Err(Rejected);
        }
        self.submitted[self.submit_count] = Some((slot.index(), object.clone()));
        self.submit_count += 1;
        Ok(())
    }

    fn interrupt_cause(&mut self) -> InterruptCause {
        InterruptCause::None
    }

    fn read_status(&mut self) -> ControllerStatus {
        ControllerStatus::default()
    }
}

fn slot() -> TxSlot {
    TxSlot::claim(TX_SLOT_INDEX)
}

#[test]
/// Paced mode submits a standard 0x10 frame with ascending payload on
/// every tick.
fn test_paced_tick_submits_standard_frame() {
    let mut controller = CaptureController::default();
    let mut trigger = TxTrigger::new(TrafficProfile::paced());
    let slot = slot();

    for _ in 0..3 {
        assert!(trigger.on_tick(&mut controller, &slot).unwrap());
    }

    assert_eq!(controller.submit_count, 3);
    let object = controller.last();
    assert_eq!(object.id, 0x10);
    assert_eq!(object.id_mask, 0);
    assert!(!object.flags.contains(ObjectFlags::EXTENDED_ID));
    assert_eq!(object.len, 8);
    assert_eq!(object.payload(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(trigger.tick_count(), 3);
    assert_eq!(trigger.frames_submitted(), 3);
}

#[test]
/// Flood mode marks the same identifier as extended.
fn test_flood_tick_submits_extended_frame() {
    let mut controller = CaptureController::default();
    let mut trigger = TxTrigger::new(TrafficProfile::flood());

    trigger.on_tick(&mut controller, &slot()).unwrap();

    let object = controller.last();
    assert_eq!(object.id, 0x10);
    assert!(object.flags.contains(ObjectFlags::EXTENDED_ID));
    assert_eq!(object.payload(), &[1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
/// Every submission targets hardware slot 1 and nothing else.
fn test_submissions_pin_slot_one() {
    let mut controller = CaptureController::default();
    let mut trigger = TxTrigger::new(TrafficProfile::paced());

    trigger.on_tick(&mut controller, &slot()).unwrap();

    let (index, _) = controller.submitted[0].as_ref().unwrap();
    assert_eq!(*index, 1);
}

#[test]
/// Burst mode emits exactly four frames, then only the counter advances.
fn test_burst_goes_permanently_silent() {
    let mut controller = CaptureController::default();
    let mut buffer = [0u8; MAX_CLASSIC_PAYLOAD];
    let mut trigger = TxTrigger::with_buffer(TrafficProfile::burst(), &mut buffer);
    let slot = slot();

    let mut fired = 0;
    for _ in 0..10 {
        if trigger.on_tick(&mut controller, &slot).unwrap() {
            fired += 1;
        }
    }

    assert_eq!(fired, 4);
    assert_eq!(controller.submit_count, 4);
    assert_eq!(trigger.tick_count(), 10);
    assert_eq!(trigger.frames_submitted(), 4);
    assert!(trigger.is_exhausted());

    for recorded in controller.submitted.iter().take(4) {
        let (_, object) = recorded.as_ref().unwrap();
        assert_eq!(object.payload(), &[2, 3, 4, 5, 6, 7, 8, 9]);
        assert!(object.flags.contains(ObjectFlags::EXTENDED_ID));
    }
}

#[test]
/// The staging buffer stays visible to the caller after the ticks.
fn test_external_buffer_holds_last_payload() {
    let mut controller = CaptureController::default();
    let mut buffer = [0u8; MAX_CLASSIC_PAYLOAD];
    {
        let mut trigger = TxTrigger::with_buffer(TrafficProfile::burst(), &mut buffer);
        let slot = slot();
        for _ in 0..4 {
            trigger.on_tick(&mut controller, &slot).unwrap();
        }
    }
    assert_eq!(buffer, [2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
/// Unbounded profiles never exhaust.
fn test_unbounded_profile_never_exhausts() {
    let mut controller = CaptureController::default();
    let mut trigger = TxTrigger::new(TrafficProfile::paced());
    let slot = slot();

    for _ in 0..5 {
        trigger.on_tick(&mut controller, &slot).unwrap();
    }
    assert!(!trigger.is_exhausted());
}

#[test]
/// A rejected submission surfaces the driver error and leaves the counters
/// at the failed tick.
fn test_rejected_submission_propagates() {
    let mut controller = CaptureController {
        reject_submissions: true,
        ..Default::default()
    };
    let mut trigger = TxTrigger::new(TrafficProfile::paced());

    assert!(trigger.on_tick(&mut controller, &slot()).is_err());
    assert_eq!(trigger.tick_count(), 0);
    assert_eq!(trigger.frames_submitted(), 0);
}
