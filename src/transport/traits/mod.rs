//! Hardware abstraction traits used by the generator (CAN controller and
//! periodic tick timer).
pub mod can_controller;
pub mod tick_timer;
