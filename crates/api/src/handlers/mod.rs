//! HTTP handlers, one module per resource.

pub mod channels;
pub mod delivery;
pub mod grid;
pub mod health;
pub mod programs;
pub mod reminders;
pub mod temporal;
