// Stage progression: aggregate counters and the one-step stage machine.

pub mod handlers;
pub mod tracker;
