//! Process lifetime: startup wiring, background jobs and shutdown.

pub mod lifetime;
