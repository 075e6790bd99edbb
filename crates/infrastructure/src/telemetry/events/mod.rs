//! Bounded handoff between connection tasks and the event consumer.

pub mod handoff;

pub use handoff::EventHandoff;
