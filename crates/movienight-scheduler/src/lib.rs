//! `movienight-scheduler` — weekly deadline computation and the trigger loop.
//!
//! # Overview
//!
//! [`deadline::Deadline`] is the pure part: given "now", it computes the
//! next occurrence of a (weekday, hour) instant in a named IANA timezone,
//! DST-correct, plus the human-readable time-remaining string.
//!
//! [`engine::Scheduler`] drives two recurring triggers off that math:
//!
//! | Trigger | When                                  | Effect                       |
//! |---------|---------------------------------------|------------------------------|
//! | Poll    | configured (day, hour) weekly         | lock store, dispatch poll    |
//! | Reset   | Saturday 00:00 local, fixed           | clear store, release lock    |
//!
//! and exposes `trigger_poll()` for the operator HTTP surface.

pub mod deadline;
pub mod engine;
pub mod error;

pub use deadline::Deadline;
pub use engine::Scheduler;
pub use error::{Result, SchedulerError};
