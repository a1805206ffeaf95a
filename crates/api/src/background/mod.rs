//! Background sweepers enforcing time-based reservation transitions.
//!
//! Each sweeper is an independent periodic task with its own failure
//! isolation: a failed tick is logged and retried on the next interval, and
//! every reservation's transition is its own transaction, so a crash
//! mid-batch leaves the remainder for the next run.

pub mod reservation_expiry;
pub mod show_completion;
