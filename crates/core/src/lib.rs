//! Domain logic for the MiChitra seat-reservation engine.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API, and any future CLI or worker tooling.
//! Everything here is pure: no I/O, no database, no clock other than
//! timestamps passed in by the caller.

pub mod booking;
pub mod error;
pub mod occupancy;
pub mod reservation;
pub mod roles;
pub mod seats;
pub mod types;
