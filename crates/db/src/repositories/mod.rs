//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. The inventory operations on
//! [`ShowtimeRepo`] instead take `&mut PgConnection` so the booking
//! orchestrator can compose them into a single transaction.

pub mod booking_repo;
pub mod payment_repo;
pub mod reservation_repo;
pub mod showtime_repo;

pub use booking_repo::{BookingRepo, Requester};
pub use payment_repo::PaymentRepo;
pub use reservation_repo::ReservationRepo;
pub use showtime_repo::ShowtimeRepo;
