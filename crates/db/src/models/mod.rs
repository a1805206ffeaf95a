//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create/request DTO for inserts

pub mod payment;
pub mod reservation;
pub mod showtime;
pub mod status;
