//! JWT bearer authentication.
//!
//! Identity issuance (registration, login, password storage) is owned by an
//! external provider; this service only validates the HS256 tokens that
//! provider signs.

pub mod jwt;
