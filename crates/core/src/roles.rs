//! Well-known role name constants.
//!
//! Roles are issued by the external identity provider and arrive in the JWT
//! `role` claim; these constants must match what that provider emits.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";
