//! Primitive aliases shared across the workspace.

/// Primary key type; every table uses BIGSERIAL.
pub type DbId = i64;

/// All timestamps are stored and compared in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
