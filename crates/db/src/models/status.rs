//! Status helper enums mapping to SMALLSERIAL/SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Derived occupancy status of a showtime.
    ShowtimeStatus {
        Available = 1,
        AlmostFull = 2,
        SoldOut = 3,
    }
}

define_status_enum! {
    /// Reservation lifecycle status. The legal transitions live in
    /// `michitra_core::reservation`.
    ReservationStatus {
        Reserved = 1,
        Booked = 2,
        Cancelled = 3,
        Expired = 4,
        Completed = 5,
    }
}

define_status_enum! {
    /// Payment record status.
    PaymentStatus {
        Pending = 1,
        Completed = 2,
        Failed = 3,
        Refunded = 4,
        RefundFailed = 5,
    }
}
