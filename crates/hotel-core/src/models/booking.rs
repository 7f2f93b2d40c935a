//! Booking model and status state machine
//!
//! A booking holds a half-open stay interval `[check_in, check_out)` on a
//! room. Status transitions are validated against a closed table; arbitrary
//! status strings are rejected at parse time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking status
///
/// Lifecycle: `Pending → Confirmed → Paid → CheckedOut`, with `Cancelled`
/// reachable from any non-terminal state. `CheckedOut` and `Cancelled` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Booking created, awaiting confirmation
    #[default]
    Pending,
    /// Booking confirmed by staff or payment intent
    Confirmed,
    /// Payment received
    Paid,
    /// Guest has checked out
    CheckedOut,
    /// Booking cancelled
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "Pending"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
            BookingStatus::Paid => write!(f, "Paid"),
            BookingStatus::CheckedOut => write!(f, "CheckedOut"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl BookingStatus {
    /// Parse from string, rejecting anything outside the closed set
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(BookingStatus::Pending),
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Paid" => Some(BookingStatus::Paid),
            "CheckedOut" => Some(BookingStatus::CheckedOut),
            "Cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if no further transitions are allowed from this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::CheckedOut | BookingStatus::Cancelled)
    }

    /// Whether this booking still occupies its room interval
    ///
    /// Only cancelled bookings stop participating in overlap checks.
    pub fn occupies_interval(&self) -> bool {
        *self != BookingStatus::Cancelled
    }

    /// Validated transition table
    ///
    /// Forward moves may skip intermediate states (a walk-in can go straight
    /// to `Paid`); backward moves and any move out of a terminal state are
    /// rejected.
    pub fn can_transition(&self, to: BookingStatus) -> bool {
        use BookingStatus::*;
        match (self, to) {
            (Pending, Confirmed | Paid | CheckedOut | Cancelled) => true,
            (Confirmed, Paid | CheckedOut | Cancelled) => true,
            (Paid, CheckedOut | Cancelled) => true,
            _ => false,
        }
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: i32,

    /// Room being booked (immutable reference once created)
    pub room_id: i32,

    /// Stay start, inclusive
    pub check_in: DateTime<Utc>,

    /// Stay end, exclusive
    pub check_out: DateTime<Utc>,

    /// Current status
    pub status: BookingStatus,

    /// Final quoted price for the stay
    pub final_price: Decimal,

    /// Owning guest, when booked through an authenticated channel
    pub user_id: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Half-open interval overlap: `[a,b)` and `[c,d)` overlap iff
    /// `a < d && c < b`. Back-to-back stays (checkout == next check-in)
    /// do not overlap.
    pub fn intervals_overlap(
        a_in: DateTime<Utc>,
        a_out: DateTime<Utc>,
        b_in: DateTime<Utc>,
        b_out: DateTime<Utc>,
    ) -> bool {
        a_in < b_out && b_in < a_out
    }

    /// Hours remaining until check-in (negative once check-in has passed)
    pub fn hours_to_check_in(&self, now: DateTime<Utc>) -> i64 {
        (self.check_in - now).num_hours()
    }
}

/// Data for creating a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub status: BookingStatus,
    pub final_price: Decimal,
    pub user_id: Option<i32>,
}

/// Data for updating a booking's stay details
#[derive(Debug, Clone)]
pub struct BookingUpdate {
    pub room_id: i32,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub final_price: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(n: i64) -> DateTime<Utc> {
        Utc::now() + Duration::days(n)
    }

    #[test]
    fn test_intervals_overlap_half_open() {
        // [0,5) vs [2,4): contained
        assert!(Booking::intervals_overlap(day(0), day(5), day(2), day(4)));
        // [0,5) vs [4,7): partial
        assert!(Booking::intervals_overlap(day(0), day(5), day(4), day(7)));
        // [2,4) vs [0,5): full containment the other way
        assert!(Booking::intervals_overlap(day(2), day(4), day(0), day(5)));
        // back-to-back: [0,5) vs [5,7) do not overlap
        assert!(!Booking::intervals_overlap(day(0), day(5), day(5), day(7)));
        // disjoint
        assert!(!Booking::intervals_overlap(day(0), day(2), day(3), day(4)));
    }

    #[test]
    fn test_status_round_trip() {
        for s in ["Pending", "Confirmed", "Paid", "CheckedOut", "Cancelled"] {
            let parsed = BookingStatus::from_str(s).unwrap();
            assert_eq!(parsed.to_string(), s);
        }
        assert!(BookingStatus::from_str("CheckedIn").is_none());
        assert!(BookingStatus::from_str("pending").is_none());
    }

    #[test]
    fn test_transition_table_forward() {
        use BookingStatus::*;
        assert!(Pending.can_transition(Confirmed));
        assert!(Pending.can_transition(Paid));
        assert!(Confirmed.can_transition(Paid));
        assert!(Paid.can_transition(CheckedOut));
    }

    #[test]
    fn test_transition_table_cancel() {
        use BookingStatus::*;
        assert!(Pending.can_transition(Cancelled));
        assert!(Confirmed.can_transition(Cancelled));
        assert!(Paid.can_transition(Cancelled));
        // terminal states admit nothing
        assert!(!CheckedOut.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(Pending));
        assert!(!Cancelled.can_transition(Cancelled));
    }

    #[test]
    fn test_transition_table_backward_rejected() {
        use BookingStatus::*;
        assert!(!Paid.can_transition(Pending));
        assert!(!Confirmed.can_transition(Pending));
        assert!(!CheckedOut.can_transition(Paid));
    }

    #[test]
    fn test_terminal_states() {
        assert!(BookingStatus::CheckedOut.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Paid.is_terminal());
    }

    #[test]
    fn test_occupies_interval() {
        assert!(BookingStatus::Pending.occupies_interval());
        assert!(BookingStatus::CheckedOut.occupies_interval());
        assert!(!BookingStatus::Cancelled.occupies_interval());
    }
}
