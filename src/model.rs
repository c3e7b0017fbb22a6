use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unix milliseconds — the only time type.
pub type Ms = i64;

macro_rules! id_type {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Ulid);

        impl $name {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(Ulid::new())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

// Three id spaces coexist in most engine signatures; newtypes keep a
// booker id from ever being passed where an item id belongs.
id_type!(BookingId);
id_type!(UserId);
id_type!(ItemId);

/// Closed interval `[start, end]` with `end > start` strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub start: Ms,
    pub end: Ms,
}

impl Window {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(end > start, "Window end must be after start");
        Self { start, end }
    }

    /// True iff `t` falls inside the window, endpoints included.
    pub fn contains(&self, t: Ms) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Approval status of a booking. `Waiting` is the only state with an
/// outgoing transition; `Cancelled` is reserved and currently unreachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Once a booking leaves `Waiting` no further transition is permitted.
    pub fn is_decided(&self) -> bool {
        !matches!(self, BookingStatus::Waiting)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Cancelled => "CANCELLED",
        };
        f.write_str(s)
    }
}

/// A time-windowed reservation of an item by a user. Holds bare ids,
/// never object edges; joins happen at view assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub item_id: ItemId,
    pub booker_id: UserId,
    pub window: Window,
    pub status: BookingStatus,
}

impl Booking {
    /// A completed rental: approved and already over at `now`
    /// (a booking ending exactly at `now` counts).
    pub fn is_completed(&self, now: Ms) -> bool {
        self.status == BookingStatus::Approved && self.window.end <= now
    }
}

// ── Collaborator snapshots & view projections ────────────────────

/// User snapshot as supplied by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
}

/// Item snapshot as supplied by the catalog. An item has exactly one
/// owner at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub name: String,
    pub owner_id: UserId,
    pub available: bool,
}

/// Booking joined with its booker and item snapshots for presentation.
/// Rebuilt per request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub booking: Booking,
    pub booker: UserRef,
    pub item: ItemRef,
}

/// Owner-only schedule digest for an item: most recent completed
/// approved booking and nearest upcoming approved booking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub last: Option<Booking>,
    pub next: Option<Booking>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_basics() {
        let w = Window::new(100, 200);
        assert!(w.contains(100));
        assert!(w.contains(150));
        assert!(w.contains(200)); // closed interval
        assert!(!w.contains(201));
        assert!(!w.contains(99));
    }

    #[test]
    fn status_decided() {
        assert!(!BookingStatus::Waiting.is_decided());
        assert!(BookingStatus::Approved.is_decided());
        assert!(BookingStatus::Rejected.is_decided());
        assert!(BookingStatus::Cancelled.is_decided());
    }

    #[test]
    fn completed_requires_approved() {
        let mut b = Booking {
            id: BookingId::new(),
            item_id: ItemId::new(),
            booker_id: UserId::new(),
            window: Window::new(100, 200),
            status: BookingStatus::Waiting,
        };
        assert!(!b.is_completed(300));
        b.status = BookingStatus::Approved;
        assert!(b.is_completed(300));
        assert!(b.is_completed(200)); // ending exactly at now counts
        assert!(!b.is_completed(199));
    }

    #[test]
    fn status_serializes_screaming() {
        let s = serde_json::to_string(&BookingStatus::Waiting).unwrap();
        assert_eq!(s, "\"WAITING\"");
        let s = serde_json::to_string(&BookingStatus::Approved).unwrap();
        assert_eq!(s, "\"APPROVED\"");
    }

    #[test]
    fn booking_view_serializes() {
        let booking = Booking {
            id: BookingId::new(),
            item_id: ItemId::new(),
            booker_id: UserId::new(),
            window: Window::new(100, 200),
            status: BookingStatus::Waiting,
        };
        let view = BookingView {
            booker: UserRef {
                id: booking.booker_id,
                name: "alice".into(),
            },
            item: ItemRef {
                id: booking.item_id,
                name: "drill".into(),
                owner_id: UserId::new(),
                available: true,
            },
            booking,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["booking"]["status"], "WAITING");
        assert_eq!(json["booker"]["name"], "alice");
        assert_eq!(json["item"]["name"], "drill");
    }
}
