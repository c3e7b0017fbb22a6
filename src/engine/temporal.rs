use serde::{Deserialize, Serialize};

use crate::model::{Booking, BookingStatus, Ms, Window};

// ── Temporal Classifier ──────────────────────────────────────────

/// Where a window sits relative to a fixed `now`. For any (window, now)
/// pair exactly one phase applies: PAST is `end < now`, FUTURE is
/// `start > now`, and everything left over is CURRENT
/// (`start <= now <= end`, endpoints included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Past,
    Current,
    Future,
}

pub fn phase(window: &Window, now: Ms) -> Phase {
    if window.contains(now) {
        Phase::Current
    } else if window.end < now {
        Phase::Past
    } else {
        Phase::Future
    }
}

/// Listing filter. Temporal variants select by [`phase`], status variants
/// by [`BookingStatus`]; one `matches` keyed by the filter replaces the
/// per-(role, filter) query zoo a naive port would grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl StateFilter {
    pub fn matches(&self, booking: &Booking, now: Ms) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Current => phase(&booking.window, now) == Phase::Current,
            StateFilter::Past => phase(&booking.window, now) == Phase::Past,
            StateFilter::Future => phase(&booking.window, now) == Phase::Future,
            StateFilter::Waiting => booking.status == BookingStatus::Waiting,
            StateFilter::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookingId, ItemId, UserId};

    const H: Ms = 3_600_000;

    fn booking(start: Ms, end: Ms, status: BookingStatus) -> Booking {
        Booking {
            id: BookingId::new(),
            item_id: ItemId::new(),
            booker_id: UserId::new(),
            window: Window::new(start, end),
            status,
        }
    }

    #[test]
    fn phase_partition() {
        let w = Window::new(10 * H, 12 * H);
        assert_eq!(phase(&w, 9 * H), Phase::Future);
        assert_eq!(phase(&w, 10 * H), Phase::Current); // start boundary
        assert_eq!(phase(&w, 11 * H), Phase::Current);
        assert_eq!(phase(&w, 12 * H), Phase::Current); // end boundary
        assert_eq!(phase(&w, 12 * H + 1), Phase::Past);
    }

    #[test]
    fn phase_is_exclusive_and_exhaustive() {
        let w = Window::new(100, 200);
        for now in [0, 99, 100, 101, 150, 199, 200, 201, 500] {
            let hits = [Phase::Past, Phase::Current, Phase::Future]
                .iter()
                .filter(|&&p| phase(&w, now) == p)
                .count();
            assert_eq!(hits, 1, "now={now}");
        }
    }

    #[test]
    fn current_agrees_with_window_containment() {
        let w = Window::new(100, 200);
        for now in [0, 99, 100, 101, 150, 199, 200, 201, 500] {
            assert_eq!(phase(&w, now) == Phase::Current, w.contains(now), "now={now}");
        }
    }

    #[test]
    fn all_matches_everything() {
        let b = booking(0, 1, BookingStatus::Rejected);
        assert!(StateFilter::All.matches(&b, 999));
    }

    #[test]
    fn temporal_filters_ignore_status() {
        // A rejected booking in the past is still PAST.
        let b = booking(100, 200, BookingStatus::Rejected);
        assert!(StateFilter::Past.matches(&b, 300));
        assert!(!StateFilter::Future.matches(&b, 300));
        assert!(!StateFilter::Current.matches(&b, 300));
    }

    #[test]
    fn status_filters_ignore_time() {
        let waiting = booking(100, 200, BookingStatus::Waiting);
        let rejected = booking(100, 200, BookingStatus::Rejected);
        let approved = booking(100, 200, BookingStatus::Approved);
        for now in [0, 150, 999] {
            assert!(StateFilter::Waiting.matches(&waiting, now));
            assert!(!StateFilter::Waiting.matches(&rejected, now));
            assert!(StateFilter::Rejected.matches(&rejected, now));
            assert!(!StateFilter::Rejected.matches(&approved, now));
        }
    }

    #[test]
    fn current_includes_both_endpoints() {
        let b = booking(100, 200, BookingStatus::Approved);
        assert!(StateFilter::Current.matches(&b, 100));
        assert!(StateFilter::Current.matches(&b, 200));
        assert!(StateFilter::Past.matches(&b, 201));
        assert!(StateFilter::Future.matches(&b, 99));
    }
}
