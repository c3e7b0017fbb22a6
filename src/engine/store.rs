use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::model::*;

use super::temporal::StateFilter;

/// Infrastructure failure inside a store or collaborator. Business rules
/// never produce this; it maps to the engine's generic internal lane.
#[derive(Debug)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for StoreError {}

pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of the conditional status update. The read-status-then-write
/// sequence must be atomic per row, so the store reports what it saw
/// instead of letting the engine re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CasOutcome {
    /// Status matched `expect`; row now carries the new status.
    Updated(Booking),
    /// No such booking.
    Missing,
    /// Status no longer matched; nothing written.
    StatusWas(BookingStatus),
}

// ── Collaborator contracts ───────────────────────────────────────

/// Read-only view of the user account system.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, id: UserId) -> StoreResult<Option<UserRef>>;
}

/// Read-only view of the item catalog.
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    async fn get_item(&self, id: ItemId) -> StoreResult<Option<ItemRef>>;
}

/// Persistence contract for bookings: row CRUD plus the filtered query
/// shapes the engine needs. Listing results come back sorted by window
/// start descending, ties in insertion order.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn insert(&self, booking: Booking) -> StoreResult<()>;

    async fn get(&self, id: BookingId) -> StoreResult<Option<Booking>>;

    /// Atomically set status iff the current status equals `expect`.
    async fn set_status_if(
        &self,
        id: BookingId,
        expect: BookingStatus,
        to: BookingStatus,
    ) -> StoreResult<CasOutcome>;

    /// Bookings made by `booker`, narrowed by `filter` at `now`.
    async fn by_booker(
        &self,
        booker: UserId,
        filter: StateFilter,
        now: Ms,
    ) -> StoreResult<Vec<Booking>>;

    /// Bookings on items owned by `owner`, narrowed by `filter` at `now`.
    async fn by_owner(
        &self,
        owner: UserId,
        filter: StateFilter,
        now: Ms,
    ) -> StoreResult<Vec<Booking>>;

    /// Approved booking on `item` with the greatest `end` among `end < now`.
    async fn last_completed(&self, item: ItemId, now: Ms) -> StoreResult<Option<Booking>>;

    /// Approved booking on `item` with the smallest `start` among `start > now`.
    async fn next_upcoming(&self, item: ItemId, now: Ms) -> StoreResult<Option<Booking>>;

    /// Whether `booker` has an approved booking on `item` with `end <= now`.
    async fn completed_exists(&self, booker: UserId, item: ItemId, now: Ms) -> StoreResult<bool>;
}

// ── In-memory backend ────────────────────────────────────────────

/// DashMap-backed implementation of all three contracts in one struct,
/// so the owner join in `by_owner` stays inside the store the same way
/// a SQL backend would join the item table. Serves as the test fixture
/// and as a reference for real backends.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    users: DashMap<UserId, UserRef>,
    items: DashMap<ItemId, ItemRef>,
    /// Booking rows tagged with an insertion sequence number; the tag is
    /// the tie-breaker that makes listing order deterministic.
    bookings: DashMap<BookingId, (u64, Booking)>,
    seq: AtomicU64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seeding (the account/catalog CRUD proper lives elsewhere) ──

    pub fn add_user(&self, name: &str) -> UserId {
        let id = UserId::new();
        self.users.insert(id, UserRef { id, name: name.into() });
        id
    }

    pub fn add_item(&self, owner_id: UserId, name: &str, available: bool) -> ItemId {
        let id = ItemId::new();
        self.items.insert(
            id,
            ItemRef {
                id,
                name: name.into(),
                owner_id,
                available,
            },
        );
        id
    }

    pub fn set_item_available(&self, id: ItemId, available: bool) {
        if let Some(mut item) = self.items.get_mut(&id) {
            item.available = available;
        }
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn snapshot(&self) -> Vec<(u64, Booking)> {
        self.bookings.iter().map(|e| e.value().clone()).collect()
    }

    /// Sort by start descending; equal starts keep insertion order.
    fn sort_listing(rows: &mut [(u64, Booking)]) {
        rows.sort_by(|a, b| b.1.window.start.cmp(&a.1.window.start).then(a.0.cmp(&b.0)));
    }

    fn owner_of(&self, item_id: ItemId) -> Option<UserId> {
        self.items.get(&item_id).map(|i| i.owner_id)
    }
}

#[async_trait]
impl UserDirectory for InMemoryBackend {
    async fn get_user(&self, id: UserId) -> StoreResult<Option<UserRef>> {
        Ok(self.users.get(&id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl ItemCatalog for InMemoryBackend {
    async fn get_item(&self, id: ItemId) -> StoreResult<Option<ItemRef>> {
        Ok(self.items.get(&id).map(|e| e.value().clone()))
    }
}

#[async_trait]
impl BookingStore for InMemoryBackend {
    async fn insert(&self, booking: Booking) -> StoreResult<()> {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.bookings.insert(booking.id, (seq, booking));
        Ok(())
    }

    async fn get(&self, id: BookingId) -> StoreResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|e| e.value().1.clone()))
    }

    async fn set_status_if(
        &self,
        id: BookingId,
        expect: BookingStatus,
        to: BookingStatus,
    ) -> StoreResult<CasOutcome> {
        // get_mut holds the row's shard write lock across check-and-set,
        // so two concurrent decisions serialize here.
        match self.bookings.get_mut(&id) {
            None => Ok(CasOutcome::Missing),
            Some(mut entry) => {
                let booking = &mut entry.value_mut().1;
                if booking.status != expect {
                    return Ok(CasOutcome::StatusWas(booking.status));
                }
                booking.status = to;
                Ok(CasOutcome::Updated(booking.clone()))
            }
        }
    }

    async fn by_booker(
        &self,
        booker: UserId,
        filter: StateFilter,
        now: Ms,
    ) -> StoreResult<Vec<Booking>> {
        let mut rows = self.snapshot();
        rows.retain(|(_, b)| b.booker_id == booker && filter.matches(b, now));
        Self::sort_listing(&mut rows);
        Ok(rows.into_iter().map(|(_, b)| b).collect())
    }

    async fn by_owner(
        &self,
        owner: UserId,
        filter: StateFilter,
        now: Ms,
    ) -> StoreResult<Vec<Booking>> {
        let mut rows = self.snapshot();
        rows.retain(|(_, b)| self.owner_of(b.item_id) == Some(owner) && filter.matches(b, now));
        Self::sort_listing(&mut rows);
        Ok(rows.into_iter().map(|(_, b)| b).collect())
    }

    async fn last_completed(&self, item: ItemId, now: Ms) -> StoreResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .map(|e| e.value().1.clone())
            .filter(|b| {
                b.item_id == item && b.status == BookingStatus::Approved && b.window.end < now
            })
            .max_by_key(|b| b.window.end))
    }

    async fn next_upcoming(&self, item: ItemId, now: Ms) -> StoreResult<Option<Booking>> {
        Ok(self
            .bookings
            .iter()
            .map(|e| e.value().1.clone())
            .filter(|b| {
                b.item_id == item && b.status == BookingStatus::Approved && b.window.start > now
            })
            .min_by_key(|b| b.window.start))
    }

    async fn completed_exists(&self, booker: UserId, item: ItemId, now: Ms) -> StoreResult<bool> {
        Ok(self
            .bookings
            .iter()
            .any(|e| {
                let b = &e.value().1;
                b.booker_id == booker && b.item_id == item && b.is_completed(now)
            }))
    }
}
