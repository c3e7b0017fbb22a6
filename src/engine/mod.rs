mod availability;
mod eligibility;
mod error;
mod mutations;
mod queries;
pub mod store;
pub mod temporal;

pub use error::{EngineError, Entity};
pub use store::{
    BookingStore, CasOutcome, InMemoryBackend, ItemCatalog, StoreError, UserDirectory,
};
pub use temporal::{Phase, StateFilter, phase};

use std::sync::Arc;

use crate::clock::{SystemClock, TimeSource};
use crate::model::*;

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e.0)
    }
}

/// The reservation engine: validates and creates bookings, applies the
/// approve/reject transition, and enforces who may see what. Stateless
/// between calls — every operation is a short unit of work over the
/// injected store and read-only collaborators.
pub struct Engine {
    pub(super) store: Arc<dyn BookingStore>,
    pub(super) users: Arc<dyn UserDirectory>,
    pub(super) items: Arc<dyn ItemCatalog>,
    pub(super) clock: Arc<dyn TimeSource>,
}

impl Engine {
    pub fn new(
        store: Arc<dyn BookingStore>,
        users: Arc<dyn UserDirectory>,
        items: Arc<dyn ItemCatalog>,
    ) -> Self {
        Self::with_clock(store, users, items, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn BookingStore>,
        users: Arc<dyn UserDirectory>,
        items: Arc<dyn ItemCatalog>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            store,
            users,
            items,
            clock,
        }
    }

    /// Engine over a fresh [`InMemoryBackend`], which is returned too so
    /// callers can seed users and items.
    pub fn in_memory() -> (Self, Arc<InMemoryBackend>) {
        let backend = Arc::new(InMemoryBackend::new());
        let engine = Self::new(backend.clone(), backend.clone(), backend.clone());
        (engine, backend)
    }

    pub(super) async fn require_user(&self, id: UserId) -> Result<UserRef, EngineError> {
        self.users
            .get_user(id)
            .await?
            .ok_or(EngineError::NotFound(Entity::User, id.0))
    }

    pub(super) async fn require_item(&self, id: ItemId) -> Result<ItemRef, EngineError> {
        self.items
            .get_item(id)
            .await?
            .ok_or(EngineError::NotFound(Entity::Item, id.0))
    }

    pub(super) async fn require_booking(&self, id: BookingId) -> Result<Booking, EngineError> {
        self.store
            .get(id)
            .await?
            .ok_or(EngineError::NotFound(Entity::Booking, id.0))
    }

    /// Join a booking row with its booker and item snapshots.
    pub(super) async fn assemble_view(&self, booking: Booking) -> Result<BookingView, EngineError> {
        let booker = self.require_user(booking.booker_id).await?;
        let item = self.require_item(booking.item_id).await?;
        Ok(BookingView {
            booking,
            booker,
            item,
        })
    }
}
