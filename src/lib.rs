//! Reservation lifecycle and access-control engine for shareable items.
//!
//! Users list items; other users reserve them for time windows. This
//! crate is the part with real invariants: how a booking request is
//! created, approved or rejected, queried, and later used to decide who
//! may leave feedback on an item. Accounts, the item catalog, and the
//! backing store are collaborators injected through traits; the engine
//! itself keeps no state between calls and mandates no wire format.
//!
//! ```
//! use lendly::{Engine, StateFilter};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), lendly::EngineError> {
//! let (engine, backend) = Engine::in_memory();
//! let owner = backend.add_user("alice");
//! let renter = backend.add_user("bob");
//! let drill = backend.add_item(owner, "drill", true);
//!
//! let view = engine.request_booking(renter, drill, 1_000, 2_000).await?;
//! engine.decide_booking(owner, view.booking.id, true).await?;
//!
//! let mine = engine.bookings_for_user(renter, StateFilter::All).await?;
//! assert_eq!(mine.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod engine;
pub mod model;
pub mod observability;

pub use clock::{ManualClock, SystemClock, TimeSource};
pub use engine::{
    BookingStore, CasOutcome, Engine, EngineError, Entity, InMemoryBackend, ItemCatalog, Phase,
    StateFilter, StoreError, UserDirectory, phase,
};
pub use model::{
    Booking, BookingId, BookingStatus, BookingView, ItemId, ItemRef, Ms, ScheduleSummary, UserId,
    UserRef, Window,
};
