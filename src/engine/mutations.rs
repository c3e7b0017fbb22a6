use tracing::info;

use crate::model::*;
use crate::observability;

use super::store::CasOutcome;
use super::{Engine, EngineError, Entity};

impl Engine {
    /// Create a booking request for `item_id` over `[start, end]`.
    ///
    /// Preconditions, checked in order, each failing fast with no row
    /// written: requester exists, item exists, requester is not the
    /// owner, item is available, `end > start`. The new booking starts
    /// in `Waiting`. Overlap with other bookings on the same item is
    /// deliberately not checked here.
    pub async fn request_booking(
        &self,
        requester: UserId,
        item_id: ItemId,
        start: Ms,
        end: Ms,
    ) -> Result<BookingView, EngineError> {
        info!(%requester, %item_id, start, end, "booking requested");

        let booker = self.require_user(requester).await?;
        let item = self.require_item(item_id).await?;

        if item.owner_id == requester {
            return Err(EngineError::InvalidRequest("cannot book your own item"));
        }
        if !item.available {
            return Err(EngineError::InvalidRequest("item is not available"));
        }
        if end <= start {
            return Err(EngineError::InvalidRequest("booking end must be after start"));
        }

        let booking = Booking {
            id: BookingId::new(),
            item_id,
            booker_id: requester,
            window: Window::new(start, end),
            status: BookingStatus::Waiting,
        };
        self.store.insert(booking.clone()).await?;

        metrics::counter!(observability::BOOKINGS_REQUESTED_TOTAL).increment(1);
        info!(booking_id = %booking.id, "booking created");
        Ok(BookingView {
            booking,
            booker,
            item,
        })
    }

    /// Approve or reject a waiting booking. Only the item's owner may
    /// decide, and only while the booking is `Waiting`; the transition is
    /// a single conditional update so concurrent decisions cannot both
    /// succeed. This is the only mutation path after creation.
    pub async fn decide_booking(
        &self,
        actor: UserId,
        booking_id: BookingId,
        approve: bool,
    ) -> Result<BookingView, EngineError> {
        info!(%actor, %booking_id, approve, "booking decision");

        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if item.owner_id != actor {
            return Err(EngineError::Forbidden(
                "only the item owner may decide a booking",
            ));
        }

        let to = if approve {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        let updated = match self
            .store
            .set_status_if(booking_id, BookingStatus::Waiting, to)
            .await?
        {
            CasOutcome::Updated(b) => b,
            CasOutcome::Missing => {
                return Err(EngineError::NotFound(Entity::Booking, booking_id.0));
            }
            CasOutcome::StatusWas(_) => {
                return Err(EngineError::InvalidRequest("booking already decided"));
            }
        };

        let decision = if approve { "approved" } else { "rejected" };
        metrics::counter!(observability::BOOKINGS_DECIDED_TOTAL, "decision" => decision)
            .increment(1);
        info!(%booking_id, status = %updated.status, "booking decided");
        self.assemble_view(updated).await
    }
}
