use tracing::debug;

use crate::model::*;
use crate::observability;

use super::temporal::StateFilter;
use super::{Engine, EngineError};

impl Engine {
    /// Fetch a single booking. Visible only to the booker and the item's
    /// owner. Read-only.
    pub async fn get_booking(
        &self,
        viewer: UserId,
        booking_id: BookingId,
    ) -> Result<BookingView, EngineError> {
        debug!(%viewer, %booking_id, "get booking");
        metrics::counter!(observability::BOOKING_QUERIES_TOTAL, "op" => "get").increment(1);

        let booking = self.require_booking(booking_id).await?;
        let item = self.require_item(booking.item_id).await?;

        if booking.booker_id != viewer && item.owner_id != viewer {
            return Err(EngineError::Forbidden(
                "only the booker or the item owner may view a booking",
            ));
        }

        let booker = self.require_user(booking.booker_id).await?;
        Ok(BookingView {
            booking,
            booker,
            item,
        })
    }

    /// Bookings made by `user`, filtered and sorted by start descending.
    pub async fn bookings_for_user(
        &self,
        user: UserId,
        filter: StateFilter,
    ) -> Result<Vec<BookingView>, EngineError> {
        debug!(%user, ?filter, "list bookings by booker");
        metrics::counter!(observability::BOOKING_QUERIES_TOTAL, "op" => "list_booker").increment(1);

        self.require_user(user).await?;
        // One clock sample drives every predicate in this call.
        let now = self.clock.now();
        let rows = self.store.by_booker(user, filter, now).await?;
        self.assemble_all(rows).await
    }

    /// Bookings on items owned by `user`, filtered and sorted by start
    /// descending.
    pub async fn bookings_for_owner(
        &self,
        user: UserId,
        filter: StateFilter,
    ) -> Result<Vec<BookingView>, EngineError> {
        debug!(%user, ?filter, "list bookings by owner");
        metrics::counter!(observability::BOOKING_QUERIES_TOTAL, "op" => "list_owner").increment(1);

        self.require_user(user).await?;
        let now = self.clock.now();
        let rows = self.store.by_owner(user, filter, now).await?;
        self.assemble_all(rows).await
    }

    async fn assemble_all(&self, rows: Vec<Booking>) -> Result<Vec<BookingView>, EngineError> {
        let mut views = Vec::with_capacity(rows.len());
        for booking in rows {
            views.push(self.assemble_view(booking).await?);
        }
        Ok(views)
    }
}
