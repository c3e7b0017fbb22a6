use tracing::debug;

use crate::model::{ItemId, ScheduleSummary, UserId};
use crate::observability;

use super::{Engine, EngineError};

impl Engine {
    /// Owner-only schedule digest for an item: the approved booking with
    /// the greatest end before now (`last`) and the one with the smallest
    /// start after now (`next`).
    ///
    /// For any viewer other than the owner this returns `Ok(None)`
    /// without touching the booking store at all, so booking existence
    /// cannot leak to non-owners through timing.
    pub async fn schedule_summary(
        &self,
        viewer: UserId,
        item_id: ItemId,
    ) -> Result<Option<ScheduleSummary>, EngineError> {
        debug!(%viewer, %item_id, "schedule summary");
        metrics::counter!(observability::BOOKING_QUERIES_TOTAL, "op" => "schedule").increment(1);

        let item = self.require_item(item_id).await?;
        if item.owner_id != viewer {
            return Ok(None);
        }

        let now = self.clock.now();
        let last = self.store.last_completed(item_id, now).await?;
        let next = self.store.next_upcoming(item_id, now).await?;
        Ok(Some(ScheduleSummary { last, next }))
    }
}
