use tracing::debug;

use crate::model::{ItemId, UserId};
use crate::observability;

use super::{Engine, EngineError};

impl Engine {
    /// Whether `user` has a completed rental of `item`: an approved
    /// booking whose end is at or before now. A booking ending exactly
    /// at now counts. Gates comment creation in the item collaborator;
    /// waiting or rejected bookings never qualify, whatever their dates.
    pub async fn has_completed_rental(
        &self,
        user: UserId,
        item: ItemId,
    ) -> Result<bool, EngineError> {
        debug!(%user, %item, "completed-rental check");
        metrics::counter!(observability::BOOKING_QUERIES_TOTAL, "op" => "eligibility").increment(1);

        let now = self.clock.now();
        Ok(self.store.completed_exists(user, item, now).await?)
    }
}
