use ulid::Ulid;

use crate::model::BookingId;

/// Which kind of entity a `NotFound` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Item,
    Booking,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Entity::User => "user",
            Entity::Item => "item",
            Entity::Booking => "booking",
        })
    }
}

/// Business failures of the reservation engine. All four kinds are
/// request-shape or authorization faults — local, never retried. `Store`
/// is the separate lane for unexpected collaborator failures.
#[derive(Debug)]
pub enum EngineError {
    /// Referenced user/item/booking does not exist.
    NotFound(Entity, Ulid),
    /// Violates a business precondition (self-booking, unavailable item,
    /// bad date ordering, booking already decided).
    InvalidRequest(&'static str),
    /// Caller lacks the required relationship to the booking or item.
    Forbidden(&'static str),
    /// Reserved for overlap detection; not raised by the current rules.
    Conflict(BookingId),
    /// Infrastructure failure from a collaborator.
    Store(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound(entity, id) => write!(f, "{entity} not found: {id}"),
            EngineError::InvalidRequest(msg) => write!(f, "invalid request: {msg}"),
            EngineError::Forbidden(msg) => write!(f, "forbidden: {msg}"),
            EngineError::Conflict(id) => write!(f, "conflict with booking: {id}"),
            EngineError::Store(e) => write!(f, "store error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    #[test]
    fn display_formats() {
        let id = UserId::new();
        let e = EngineError::NotFound(Entity::User, id.0);
        assert_eq!(e.to_string(), format!("user not found: {id}"));

        let e = EngineError::InvalidRequest("booking already decided");
        assert_eq!(e.to_string(), "invalid request: booking already decided");

        let e = EngineError::Forbidden("only the item owner may decide a booking");
        assert!(e.to_string().starts_with("forbidden: "));
    }
}
