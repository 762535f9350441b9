//! # Status Lifecycle
//!
//! Applies status changes and the timestamps derived from them.
//!
//! ## Transition Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Service Request Lifecycle (example)                        │
//! │                                                                         │
//! │    ┌─────────┐       ┌─────────────┐       ┌───────────┐               │
//! │    │ pending │◄─────►│ in-progress │◄─────►│ completed │               │
//! │    └────┬────┘       └──────┬──────┘       └─────┬─────┘               │
//! │         │                   │                    │ completed_at = now  │
//! │         └──────────►┌───────▼───┐◄───────────────┘                     │
//! │                     │ cancelled │          (leaving clears it)         │
//! │                     └───────────┘                                      │
//! │                                                                         │
//! │  Every status is reachable from every other status. Staff pick the     │
//! │  new status from a selector; nothing is terminal.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A kind with a derived timestamp sets it to `now` when it enters the
//! timestamped status (re-entering restamps it) and clears it on any other
//! status. [`stamp_if`] is the shared helper kinds use for that.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::store::{Entity, EntityId, EntityStore};
use crate::types::Token;

// =============================================================================
// Lifecycle Trait
// =============================================================================

/// An entity whose status is drawn from a finite set of tokens.
pub trait Lifecycle: Entity {
    /// The kind's statuses. `Default` is the status assigned at creation.
    type Status: Token + Default;

    fn status(&self) -> Self::Status;

    /// Writes `status` and recomputes every field derived from it.
    fn enter_status(&mut self, status: Self::Status, now: DateTime<Utc>);
}

/// Derived timestamp value for a kind: `Some(now)` only while `status` is
/// the `target` status.
#[inline]
pub fn stamp_if<S: PartialEq>(status: S, target: S, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (status == target).then_some(now)
}

// =============================================================================
// Apply Status
// =============================================================================

/// Sets the entity's status, stamping derived timestamps with the current
/// time. Never fails.
pub fn apply_status<E: Lifecycle>(entity: &mut E, status: E::Status) -> &mut E {
    apply_status_at(entity, status, Utc::now())
}

/// Same as [`apply_status`] with an explicit clock reading.
pub fn apply_status_at<E: Lifecycle>(
    entity: &mut E,
    status: E::Status,
    now: DateTime<Utc>,
) -> &mut E {
    let previous = entity.status();
    entity.enter_status(status, now);
    debug!(
        kind = E::KIND,
        id = %entity.id(),
        from = %previous,
        to = %status,
        "Status changed"
    );
    entity
}

impl<E: Lifecycle> EntityStore<E> {
    /// Applies a status change to the stored entity with `id`.
    ///
    /// Unknown ids are a no-op and return `None`.
    pub fn transition(&mut self, id: EntityId, status: E::Status) -> Option<&E> {
        self.transition_at(id, status, Utc::now())
    }

    /// Same as [`EntityStore::transition`] with an explicit clock reading.
    pub fn transition_at(
        &mut self,
        id: EntityId,
        status: E::Status,
        now: DateTime<Utc>,
    ) -> Option<&E> {
        let Some(entity) = self.get_mut(id) else {
            debug!(kind = E::KIND, id = %id, "Status change skipped, entity not found");
            return None;
        };
        Some(&*apply_status_at(entity, status, now))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::hotel::{RequestStatus, ServiceRequest};
    use crate::types::restaurant::{DiningTable, TableStatus};
    use chrono::TimeZone;

    fn clock(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 23, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_entering_completed_sets_timestamp() {
        let mut request = ServiceRequest::sample(EntityId::new(1), clock(8));
        assert!(request.completed_at.is_none());

        apply_status_at(&mut request, RequestStatus::Completed, clock(9));
        assert_eq!(request.status, RequestStatus::Completed);
        assert_eq!(request.completed_at, Some(clock(9)));
    }

    #[test]
    fn test_leaving_completed_clears_timestamp() {
        let mut request = ServiceRequest::sample(EntityId::new(1), clock(8));
        apply_status_at(&mut request, RequestStatus::Completed, clock(9));
        apply_status_at(&mut request, RequestStatus::InProgress, clock(10));

        assert_eq!(request.status, RequestStatus::InProgress);
        assert!(request.completed_at.is_none());
    }

    #[test]
    fn test_any_status_reachable_from_any_other() {
        let mut request = ServiceRequest::sample(EntityId::new(1), clock(8));
        for from in RequestStatus::ALL {
            for to in RequestStatus::ALL {
                apply_status_at(&mut request, *from, clock(9));
                apply_status_at(&mut request, *to, clock(10));
                assert_eq!(request.status, *to);
                assert_eq!(
                    request.completed_at.is_some(),
                    *to == RequestStatus::Completed
                );
            }
        }
    }

    #[test]
    fn test_re_entering_restamps() {
        let mut request = ServiceRequest::sample(EntityId::new(1), clock(8));
        apply_status_at(&mut request, RequestStatus::Completed, clock(9));
        apply_status_at(&mut request, RequestStatus::Completed, clock(11));
        assert_eq!(request.completed_at, Some(clock(11)));
    }

    #[test]
    fn test_store_transition() {
        let mut store = EntityStore::new();
        let id = store
            .insert_with(|id| ServiceRequest::sample(id, clock(8)))
            .id;

        let updated = store
            .transition_at(id, RequestStatus::Completed, clock(12))
            .unwrap();
        assert_eq!(updated.completed_at, Some(clock(12)));

        assert!(store
            .transition_at(EntityId::new(99), RequestStatus::Cancelled, clock(12))
            .is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_freeing_table_clears_order_and_occupancy() {
        let mut table = DiningTable::sample(EntityId::new(1), 4);
        apply_status_at(&mut table, TableStatus::Occupied, clock(12));
        assert_eq!(table.occupied_since, Some(clock(12)));

        apply_status_at(&mut table, TableStatus::Free, clock(13));
        assert!(table.occupied_since.is_none());
        assert!(table.current_order.is_none());
    }

    #[test]
    fn test_stamp_if() {
        assert_eq!(stamp_if(1, 1, clock(5)), Some(clock(5)));
        assert_eq!(stamp_if(1, 2, clock(5)), None);
    }
}
