//! Hotel stores: rooms, reservations and service requests.

use oasis_core::types::{Priority, Reservation, ReservationStatus, Room, RoomStatus, ServiceRequest};
use oasis_core::{count_where, ratio, tally, EntityStore, Ratio, Tally};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct HotelState {
    pub rooms: EntityStore<Room>,
    pub reservations: EntityStore<Reservation>,
    pub requests: EntityStore<ServiceRequest>,
}

/// Header counts for the hotel screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelSummary {
    pub occupancy: Ratio,
    pub rooms_by_status: Vec<Tally<RoomStatus>>,
    pub reservations_by_status: Vec<Tally<ReservationStatus>>,
    pub open_requests: usize,
    pub urgent_requests: usize,
}

impl HotelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputed from the stores on every call.
    pub fn summary(&self) -> HotelSummary {
        let requests = self.requests.find_all();
        HotelSummary {
            occupancy: ratio(self.rooms.find_all(), Room::is_occupied),
            rooms_by_status: tally(self.rooms.find_all()),
            reservations_by_status: tally(self.reservations.find_all()),
            open_requests: count_where(requests, ServiceRequest::is_open),
            urgent_requests: count_where(requests, |r| {
                r.is_open() && r.priority == Priority::Urgent
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oasis_core::types::{RequestStatus, RoomDraft, ServiceRequestDraft, ServiceType};
    use oasis_core::Money;

    fn room(number: &str) -> RoomDraft {
        RoomDraft {
            number: number.to_string(),
            room_type: "Standard".to_string(),
            price: Money::from_units(25_000),
            capacity: 2,
            floor: "1er".to_string(),
            amenities: Vec::new(),
        }
    }

    #[test]
    fn test_empty_summary() {
        let summary = HotelState::new().summary();
        assert_eq!(summary.occupancy, Ratio { count: 0, total: 0 });
        assert_eq!(summary.rooms_by_status.len(), 4);
        assert_eq!(summary.open_requests, 0);
    }

    #[test]
    fn test_summary_tracks_stores() {
        let mut hotel = HotelState::new();
        let first = hotel.rooms.insert_with(|id| Room::new(id, room("101"))).id;
        hotel.rooms.insert_with(|id| Room::new(id, room("102")));
        hotel.rooms.transition(first, RoomStatus::Occupied);

        let request = hotel
            .requests
            .insert_with(|id| {
                ServiceRequest::new(
                    id,
                    ServiceRequestDraft {
                        room_number: "101".to_string(),
                        service_type: ServiceType::Maintenance,
                        description: "Air conditioning broken".to_string(),
                        priority: Priority::Urgent,
                    },
                    chrono::Utc::now(),
                )
            })
            .id;

        let summary = hotel.summary();
        assert_eq!(summary.occupancy.to_string(), "1/2");
        assert_eq!(summary.open_requests, 1);
        assert_eq!(summary.urgent_requests, 1);

        hotel.requests.transition(request, RequestStatus::Completed);
        let summary = hotel.summary();
        assert_eq!(summary.open_requests, 0);
        assert_eq!(summary.urgent_requests, 0);
    }
}
