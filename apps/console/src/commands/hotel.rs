//! # Hotel Commands
//!
//! Rooms, reservations and service requests.
//!
//! ## Reservation Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front desk fills the booking form                                     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  create_reservation(hotel, config, input)                              │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. checkOut after checkIn (reported first)                    │    │
//! │  │  2. client, phone, email, room, dates, guests                  │    │
//! │  │  3. total = nights × configured nightly rate                   │    │
//! │  │  4. append with status "pending"                               │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  pending → confirmed → checked-in → checked-out   (any order allowed)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use oasis_core::types::{
    Priority, RequestStatus, Reservation, ReservationDraft, ReservationStatus, Room, RoomDraft,
    RoomStatus, ServiceRequest, ServiceRequestDraft, ServiceType,
};
use oasis_core::{sort_by_rank, Criterion, EntityId, FilterView, FormInput};
use tracing::debug;

use super::{applied, created, delete_from, read_form, search_text, set_status_in};
use super::{CommandResponse, CommandResult};
use crate::error::ApiError;
use crate::state::{ConfigState, HotelState};

// =============================================================================
// Rooms
// =============================================================================

/// Room list filters.
#[derive(Debug, Clone, Default)]
pub struct RoomQuery {
    pub status: Criterion<RoomStatus>,
    /// Room types are free text ("Standard", "Suite").
    pub room_type: Criterion<String>,
    pub search: String,
}

pub fn create_room(hotel: &mut HotelState, input: &FormInput) -> CommandResult<Room> {
    let draft = read_form(input, &RoomDraft::rules(), RoomDraft::from_form)?;
    let room = hotel.rooms.insert_with(|id| Room::new(id, draft));
    Ok(created(room))
}

/// Replaces every form field; status is left alone.
pub fn edit_room(
    hotel: &mut HotelState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<Room>> {
    let draft = read_form(input, &RoomDraft::rules(), RoomDraft::from_form)?;
    let room = hotel.rooms.update(id, draft.into()).cloned();
    Ok(applied(room, id, "Updated"))
}

pub fn delete_room(hotel: &mut HotelState, id: EntityId) -> CommandResponse<Option<Room>> {
    delete_from(&mut hotel.rooms, id)
}

pub fn set_room_status(
    hotel: &mut HotelState,
    id: EntityId,
    status: RoomStatus,
) -> CommandResponse<Option<Room>> {
    set_status_in(&mut hotel.rooms, id, status)
}

pub fn list_rooms(hotel: &HotelState, query: &RoomQuery) -> Result<Vec<Room>, ApiError> {
    let search = search_text(&query.search)?;
    debug!(status = %query.status, search = %search, "list_rooms command");

    let rooms = FilterView::new()
        .by(|r: &Room| r.status, query.status)
        .by(|r: &Room| r.room_type.clone(), query.room_type.clone())
        .search(&search)
        .apply(hotel.rooms.find_all())
        .into_iter()
        .cloned()
        .collect();
    Ok(rooms)
}

// =============================================================================
// Reservations
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ReservationQuery {
    pub status: Criterion<ReservationStatus>,
    pub search: String,
}

/// Books a stay priced at the configured nightly rate.
pub fn create_reservation(
    hotel: &mut HotelState,
    config: &ConfigState,
    input: &FormInput,
) -> CommandResult<Reservation> {
    let draft = read_form(input, &ReservationDraft::rules(), ReservationDraft::from_form)?;
    let reservation = hotel
        .reservations
        .insert_with(|id| Reservation::new(id, draft, config.nightly_rate));
    debug!(
        id = %reservation.id,
        nights = reservation.nights(),
        total = %config.format_amount(reservation.total_price),
        "Reservation priced"
    );
    Ok(created(reservation))
}

/// Re-prices the stay from the edited dates.
pub fn edit_reservation(
    hotel: &mut HotelState,
    config: &ConfigState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<Reservation>> {
    let draft = read_form(input, &ReservationDraft::rules(), ReservationDraft::from_form)?;
    let reservation = hotel
        .reservations
        .update(id, draft.into_patch(config.nightly_rate))
        .cloned();
    Ok(applied(reservation, id, "Updated"))
}

pub fn delete_reservation(
    hotel: &mut HotelState,
    id: EntityId,
) -> CommandResponse<Option<Reservation>> {
    delete_from(&mut hotel.reservations, id)
}

pub fn set_reservation_status(
    hotel: &mut HotelState,
    id: EntityId,
    status: ReservationStatus,
) -> CommandResponse<Option<Reservation>> {
    set_status_in(&mut hotel.reservations, id, status)
}

pub fn list_reservations(
    hotel: &HotelState,
    query: &ReservationQuery,
) -> Result<Vec<Reservation>, ApiError> {
    let search = search_text(&query.search)?;
    Ok(FilterView::new()
        .by(|r: &Reservation| r.status, query.status)
        .search(&search)
        .apply(hotel.reservations.find_all())
        .into_iter()
        .cloned()
        .collect())
}

// =============================================================================
// Service Requests
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ServiceRequestQuery {
    pub service_type: Criterion<ServiceType>,
    pub status: Criterion<RequestStatus>,
    pub search: String,
}

pub fn create_service_request(
    hotel: &mut HotelState,
    input: &FormInput,
) -> CommandResult<ServiceRequest> {
    let draft = read_form(input, &ServiceRequestDraft::rules(), ServiceRequestDraft::from_form)?;
    let now = Utc::now();
    let request = hotel
        .requests
        .insert_with(|id| ServiceRequest::new(id, draft, now));
    Ok(created(request))
}

pub fn edit_service_request(
    hotel: &mut HotelState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<ServiceRequest>> {
    let draft = read_form(input, &ServiceRequestDraft::rules(), ServiceRequestDraft::from_form)?;
    let request = hotel.requests.update(id, draft.into()).cloned();
    Ok(applied(request, id, "Updated"))
}

pub fn delete_service_request(
    hotel: &mut HotelState,
    id: EntityId,
) -> CommandResponse<Option<ServiceRequest>> {
    delete_from(&mut hotel.requests, id)
}

/// Entering "completed" stamps `completedAt`; any other status clears it.
pub fn set_service_request_status(
    hotel: &mut HotelState,
    id: EntityId,
    status: RequestStatus,
) -> CommandResponse<Option<ServiceRequest>> {
    set_status_in(&mut hotel.requests, id, status)
}

/// Filtered requests, most urgent first. Equal priorities keep store order.
pub fn list_service_requests(
    hotel: &HotelState,
    query: &ServiceRequestQuery,
) -> Result<Vec<ServiceRequest>, ApiError> {
    let search = search_text(&query.search)?;
    let matching: Vec<ServiceRequest> = FilterView::new()
        .by(|r: &ServiceRequest| r.service_type, query.service_type)
        .by(|r: &ServiceRequest| r.status, query.status)
        .search(&search)
        .apply(hotel.requests.find_all())
        .into_iter()
        .cloned()
        .collect();

    Ok(sort_by_rank(matching, &Priority::urgency_table(), |r| r.priority))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::commands::NoticeLevel;
    use oasis_core::Money;

    fn room_input(number: &str, room_type: &str) -> FormInput {
        FormInput::new()
            .text("number", number)
            .text("type", room_type)
            .text("price", "25 000")
            .number("capacity", 2)
            .text("floor", "1er")
            .text("amenities", "WiFi, TV, Climatisation")
    }

    fn reservation_input(check_in: &str, check_out: &str) -> FormInput {
        FormInput::new()
            .text("clientName", "Aminata Traoré")
            .text("clientPhone", "+225 05 98 76 54 32")
            .text("roomNumber", "201")
            .text("checkIn", check_in)
            .text("checkOut", check_out)
            .number("guests", 1)
    }

    fn request_input(priority: &str, description: &str) -> FormInput {
        FormInput::new()
            .text("roomNumber", "102")
            .text("serviceType", "housekeeping")
            .text("description", description)
            .text("priority", priority)
    }

    #[test]
    fn test_room_scenario_filter_by_status() {
        let mut hotel = HotelState::new();
        let room = create_room(&mut hotel, &room_input("101", "Standard"))
            .unwrap()
            .data;
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.amenities, vec!["WiFi", "TV", "Climatisation"]);

        set_room_status(&mut hotel, room.id, RoomStatus::Occupied);

        let available = RoomQuery {
            status: Criterion::Only(RoomStatus::Available),
            ..RoomQuery::default()
        };
        assert!(list_rooms(&hotel, &available).unwrap().is_empty());

        let occupied = RoomQuery {
            status: Criterion::Only(RoomStatus::Occupied),
            ..RoomQuery::default()
        };
        let listed = list_rooms(&hotel, &occupied).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].number, "101");
    }

    #[test]
    fn test_list_rooms_by_type_and_search() {
        let mut hotel = HotelState::new();
        create_room(&mut hotel, &room_input("101", "Standard")).unwrap();
        create_room(&mut hotel, &room_input("201", "Deluxe")).unwrap();
        create_room(&mut hotel, &room_input("301", "Suite")).unwrap();

        let all = list_rooms(&hotel, &RoomQuery::default()).unwrap();
        let numbers: Vec<_> = all.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, vec!["101", "201", "301"]);

        let suites = RoomQuery {
            room_type: Criterion::Only("Suite".to_string()),
            ..RoomQuery::default()
        };
        assert_eq!(list_rooms(&hotel, &suites).unwrap()[0].number, "301");

        let search = RoomQuery {
            search: "DELUXE".to_string(),
            ..RoomQuery::default()
        };
        assert_eq!(list_rooms(&hotel, &search).unwrap()[0].number, "201");
    }

    #[test]
    fn test_invalid_room_leaves_store_untouched() {
        let mut hotel = HotelState::new();
        let input = room_input("101", "Standard").text("price", "beaucoup");

        let err = create_room(&mut hotel, &input).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("price"));
        assert!(hotel.rooms.is_empty());
    }

    #[test]
    fn test_edit_keeps_status() {
        let mut hotel = HotelState::new();
        let room = create_room(&mut hotel, &room_input("101", "Standard"))
            .unwrap()
            .data;
        set_room_status(&mut hotel, room.id, RoomStatus::Cleaning);

        let edited = edit_room(&mut hotel, room.id, &room_input("101", "Suite"))
            .unwrap()
            .data
            .unwrap();
        assert_eq!(edited.room_type, "Suite");
        assert_eq!(edited.status, RoomStatus::Cleaning);
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let mut hotel = HotelState::new();
        create_room(&mut hotel, &room_input("101", "Standard")).unwrap();
        let missing = EntityId::new(42);

        let response = edit_room(&mut hotel, missing, &room_input("999", "Suite")).unwrap();
        assert!(response.data.is_none());
        assert_eq!(response.notice.level, NoticeLevel::Info);

        assert!(delete_room(&mut hotel, missing).data.is_none());
        assert!(set_room_status(&mut hotel, missing, RoomStatus::Maintenance)
            .data
            .is_none());
        assert_eq!(hotel.rooms.len(), 1);
    }

    #[test]
    fn test_delete_twice() {
        let mut hotel = HotelState::new();
        let id = create_room(&mut hotel, &room_input("101", "Standard"))
            .unwrap()
            .data
            .id;

        let first = delete_room(&mut hotel, id);
        assert_eq!(first.notice.level, NoticeLevel::Success);
        assert!(first.data.is_some());

        let second = delete_room(&mut hotel, id);
        assert!(second.data.is_none());
        assert!(hotel.rooms.is_empty());
    }

    #[test]
    fn test_reservation_priced_from_config() {
        let mut hotel = HotelState::new();
        let mut config = ConfigState::default();
        config.nightly_rate = Money::from_units(30_000);

        let reservation = create_reservation(
            &mut hotel,
            &config,
            &reservation_input("2025-10-18", "2025-10-22"),
        )
        .unwrap()
        .data;
        assert_eq!(reservation.nights(), 4);
        assert_eq!(reservation.total_price, Money::from_units(120_000));
        assert_eq!(reservation.status, ReservationStatus::Pending);

        let edited = edit_reservation(
            &mut hotel,
            &config,
            reservation.id,
            &reservation_input("2025-10-18", "2025-10-19"),
        )
        .unwrap()
        .data
        .unwrap();
        assert_eq!(edited.total_price, Money::from_units(30_000));
    }

    #[test]
    fn test_reservation_bad_dates_name_check_out() {
        let mut hotel = HotelState::new();
        let config = ConfigState::default();
        let input = reservation_input("2025-10-22", "2025-10-22").text("clientName", "");

        let err = create_reservation(&mut hotel, &config, &input).unwrap_err();
        assert_eq!(err.field.as_deref(), Some("checkOut"));
        assert!(hotel.reservations.is_empty());
    }

    #[test]
    fn test_reservation_search_by_client() {
        let mut hotel = HotelState::new();
        let config = ConfigState::default();
        create_reservation(&mut hotel, &config, &reservation_input("2025-10-18", "2025-10-20"))
            .unwrap();

        let query = ReservationQuery {
            search: "aminata".to_string(),
            ..ReservationQuery::default()
        };
        assert_eq!(list_reservations(&hotel, &query).unwrap().len(), 1);

        let query = ReservationQuery {
            status: Criterion::Only(ReservationStatus::CheckedIn),
            ..ReservationQuery::default()
        };
        assert!(list_reservations(&hotel, &query).unwrap().is_empty());
    }

    #[test]
    fn test_service_requests_sorted_by_urgency() {
        let mut hotel = HotelState::new();
        create_service_request(&mut hotel, &request_input("low", "Extra towels")).unwrap();
        create_service_request(&mut hotel, &request_input("urgent", "Water leak")).unwrap();
        create_service_request(&mut hotel, &request_input("low", "Extra pillows")).unwrap();

        let listed = list_service_requests(&hotel, &ServiceRequestQuery::default()).unwrap();
        let ids: Vec<u64> = listed.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 1, 3]);
    }

    #[test]
    fn test_service_request_completion_stamp() {
        let mut hotel = HotelState::new();
        let id = create_service_request(&mut hotel, &request_input("high", "Fix the lamp"))
            .unwrap()
            .data
            .id;

        let done = set_service_request_status(&mut hotel, id, RequestStatus::Completed)
            .data
            .unwrap();
        assert!(done.completed_at.is_some());

        let reopened = set_service_request_status(&mut hotel, id, RequestStatus::InProgress)
            .data
            .unwrap();
        assert!(reopened.completed_at.is_none());
    }

    #[test]
    fn test_service_request_type_filter() {
        let mut hotel = HotelState::new();
        create_service_request(&mut hotel, &request_input("medium", "Change the sheets")).unwrap();
        let laundry = request_input("medium", "Press two shirts").text("serviceType", "laundry");
        create_service_request(&mut hotel, &laundry).unwrap();

        let query = ServiceRequestQuery {
            service_type: Criterion::Only(ServiceType::Laundry),
            ..ServiceRequestQuery::default()
        };
        let listed = list_service_requests(&hotel, &query).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "Press two shirts");
    }
}
