//! Hotel kinds: rooms, reservations and in-stay service requests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lifecycle::{stamp_if, Lifecycle};
use crate::money::Money;
use crate::rank::RankTable;
use crate::store::{Entity, EntityId};
use crate::types::Token;
use crate::validation::{Rule, Rules, Validated, ValidationResult};
use crate::view::Searchable;
use crate::MAX_PARTY_SIZE;

// =============================================================================
// Tokens
// =============================================================================

token_enum! {
    /// Room availability.
    #[derive(Default)]
    RoomStatus as "room status" {
        #[default]
        Available => "available",
        Occupied => "occupied",
        Maintenance => "maintenance",
        Cleaning => "cleaning",
    }
}

token_enum! {
    /// Booking status, from request to departure.
    #[derive(Default)]
    ReservationStatus as "reservation status" {
        #[default]
        Pending => "pending",
        Confirmed => "confirmed",
        CheckedIn => "checked-in",
        CheckedOut => "checked-out",
        Cancelled => "cancelled",
    }
}

token_enum! {
    ServiceType as "service type" {
        RoomService => "room-service",
        Housekeeping => "housekeeping",
        Laundry => "laundry",
        Maintenance => "maintenance",
        Concierge => "concierge",
    }
}

token_enum! {
    /// Urgency of a guest request.
    Priority as "priority" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Urgent => "urgent",
    }
}

token_enum! {
    #[derive(Default)]
    RequestStatus as "request status" {
        #[default]
        Pending => "pending",
        InProgress => "in-progress",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

impl Priority {
    /// Display order for request queues: most urgent first.
    pub fn urgency_table() -> RankTable<Priority> {
        RankTable::new([
            Priority::Urgent,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ])
    }
}

// =============================================================================
// Room
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    pub number: String,
    /// Category label ("Standard", "Deluxe", "Suite", ...).
    pub room_type: String,
    /// Rate per night.
    pub price: Money,
    pub capacity: u32,
    pub floor: String,
    pub status: RoomStatus,
    pub amenities: Vec<String>,
}

/// Room fields as entered in the room form.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    pub number: String,
    pub room_type: String,
    pub price: Money,
    pub capacity: u32,
    pub floor: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomPatch {
    pub number: Option<String>,
    pub room_type: Option<String>,
    pub price: Option<Money>,
    pub capacity: Option<u32>,
    pub floor: Option<String>,
    pub amenities: Option<Vec<String>>,
}

impl RoomDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("number", [Rule::Required, Rule::MaxLength(10)])
            .field("type", [Rule::Required, Rule::MinLength(2)])
            .field("price", [Rule::Required, Rule::Amount])
            .field("capacity", [Rule::Required, Rule::Integer { min: 1, max: 20 }])
            .field("floor", [Rule::Required])
            .field("amenities", [Rule::List])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(RoomDraft {
            number: form.required_text("number")?,
            room_type: form.required_text("type")?,
            price: form.required_amount("price")?,
            capacity: form.required_count("capacity")?,
            floor: form.required_text("floor")?,
            amenities: form.list("amenities"),
        })
    }
}

impl Room {
    /// New rooms start available.
    pub fn new(id: EntityId, draft: RoomDraft) -> Self {
        Room {
            id,
            number: draft.number,
            room_type: draft.room_type,
            price: draft.price,
            capacity: draft.capacity,
            floor: draft.floor,
            status: RoomStatus::default(),
            amenities: draft.amenities,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.status == RoomStatus::Occupied
    }
}

impl From<RoomDraft> for RoomPatch {
    fn from(draft: RoomDraft) -> Self {
        RoomPatch {
            number: Some(draft.number),
            room_type: Some(draft.room_type),
            price: Some(draft.price),
            capacity: Some(draft.capacity),
            floor: Some(draft.floor),
            amenities: Some(draft.amenities),
        }
    }
}

impl Entity for Room {
    const KIND: &'static str = "room";
    type Patch = RoomPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: RoomPatch) {
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(floor) = patch.floor {
            self.floor = floor;
        }
        if let Some(amenities) = patch.amenities {
            self.amenities = amenities;
        }
    }
}

impl Lifecycle for Room {
    type Status = RoomStatus;

    fn status(&self) -> RoomStatus {
        self.status
    }

    fn enter_status(&mut self, status: RoomStatus, _now: DateTime<Utc>) {
        self.status = status;
    }
}

impl Searchable for Room {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.number, &self.room_type]
    }
}

// =============================================================================
// Reservation
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: EntityId,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub room_number: String,
    #[ts(as = "String")]
    pub check_in: NaiveDate,
    #[ts(as = "String")]
    pub check_out: NaiveDate,
    pub guests: u32,
    pub status: ReservationStatus,
    pub special_requests: Option<String>,
    pub total_price: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationDraft {
    pub client_name: String,
    pub client_phone: String,
    pub client_email: Option<String>,
    pub room_number: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub special_requests: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationPatch {
    pub client_name: Option<String>,
    pub client_phone: Option<String>,
    pub client_email: Option<Option<String>>,
    pub room_number: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<u32>,
    pub special_requests: Option<Option<String>>,
    pub total_price: Option<Money>,
}

/// Whole nights between two dates; zero if `check_out` is not later.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(0)
}

impl ReservationDraft {
    /// Date order is checked first so it is reported on `checkOut` no
    /// matter what else is wrong with the form.
    pub fn rules() -> Rules {
        Rules::new()
            .field("checkOut", [Rule::After("checkIn")])
            .field("clientName", [Rule::Required, Rule::MinLength(2)])
            .field("clientPhone", [Rule::Required, Rule::MinLength(8)])
            .field("clientEmail", [Rule::Email])
            .field("roomNumber", [Rule::Required])
            .field("checkIn", [Rule::Required, Rule::Date])
            .field("checkOut", [Rule::Required, Rule::Date])
            .field(
                "guests",
                [
                    Rule::Required,
                    Rule::Integer {
                        min: 1,
                        max: MAX_PARTY_SIZE,
                    },
                ],
            )
            .field("specialRequests", [Rule::MaxLength(500)])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(ReservationDraft {
            client_name: form.required_text("clientName")?,
            client_phone: form.required_text("clientPhone")?,
            client_email: form.optional_text("clientEmail"),
            room_number: form.required_text("roomNumber")?,
            check_in: form.required_date("checkIn")?,
            check_out: form.required_date("checkOut")?,
            guests: form.required_count("guests")?,
            special_requests: form.optional_text("specialRequests"),
        })
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    /// Stay price at `nightly_rate`.
    pub fn total(&self, nightly_rate: Money) -> Money {
        nightly_rate * self.nights()
    }

    /// Full-record edit; the total is repriced from the new dates.
    pub fn into_patch(self, nightly_rate: Money) -> ReservationPatch {
        let total = self.total(nightly_rate);
        ReservationPatch {
            client_name: Some(self.client_name),
            client_phone: Some(self.client_phone),
            client_email: Some(self.client_email),
            room_number: Some(self.room_number),
            check_in: Some(self.check_in),
            check_out: Some(self.check_out),
            guests: Some(self.guests),
            special_requests: Some(self.special_requests),
            total_price: Some(total),
        }
    }
}

impl Reservation {
    /// New reservations start pending, priced at `nightly_rate`.
    pub fn new(id: EntityId, draft: ReservationDraft, nightly_rate: Money) -> Self {
        let total_price = draft.total(nightly_rate);
        Reservation {
            id,
            client_name: draft.client_name,
            client_phone: draft.client_phone,
            client_email: draft.client_email,
            room_number: draft.room_number,
            check_in: draft.check_in,
            check_out: draft.check_out,
            guests: draft.guests,
            status: ReservationStatus::default(),
            special_requests: draft.special_requests,
            total_price,
        }
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }
}

impl Entity for Reservation {
    const KIND: &'static str = "reservation";
    type Patch = ReservationPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: ReservationPatch) {
        if let Some(client_name) = patch.client_name {
            self.client_name = client_name;
        }
        if let Some(client_phone) = patch.client_phone {
            self.client_phone = client_phone;
        }
        if let Some(client_email) = patch.client_email {
            self.client_email = client_email;
        }
        if let Some(room_number) = patch.room_number {
            self.room_number = room_number;
        }
        if let Some(check_in) = patch.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            self.check_out = check_out;
        }
        if let Some(guests) = patch.guests {
            self.guests = guests;
        }
        if let Some(special_requests) = patch.special_requests {
            self.special_requests = special_requests;
        }
        if let Some(total_price) = patch.total_price {
            self.total_price = total_price;
        }
    }
}

impl Lifecycle for Reservation {
    type Status = ReservationStatus;

    fn status(&self) -> ReservationStatus {
        self.status
    }

    fn enter_status(&mut self, status: ReservationStatus, _now: DateTime<Utc>) {
        self.status = status;
    }
}

impl Searchable for Reservation {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.client_name, &self.room_number]
    }
}

// =============================================================================
// Service Request
// =============================================================================

/// A guest request raised from a room (room service, laundry, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: EntityId,
    pub room_number: String,
    pub service_type: ServiceType,
    pub description: String,
    pub priority: Priority,
    pub status: RequestStatus,
    #[ts(as = "String")]
    pub requested_at: DateTime<Utc>,
    /// Set while the request is completed.
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequestDraft {
    pub room_number: String,
    pub service_type: ServiceType,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequestPatch {
    pub room_number: Option<String>,
    pub service_type: Option<ServiceType>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

impl ServiceRequestDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("roomNumber", [Rule::Required])
            .field("serviceType", [Rule::Required, Rule::OneOf(ServiceType::TOKENS)])
            .field("description", [Rule::Required, Rule::MinLength(5)])
            .field("priority", [Rule::Required, Rule::OneOf(Priority::TOKENS)])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(ServiceRequestDraft {
            room_number: form.required_text("roomNumber")?,
            service_type: form.required_token("serviceType")?,
            description: form.required_text("description")?,
            priority: form.required_token("priority")?,
        })
    }
}

impl From<ServiceRequestDraft> for ServiceRequestPatch {
    fn from(draft: ServiceRequestDraft) -> Self {
        ServiceRequestPatch {
            room_number: Some(draft.room_number),
            service_type: Some(draft.service_type),
            description: Some(draft.description),
            priority: Some(draft.priority),
        }
    }
}

impl ServiceRequest {
    /// New requests start pending, stamped `now`.
    pub fn new(id: EntityId, draft: ServiceRequestDraft, now: DateTime<Utc>) -> Self {
        ServiceRequest {
            id,
            room_number: draft.room_number,
            service_type: draft.service_type,
            description: draft.description,
            priority: draft.priority,
            status: RequestStatus::default(),
            requested_at: now,
            completed_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, RequestStatus::Pending | RequestStatus::InProgress)
    }
}

impl Entity for ServiceRequest {
    const KIND: &'static str = "service request";
    type Patch = ServiceRequestPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: ServiceRequestPatch) {
        if let Some(room_number) = patch.room_number {
            self.room_number = room_number;
        }
        if let Some(service_type) = patch.service_type {
            self.service_type = service_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

impl Lifecycle for ServiceRequest {
    type Status = RequestStatus;

    fn status(&self) -> RequestStatus {
        self.status
    }

    fn enter_status(&mut self, status: RequestStatus, now: DateTime<Utc>) {
        self.status = status;
        self.completed_at = stamp_if(status, RequestStatus::Completed, now);
    }
}

impl Searchable for ServiceRequest {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.room_number, &self.description]
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
impl Room {
    pub(crate) fn sample(id: EntityId, number: &str, room_type: &str, status: RoomStatus) -> Self {
        let mut room = Room::new(
            id,
            RoomDraft {
                number: number.to_string(),
                room_type: room_type.to_string(),
                price: Money::from_units(25_000),
                capacity: 2,
                floor: "1er".to_string(),
                amenities: vec!["WiFi".to_string()],
            },
        );
        room.status = status;
        room
    }
}

#[cfg(test)]
impl ServiceRequest {
    pub(crate) fn sample(id: EntityId, now: DateTime<Utc>) -> Self {
        ServiceRequest::new(
            id,
            ServiceRequestDraft {
                room_number: "205".to_string(),
                service_type: ServiceType::RoomService,
                description: "Breakfast for two".to_string(),
                priority: Priority::Medium,
            },
            now,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rank::sort_by_rank;
    use crate::store::EntityStore;
    use crate::validation::{validate, FormInput};
    use crate::DEFAULT_NIGHTLY_RATE;
    use chrono::TimeZone;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn reservation_input() -> FormInput {
        FormInput::new()
            .text("clientName", "Jean Kouadio")
            .text("clientPhone", "+225 07 12 34 56 78")
            .text("clientEmail", "jean.kouadio@email.com")
            .text("roomNumber", "101")
            .date("checkIn", date(20))
            .date("checkOut", date(23))
            .number("guests", 2)
    }

    #[test]
    fn test_room_from_form() {
        let input = FormInput::new()
            .text("number", "301")
            .text("type", "Suite")
            .text("price", "45,000")
            .number("capacity", 4)
            .text("floor", "3ème")
            .text("amenities", "WiFi, TV, Jacuzzi");

        let form = validate(&input, &RoomDraft::rules()).unwrap();
        let room = Room::new(EntityId::new(7), RoomDraft::from_form(&form).unwrap());

        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.price, Money::from_units(45_000));
        assert_eq!(room.amenities, vec!["WiFi", "TV", "Jacuzzi"]);
    }

    #[test]
    fn test_room_capacity_must_be_positive() {
        let input = FormInput::new()
            .text("number", "301")
            .text("type", "Suite")
            .text("price", "45000")
            .number("capacity", 0)
            .text("floor", "3ème");

        let err = validate(&input, &RoomDraft::rules()).unwrap_err();
        assert_eq!(err.field(), "capacity");
    }

    #[test]
    fn test_reservation_priced_by_nights() {
        let form = validate(&reservation_input(), &ReservationDraft::rules()).unwrap();
        let draft = ReservationDraft::from_form(&form).unwrap();
        let reservation = Reservation::new(EntityId::new(1), draft, DEFAULT_NIGHTLY_RATE);

        assert_eq!(reservation.nights(), 3);
        assert_eq!(reservation.total_price, Money::from_units(75_000));
        assert_eq!(reservation.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_reservation_checkout_must_follow_checkin() {
        let input = reservation_input()
            .date("checkOut", date(20))
            .text("clientName", "")
            .number("guests", 0);

        let err = validate(&input, &ReservationDraft::rules()).unwrap_err();
        assert_eq!(err.field(), "checkOut");
    }

    #[test]
    fn test_reservation_edit_reprices() {
        let form = validate(&reservation_input(), &ReservationDraft::rules()).unwrap();
        let draft = ReservationDraft::from_form(&form).unwrap();
        let mut store = EntityStore::new();
        let id = store
            .insert_with(|id| Reservation::new(id, draft.clone(), DEFAULT_NIGHTLY_RATE))
            .id;

        let mut longer = draft;
        longer.check_out = date(25);
        let updated = store
            .update(id, longer.into_patch(DEFAULT_NIGHTLY_RATE))
            .unwrap();
        assert_eq!(updated.total_price, Money::from_units(125_000));
    }

    #[test]
    fn test_reservation_patch_keeps_other_fields() {
        let form = validate(&reservation_input(), &ReservationDraft::rules()).unwrap();
        let mut reservation = Reservation::new(
            EntityId::new(1),
            ReservationDraft::from_form(&form).unwrap(),
            DEFAULT_NIGHTLY_RATE,
        );
        let before = reservation.clone();

        reservation.apply_patch(ReservationPatch {
            guests: Some(3),
            ..Default::default()
        });
        assert_eq!(reservation.guests, 3);
        assert_eq!(reservation.client_name, before.client_name);
        assert_eq!(reservation.total_price, before.total_price);
        assert_eq!(reservation.check_out, before.check_out);
    }

    #[test]
    fn test_service_request_form_rejects_unknown_type() {
        let input = FormInput::new()
            .text("roomNumber", "205")
            .text("serviceType", "spa")
            .text("description", "Massage please")
            .text("priority", "high");

        let err = validate(&input, &ServiceRequestDraft::rules()).unwrap_err();
        assert_eq!(err.field(), "serviceType");
    }

    #[test]
    fn test_requests_sorted_by_urgency() {
        let now = Utc.with_ymd_and_hms(2025, 10, 23, 8, 0, 0).unwrap();
        let mut requests = Vec::new();
        for (id, priority) in [
            (1, Priority::Low),
            (2, Priority::Urgent),
            (3, Priority::Medium),
            (4, Priority::Low),
            (5, Priority::High),
        ] {
            let mut request = ServiceRequest::sample(EntityId::new(id), now);
            request.priority = priority;
            requests.push(request);
        }

        let sorted = sort_by_rank(requests, &Priority::urgency_table(), |r| r.priority);
        let ids: Vec<u64> = sorted.iter().map(|r| r.id.get()).collect();
        assert_eq!(ids, vec![2, 5, 3, 1, 4]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let room = Room::sample(EntityId::new(1), "101", "Standard", RoomStatus::Cleaning);
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["roomType"], "Standard");
        assert_eq!(json["status"], "cleaning");
    }
}
