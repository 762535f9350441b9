//! Pool kinds: access passes, maintenance tasks, equipment rentals and the
//! water chemistry log.
//!
//! ## Water Chemistry Ranges
//! ```text
//! ┌──────────────┬──────────────┬────────────────────────────────────────┐
//! │ Parameter    │ Ideal        │ Outside → flagged on the dashboard     │
//! ├──────────────┼──────────────┼────────────────────────────────────────┤
//! │ pH           │ 7.2 – 7.6    │ Low / High                             │
//! │ Chlorine     │ 1.0 – 3.0    │ ppm                                    │
//! │ Alkalinity   │ 80 – 150     │ ppm                                    │
//! └──────────────┴──────────────┴────────────────────────────────────────┘
//! ```

use std::ops::RangeInclusive;

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
    AccessType as "access type" {
        Member => "member",
        DayPass => "day-pass",
        HotelGuest => "hotel-guest",
        Guest => "guest",
    }
}

token_enum! {
    /// Whether the party is on the pool deck.
    #[derive(Default)]
    AccessStatus as "access status" {
        #[default]
        Pending => "pending",
        Active => "active",
        Expired => "expired",
    }
}

token_enum! {
    MaintenanceType as "maintenance type" {
        Cleaning => "cleaning",
        Chemistry => "chemistry",
        Equipment => "equipment",
        Repair => "repair",
        Inspection => "inspection",
    }
}

token_enum! {
    MaintenancePriority as "maintenance priority" {
        Low => "low",
        Normal => "normal",
        High => "high",
        Urgent => "urgent",
    }
}

token_enum! {
    #[derive(Default)]
    MaintenanceStatus as "maintenance status" {
        #[default]
        Planned => "planned",
        InProgress => "in-progress",
        Done => "done",
        Postponed => "postponed",
    }
}

token_enum! {
    /// Rentable item; each carries a fixed unit price.
    RentalType as "rental type" {
        Lounger => "lounger",
        Towel => "towel",
        Cabana => "cabana",
        Drink => "drink",
        Snack => "snack",
        Parasol => "parasol",
    }
}

token_enum! {
    #[derive(Default)]
    RentalStatus as "rental status" {
        #[default]
        Active => "active",
        Returned => "returned",
        Cancelled => "cancelled",
    }
}

token_enum! {
    /// Position of a chemistry measurement relative to its ideal range.
    Level as "level" {
        Low => "low",
        Ideal => "ideal",
        High => "high",
    }
}

impl MaintenancePriority {
    pub fn urgency_table() -> RankTable<MaintenancePriority> {
        RankTable::new([
            MaintenancePriority::Urgent,
            MaintenancePriority::High,
            MaintenancePriority::Normal,
            MaintenancePriority::Low,
        ])
    }
}

impl RentalType {
    pub fn unit_price(self) -> Money {
        Money::from_units(match self {
            RentalType::Lounger => 2_500,
            RentalType::Towel => 500,
            RentalType::Cabana => 15_000,
            RentalType::Drink => 2_000,
            RentalType::Snack => 3_000,
            RentalType::Parasol => 1_500,
        })
    }
}

// =============================================================================
// Pool Access
// =============================================================================

/// A pass letting a party onto the pool deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PoolAccess {
    pub id: EntityId,
    pub holder_name: String,
    pub access_type: AccessType,
    #[ts(as = "String")]
    pub start_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    pub party_size: u32,
    pub status: AccessStatus,
    /// Set while the party is on the deck.
    #[ts(as = "Option<String>")]
    pub entered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolAccessDraft {
    pub holder_name: String,
    pub access_type: AccessType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub party_size: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolAccessPatch {
    pub holder_name: Option<String>,
    pub access_type: Option<AccessType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<Option<NaiveDate>>,
    pub party_size: Option<u32>,
}

impl PoolAccessDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("holderName", [Rule::Required, Rule::MinLength(2)])
            .field("accessType", [Rule::Required, Rule::OneOf(AccessType::TOKENS)])
            .field("startDate", [Rule::Required, Rule::Date])
            .field("endDate", [Rule::Date])
            .field(
                "partySize",
                [
                    Rule::Required,
                    Rule::Integer {
                        min: 1,
                        max: MAX_PARTY_SIZE,
                    },
                ],
            )
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(PoolAccessDraft {
            holder_name: form.required_text("holderName")?,
            access_type: form.required_token("accessType")?,
            start_date: form.required_date("startDate")?,
            end_date: form.date("endDate"),
            party_size: form.required_count("partySize")?,
        })
    }
}

impl From<PoolAccessDraft> for PoolAccessPatch {
    fn from(draft: PoolAccessDraft) -> Self {
        PoolAccessPatch {
            holder_name: Some(draft.holder_name),
            access_type: Some(draft.access_type),
            start_date: Some(draft.start_date),
            end_date: Some(draft.end_date),
            party_size: Some(draft.party_size),
        }
    }
}

impl PoolAccess {
    pub fn new(id: EntityId, draft: PoolAccessDraft) -> Self {
        PoolAccess {
            id,
            holder_name: draft.holder_name,
            access_type: draft.access_type,
            start_date: draft.start_date,
            end_date: draft.end_date,
            party_size: draft.party_size,
            status: AccessStatus::default(),
            entered_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccessStatus::Active
    }
}

impl Entity for PoolAccess {
    const KIND: &'static str = "pool access";
    type Patch = PoolAccessPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: PoolAccessPatch) {
        if let Some(holder_name) = patch.holder_name {
            self.holder_name = holder_name;
        }
        if let Some(access_type) = patch.access_type {
            self.access_type = access_type;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = end_date;
        }
        if let Some(party_size) = patch.party_size {
            self.party_size = party_size;
        }
    }
}

impl Lifecycle for PoolAccess {
    type Status = AccessStatus;

    fn status(&self) -> AccessStatus {
        self.status
    }

    fn enter_status(&mut self, status: AccessStatus, now: DateTime<Utc>) {
        self.status = status;
        self.entered_at = stamp_if(status, AccessStatus::Active, now);
    }
}

impl Searchable for PoolAccess {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.holder_name]
    }
}

// =============================================================================
// Maintenance Task
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    pub id: EntityId,
    pub task_type: MaintenanceType,
    pub description: String,
    pub priority: MaintenancePriority,
    #[ts(as = "String")]
    pub scheduled_for: NaiveDate,
    pub assignee: String,
    pub notes: Option<String>,
    pub status: MaintenanceStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Set while the task is done.
    #[ts(as = "Option<String>")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceTaskDraft {
    pub task_type: MaintenanceType,
    pub description: String,
    pub priority: MaintenancePriority,
    pub scheduled_for: NaiveDate,
    pub assignee: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaintenanceTaskPatch {
    pub task_type: Option<MaintenanceType>,
    pub description: Option<String>,
    pub priority: Option<MaintenancePriority>,
    pub scheduled_for: Option<NaiveDate>,
    pub assignee: Option<String>,
    pub notes: Option<Option<String>>,
}

impl MaintenanceTaskDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("taskType", [Rule::Required, Rule::OneOf(MaintenanceType::TOKENS)])
            .field("description", [Rule::Required, Rule::MinLength(5)])
            .field(
                "priority",
                [Rule::Required, Rule::OneOf(MaintenancePriority::TOKENS)],
            )
            .field("scheduledFor", [Rule::Required, Rule::Date])
            .field("assignee", [Rule::Required, Rule::MinLength(2)])
            .field("notes", [Rule::MaxLength(500)])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(MaintenanceTaskDraft {
            task_type: form.required_token("taskType")?,
            description: form.required_text("description")?,
            priority: form.required_token("priority")?,
            scheduled_for: form.required_date("scheduledFor")?,
            assignee: form.required_text("assignee")?,
            notes: form.optional_text("notes"),
        })
    }
}

impl From<MaintenanceTaskDraft> for MaintenanceTaskPatch {
    fn from(draft: MaintenanceTaskDraft) -> Self {
        MaintenanceTaskPatch {
            task_type: Some(draft.task_type),
            description: Some(draft.description),
            priority: Some(draft.priority),
            scheduled_for: Some(draft.scheduled_for),
            assignee: Some(draft.assignee),
            notes: Some(draft.notes),
        }
    }
}

impl MaintenanceTask {
    pub fn new(id: EntityId, draft: MaintenanceTaskDraft, now: DateTime<Utc>) -> Self {
        MaintenanceTask {
            id,
            task_type: draft.task_type,
            description: draft.description,
            priority: draft.priority,
            scheduled_for: draft.scheduled_for,
            assignee: draft.assignee,
            notes: draft.notes,
            status: MaintenanceStatus::default(),
            created_at: now,
            completed_at: None,
        }
    }
}

impl Entity for MaintenanceTask {
    const KIND: &'static str = "maintenance task";
    type Patch = MaintenanceTaskPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: MaintenanceTaskPatch) {
        if let Some(task_type) = patch.task_type {
            self.task_type = task_type;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(scheduled_for) = patch.scheduled_for {
            self.scheduled_for = scheduled_for;
        }
        if let Some(assignee) = patch.assignee {
            self.assignee = assignee;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

impl Lifecycle for MaintenanceTask {
    type Status = MaintenanceStatus;

    fn status(&self) -> MaintenanceStatus {
        self.status
    }

    fn enter_status(&mut self, status: MaintenanceStatus, now: DateTime<Utc>) {
        self.status = status;
        self.completed_at = stamp_if(status, MaintenanceStatus::Done, now);
    }
}

impl Searchable for MaintenanceTask {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.description, &self.assignee]
    }
}

// =============================================================================
// Pool Rental
// =============================================================================

/// Equipment or refreshment rented at the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PoolRental {
    pub id: EntityId,
    pub rental_type: RentalType,
    pub client: String,
    pub quantity: u32,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub status: RentalStatus,
    /// Unit price × quantity.
    pub price: Money,
    #[ts(as = "String")]
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PoolRentalDraft {
    pub rental_type: RentalType,
    pub client: String,
    pub quantity: u32,
    pub location: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoolRentalPatch {
    pub rental_type: Option<RentalType>,
    pub client: Option<String>,
    pub quantity: Option<u32>,
    pub location: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub price: Option<Money>,
}

impl PoolRentalDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("rentalType", [Rule::Required, Rule::OneOf(RentalType::TOKENS)])
            .field("client", [Rule::Required, Rule::MinLength(2)])
            .field("quantity", [Rule::Required, Rule::Integer { min: 1, max: 50 }])
            .field("location", [Rule::MaxLength(50)])
            .field("notes", [Rule::MaxLength(300)])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(PoolRentalDraft {
            rental_type: form.required_token("rentalType")?,
            client: form.required_text("client")?,
            quantity: form.required_count("quantity")?,
            location: form.optional_text("location"),
            notes: form.optional_text("notes"),
        })
    }

    pub fn price(&self) -> Money {
        self.rental_type
            .unit_price()
            .multiply_quantity(i64::from(self.quantity))
    }
}

/// Full-record edit; the price follows the new type and quantity.
impl From<PoolRentalDraft> for PoolRentalPatch {
    fn from(draft: PoolRentalDraft) -> Self {
        let price = draft.price();
        PoolRentalPatch {
            rental_type: Some(draft.rental_type),
            client: Some(draft.client),
            quantity: Some(draft.quantity),
            location: Some(draft.location),
            notes: Some(draft.notes),
            price: Some(price),
        }
    }
}

impl PoolRental {
    pub fn new(id: EntityId, draft: PoolRentalDraft, now: DateTime<Utc>) -> Self {
        let price = draft.price();
        PoolRental {
            id,
            rental_type: draft.rental_type,
            client: draft.client,
            quantity: draft.quantity,
            location: draft.location,
            notes: draft.notes,
            status: RentalStatus::default(),
            price,
            booked_at: now,
        }
    }
}

impl Entity for PoolRental {
    const KIND: &'static str = "pool rental";
    type Patch = PoolRentalPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: PoolRentalPatch) {
        if let Some(rental_type) = patch.rental_type {
            self.rental_type = rental_type;
        }
        if let Some(client) = patch.client {
            self.client = client;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
    }
}

impl Lifecycle for PoolRental {
    type Status = RentalStatus;

    fn status(&self) -> RentalStatus {
        self.status
    }

    fn enter_status(&mut self, status: RentalStatus, _now: DateTime<Utc>) {
        self.status = status;
    }
}

impl Searchable for PoolRental {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.client.as_str()];
        if let Some(location) = &self.location {
            fields.push(location);
        }
        fields
    }
}

// =============================================================================
// Water Chemistry
// =============================================================================

pub const PH_IDEAL: RangeInclusive<f64> = 7.2..=7.6;
pub const CHLORINE_IDEAL: RangeInclusive<f64> = 1.0..=3.0;
pub const ALKALINITY_IDEAL: RangeInclusive<u32> = 80..=150;

/// One water test, appended to the chemistry log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChemistryReading {
    #[ts(as = "String")]
    pub taken_at: DateTime<Utc>,
    pub ph: f64,
    /// Free chlorine, ppm.
    pub chlorine: f64,
    /// Total alkalinity, ppm.
    pub alkalinity: u32,
    /// Water temperature, °C.
    pub temperature: f64,
    pub notes: Option<String>,
}

/// Per-parameter verdict for a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WaterAssessment {
    pub ph: Level,
    pub chlorine: Level,
    pub alkalinity: Level,
}

impl WaterAssessment {
    pub fn is_balanced(&self) -> bool {
        [self.ph, self.chlorine, self.alkalinity]
            .iter()
            .all(|level| *level == Level::Ideal)
    }
}

fn level_of<T: PartialOrd>(value: T, ideal: &RangeInclusive<T>) -> Level {
    if value < *ideal.start() {
        Level::Low
    } else if value > *ideal.end() {
        Level::High
    } else {
        Level::Ideal
    }
}

impl ChemistryReading {
    pub fn rules() -> Rules {
        Rules::new()
            .field("ph", [Rule::Required, Rule::Decimal { min: 0.0, max: 14.0 }])
            .field("chlorine", [Rule::Required, Rule::Decimal { min: 0.0, max: 10.0 }])
            .field("alkalinity", [Rule::Required, Rule::Integer { min: 0, max: 500 }])
            .field("temperature", [Rule::Required, Rule::Decimal { min: 0.0, max: 45.0 }])
            .field("notes", [Rule::MaxLength(300)])
    }

    pub fn from_form(form: &Validated, now: DateTime<Utc>) -> ValidationResult<Self> {
        Ok(ChemistryReading {
            taken_at: now,
            ph: form.required_decimal("ph")?,
            chlorine: form.required_decimal("chlorine")?,
            alkalinity: form.required_count("alkalinity")?,
            temperature: form.required_decimal("temperature")?,
            notes: form.optional_text("notes"),
        })
    }

    pub fn assess(&self) -> WaterAssessment {
        WaterAssessment {
            ph: level_of(self.ph, &PH_IDEAL),
            chlorine: level_of(self.chlorine, &CHLORINE_IDEAL),
            alkalinity: level_of(self.alkalinity, &ALKALINITY_IDEAL),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::apply_status_at;
    use crate::rank::sort_by_rank;
    use crate::store::EntityStore;
    use crate::validation::{validate, FormInput};
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 23, hour, 0, 0).unwrap()
    }

    fn reading(ph: f64, chlorine: f64, alkalinity: u32) -> ChemistryReading {
        ChemistryReading {
            taken_at: at(9),
            ph,
            chlorine,
            alkalinity,
            temperature: 28.0,
            notes: None,
        }
    }

    fn rental_draft(rental_type: RentalType, quantity: u32) -> PoolRentalDraft {
        PoolRentalDraft {
            rental_type,
            client: "Awa Traoré".to_string(),
            quantity,
            location: Some("Zone A".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_party_size_limits() {
        let input = FormInput::new()
            .text("holderName", "Famille Koné")
            .text("accessType", "day-pass")
            .text("startDate", "2025-10-23")
            .number("partySize", 11);
        let err = validate(&input, &PoolAccessDraft::rules()).unwrap_err();
        assert_eq!(err.field(), "partySize");

        let input = input.number("partySize", 10);
        let form = validate(&input, &PoolAccessDraft::rules()).unwrap();
        let draft = PoolAccessDraft::from_form(&form).unwrap();
        assert_eq!(draft.party_size, 10);
        assert!(draft.end_date.is_none());
    }

    #[test]
    fn test_access_entered_at_follows_active() {
        let form = validate(
            &FormInput::new()
                .text("holderName", "Famille Koné")
                .text("accessType", "hotel-guest")
                .text("startDate", "2025-10-23")
                .number("partySize", 4),
            &PoolAccessDraft::rules(),
        )
        .unwrap();
        let draft = PoolAccessDraft::from_form(&form).unwrap();
        let mut access = PoolAccess::new(EntityId::new(1), draft);
        assert_eq!(access.status, AccessStatus::Pending);

        apply_status_at(&mut access, AccessStatus::Active, at(10));
        assert_eq!(access.entered_at, Some(at(10)));
        apply_status_at(&mut access, AccessStatus::Expired, at(18));
        assert!(access.entered_at.is_none());
    }

    #[test]
    fn test_rental_price_recomputed_on_edit() {
        let mut store = EntityStore::new();
        let id = store
            .insert_with(|id| PoolRental::new(id, rental_draft(RentalType::Lounger, 2), at(9)))
            .id;
        assert_eq!(store.get(id).unwrap().price, Money::from_units(5_000));

        let updated = store
            .update(id, rental_draft(RentalType::Cabana, 1).into())
            .unwrap();
        assert_eq!(updated.price, Money::from_units(15_000));
        assert_eq!(updated.status, RentalStatus::Active);
    }

    #[test]
    fn test_maintenance_done_timestamp() {
        let draft = MaintenanceTaskDraft {
            task_type: MaintenanceType::Repair,
            description: "Fix chlorinator leak".to_string(),
            priority: MaintenancePriority::Urgent,
            scheduled_for: NaiveDate::from_ymd_opt(2025, 10, 23).unwrap(),
            assignee: "Koffi Marc".to_string(),
            notes: None,
        };
        let mut task = MaintenanceTask::new(EntityId::new(1), draft, at(8));
        assert_eq!(task.status, MaintenanceStatus::Planned);

        apply_status_at(&mut task, MaintenanceStatus::Done, at(11));
        assert_eq!(task.completed_at, Some(at(11)));
        apply_status_at(&mut task, MaintenanceStatus::Postponed, at(12));
        assert!(task.completed_at.is_none());
        assert_eq!(task.created_at, at(8));
    }

    #[test]
    fn test_maintenance_priority_order() {
        let priorities = vec![
            MaintenancePriority::Normal,
            MaintenancePriority::Urgent,
            MaintenancePriority::Low,
            MaintenancePriority::High,
        ];
        let sorted = sort_by_rank(priorities, &MaintenancePriority::urgency_table(), |p| *p);
        assert_eq!(
            sorted,
            vec![
                MaintenancePriority::Urgent,
                MaintenancePriority::High,
                MaintenancePriority::Normal,
                MaintenancePriority::Low,
            ]
        );
    }

    #[test]
    fn test_chemistry_assessment() {
        assert!(reading(7.4, 1.8, 125).assess().is_balanced());
        assert!(reading(7.6, 1.0, 150).assess().is_balanced());

        let assessment = reading(7.8, 0.5, 125).assess();
        assert_eq!(assessment.ph, Level::High);
        assert_eq!(assessment.chlorine, Level::Low);
        assert_eq!(assessment.alkalinity, Level::Ideal);
        assert!(!assessment.is_balanced());
    }

    #[test]
    fn test_chemistry_from_form() {
        let input = FormInput::new()
            .text("ph", "7,3")
            .text("chlorine", "1.5")
            .number("alkalinity", 120)
            .number("temperature", 28);
        let form = validate(&input, &ChemistryReading::rules()).unwrap();
        let reading = ChemistryReading::from_form(&form, at(9)).unwrap();

        assert_eq!(reading.ph, 7.3);
        assert_eq!(reading.alkalinity, 120);
        assert_eq!(reading.temperature, 28.0);
    }
}
