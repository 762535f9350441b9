//! Restaurant kinds: menu items, orders and dining tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lifecycle::{stamp_if, Lifecycle};
use crate::money::Money;
use crate::store::{Entity, EntityId};
use crate::types::Token;
use crate::validation::{Rule, Rules, Validated, ValidationResult};
use crate::view::Searchable;

// =============================================================================
// Tokens
// =============================================================================

token_enum! {
    MenuCategory as "menu category" {
        Mains => "mains",
        Drinks => "drinks",
        Desserts => "desserts",
        Breakfast => "breakfast",
    }
}

token_enum! {
    /// Where an order is served.
    OrderSource as "order source" {
        Table => "table",
        Room => "room",
        Bar => "bar",
    }
}

token_enum! {
    /// Kitchen progress of an order.
    #[derive(Default)]
    OrderStatus as "order status" {
        #[default]
        Pending => "pending",
        Preparing => "preparing",
        Ready => "ready",
        Served => "served",
        Cancelled => "cancelled",
    }
}

token_enum! {
    Zone as "zone" {
        Indoor => "indoor",
        Terrace => "terrace",
        Bar => "bar",
        Vip => "vip",
    }
}

token_enum! {
    #[derive(Default)]
    TableStatus as "table status" {
        #[default]
        Free => "free",
        Occupied => "occupied",
        Reserved => "reserved",
        Cleaning => "cleaning",
    }
}

impl OrderStatus {
    /// The kitchen's next step: pending → preparing → ready → served.
    ///
    /// `None` for served and cancelled orders.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served | OrderStatus::Cancelled => None,
        }
    }

    /// Still on the kitchen board.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready
        )
    }
}

impl TableStatus {
    /// Shortcut buttons offered on a table card.
    ///
    /// The status selector still allows any status.
    pub fn quick_actions(self) -> &'static [TableStatus] {
        match self {
            TableStatus::Free => &[TableStatus::Occupied, TableStatus::Reserved],
            TableStatus::Occupied => &[TableStatus::Cleaning],
            TableStatus::Reserved => &[TableStatus::Occupied, TableStatus::Free],
            TableStatus::Cleaning => &[TableStatus::Free],
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: EntityId,
    pub name: String,
    pub category: MenuCategory,
    pub price: Money,
    pub description: Option<String>,
    /// Offered today. New items are available.
    pub available: bool,
    /// Orders counted for the "popular" badge.
    pub popularity: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub category: MenuCategory,
    pub price: Money,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Money>,
    pub description: Option<Option<String>>,
    pub available: Option<bool>,
    pub popularity: Option<u32>,
}

impl MenuItemDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("name", [Rule::Required, Rule::MinLength(2)])
            .field("category", [Rule::Required, Rule::OneOf(MenuCategory::TOKENS)])
            .field("price", [Rule::Required, Rule::Amount])
            .field("description", [Rule::MaxLength(300)])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(MenuItemDraft {
            name: form.required_text("name")?,
            category: form.required_token("category")?,
            price: form.required_amount("price")?,
            description: form.optional_text("description"),
        })
    }
}

impl From<MenuItemDraft> for MenuItemPatch {
    fn from(draft: MenuItemDraft) -> Self {
        MenuItemPatch {
            name: Some(draft.name),
            category: Some(draft.category),
            price: Some(draft.price),
            description: Some(draft.description),
            ..Default::default()
        }
    }
}

impl MenuItem {
    pub fn new(id: EntityId, draft: MenuItemDraft) -> Self {
        MenuItem {
            id,
            name: draft.name,
            category: draft.category,
            price: draft.price,
            description: draft.description,
            available: true,
            popularity: 0,
        }
    }

    /// Patch flipping the availability flag.
    pub fn availability_toggle(&self) -> MenuItemPatch {
        MenuItemPatch {
            available: Some(!self.available),
            ..Default::default()
        }
    }
}

impl Entity for MenuItem {
    const KIND: &'static str = "menu item";
    type Patch = MenuItemPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: MenuItemPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(available) = patch.available {
            self.available = available;
        }
        if let Some(popularity) = patch.popularity {
            self.popularity = popularity;
        }
    }
}

impl Searchable for MenuItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        if let Some(description) = &self.description {
            fields.push(description);
        }
        fields
    }
}

// =============================================================================
// Order
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: EntityId,
    pub source: OrderSource,
    /// Table, room or counter number.
    pub source_number: String,
    /// Free-text item list as taken by the waiter.
    pub items: String,
    pub amount: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub source: OrderSource,
    pub source_number: String,
    pub items: String,
    pub amount: Money,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub source: Option<OrderSource>,
    pub source_number: Option<String>,
    pub items: Option<String>,
    pub amount: Option<Money>,
    pub special_instructions: Option<Option<String>>,
}

impl OrderDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("source", [Rule::Required, Rule::OneOf(OrderSource::TOKENS)])
            .field("sourceNumber", [Rule::Required])
            .field("items", [Rule::Required, Rule::MinLength(3)])
            .field("amount", [Rule::Amount])
            .field("specialInstructions", [Rule::MaxLength(300)])
    }

    /// An empty amount means not priced yet (zero).
    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(OrderDraft {
            source: form.required_token("source")?,
            source_number: form.required_text("sourceNumber")?,
            items: form.required_text("items")?,
            amount: form.amount("amount").unwrap_or_default(),
            special_instructions: form.optional_text("specialInstructions"),
        })
    }
}

impl From<OrderDraft> for OrderPatch {
    fn from(draft: OrderDraft) -> Self {
        OrderPatch {
            source: Some(draft.source),
            source_number: Some(draft.source_number),
            items: Some(draft.items),
            amount: Some(draft.amount),
            special_instructions: Some(draft.special_instructions),
        }
    }
}

impl Order {
    pub fn new(id: EntityId, draft: OrderDraft, now: DateTime<Utc>) -> Self {
        Order {
            id,
            source: draft.source,
            source_number: draft.source_number,
            items: draft.items,
            amount: draft.amount,
            status: OrderStatus::default(),
            placed_at: now,
            special_instructions: draft.special_instructions,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

impl Entity for Order {
    const KIND: &'static str = "order";
    type Patch = OrderPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: OrderPatch) {
        if let Some(source) = patch.source {
            self.source = source;
        }
        if let Some(source_number) = patch.source_number {
            self.source_number = source_number;
        }
        if let Some(items) = patch.items {
            self.items = items;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(special_instructions) = patch.special_instructions {
            self.special_instructions = special_instructions;
        }
    }
}

impl Lifecycle for Order {
    type Status = OrderStatus;

    fn status(&self) -> OrderStatus {
        self.status
    }

    fn enter_status(&mut self, status: OrderStatus, _now: DateTime<Utc>) {
        self.status = status;
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.source_number, &self.items]
    }
}

/// Kitchen board columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBoard<'a> {
    /// Pending, preparing and ready orders.
    pub active: Vec<&'a Order>,
    pub served: Vec<&'a Order>,
    pub cancelled: Vec<&'a Order>,
}

impl<'a> OrderBoard<'a> {
    /// Splits orders into board columns, keeping input order in each.
    pub fn split<I>(orders: I) -> Self
    where
        I: IntoIterator<Item = &'a Order>,
    {
        let mut board = OrderBoard::default();
        for order in orders {
            match order.status {
                OrderStatus::Served => board.served.push(order),
                OrderStatus::Cancelled => board.cancelled.push(order),
                _ => board.active.push(order),
            }
        }
        board
    }
}

// =============================================================================
// Dining Table
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DiningTable {
    pub id: EntityId,
    pub number: String,
    pub capacity: u32,
    pub zone: Zone,
    pub status: TableStatus,
    /// Running bill of the seated party.
    pub current_order: Option<Money>,
    /// Set while the table is occupied.
    #[ts(as = "Option<String>")]
    pub occupied_since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiningTableDraft {
    pub number: String,
    pub capacity: u32,
    pub zone: Zone,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiningTablePatch {
    pub number: Option<String>,
    pub capacity: Option<u32>,
    pub zone: Option<Zone>,
    pub current_order: Option<Option<Money>>,
}

impl DiningTableDraft {
    pub fn rules() -> Rules {
        Rules::new()
            .field("number", [Rule::Required, Rule::MaxLength(10)])
            .field("capacity", [Rule::Required, Rule::Integer { min: 1, max: 20 }])
            .field("zone", [Rule::Required, Rule::OneOf(Zone::TOKENS)])
    }

    pub fn from_form(form: &Validated) -> ValidationResult<Self> {
        Ok(DiningTableDraft {
            number: form.required_text("number")?,
            capacity: form.required_count("capacity")?,
            zone: form.required_token("zone")?,
        })
    }
}

impl From<DiningTableDraft> for DiningTablePatch {
    fn from(draft: DiningTableDraft) -> Self {
        DiningTablePatch {
            number: Some(draft.number),
            capacity: Some(draft.capacity),
            zone: Some(draft.zone),
            current_order: None,
        }
    }
}

impl DiningTable {
    pub fn new(id: EntityId, draft: DiningTableDraft) -> Self {
        DiningTable {
            id,
            number: draft.number,
            capacity: draft.capacity,
            zone: draft.zone,
            status: TableStatus::default(),
            current_order: None,
            occupied_since: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

impl Entity for DiningTable {
    const KIND: &'static str = "table";
    type Patch = DiningTablePatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn apply_patch(&mut self, patch: DiningTablePatch) {
        if let Some(number) = patch.number {
            self.number = number;
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(zone) = patch.zone {
            self.zone = zone;
        }
        if let Some(current_order) = patch.current_order {
            self.current_order = current_order;
        }
    }
}

impl Lifecycle for DiningTable {
    type Status = TableStatus;

    fn status(&self) -> TableStatus {
        self.status
    }

    fn enter_status(&mut self, status: TableStatus, now: DateTime<Utc>) {
        self.status = status;
        self.occupied_since = stamp_if(status, TableStatus::Occupied, now);
        if status == TableStatus::Free {
            self.current_order = None;
        }
    }
}

impl Searchable for DiningTable {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.number]
    }
}

#[cfg(test)]
impl DiningTable {
    pub(crate) fn sample(id: EntityId, capacity: u32) -> Self {
        let mut table = DiningTable::new(
            id,
            DiningTableDraft {
                number: format!("T{}", id),
                capacity,
                zone: Zone::Indoor,
            },
        );
        table.current_order = Some(Money::from_units(12_500));
        table
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::apply_status_at;
    use crate::store::EntityStore;
    use crate::validation::{validate, FormInput};
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 23, hour, 0, 0).unwrap()
    }

    fn order(id: u64, status: OrderStatus) -> Order {
        let mut order = Order::new(
            EntityId::new(id),
            OrderDraft {
                source: OrderSource::Table,
                source_number: "T5".to_string(),
                items: "Attiéké poisson".to_string(),
                amount: Money::from_units(8_500),
                special_instructions: None,
            },
            at(12),
        );
        order.status = status;
        order
    }

    #[test]
    fn test_order_next_step() {
        assert_eq!(OrderStatus::Pending.next(), Some(OrderStatus::Preparing));
        assert_eq!(OrderStatus::Preparing.next(), Some(OrderStatus::Ready));
        assert_eq!(OrderStatus::Ready.next(), Some(OrderStatus::Served));
        assert_eq!(OrderStatus::Served.next(), None);
        assert_eq!(OrderStatus::Cancelled.next(), None);
    }

    #[test]
    fn test_order_board_split() {
        let orders = vec![
            order(1, OrderStatus::Served),
            order(2, OrderStatus::Pending),
            order(3, OrderStatus::Ready),
            order(4, OrderStatus::Cancelled),
        ];
        let board = OrderBoard::split(&orders);

        let active: Vec<u64> = board.active.iter().map(|o| o.id.get()).collect();
        assert_eq!(active, vec![2, 3]);
        assert_eq!(board.served.len(), 1);
        assert_eq!(board.cancelled.len(), 1);
    }

    #[test]
    fn test_order_form_defaults_amount() {
        let input = FormInput::new()
            .text("source", "room")
            .text("sourceNumber", "205")
            .text("items", "Club sandwich");
        let form = validate(&input, &OrderDraft::rules()).unwrap();
        let draft = OrderDraft::from_form(&form).unwrap();

        assert_eq!(draft.source, OrderSource::Room);
        assert!(draft.amount.is_zero());
    }

    #[test]
    fn test_menu_toggle_availability() {
        let mut store = EntityStore::new();
        let id = store
            .insert_with(|id| {
                MenuItem::new(
                    id,
                    MenuItemDraft {
                        name: "Poulet braisé".to_string(),
                        category: MenuCategory::Mains,
                        price: Money::from_units(7_000),
                        description: None,
                    },
                )
            })
            .id;

        let patch = store.get(id).unwrap().availability_toggle();
        let item = store.update(id, patch).unwrap();
        assert!(!item.available);
        assert_eq!(item.price, Money::from_units(7_000));
    }

    #[test]
    fn test_table_occupancy_timestamp() {
        let mut table = DiningTable::sample(EntityId::new(3), 4);
        apply_status_at(&mut table, TableStatus::Occupied, at(19));
        assert_eq!(table.occupied_since, Some(at(19)));
        assert_eq!(table.current_order, Some(Money::from_units(12_500)));

        apply_status_at(&mut table, TableStatus::Cleaning, at(21));
        assert!(table.occupied_since.is_none());
        assert!(table.current_order.is_some());
    }

    #[test]
    fn test_table_quick_actions() {
        assert_eq!(
            TableStatus::Free.quick_actions(),
            &[TableStatus::Occupied, TableStatus::Reserved]
        );
        assert_eq!(TableStatus::Cleaning.quick_actions(), &[TableStatus::Free]);
    }

    #[test]
    fn test_table_zone_must_be_known() {
        let input = FormInput::new()
            .text("number", "T9")
            .number("capacity", 4)
            .text("zone", "rooftop");
        let err = validate(&input, &DiningTableDraft::rules()).unwrap_err();
        assert_eq!(err.field(), "zone");
    }
}
