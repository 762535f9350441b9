//! # Restaurant Commands
//!
//! Menu, kitchen orders and the table map.
//!
//! ## Kitchen Board
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  advance_order moves one step along the kitchen line:                  │
//! │                                                                         │
//! │  pending ──► preparing ──► ready ──► served                            │
//! │  └────────── active ──────────┘                                        │
//! │                                                                         │
//! │  set_order_status can still jump to any status, cancelled included.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use oasis_core::types::{
    DiningTable, DiningTableDraft, DiningTablePatch, MenuCategory, MenuItem, MenuItemDraft, Order,
    OrderBoard, OrderDraft, OrderSource, OrderStatus, TableStatus, Zone,
};
use oasis_core::{group_by, Criterion, EntityId, FilterView, FormInput, Money, MAX_AMOUNT};
use serde::Serialize;
use tracing::debug;

use super::{applied, created, delete_from, read_form, rejected, search_text, set_status_in};
use super::{CommandResponse, CommandResult, Notice};
use crate::error::ApiError;
use crate::state::RestaurantState;

// =============================================================================
// Menu
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MenuQuery {
    pub category: Criterion<MenuCategory>,
    /// `Only(true)` hides items marked unavailable.
    pub available: Criterion<bool>,
    pub search: String,
}

/// One menu tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub category: MenuCategory,
    pub items: Vec<MenuItem>,
}

pub fn create_menu_item(
    restaurant: &mut RestaurantState,
    input: &FormInput,
) -> CommandResult<MenuItem> {
    let draft = read_form(input, &MenuItemDraft::rules(), MenuItemDraft::from_form)?;
    let item = restaurant.menu.insert_with(|id| MenuItem::new(id, draft));
    Ok(created(item))
}

pub fn edit_menu_item(
    restaurant: &mut RestaurantState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<MenuItem>> {
    let draft = read_form(input, &MenuItemDraft::rules(), MenuItemDraft::from_form)?;
    let item = restaurant.menu.update(id, draft.into()).cloned();
    Ok(applied(item, id, "Updated"))
}

pub fn delete_menu_item(
    restaurant: &mut RestaurantState,
    id: EntityId,
) -> CommandResponse<Option<MenuItem>> {
    delete_from(&mut restaurant.menu, id)
}

/// Flips the "available" flag.
pub fn toggle_menu_item(
    restaurant: &mut RestaurantState,
    id: EntityId,
) -> CommandResponse<Option<MenuItem>> {
    let patch = restaurant.menu.get(id).map(MenuItem::availability_toggle);
    let item = patch.and_then(|patch| restaurant.menu.update(id, patch).cloned());
    applied(item, id, "Toggled")
}

pub fn list_menu(
    restaurant: &RestaurantState,
    query: &MenuQuery,
) -> Result<Vec<MenuItem>, ApiError> {
    let search = search_text(&query.search)?;
    Ok(FilterView::new()
        .by(|m: &MenuItem| m.category, query.category)
        .by(|m: &MenuItem| m.available, query.available)
        .search(&search)
        .apply(restaurant.menu.find_all())
        .into_iter()
        .cloned()
        .collect())
}

/// Every category in menu order, empty ones included.
pub fn menu_by_category(restaurant: &RestaurantState) -> Vec<MenuSection> {
    group_by(restaurant.menu.find_all(), |m| m.category)
        .into_iter()
        .map(|(category, items)| MenuSection {
            category,
            items: items.into_iter().cloned().collect(),
        })
        .collect()
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub status: Criterion<OrderStatus>,
    pub source: Criterion<OrderSource>,
    pub search: String,
}

/// Owned copy of the kitchen board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub active: Vec<Order>,
    pub served: Vec<Order>,
    pub cancelled: Vec<Order>,
}

impl From<OrderBoard<'_>> for BoardView {
    fn from(board: OrderBoard<'_>) -> Self {
        BoardView {
            active: board.active.into_iter().cloned().collect(),
            served: board.served.into_iter().cloned().collect(),
            cancelled: board.cancelled.into_iter().cloned().collect(),
        }
    }
}

pub fn create_order(restaurant: &mut RestaurantState, input: &FormInput) -> CommandResult<Order> {
    let draft = read_form(input, &OrderDraft::rules(), OrderDraft::from_form)?;
    let now = Utc::now();
    let order = restaurant.orders.insert_with(|id| Order::new(id, draft, now));
    Ok(created(order))
}

pub fn edit_order(
    restaurant: &mut RestaurantState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<Order>> {
    let draft = read_form(input, &OrderDraft::rules(), OrderDraft::from_form)?;
    let order = restaurant.orders.update(id, draft.into()).cloned();
    Ok(applied(order, id, "Updated"))
}

pub fn delete_order(
    restaurant: &mut RestaurantState,
    id: EntityId,
) -> CommandResponse<Option<Order>> {
    delete_from(&mut restaurant.orders, id)
}

pub fn set_order_status(
    restaurant: &mut RestaurantState,
    id: EntityId,
    status: OrderStatus,
) -> CommandResponse<Option<Order>> {
    set_status_in(&mut restaurant.orders, id, status)
}

/// Moves an order one kitchen step forward.
///
/// Served and cancelled orders stay as they are; the response then carries
/// the unchanged order with an info notice.
pub fn advance_order(
    restaurant: &mut RestaurantState,
    id: EntityId,
) -> CommandResponse<Option<Order>> {
    let current = restaurant.orders.get(id).map(|o| o.status);
    match current.map(OrderStatus::next) {
        Some(Some(next)) => set_order_status(restaurant, id, next),
        Some(None) => {
            debug!(id = %id, "Order has no next step");
            CommandResponse::new(
                restaurant.orders.get(id).cloned(),
                Notice::info(format!("Order #{} is closed", id)),
            )
        }
        None => applied(None, id, "Advanced"),
    }
}

pub fn list_orders(
    restaurant: &RestaurantState,
    query: &OrderQuery,
) -> Result<Vec<Order>, ApiError> {
    let search = search_text(&query.search)?;
    Ok(FilterView::new()
        .by(|o: &Order| o.status, query.status)
        .by(|o: &Order| o.source, query.source)
        .search(&search)
        .apply(restaurant.orders.find_all())
        .into_iter()
        .cloned()
        .collect())
}

pub fn order_board(restaurant: &RestaurantState) -> BoardView {
    OrderBoard::split(restaurant.orders.iter()).into()
}

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct TableQuery {
    pub zone: Criterion<Zone>,
    pub status: Criterion<TableStatus>,
    pub search: String,
}

/// One zone of the floor plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSection {
    pub zone: Zone,
    pub tables: Vec<DiningTable>,
}

pub fn create_table(
    restaurant: &mut RestaurantState,
    input: &FormInput,
) -> CommandResult<DiningTable> {
    let draft = read_form(input, &DiningTableDraft::rules(), DiningTableDraft::from_form)?;
    let table = restaurant.tables.insert_with(|id| DiningTable::new(id, draft));
    Ok(created(table))
}

pub fn edit_table(
    restaurant: &mut RestaurantState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<DiningTable>> {
    let draft = read_form(input, &DiningTableDraft::rules(), DiningTableDraft::from_form)?;
    let table = restaurant.tables.update(id, draft.into()).cloned();
    Ok(applied(table, id, "Updated"))
}

pub fn delete_table(
    restaurant: &mut RestaurantState,
    id: EntityId,
) -> CommandResponse<Option<DiningTable>> {
    delete_from(&mut restaurant.tables, id)
}

/// Entering "occupied" stamps `occupiedSince`; entering "free" also drops
/// the running bill.
pub fn set_table_status(
    restaurant: &mut RestaurantState,
    id: EntityId,
    status: TableStatus,
) -> CommandResponse<Option<DiningTable>> {
    set_status_in(&mut restaurant.tables, id, status)
}

/// Sets the running bill shown on an occupied table.
pub fn record_table_bill(
    restaurant: &mut RestaurantState,
    id: EntityId,
    amount: Money,
) -> Result<CommandResponse<Option<DiningTable>>, ApiError> {
    if amount.is_negative() || amount > MAX_AMOUNT {
        return Err(rejected(ApiError::validation(
            "currentOrder",
            format!("currentOrder must be between 0 and {}", MAX_AMOUNT.units()),
        )));
    }

    let patch = DiningTablePatch {
        current_order: Some(Some(amount)),
        ..DiningTablePatch::default()
    };
    let table = restaurant.tables.update(id, patch).cloned();
    Ok(applied(table, id, "Billed"))
}

pub fn list_tables(
    restaurant: &RestaurantState,
    query: &TableQuery,
) -> Result<Vec<DiningTable>, ApiError> {
    let search = search_text(&query.search)?;
    Ok(FilterView::new()
        .by(|t: &DiningTable| t.zone, query.zone)
        .by(|t: &DiningTable| t.status, query.status)
        .search(&search)
        .apply(restaurant.tables.find_all())
        .into_iter()
        .cloned()
        .collect())
}

/// Every zone in floor-plan order, empty ones included.
pub fn tables_by_zone(restaurant: &RestaurantState) -> Vec<ZoneSection> {
    group_by(restaurant.tables.find_all(), |t| t.zone)
        .into_iter()
        .map(|(zone, tables)| ZoneSection {
            zone,
            tables: tables.into_iter().cloned().collect(),
        })
        .collect()
}
