//! # Pool Commands
//!
//! Access passes, maintenance tasks, equipment rentals and water tests.

use chrono::Utc;
use oasis_core::types::{
    AccessStatus, AccessType, ChemistryReading, MaintenancePriority, MaintenanceStatus,
    MaintenanceTask, MaintenanceTaskDraft, MaintenanceType, PoolAccess, PoolAccessDraft,
    PoolRental, PoolRentalDraft, RentalStatus, RentalType,
};
use oasis_core::{sort_by_rank, Criterion, EntityId, FilterView, FormInput};
use tracing::{info, warn};

use super::{applied, created, delete_from, read_form, search_text, set_status_in};
use super::{CommandResponse, CommandResult, Notice};
use crate::error::ApiError;
use crate::state::{ChemistryEntry, PoolState};

// =============================================================================
// Access Passes
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct AccessQuery {
    pub access_type: Criterion<AccessType>,
    pub status: Criterion<AccessStatus>,
    pub search: String,
}

pub fn create_pool_access(pool: &mut PoolState, input: &FormInput) -> CommandResult<PoolAccess> {
    let draft = read_form(input, &PoolAccessDraft::rules(), PoolAccessDraft::from_form)?;
    let access = pool.accesses.insert_with(|id| PoolAccess::new(id, draft));
    Ok(created(access))
}

pub fn edit_pool_access(
    pool: &mut PoolState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<PoolAccess>> {
    let draft = read_form(input, &PoolAccessDraft::rules(), PoolAccessDraft::from_form)?;
    let access = pool.accesses.update(id, draft.into()).cloned();
    Ok(applied(access, id, "Updated"))
}

pub fn delete_pool_access(
    pool: &mut PoolState,
    id: EntityId,
) -> CommandResponse<Option<PoolAccess>> {
    delete_from(&mut pool.accesses, id)
}

/// "active" stamps the entry time; leaving it clears the stamp.
pub fn set_pool_access_status(
    pool: &mut PoolState,
    id: EntityId,
    status: AccessStatus,
) -> CommandResponse<Option<PoolAccess>> {
    set_status_in(&mut pool.accesses, id, status)
}

pub fn list_pool_accesses(
    pool: &PoolState,
    query: &AccessQuery,
) -> Result<Vec<PoolAccess>, ApiError> {
    let search = search_text(&query.search)?;
    Ok(FilterView::new()
        .by(|a: &PoolAccess| a.access_type, query.access_type)
        .by(|a: &PoolAccess| a.status, query.status)
        .search(&search)
        .apply(pool.accesses.find_all())
        .into_iter()
        .cloned()
        .collect())
}

// =============================================================================
// Maintenance
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct MaintenanceQuery {
    pub status: Criterion<MaintenanceStatus>,
    pub task_type: Criterion<MaintenanceType>,
    pub search: String,
    /// Most urgent first instead of store order.
    pub by_priority: bool,
}

pub fn create_maintenance_task(
    pool: &mut PoolState,
    input: &FormInput,
) -> CommandResult<MaintenanceTask> {
    let draft = read_form(input, &MaintenanceTaskDraft::rules(), MaintenanceTaskDraft::from_form)?;
    let now = Utc::now();
    let task = pool
        .maintenance
        .insert_with(|id| MaintenanceTask::new(id, draft, now));
    Ok(created(task))
}

pub fn edit_maintenance_task(
    pool: &mut PoolState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<MaintenanceTask>> {
    let draft = read_form(input, &MaintenanceTaskDraft::rules(), MaintenanceTaskDraft::from_form)?;
    let task = pool.maintenance.update(id, draft.into()).cloned();
    Ok(applied(task, id, "Updated"))
}

pub fn delete_maintenance_task(
    pool: &mut PoolState,
    id: EntityId,
) -> CommandResponse<Option<MaintenanceTask>> {
    delete_from(&mut pool.maintenance, id)
}

pub fn set_maintenance_status(
    pool: &mut PoolState,
    id: EntityId,
    status: MaintenanceStatus,
) -> CommandResponse<Option<MaintenanceTask>> {
    set_status_in(&mut pool.maintenance, id, status)
}

pub fn list_maintenance_tasks(
    pool: &PoolState,
    query: &MaintenanceQuery,
) -> Result<Vec<MaintenanceTask>, ApiError> {
    let search = search_text(&query.search)?;
    let tasks: Vec<MaintenanceTask> = FilterView::new()
        .by(|t: &MaintenanceTask| t.status, query.status)
        .by(|t: &MaintenanceTask| t.task_type, query.task_type)
        .search(&search)
        .apply(pool.maintenance.find_all())
        .into_iter()
        .cloned()
        .collect();

    if query.by_priority {
        Ok(sort_by_rank(tasks, &MaintenancePriority::urgency_table(), |t| t.priority))
    } else {
        Ok(tasks)
    }
}

// =============================================================================
// Rentals
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct RentalQuery {
    pub rental_type: Criterion<RentalType>,
    pub status: Criterion<RentalStatus>,
    pub search: String,
}

/// Priced at unit price × quantity.
pub fn create_pool_rental(pool: &mut PoolState, input: &FormInput) -> CommandResult<PoolRental> {
    let draft = read_form(input, &PoolRentalDraft::rules(), PoolRentalDraft::from_form)?;
    let now = Utc::now();
    let rental = pool.rentals.insert_with(|id| PoolRental::new(id, draft, now));
    Ok(created(rental))
}

/// Re-prices from the edited type and quantity.
pub fn edit_pool_rental(
    pool: &mut PoolState,
    id: EntityId,
    input: &FormInput,
) -> CommandResult<Option<PoolRental>> {
    let draft = read_form(input, &PoolRentalDraft::rules(), PoolRentalDraft::from_form)?;
    let rental = pool.rentals.update(id, draft.into()).cloned();
    Ok(applied(rental, id, "Updated"))
}

pub fn delete_pool_rental(
    pool: &mut PoolState,
    id: EntityId,
) -> CommandResponse<Option<PoolRental>> {
    delete_from(&mut pool.rentals, id)
}

pub fn set_pool_rental_status(
    pool: &mut PoolState,
    id: EntityId,
    status: RentalStatus,
) -> CommandResponse<Option<PoolRental>> {
    set_status_in(&mut pool.rentals, id, status)
}

pub fn list_pool_rentals(
    pool: &PoolState,
    query: &RentalQuery,
) -> Result<Vec<PoolRental>, ApiError> {
    let search = search_text(&query.search)?;
    Ok(FilterView::new()
        .by(|r: &PoolRental| r.rental_type, query.rental_type)
        .by(|r: &PoolRental| r.status, query.status)
        .search(&search)
        .apply(pool.rentals.find_all())
        .into_iter()
        .cloned()
        .collect())
}

// =============================================================================
// Water Chemistry
// =============================================================================

/// Logs a water test. Out-of-range parameters are reported in the notice.
pub fn record_chemistry_reading(
    pool: &mut PoolState,
    input: &FormInput,
) -> CommandResult<ChemistryEntry> {
    let now = Utc::now();
    let reading = read_form(input, &ChemistryReading::rules(), |form| {
        ChemistryReading::from_form(form, now)
    })?;
    let entry = ChemistryEntry::from(pool.record_reading(reading));

    let notice = if entry.balanced {
        info!(ph = entry.reading.ph, "Water balanced");
        Notice::success("Water test recorded")
    } else {
        warn!(
            ph = %entry.assessment.ph,
            chlorine = %entry.assessment.chlorine,
            alkalinity = %entry.assessment.alkalinity,
            "Water out of range"
        );
        Notice::info(format!(
            "Water test recorded: pH {}, chlorine {}, alkalinity {}",
            entry.assessment.ph, entry.assessment.chlorine, entry.assessment.alkalinity
        ))
    };
    Ok(CommandResponse::new(entry, notice))
}

/// Newest reading first.
pub fn chemistry_log(pool: &PoolState) -> Vec<ChemistryEntry> {
    pool.chemistry_log().iter().map(ChemistryEntry::from).collect()
}
