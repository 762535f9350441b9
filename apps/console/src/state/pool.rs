//! Pool stores: access passes, maintenance, rentals and the chemistry log.

use oasis_core::types::{
    AccessStatus, ChemistryReading, MaintenanceStatus, MaintenanceTask, PoolAccess, PoolRental,
    RentalStatus, WaterAssessment,
};
use oasis_core::{count_where, tally, EntityStore, Money, Tally};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct PoolState {
    pub accesses: EntityStore<PoolAccess>,
    pub maintenance: EntityStore<MaintenanceTask>,
    pub rentals: EntityStore<PoolRental>,
    /// Newest reading first.
    chemistry_log: Vec<ChemistryReading>,
}

/// A logged reading with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemistryEntry {
    pub reading: ChemistryReading,
    pub assessment: WaterAssessment,
    pub balanced: bool,
}

impl From<&ChemistryReading> for ChemistryEntry {
    fn from(reading: &ChemistryReading) -> Self {
        let assessment = reading.assess();
        ChemistryEntry {
            reading: reading.clone(),
            assessment,
            balanced: assessment.is_balanced(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    pub active_accesses: usize,
    /// Party sizes of active passes.
    pub guests_on_site: u32,
    pub accesses_by_status: Vec<Tally<AccessStatus>>,
    pub maintenance_in_progress: usize,
    pub maintenance_planned: usize,
    pub active_rentals: usize,
    /// Active and returned rentals; cancelled ones are not charged.
    pub rental_revenue: Money,
    pub latest_water: Option<ChemistryEntry>,
}

impl PoolState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reading to the top of the log.
    pub fn record_reading(&mut self, reading: ChemistryReading) -> &ChemistryReading {
        debug!(
            ph = reading.ph,
            chlorine = reading.chlorine,
            alkalinity = reading.alkalinity,
            "Chemistry reading logged"
        );
        self.chemistry_log.insert(0, reading);
        &self.chemistry_log[0]
    }

    pub fn chemistry_log(&self) -> &[ChemistryReading] {
        &self.chemistry_log
    }

    pub fn latest_reading(&self) -> Option<&ChemistryReading> {
        self.chemistry_log.first()
    }

    pub fn summary(&self) -> PoolSummary {
        let accesses = self.accesses.find_all();
        let tasks = self.maintenance.find_all();
        let rentals = self.rentals.find_all();

        PoolSummary {
            active_accesses: count_where(accesses, PoolAccess::is_active),
            guests_on_site: accesses
                .iter()
                .filter(|a| a.is_active())
                .map(|a| a.party_size)
                .sum(),
            accesses_by_status: tally(accesses),
            maintenance_in_progress: count_where(tasks, |t| {
                t.status == MaintenanceStatus::InProgress
            }),
            maintenance_planned: count_where(tasks, |t| t.status == MaintenanceStatus::Planned),
            active_rentals: count_where(rentals, |r| r.status == RentalStatus::Active),
            rental_revenue: rentals
                .iter()
                .filter(|r| r.status != RentalStatus::Cancelled)
                .map(|r| r.price)
                .sum(),
            latest_water: self.latest_reading().map(ChemistryEntry::from),
        }
    }
}
