//! # Dashboard
//!
//! Property-wide snapshot for the landing screen. Every figure is
//! recomputed from the stores when the snapshot is built.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::{AppState, HotelSummary, PoolSummary, RestaurantSummary};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub property_name: String,
    pub currency: String,
    pub generated_at: DateTime<Utc>,
    pub hotel: HotelSummary,
    pub restaurant: RestaurantSummary,
    pub pool: PoolSummary,
}

pub fn dashboard(app: &AppState) -> DashboardSnapshot {
    dashboard_at(app, Utc::now())
}

pub fn dashboard_at(app: &AppState, now: DateTime<Utc>) -> DashboardSnapshot {
    DashboardSnapshot {
        property_name: app.config.property_name.clone(),
        currency: app.config.currency.clone(),
        generated_at: now,
        hotel: app.hotel.summary(),
        restaurant: app.restaurant.summary(),
        pool: app.pool.summary(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ConfigState;

    #[test]
    fn test_empty_dashboard() {
        let app = AppState::new(ConfigState::default());
        let snapshot = dashboard(&app);
        assert_eq!(snapshot.property_name, "Oasis");
        assert_eq!(snapshot.hotel.occupancy.total, 0);
        assert_eq!(snapshot.restaurant.active_orders, 0);
        assert!(snapshot.pool.latest_water.is_none());
    }

    #[test]
    fn test_snapshot_json_shape() {
        let app = AppState::default();
        let json = serde_json::to_value(dashboard(&app)).unwrap();
        assert!(json["hotel"]["occupancy"].is_object());
        assert!(json["restaurant"]["tablesByStatus"].is_array());
        assert_eq!(json["pool"]["guestsOnSite"], 0);
        assert_eq!(json["restaurant"]["menu"][0]["category"], "mains");
    }
}
