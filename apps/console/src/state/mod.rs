//! # State Module
//!
//! One state object per operating area, plus read-only configuration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         AppState                                 │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │        │                │                    │                │         │
//! │        ▼                ▼                    ▼                ▼         │
//! │  ┌────────────┐  ┌──────────────┐  ┌─────────────────┐  ┌───────────┐  │
//! │  │ConfigState │  │  HotelState  │  │ RestaurantState │  │ PoolState │  │
//! │  │            │  │              │  │                 │  │           │  │
//! │  │ rate       │  │ rooms        │  │ menu            │  │ accesses  │  │
//! │  │ currency   │  │ reservations │  │ orders          │  │ tasks     │  │
//! │  │ log filter │  │ requests     │  │ tables          │  │ rentals   │  │
//! │  └────────────┘  └──────────────┘  └─────────────────┘  │ chemistry │  │
//! │                                                          └───────────┘  │
//! │                                                                         │
//! │  OWNERSHIP:                                                            │
//! │  • Each area owns its stores; commands borrow `&mut` to mutate         │
//! │  • No state is shared across areas, so nothing is locked               │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod hotel;
mod pool;
mod restaurant;

pub use config::{ConfigError, ConfigResult, ConfigState, CONFIG_FILE_NAME, DEFAULT_LOG_FILTER};
pub use hotel::{HotelState, HotelSummary};
pub use pool::{ChemistryEntry, PoolState, PoolSummary};
pub use restaurant::{CategoryCount, RestaurantState, RestaurantSummary};

/// Everything the console owns for one property.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub config: ConfigState,
    pub hotel: HotelState,
    pub restaurant: RestaurantState,
    pub pool: PoolState,
}

impl AppState {
    /// Empty stores with the given configuration.
    pub fn new(config: ConfigState) -> Self {
        AppState {
            config,
            ..AppState::default()
        }
    }
}
