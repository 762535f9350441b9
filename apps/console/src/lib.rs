//! # Oasis Console Library
//!
//! Application layer for the Oasis property console: it owns the stores of
//! each operating area and exposes one command per user action. All
//! business rules live in `oasis-core`.
//!
//! ## Module Organization
//! ```text
//! oasis_console/
//! ├── lib.rs            ◄─── You are here (startup & logging)
//! ├── state/
//! │   ├── mod.rs        ◄─── AppState
//! │   ├── config.rs     ◄─── oasis.toml + OASIS_* environment
//! │   ├── hotel.rs      ◄─── rooms, reservations, service requests
//! │   ├── restaurant.rs ◄─── menu, orders, tables
//! │   └── pool.rs       ◄─── accesses, maintenance, rentals, chemistry log
//! ├── commands/
//! │   ├── mod.rs        ◄─── CommandResponse, Notice, shared helpers
//! │   ├── hotel.rs
//! │   ├── restaurant.rs
//! │   ├── pool.rs
//! │   └── dashboard.rs  ◄─── property-wide snapshot
//! ├── seed.rs           ◄─── demo data
//! └── error.rs          ◄─── ApiError
//! ```

pub mod commands;
pub mod error;
pub mod seed;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::dashboard::dashboard;
use commands::{hotel, pool, restaurant};
use error::ApiError;
use state::{AppState, ConfigState};

/// Views the binary can print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Rooms,
    Requests,
    Orders,
    Tables,
    Pool,
}

impl std::str::FromStr for View {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "dashboard" => Ok(View::Dashboard),
            "rooms" => Ok(View::Rooms),
            "requests" => Ok(View::Requests),
            "orders" => Ok(View::Orders),
            "tables" => Ok(View::Tables),
            "pool" => Ok(View::Pool),
            other => Err(ApiError::validation("view", format!("Unknown view: '{}'", other))),
        }
    }
}

/// Runs the console.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • $OASIS_CONFIG or platform config dir / oasis.toml                 │
/// │     • OASIS_* environment overrides, then validation                    │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG wins, else the configured log_filter                     │
/// │                                                                         │
/// │  3. Build State ──────────────────────────────────────────────────────► │
/// │     • Empty stores per area, seeded with demo data                      │
/// │                                                                         │
/// │  4. Print the requested view as JSON ─────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(view: &str) -> Result<(), ApiError> {
    let view: View = view.parse()?;
    let config = ConfigState::load(None)?;
    init_tracing(&config.log_filter);

    info!(property = %config.property_name, ?view, "Starting Oasis console");

    let mut app = AppState::new(config);
    seed::seed(&mut app)?;

    println!("{}", render(&app, view)?);
    Ok(())
}

/// Serialises one view of the state.
pub fn render(app: &AppState, view: View) -> Result<String, ApiError> {
    let json = match view {
        View::Dashboard => serde_json::to_string_pretty(&dashboard(app)),
        View::Rooms => {
            serde_json::to_string_pretty(&hotel::list_rooms(&app.hotel, &Default::default())?)
        }
        View::Requests => serde_json::to_string_pretty(&hotel::list_service_requests(
            &app.hotel,
            &Default::default(),
        )?),
        View::Orders => serde_json::to_string_pretty(&restaurant::order_board(&app.restaurant)),
        View::Tables => serde_json::to_string_pretty(&restaurant::tables_by_zone(&app.restaurant)),
        View::Pool => serde_json::to_string_pretty(&pool::chemistry_log(&app.pool)),
    };
    json.map_err(|e| ApiError::internal(format!("Failed to serialise view: {}", e)))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=oasis_core=trace` - Store mutations only
/// - Default: the configured `log_filter` (`info,oasis=debug`)
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> AppState {
        let mut app = AppState::default();
        seed::seed(&mut app).unwrap();
        app
    }

    #[test]
    fn test_view_parsing() {
        assert_eq!("".parse::<View>().unwrap(), View::Dashboard);
        assert_eq!(" Tables ".parse::<View>().unwrap(), View::Tables);
        let err = "kitchen".parse::<View>().unwrap_err();
        assert_eq!(err.field.as_deref(), Some("view"));
    }

    #[test]
    fn test_render_every_view() {
        let app = seeded();
        for view in [
            View::Dashboard,
            View::Rooms,
            View::Requests,
            View::Orders,
            View::Tables,
            View::Pool,
        ] {
            let text = render(&app, view).unwrap();
            assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
        }
    }

    #[test]
    fn test_requests_view_puts_urgent_first() {
        let app = seeded();
        let text = render(&app, View::Requests).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json[0]["priority"], "urgent");
        assert_eq!(json[0]["serviceType"], "maintenance");
    }
}
