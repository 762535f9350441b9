//! # oasis-core: Pure Business Logic for Oasis
//!
//! This crate holds the record-keeping engine shared by every Oasis module
//! (hotel, restaurant, pool). It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Oasis Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Rendering collaborator (dashboard)              │   │
//! │  │    Room list ──► Order board ──► Table map ──► Pool log         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    oasis-console                                │   │
//! │  │    create_room, set_order_status, list_tables, etc.             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ oasis-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌───────────┐ ┌────────┐ ┌────────┐ ┌──────────┐  │   │
//! │  │  │  store  │ │ lifecycle │ │  view  │ │  rank  │ │validation│  │   │
//! │  │  │ insert  │ │  status + │ │ filter │ │ stable │ │  rules   │  │   │
//! │  │  │ update  │ │ derived   │ │ search │ │  sort  │ │  first   │  │   │
//! │  │  │ remove  │ │ timestamp │ │        │ │        │ │  error   │  │   │
//! │  │  └─────────┘ └───────────┘ └────────┘ └────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • SINGLE-THREADED       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - Ordered entity store keyed by [`EntityId`]
//! - [`lifecycle`] - Status changes and derived timestamps
//! - [`view`] - Equality filters and text search
//! - [`rank`] - Priority ordering
//! - [`validation`] - Form validator
//! - [`types`] - Entity kinds (Room, Order, PoolAccess, ...)
//! - [`stats`] - Aggregate counts
//! - [`money`] - Whole-unit money type
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use oasis_core::store::EntityStore;
//! use oasis_core::types::{Room, RoomDraft, RoomStatus};
//! use oasis_core::validation::{validate, FormInput};
//! use oasis_core::view::{Criterion, FilterView};
//!
//! let input = FormInput::new()
//!     .text("number", "101")
//!     .text("type", "Standard")
//!     .text("price", "25000")
//!     .text("capacity", "2")
//!     .text("floor", "1er");
//! let form = validate(&input, &RoomDraft::rules()).unwrap();
//! let draft = RoomDraft::from_form(&form).unwrap();
//!
//! let mut rooms = EntityStore::new();
//! let id = rooms.insert_with(|id| Room::new(id, draft)).id;
//! rooms.transition(id, RoomStatus::Occupied);
//!
//! let free = FilterView::new()
//!     .by(|r: &Room| r.status, Criterion::Only(RoomStatus::Available))
//!     .apply(rooms.find_all());
//! assert!(free.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod lifecycle;
pub mod money;
pub mod rank;
pub mod stats;
pub mod store;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use lifecycle::{apply_status, apply_status_at, Lifecycle};
pub use money::Money;
pub use rank::{sort_by_rank, RankTable};
pub use stats::{count_where, group_by, ratio, tally, Ratio, Tally};
pub use store::{Entity, EntityId, EntityStore};
pub use types::{Token, UnknownToken};
pub use validation::{validate, FormInput, Rule, Rules, Validated, ValidationResult};
pub use view::{Criterion, FilterView, Searchable};

// =============================================================================
// Constants
// =============================================================================

/// Room rate used to price reservations when none is configured.
pub const DEFAULT_NIGHTLY_RATE: Money = Money::from_units(25_000);

/// Largest party for a reservation or a pool pass.
pub const MAX_PARTY_SIZE: i64 = 10;

/// Largest amount a form may carry (one billion FCFA).
pub const MAX_AMOUNT: Money = Money::from_units(1_000_000_000);
