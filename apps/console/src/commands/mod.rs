//! # Commands Module
//!
//! One function per user action. Commands borrow the state they need,
//! run validation at the write boundary, and answer with the affected
//! record plus a [`Notice`] for the status line.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Command Organization                               │
//! │                                                                         │
//! │  hotel.rs          restaurant.rs           pool.rs                      │
//! │  ─────────         ─────────────           ───────                      │
//! │  create_room       create_menu_item        create_pool_access           │
//! │  edit_room         toggle_menu_item        create_maintenance_task      │
//! │  create_           create_order            create_pool_rental           │
//! │   reservation      advance_order           record_chemistry_reading     │
//! │  list_service_     set_table_status        list_maintenance_tasks       │
//! │   requests         tables_by_zone          chemistry_log                │
//! │                                                                         │
//! │  dashboard.rs: dashboard (all summaries in one snapshot)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Outcome Contract
//! ```text
//! create / edit ──► validate ──┬── Err ──► ApiError + Notice::error (store untouched)
//!                              └── Ok ───► mutate ──► Notice::success
//!
//! edit / delete / status with an unknown id ──► data: None, Notice::info
//! ```

pub mod dashboard;
pub mod hotel;
pub mod pool;
pub mod restaurant;

use oasis_core::lifecycle::Lifecycle;
use oasis_core::validation::validate_search_query;
use oasis_core::{
    validate, Criterion, Entity, EntityId, EntityStore, FormInput, Rules, Token, Validated,
    ValidationResult,
};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiError;

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Status-line message emitted after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            title: title.into(),
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            title: title.into(),
        }
    }

    pub fn error(title: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            title: title.into(),
        }
    }
}

/// Failure notice for a rejected command.
impl From<&ApiError> for Notice {
    fn from(err: &ApiError) -> Self {
        Notice::error(err.message.clone())
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Command payload plus the notice to show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse<T> {
    pub data: T,
    pub notice: Notice,
}

pub type CommandResult<T> = Result<CommandResponse<T>, ApiError>;

impl<T> CommandResponse<T> {
    pub fn new(data: T, notice: Notice) -> Self {
        CommandResponse { data, notice }
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Validates `input` and builds a draft from the normalised values.
pub(crate) fn read_form<D, F>(input: &FormInput, rules: &Rules, build: F) -> Result<D, ApiError>
where
    F: FnOnce(&Validated) -> ValidationResult<D>,
{
    validate(input, rules)
        .and_then(|form| build(&form))
        .map_err(|err| rejected(ApiError::from(err)))
}

/// Emits the failure notice for a rejected command at `warn` and hands the
/// error back to the caller.
pub(crate) fn rejected(err: ApiError) -> ApiError {
    let notice = Notice::from(&err);
    warn!(
        field = err.field.as_deref().unwrap_or_default(),
        level = ?notice.level,
        notice = %notice.title,
        "Command rejected"
    );
    err
}

/// Trimmed search text, at most 100 characters.
pub(crate) fn search_text(raw: &str) -> Result<String, ApiError> {
    Ok(validate_search_query(raw)?)
}

/// Parses a filter parameter; `all`, `tous` and `toutes` mean no constraint.
pub fn criterion<V: Token>(raw: &str) -> Result<Criterion<V>, ApiError> {
    Ok(raw.parse()?)
}

pub(crate) fn created<E: Entity>(record: &E) -> CommandResponse<E> {
    info!(kind = E::KIND, id = %record.id(), "Created");
    CommandResponse::new(
        record.clone(),
        Notice::success(format!("Created {} #{}", E::KIND, record.id())),
    )
}

/// Response for an action on `id`: success when `record` exists, an info
/// notice otherwise.
pub(crate) fn applied<E: Entity>(
    record: Option<E>,
    id: EntityId,
    action: &str,
) -> CommandResponse<Option<E>> {
    let notice = match &record {
        Some(_) => {
            info!(kind = E::KIND, id = %id, action, "Applied");
            Notice::success(format!("{} {} #{}", action, E::KIND, id))
        }
        None => Notice::info(format!("No {} #{}", E::KIND, id)),
    };
    CommandResponse::new(record, notice)
}

pub(crate) fn delete_from<E: Entity>(
    store: &mut EntityStore<E>,
    id: EntityId,
) -> CommandResponse<Option<E>> {
    let removed = store.remove(id);
    applied(removed, id, "Deleted")
}

pub(crate) fn set_status_in<E: Lifecycle>(
    store: &mut EntityStore<E>,
    id: EntityId,
    status: E::Status,
) -> CommandResponse<Option<E>> {
    let record = store.transition(id, status).cloned();
    applied(record, id, "Updated")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use oasis_core::types::{RoomDraft, RoomStatus};

    #[test]
    fn test_read_form_reports_field() {
        let input = FormInput::new().text("number", "101");
        let err = read_form(&input, &RoomDraft::rules(), RoomDraft::from_form).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("type"));

        let notice = Notice::from(&err);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "type is required");
    }

    #[test]
    fn test_rejected_keeps_error() {
        let err = ApiError::validation("currentOrder", "currentOrder must not be negative");
        let passed = rejected(err.clone());
        assert_eq!(passed, err);
        assert_eq!(Notice::from(&passed).level, NoticeLevel::Error);
    }

    #[test]
    fn test_criterion_sentinels() {
        assert!(criterion::<RoomStatus>("tous").unwrap().is_all());
        assert!(criterion::<RoomStatus>(" ALL ").unwrap().is_all());
        assert_eq!(
            criterion::<RoomStatus>("occupied").unwrap(),
            Criterion::Only(RoomStatus::Occupied)
        );

        let err = criterion::<RoomStatus>("sleeping").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_search_text_limit() {
        assert_eq!(search_text("  suite ").unwrap(), "suite");
        assert!(search_text(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_notice_serialization() {
        let json = serde_json::to_value(Notice::success("Created room #1")).unwrap();
        assert_eq!(json["level"], "success");
        assert_eq!(json["title"], "Created room #1");
    }
}
