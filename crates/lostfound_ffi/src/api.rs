//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose report/resolve/browse use-cases to Dart via FRB.
//! - Render records into flat string-typed view models.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the slot database, applies one use-case and returns.
//! - Failures are reported inside response envelopes, never thrown.

use log::warn;
use lostfound_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_db,
    ping as ping_inner, ContactKind, ItemCounts, ItemDraft, ItemQuery, ItemRecord,
    ItemService, ItemServiceError, SortKey, SortOrder, SqliteSlotStorage, StoreConfig,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const ITEMS_DB_FILE_NAME: &str = "lostfound_items.sqlite3";
const ITEMS_DB_PATH_ENV: &str = "LOSTFOUND_DB_PATH";
static ITEMS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Render model for one item card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Incident date, `YYYY-MM-DD`.
    pub date: String,
    pub location: String,
    pub contact_info: String,
    /// `email` or `phone`.
    pub contact_kind: String,
    /// `mailto:` / `tel:` link for the contact button.
    pub contact_link: String,
    /// `lost` or `found`.
    pub status: String,
    pub resolved: bool,
    /// Creation instant, RFC 3339.
    pub date_created: String,
}

/// One validation message bound to a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrorView {
    /// Draft key (`name|description|date|location|contactInfo|status`).
    pub field: String,
    pub message: String,
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemCountsView {
    pub total: u32,
    pub lost: u32,
    pub found: u32,
    pub resolved: u32,
    /// Count for the "all items" badge under the requested resolved toggle.
    pub visible: u32,
}

/// Response envelope for report submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportItemResponse {
    pub ok: bool,
    pub item: Option<ItemView>,
    /// Empty unless validation failed.
    pub field_errors: Vec<FieldErrorView>,
    /// Human-readable message for toast display.
    pub message: String,
}

/// Response envelope for resolve/unresolve intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Response envelope for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListResponse {
    pub items: Vec<ItemView>,
    pub counts: ItemCountsView,
    pub message: String,
}

/// Submits the report form.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Validation failures return `ok=false` with every field error.
#[flutter_rust_bridge::frb(sync)]
pub fn report_item(
    name: String,
    description: String,
    date: String,
    location: String,
    contact_info: String,
    status: String,
) -> ReportItemResponse {
    let draft = ItemDraft {
        name,
        description,
        date,
        location,
        contact_info,
        status,
    };
    report_item_at(&resolve_items_db_path(), &draft)
}

/// Marks one item resolved. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn mark_resolved(item_id: String) -> ItemActionResponse {
    set_resolved_at(&resolve_items_db_path(), item_id.trim(), true)
}

/// Reopens one resolved item. Unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn undo_resolved(item_id: String) -> ItemActionResponse {
    set_resolved_at(&resolve_items_db_path(), item_id.trim(), false)
}

/// Returns the records to render for the given list controls.
///
/// Accepted values: `filter` in `all|lost|found`, `sort_key` in
/// `name|date|created`, `sort_order` in `asc|desc`. Empty strings use the
/// defaults (`all`, `created`, `desc`).
#[flutter_rust_bridge::frb(sync)]
pub fn list_items(
    filter: String,
    search: String,
    sort_key: String,
    sort_order: String,
    show_resolved: bool,
) -> ItemListResponse {
    match build_query(&filter, search, &sort_key, &sort_order, show_resolved) {
        Ok(query) => list_items_at(&resolve_items_db_path(), &query),
        Err(message) => ItemListResponse {
            items: Vec::new(),
            counts: ItemCountsView::default(),
            message,
        },
    }
}

/// Returns dashboard counters over all items.
#[flutter_rust_bridge::frb(sync)]
pub fn item_counts(show_resolved: bool) -> ItemCountsView {
    match with_item_service(&resolve_items_db_path(), |service| service.counts()) {
        Ok(counts) => to_counts_view(counts, show_resolved),
        Err(err) => {
            warn!("event=item_counts module=ffi status=error error={err}");
            ItemCountsView::default()
        }
    }
}

fn report_item_at(db_path: &Path, draft: &ItemDraft) -> ReportItemResponse {
    match with_item_service(db_path, |service| service.create(draft)) {
        Ok(Ok(record)) => ReportItemResponse {
            ok: true,
            message: format!("{} item reported successfully!", record.status.label()),
            item: Some(to_item_view(&record)),
            field_errors: Vec::new(),
        },
        Ok(Err(ItemServiceError::Validation(errors))) => ReportItemResponse {
            ok: false,
            item: None,
            field_errors: errors
                .iter()
                .map(|(field, message)| FieldErrorView {
                    field: field.as_str().to_string(),
                    message: message.to_string(),
                })
                .collect(),
            message: "Please fix the errors before submitting".to_string(),
        },
        Ok(Err(err)) => report_failure(format!("report_item failed: {err}")),
        Err(err) => report_failure(format!("report_item failed: {err}")),
    }
}

fn set_resolved_at(db_path: &Path, item_id: &str, resolved: bool) -> ItemActionResponse {
    let outcome = with_item_service(db_path, |service| {
        let known = service.get(item_id).is_some();
        if resolved {
            service.resolve(item_id);
        } else {
            service.unresolve(item_id);
        }
        known
    });

    match outcome {
        Ok(true) if resolved => ItemActionResponse::success("Item marked as resolved!"),
        Ok(true) => ItemActionResponse::success("Item reopened."),
        Ok(false) => ItemActionResponse::success("No item with that id; nothing changed."),
        Err(err) => ItemActionResponse::failure(format!("set_resolved failed: {err}")),
    }
}

fn list_items_at(db_path: &Path, query: &ItemQuery) -> ItemListResponse {
    let outcome = with_item_service(db_path, |service| (service.query(query), service.counts()));

    match outcome {
        Ok((records, counts)) => {
            let items = records.iter().map(to_item_view).collect::<Vec<_>>();
            let message = if !items.is_empty() {
                format!("Showing {} item(s).", items.len())
            } else if query.search.is_empty() {
                "No items yet".to_string()
            } else {
                "No matching items found".to_string()
            };
            ItemListResponse {
                items,
                counts: to_counts_view(counts, query.show_resolved),
                message,
            }
        }
        Err(err) => ItemListResponse {
            items: Vec::new(),
            counts: ItemCountsView::default(),
            message: format!("list_items failed: {err}"),
        },
    }
}

fn build_query(
    filter: &str,
    search: String,
    sort_key: &str,
    sort_order: &str,
    show_resolved: bool,
) -> Result<ItemQuery, String> {
    Ok(ItemQuery {
        filter: parse_or_default(filter)?,
        search,
        sort_key: parse_or_default::<SortKey>(sort_key)?,
        sort_order: parse_or_default::<SortOrder>(sort_order)?,
        show_resolved,
    })
}

fn parse_or_default<T>(raw: &str) -> Result<T, String>
where
    T: std::str::FromStr<Err = String> + Default,
{
    if raw.trim().is_empty() {
        Ok(T::default())
    } else {
        raw.parse()
    }
}

fn resolve_items_db_path() -> PathBuf {
    ITEMS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(ITEMS_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ITEMS_DB_FILE_NAME)
        })
        .clone()
}

fn with_item_service<T>(
    db_path: &Path,
    f: impl FnOnce(&mut ItemService<SqliteSlotStorage<'_>>) -> T,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("items DB open failed: {err}"))?;
    let storage = SqliteSlotStorage::try_new(&conn)
        .map_err(|err| format!("slot storage init failed: {err}"))?;
    let mut service = ItemService::open(storage, StoreConfig::from_env().slot_key);
    Ok(f(&mut service))
}

fn report_failure(message: String) -> ReportItemResponse {
    ReportItemResponse {
        ok: false,
        item: None,
        field_errors: Vec::new(),
        message,
    }
}

impl ItemActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

fn to_item_view(record: &ItemRecord) -> ItemView {
    ItemView {
        id: record.id.clone(),
        name: record.name.clone(),
        description: record.description.clone(),
        date: record.date.format("%Y-%m-%d").to_string(),
        location: record.location.clone(),
        contact_info: record.contact_info.clone(),
        contact_kind: match record.contact_kind() {
            ContactKind::Email => "email".to_string(),
            ContactKind::Phone => "phone".to_string(),
        },
        contact_link: record.contact_link(),
        status: record.status.as_str().to_string(),
        resolved: record.resolved,
        date_created: record.date_created.to_rfc3339(),
    }
}

fn to_counts_view(counts: ItemCounts, show_resolved: bool) -> ItemCountsView {
    ItemCountsView {
        total: saturating_u32(counts.total),
        lost: saturating_u32(counts.lost),
        found: saturating_u32(counts.found),
        resolved: saturating_u32(counts.resolved),
        visible: saturating_u32(counts.visible(show_resolved)),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
