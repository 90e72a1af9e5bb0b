//! Visit Tracker MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for tracking
//! field-visit projects: who visited which address, when to call back, and how
//! each project ended. All dates are entered in the Jalali calendar.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `VisitTrackerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `tracker` and `jalali` modules - status derivation,
//!   filtering, sorting and the keyed record store
//! - **Persistence Layer**: `storage` module - JSON or TOML data file
//!
//! # Example
//!
//! ```no_run
//! use visit_tracker::VisitTrackerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = VisitTrackerHandler::new("projects_data.json")?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod formatting;
mod handlers;
pub mod jalali;
pub mod storage;
pub mod tracker;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export commonly used types
pub use jalali::JalaliDate;
pub use storage::{DataFormat, Storage};
pub use tracker::{Outcome, Record, RecordStore, Status};

use validation::QueryParams;

/// MCP Server handler for visit tracking
///
/// Owns the record store for the whole session. Every successful mutation is
/// written back through `storage`, and the store is saved once more when the
/// handler is dropped.
pub struct VisitTrackerHandler {
    pub(crate) store: Mutex<RecordStore>,
    pub(crate) storage: Storage,
}

impl VisitTrackerHandler {
    /// Create a new handler for a data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file; `.toml` selects TOML, anything else JSON
    ///
    /// # Example
    /// ```no_run
    /// # use visit_tracker::VisitTrackerHandler;
    /// # use anyhow::Result;
    /// # fn main() -> Result<()> {
    /// let handler = VisitTrackerHandler::new("projects_data.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(storage_path: &str) -> Result<Self> {
        Self::with_storage(Storage::new(storage_path))
    }

    /// Create a handler around explicitly configured storage
    pub fn with_storage(storage: Storage) -> Result<Self> {
        let store = Mutex::new(storage.load()?);
        Ok(Self { store, storage })
    }

    pub(crate) fn lock_store(&self) -> MutexGuard<'_, RecordStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Refresh derived statuses and write the store to disk
    pub(crate) fn save_store(&self, store: &mut RecordStore) -> Result<()> {
        store.refresh_statuses(jalali::local_date_today());
        self.storage.save(store)
    }
}

impl Drop for VisitTrackerHandler {
    fn drop(&mut self) {
        let store = self.store.get_mut().unwrap_or_else(PoisonError::into_inner);
        store.refresh_statuses(jalali::local_date_today());
        if let Err(e) = self.storage.save(store) {
            tracing::warn!(error = %e, "failed to save records on shutdown");
        }
    }
}

/// Field-visit follow-up tracker.
///
/// Each record is one project visit identified by engineer name + address.
/// Dates use the Jalali calendar in YYYY/MM/DD form (e.g. 1403/02/15).
///
/// Statuses:
/// - **awaiting** (انتظار): no call is due yet
/// - **follow_up_due** (در انتظار تماس مجدد): the next call date has arrived or passed
/// - **won** (خرید): finished, the customer bought
/// - **lost** (از دست رفته): finished, the customer was lost
///
/// Open statuses are recomputed from the next call date every time records are read.
#[mcp_server]
impl McpServer for VisitTrackerHandler {
    /// **Submit**: Add a visit record, or overwrite the record with the same name + address.
    /// **Finish**: Pass outcome=won/lost to close the project; end_date defaults to today.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn submit(
        &self,
        /// Engineer name (required, part of the record key)
        name: String,
        /// Visit date YYYY/MM/DD, Jalali (required)
        visit_date: String,
        /// Site address (part of the record key, default empty)
        address: Option<String>,
        /// Floor area, free text
        area: Option<String>,
        /// Number of rooms, free text
        rooms: Option<String>,
        /// Next call date YYYY/MM/DD, Jalali (optional)
        next_call_date: Option<String>,
        /// Free-text notes
        description: Option<String>,
        /// Finished outcome: won/lost (omit for open projects)
        outcome: Option<String>,
        /// End date YYYY/MM/DD, Jalali (finished projects only, default today)
        end_date: Option<String>,
    ) -> McpResult<String> {
        self.handle_submit(
            name,
            visit_date,
            address,
            area,
            rooms,
            next_call_date,
            description,
            outcome,
            end_date,
        )
        .await
    }

    /// **Delete**: Permanently remove the record with this name + address. Requires confirm=true.
    #[tool]
    async fn delete(
        &self,
        /// Engineer name of the record
        name: String,
        /// Address of the record (default empty)
        address: Option<String>,
        /// Must be true to delete
        confirm: Option<bool>,
    ) -> McpResult<String> {
        self.handle_delete(name, address, confirm).await
    }

    /// **Get**: Show one record with every field in full, e.g. before editing it with submit.
    #[tool]
    async fn get(
        &self,
        /// Engineer name of the record
        name: String,
        /// Address of the record (default empty)
        address: Option<String>,
    ) -> McpResult<String> {
        self.handle_get(name, address).await
    }

    /// **List**: Filter and sort records. All filters combine; omit any to skip it.
    /// **Tip**: status="follow_up_due" shows today's call list.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn list(
        &self,
        /// Status: all/awaiting/follow_up_due/won/lost (default all)
        status: Option<String>,
        /// Engineer name contains (case-insensitive)
        name: Option<String>,
        /// Description contains (case-insensitive)
        keyword: Option<String>,
        /// Next call date on or after YYYY/MM/DD
        date_from: Option<String>,
        /// Next call date on or before YYYY/MM/DD
        date_to: Option<String>,
        /// Sort key: next_call_date/visit_date/end_date/name/status (default next_call_date)
        sort_by: Option<String>,
        /// Sort order: asc/desc (default asc)
        order: Option<String>,
    ) -> McpResult<String> {
        self.handle_list(QueryParams {
            status,
            name,
            keyword,
            date_from,
            date_to,
            sort_by,
            order,
        })
        .await
    }

    /// **Report**: Same filters and order as list, rendered as one compact row per record.
    #[allow(clippy::too_many_arguments)]
    #[tool]
    async fn report(
        &self,
        /// Status: all/awaiting/follow_up_due/won/lost (default all)
        status: Option<String>,
        /// Engineer name contains (case-insensitive)
        name: Option<String>,
        /// Description contains (case-insensitive)
        keyword: Option<String>,
        /// Next call date on or after YYYY/MM/DD
        date_from: Option<String>,
        /// Next call date on or before YYYY/MM/DD
        date_to: Option<String>,
        /// Sort key: next_call_date/visit_date/end_date/name/status (default next_call_date)
        sort_by: Option<String>,
        /// Sort order: asc/desc (default asc)
        order: Option<String>,
    ) -> McpResult<String> {
        self.handle_report(QueryParams {
            status,
            name,
            keyword,
            date_from,
            date_to,
            sort_by,
            order,
        })
        .await
    }
}
