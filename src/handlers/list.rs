//! List and report handlers for the visit tracker server

use crate::VisitTrackerHandler;
use crate::formatting;
use crate::jalali;
use crate::tracker;
use crate::validation::QueryParams;
use mcp_attr::Result as McpResult;

impl VisitTrackerHandler {
    /// Handles list/filter operations - applies filters and sorting, formats the table view.
    pub async fn handle_list(&self, params: QueryParams) -> McpResult<String> {
        let (filters, sort) = params.into_query()?;
        let today = jalali::local_date_today();

        let store = self.lock_store();
        let records = tracker::query(store.all(), &filters, &sort, today);
        Ok(formatting::format_records(&records, today))
    }

    /// Same selection and order as `handle_list`, rendered as report rows.
    pub async fn handle_report(&self, params: QueryParams) -> McpResult<String> {
        let (filters, sort) = params.into_query()?;
        let today = jalali::local_date_today();

        let store = self.lock_store();
        let records = tracker::query(store.all(), &filters, &sort, today);
        Ok(formatting::format_report(&records, today))
    }
}
