//! Get handler for the visit tracker server

use crate::VisitTrackerHandler;
use crate::formatting;
use crate::jalali;
use mcp_attr::{Result as McpResult, bail_public};

impl VisitTrackerHandler {
    /// Shows one record with every field untruncated, ready for editing.
    pub async fn handle_get(&self, name: String, address: Option<String>) -> McpResult<String> {
        let name = name.trim().to_string();
        let address = address.unwrap_or_default().trim().to_string();

        let store = self.lock_store();
        let Some(record) = store.get(&name, &address) else {
            bail_public!(
                _,
                "Record not found: no record for '{}' at '{}'. Use list() to see available records.",
                name,
                address
            );
        };

        Ok(formatting::format_record_detail(
            record,
            jalali::local_date_today(),
        ))
    }
}
