//! Delete handler for the visit tracker server

use crate::VisitTrackerHandler;
use mcp_attr::{Result as McpResult, bail_public};

impl VisitTrackerHandler {
    /// Deletes the record with the given key once the caller confirms.
    ///
    /// A key with no matching record is not an error; the response says that
    /// nothing was removed.
    pub async fn handle_delete(
        &self,
        name: String,
        address: Option<String>,
        confirm: Option<bool>,
    ) -> McpResult<String> {
        if !confirm.unwrap_or(false) {
            bail_public!(
                _,
                "Deletion not confirmed. Call delete again with confirm=true to remove '{}'.",
                name.trim()
            );
        }

        let name = name.trim().to_string();
        let address = address.unwrap_or_default().trim().to_string();

        let mut store = self.lock_store();
        if store.remove(&name, &address).is_none() {
            drop(store);
            return Ok(format!(
                "No record found for '{}' at '{}'; nothing was deleted",
                name, address
            ));
        }

        if let Err(e) = self.save_store(&mut store) {
            drop(store);
            tracing::warn!(error = %e, "failed to save after delete");
            bail_public!(_, "Failed to save: {}", e);
        }
        drop(store);

        Ok(format!("Record '{}' deleted successfully", name))
    }
}
