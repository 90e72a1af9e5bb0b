//! Submit handler for the visit tracker server

use crate::VisitTrackerHandler;
use crate::jalali;
use crate::tracker::{Submission, UpsertOutcome};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl VisitTrackerHandler {
    /// Creates a record, or overwrites the one with the same (name, address).
    ///
    /// Passing an outcome marks the record finished; otherwise its status is
    /// derived from the next contact date.
    #[allow(clippy::too_many_arguments)]
    pub async fn handle_submit(
        &self,
        name: String,
        visit_date: String,
        address: Option<String>,
        area: Option<String>,
        rooms: Option<String>,
        next_call_date: Option<String>,
        description: Option<String>,
        outcome: Option<String>,
        end_date: Option<String>,
    ) -> McpResult<String> {
        let outcome = validation::parse_outcome(outcome)?;
        let display_name = name.trim().to_string();

        let submission = Submission {
            name,
            address: address.unwrap_or_default(),
            area: area.unwrap_or_default(),
            rooms: rooms.unwrap_or_default(),
            visit_date,
            next_call_date: next_call_date.unwrap_or_default(),
            description: description.unwrap_or_default(),
            outcome,
            end_date: end_date.unwrap_or_default(),
        };

        let today = jalali::local_date_today();
        let mut store = self.lock_store();

        let result = match store.upsert(submission, today) {
            Ok(result) => result,
            Err(e) => {
                drop(store);
                bail_public!(_, "Validation failed for field '{}': {}", e.field(), e);
            }
        };

        if let Err(e) = self.save_store(&mut store) {
            drop(store);
            tracing::warn!(error = %e, "failed to save after submit");
            bail_public!(_, "Failed to save: {}", e);
        }
        drop(store);

        Ok(match result {
            UpsertOutcome::Created => format!("Record '{}' created successfully", display_name),
            UpsertOutcome::Updated => format!("Record '{}' updated successfully", display_name),
        })
    }
}
