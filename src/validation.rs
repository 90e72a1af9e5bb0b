//! Validation helper functions for the visit tracker server
//!
//! Tool parameters arrive as optional strings; these helpers turn them into
//! engine types and report bad input as invalid-params errors.

use chrono::NaiveDate;
use mcp_attr::Result as McpResult;
use std::str::FromStr;

use crate::jalali;
use crate::tracker::{Filters, Outcome, SortSpec, StatusFilter};

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Trimmed value of an optional parameter, `None` when absent or blank
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional parameter with `FromStr`, treating blank as absent
fn parse_optional<T>(value: Option<String>) -> McpResult<Option<T>>
where
    T: FromStr<Err = String>,
{
    non_blank(value)
        .map(|v| v.parse::<T>().map_err(invalid_params))
        .transpose()
}

/// Parse and validate a Jalali date filter parameter
///
/// # Arguments
/// * `date_str` - Date string in YYYY/MM/DD format
///
/// # Returns
/// Result containing the Gregorian equivalent or error
pub fn parse_date_filter(date_str: &str) -> McpResult<NaiveDate> {
    jalali::parse_to_gregorian(date_str).ok_or_else(|| {
        invalid_params(format!(
            "Invalid date '{}'. Use YYYY/MM/DD in the Jalali calendar (e.g., '1403/02/15')",
            date_str
        ))
    })
}

/// Parse the optional finished outcome of a submission
pub fn parse_outcome(outcome: Option<String>) -> McpResult<Option<Outcome>> {
    parse_optional(outcome)
}

/// Raw query parameters shared by the list and report tools
#[derive(Debug, Default)]
pub struct QueryParams {
    pub status: Option<String>,
    pub name: Option<String>,
    pub keyword: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl QueryParams {
    /// Validate every parameter and build the engine's filter and sort spec
    pub fn into_query(self) -> McpResult<(Filters, SortSpec)> {
        let status: StatusFilter = parse_optional(self.status)?.unwrap_or_default();
        let from = non_blank(self.date_from)
            .map(|d| parse_date_filter(&d))
            .transpose()?;
        let to = non_blank(self.date_to)
            .map(|d| parse_date_filter(&d))
            .transpose()?;

        let filters = Filters {
            status,
            name: non_blank(self.name),
            keyword: non_blank(self.keyword),
            from,
            to,
        };
        let sort = SortSpec {
            key: parse_optional(self.sort_by)?.unwrap_or_default(),
            order: parse_optional(self.order)?.unwrap_or_default(),
        };
        Ok((filters, sort))
    }
}
