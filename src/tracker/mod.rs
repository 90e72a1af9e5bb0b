//! Visit tracking domain models and business logic
//!
//! This module contains the engine behind the server tools:
//! - `record`: the `Record` type and its closed `Status` label set
//! - `status`: status derivation from the next contact date
//! - `query`: filtering and stable sorting
//! - `store`: the keyed record collection with validated upsert
//! - `normalize`: cleanup applied to every record entering the store

mod normalize;
mod query;
mod record;
mod status;
mod store;

// Re-export all public types
pub use normalize::normalize_string_line_endings;
pub use query::{Filters, SortKey, SortOrder, SortSpec, StatusFilter, query};
pub use record::{Outcome, Record, Status};
pub use status::derive_status;
pub use store::{RecordStore, Submission, UpsertOutcome, ValidationError};
