use chrono::NaiveDate;
use thiserror::Error;

use super::normalize::normalize_record;
use super::record::{Outcome, Record, Status};
use super::status::derive_status;
use crate::jalali::{self, JalaliDate};

/// Rejected submission; names the offending field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
    #[error("visit_date is required")]
    MissingVisitDate,
    #[error("visit_date '{0}' is not a valid date (YYYY/MM/DD)")]
    InvalidVisitDate(String),
    #[error("next_call_date '{0}' is not a valid date (YYYY/MM/DD)")]
    InvalidNextCallDate(String),
    #[error("end_date '{0}' is not a valid date (YYYY/MM/DD)")]
    InvalidEndDate(String),
}

impl ValidationError {
    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::MissingVisitDate | ValidationError::InvalidVisitDate(_) => {
                "visit_date"
            }
            ValidationError::InvalidNextCallDate(_) => "next_call_date",
            ValidationError::InvalidEndDate(_) => "end_date",
        }
    }
}

/// Form input for [`RecordStore::upsert`]
///
/// `outcome` set means the record is finished with that label.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub name: String,
    pub address: String,
    pub area: String,
    pub rooms: String,
    pub visit_date: String,
    pub next_call_date: String,
    pub description: String,
    pub outcome: Option<Outcome>,
    pub end_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Ordered collection of records keyed by (name, address)
///
/// Insertion order is preserved; reordering is the query engine's job.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl Submission {
    fn validate(mut self, today: NaiveDate) -> Result<Record, ValidationError> {
        for field in [
            &mut self.name,
            &mut self.address,
            &mut self.area,
            &mut self.rooms,
            &mut self.visit_date,
            &mut self.next_call_date,
            &mut self.description,
            &mut self.end_date,
        ] {
            *field = field.trim().to_string();
        }

        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.visit_date.is_empty() {
            return Err(ValidationError::MissingVisitDate);
        }
        if JalaliDate::parse(&self.visit_date).is_none() {
            return Err(ValidationError::InvalidVisitDate(self.visit_date));
        }
        if !self.next_call_date.is_empty() && JalaliDate::parse(&self.next_call_date).is_none() {
            return Err(ValidationError::InvalidNextCallDate(self.next_call_date));
        }

        let end_date = match self.outcome {
            None => String::new(),
            Some(_) if self.end_date.is_empty() => jalali::format_gregorian(today),
            Some(_) if JalaliDate::parse(&self.end_date).is_none() => {
                return Err(ValidationError::InvalidEndDate(self.end_date));
            }
            Some(_) => self.end_date,
        };

        let status: Status = derive_status(&self.next_call_date, self.outcome, today);
        let mut record = Record {
            name: self.name,
            address: self.address,
            area: self.area,
            rooms: self.rooms,
            visit_date: self.visit_date,
            next_call_date: self.next_call_date,
            status,
            description: self.description,
            end_date,
        };
        normalize_record(&mut record);
        Ok(record)
    }
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded records
    ///
    /// Records are normalized; when two share a key the later one replaces the
    /// earlier one in place.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut store = Self::new();
        for mut record in records {
            normalize_record(&mut record);
            if let Some(pos) = store.position(&record.name, &record.address) {
                tracing::warn!(
                    name = %record.name,
                    address = %record.address,
                    "duplicate record key in loaded data; keeping the later entry"
                );
                store.records[pos] = record;
            } else {
                store.records.push(record);
            }
        }
        store
    }

    fn position(&self, name: &str, address: &str) -> Option<usize> {
        self.records.iter().position(|r| r.has_key(name, address))
    }

    /// Validate `submission` and insert or overwrite the matching record
    ///
    /// Nothing is mutated when validation fails.
    pub fn upsert(
        &mut self,
        submission: Submission,
        today: NaiveDate,
    ) -> Result<UpsertOutcome, ValidationError> {
        let record = submission.validate(today)?;

        match self.position(&record.name, &record.address) {
            Some(pos) => {
                tracing::debug!(name = %record.name, address = %record.address, "updating record");
                self.records[pos] = record;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                tracing::debug!(name = %record.name, address = %record.address, "adding record");
                self.records.push(record);
                Ok(UpsertOutcome::Created)
            }
        }
    }

    /// Remove the record with this key, returning it if it existed
    pub fn remove(&mut self, name: &str, address: &str) -> Option<Record> {
        let pos = self.position(name, address)?;
        Some(self.records.remove(pos))
    }

    /// Find a record by its key
    pub fn get(&self, name: &str, address: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.has_key(name, address))
    }

    /// All records in insertion order
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Write the current derived status into every unfinished record
    ///
    /// Returns how many stored labels changed.
    pub fn refresh_statuses(&mut self, today: NaiveDate) -> usize {
        let mut changed = 0;
        for record in self.records.iter_mut().filter(|r| !r.is_finished()) {
            let current = record.current_status(today);
            if record.status != current {
                record.status = current;
                changed += 1;
            }
        }
        changed
    }
}
