//! Filtering and sorting over the record set
//!
//! Filters are AND-combined and each one is skipped when unset. Sorting is
//! stable in both directions, so records that compare equal keep their input
//! order.

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::str::FromStr;

use super::record::{Record, Status};

/// Status criterion; `All` disables the filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" | "همه" => Ok(StatusFilter::All),
            other => other.parse().map(StatusFilter::Only),
        }
    }
}

/// Filter criteria for [`query`]
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub status: StatusFilter,
    /// Case-insensitive substring of the engineer name
    pub name: Option<String>,
    /// Case-insensitive substring of the description
    pub keyword: Option<String>,
    /// Inclusive lower bound on the next contact date
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the next contact date
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NextCallDate,
    VisitDate,
    EndDate,
    Name,
    Status,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "next_call_date" | "next_contact_date" | "تاریخ تماس بعدی" => {
                Ok(SortKey::NextCallDate)
            }
            "visit_date" | "تاریخ ویزیت" => Ok(SortKey::VisitDate),
            "end_date" | "تاریخ پایان" => Ok(SortKey::EndDate),
            "name" | "نام مهندس" => Ok(SortKey::Name),
            "status" | "وضعیت" => Ok(SortKey::Status),
            other => Err(format!(
                "Invalid sort key '{}'. Valid options are: next_call_date, visit_date, end_date, name, status",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "asc" | "ascending" | "صعودی" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "نزولی" => Ok(SortOrder::Descending),
            other => Err(format!(
                "Invalid sort order '{}'. Valid options are: asc, desc",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Filters {
    fn has_date_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    /// Whether `record` passes every set criterion as of `today`
    pub fn matches(&self, record: &Record, today: NaiveDate) -> bool {
        if let StatusFilter::Only(wanted) = self.status
            && record.current_status(today) != wanted
        {
            return false;
        }

        if let Some(name) = non_empty(&self.name)
            && !contains_ignore_case(&record.name, name)
        {
            return false;
        }

        if let Some(keyword) = non_empty(&self.keyword)
            && !contains_ignore_case(&record.description, keyword)
        {
            return false;
        }

        if self.has_date_bounds() {
            // Records without a usable next contact date never satisfy a range.
            let Some(next_call) = record.next_call_date_gregorian() else {
                return false;
            };
            if self.from.is_some_and(|from| next_call < from) {
                return false;
            }
            if self.to.is_some_and(|to| next_call > to) {
                return false;
            }
        }

        true
    }
}

fn non_empty(criterion: &Option<String>) -> Option<&str> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Compare two records on `key`, ascending
///
/// Missing or unparseable dates compare as the earliest possible date.
fn compare_by(key: SortKey, a: &Record, b: &Record, today: NaiveDate) -> Ordering {
    match key {
        SortKey::NextCallDate => a
            .next_call_date_gregorian()
            .cmp(&b.next_call_date_gregorian()),
        SortKey::VisitDate => a.visit_date_gregorian().cmp(&b.visit_date_gregorian()),
        SortKey::EndDate => a.end_date_gregorian().cmp(&b.end_date_gregorian()),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Status => a
            .current_status(today)
            .priority()
            .cmp(&b.current_status(today).priority()),
    }
}

/// Filter and order `records`
///
/// Returns references into `records` in the requested order; the input slice
/// is left untouched.
pub fn query<'a>(
    records: &'a [Record],
    filters: &Filters,
    sort: &SortSpec,
    today: NaiveDate,
) -> Vec<&'a Record> {
    let mut selected: Vec<&Record> = records
        .iter()
        .filter(|record| filters.matches(record, today))
        .collect();

    // slice::sort_by is stable; reversing the comparator keeps ties in input order.
    selected.sort_by(|a, b| {
        let ordering = compare_by(sort.key, a, b, today);
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        // 1403/03/26
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn record(name: &str, next_call_date: &str, status: Status) -> Record {
        Record {
            name: name.to_string(),
            visit_date: "1403/01/10".to_string(),
            next_call_date: next_call_date.to_string(),
            status,
            ..Default::default()
        }
    }

    fn names(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_filter_uses_derived_status() {
        // Stored label is stale; the derived one wins.
        let records = vec![
            record("past", "1403/03/01", Status::Awaiting),
            record("future", "1403/05/01", Status::FollowUpDue),
        ];
        let filters = Filters {
            status: StatusFilter::Only(Status::FollowUpDue),
            ..Default::default()
        };
        let result = query(&records, &filters, &SortSpec::default(), today());
        assert_eq!(names(&result), vec!["past"]);
    }

    #[test]
    fn test_all_status_equals_no_filter() {
        let records = vec![
            record("a", "1403/03/01", Status::Awaiting),
            record("b", "", Status::Won),
            record("c", "1403/05/01", Status::Unset),
        ];
        let all = Filters {
            status: StatusFilter::All,
            ..Default::default()
        };
        let sort = SortSpec::default();
        assert_eq!(
            query(&records, &all, &sort, today()),
            query(&records, &Filters::default(), &sort, today())
        );
        assert_eq!(query(&records, &all, &sort, today()).len(), 3);
    }

    #[test]
    fn test_name_and_keyword_are_case_insensitive() {
        let mut first = record("Ali Rezaei", "", Status::Awaiting);
        first.description = "Needs a second QUOTE".to_string();
        let mut second = record("Sara Ahmadi", "", Status::Awaiting);
        second.description = "quote sent".to_string();
        let records = vec![first, second];

        let by_name = Filters {
            name: Some("rezaei".to_string()),
            ..Default::default()
        };
        assert_eq!(
            names(&query(&records, &by_name, &SortSpec::default(), today())),
            vec!["Ali Rezaei"]
        );

        let by_keyword = Filters {
            keyword: Some("Quote".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query(&records, &by_keyword, &SortSpec::default(), today()).len(),
            2
        );

        let both = Filters {
            name: Some("sara".to_string()),
            keyword: Some("second".to_string()),
            ..Default::default()
        };
        assert!(query(&records, &both, &SortSpec::default(), today()).is_empty());
    }

    #[test]
    fn test_blank_text_criteria_are_skipped() {
        let records = vec![record("a", "", Status::Awaiting)];
        let filters = Filters {
            name: Some("  ".to_string()),
            keyword: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query(&records, &filters, &SortSpec::default(), today()).len(), 1);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = vec![
            record("before", "1403/02/31", Status::Awaiting),
            record("start", "1403/03/01", Status::Awaiting),
            record("end", "1403/03/10", Status::Awaiting),
            record("after", "1403/03/11", Status::Awaiting),
        ];
        let filters = Filters {
            from: Some(ymd(2024, 5, 21)), // 1403/03/01
            to: Some(ymd(2024, 5, 30)),   // 1403/03/10
            ..Default::default()
        };
        let result = query(&records, &filters, &SortSpec::default(), today());
        assert_eq!(names(&result), vec!["start", "end"]);
    }

    #[test]
    fn test_date_range_excludes_missing_dates_only_when_bounded() {
        let records = vec![
            record("empty", "", Status::Awaiting),
            record("garbage", "next week", Status::Awaiting),
            record("dated", "1403/03/05", Status::Awaiting),
        ];

        let unbounded = query(&records, &Filters::default(), &SortSpec::default(), today());
        assert_eq!(unbounded.len(), 3);

        let from_only = Filters {
            from: Some(ymd(2024, 1, 1)),
            ..Default::default()
        };
        assert_eq!(
            names(&query(&records, &from_only, &SortSpec::default(), today())),
            vec!["dated"]
        );

        let to_only = Filters {
            to: Some(ymd(2030, 1, 1)),
            ..Default::default()
        };
        assert_eq!(
            names(&query(&records, &to_only, &SortSpec::default(), today())),
            vec!["dated"]
        );
    }

    #[test]
    fn test_date_sort_treats_missing_as_earliest() {
        let records = vec![
            record("late", "1403/05/01", Status::Awaiting),
            record("none", "", Status::Awaiting),
            record("early", "1403/02/01", Status::Awaiting),
        ];
        let asc = SortSpec {
            key: SortKey::NextCallDate,
            order: SortOrder::Ascending,
        };
        assert_eq!(
            names(&query(&records, &Filters::default(), &asc, today())),
            vec!["none", "early", "late"]
        );

        let desc = SortSpec {
            key: SortKey::NextCallDate,
            order: SortOrder::Descending,
        };
        assert_eq!(
            names(&query(&records, &Filters::default(), &desc, today())),
            vec!["late", "early", "none"]
        );
    }

    #[test]
    fn test_date_sort_is_chronological_across_years() {
        let mut records = vec![
            record("b", "", Status::Awaiting),
            record("a", "", Status::Awaiting),
        ];
        records[0].visit_date = "1403/01/01".to_string();
        records[1].visit_date = "1402/12/29".to_string();
        let spec = SortSpec {
            key: SortKey::VisitDate,
            order: SortOrder::Ascending,
        };
        assert_eq!(
            names(&query(&records, &Filters::default(), &spec, today())),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_status_sort_priority() {
        let records = vec![
            record("lost", "", Status::Lost),
            record("won", "", Status::Won),
            record("awaiting", "1403/05/01", Status::Awaiting),
            record("due", "1403/03/01", Status::Awaiting),
        ];
        let spec = SortSpec {
            key: SortKey::Status,
            order: SortOrder::Ascending,
        };
        assert_eq!(
            names(&query(&records, &Filters::default(), &spec, today())),
            vec!["due", "awaiting", "won", "lost"]
        );
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let records = vec![
            record("same", "1403/04/01", Status::Awaiting),
            record("other", "1403/04/05", Status::Awaiting),
            record("same", "1403/04/02", Status::Awaiting),
        ];
        for order in [SortOrder::Ascending, SortOrder::Descending] {
            let spec = SortSpec {
                key: SortKey::Name,
                order,
            };
            let result = query(&records, &Filters::default(), &spec, today());
            let same: Vec<&str> = result
                .iter()
                .filter(|r| r.name == "same")
                .map(|r| r.next_call_date.as_str())
                .collect();
            assert_eq!(same, vec!["1403/04/01", "1403/04/02"]);
        }
    }

    #[test]
    fn test_parse_sort_and_filter_options() {
        assert_eq!("name".parse::<SortKey>(), Ok(SortKey::Name));
        assert_eq!("تاریخ ویزیت".parse::<SortKey>(), Ok(SortKey::VisitDate));
        assert!("priority".parse::<SortKey>().is_err());
        assert_eq!("نزولی".parse::<SortOrder>(), Ok(SortOrder::Descending));
        assert_eq!("همه".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            "follow_up_due".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(Status::FollowUpDue))
        );
    }
}
