//! Normalization applied to every record entering the store
//!
//! Data files written by older versions of the tracker, or edited by hand,
//! may carry stray whitespace around key fields and Windows or classic Mac
//! line endings inside descriptions.

use super::record::Record;

/// Normalize line endings in a string to LF (\n)
///
/// # Arguments
///
/// * `s` - String to normalize
///
/// # Returns
///
/// String with normalized line endings
pub fn normalize_string_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Normalize a record in place
///
/// Key and date fields are trimmed so that identity matching and date parsing
/// see the same text a fresh submission would produce.
pub fn normalize_record(record: &mut Record) {
    for field in [
        &mut record.name,
        &mut record.address,
        &mut record.visit_date,
        &mut record.next_call_date,
        &mut record.end_date,
    ] {
        if field.trim().len() != field.len() {
            *field = field.trim().to_string();
        }
    }

    if record.description.contains('\r') {
        record.description = normalize_string_line_endings(&record.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_string_line_endings() {
        assert_eq!(normalize_string_line_endings("hello\r\nworld"), "hello\nworld");
        assert_eq!(normalize_string_line_endings("hello\rworld"), "hello\nworld");
        assert_eq!(normalize_string_line_endings("a\r\n\r\nb"), "a\n\nb");
        assert_eq!(normalize_string_line_endings("plain"), "plain");
    }

    #[test]
    fn test_normalize_record() {
        let mut record = Record {
            name: " Ali ".to_string(),
            address: "Tehran\n".to_string(),
            next_call_date: " 1403/04/01".to_string(),
            description: "line one\r\nline two".to_string(),
            area: " 120 ".to_string(),
            ..Default::default()
        };
        normalize_record(&mut record);
        assert_eq!(record.name, "Ali");
        assert_eq!(record.address, "Tehran");
        assert_eq!(record.next_call_date, "1403/04/01");
        assert_eq!(record.description, "line one\nline two");
        // Free-form fields are left as stored.
        assert_eq!(record.area, " 120 ");
    }
}
