//! Field sanitization and the shared row shape.
//!
//! Every sink writes the identical five columns in the identical order;
//! multi-valued fields join with `;` so they never collide with the comma
//! delimiter of the tabular file.

use crate::ChatLogEntry;

/// Column names, written exactly once per destination.
pub const HEADER: [&str; 5] = [
    "timestamp",
    "selected_substances",
    "question",
    "answer",
    "retrieved_files",
];

/// Separator for multi-valued fields.
pub const MULTI_SEPARATOR: char = ';';

/// Cleans one free-text field for tabular storage: line breaks and commas
/// become spaces, whitespace runs collapse to one space, the result is
/// trimmed.
pub fn sanitize_field(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Serializes one entry into the shared row shape.
pub fn entry_row(entry: &ChatLogEntry) -> [String; 5] {
    [
        entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        join_multi(&entry.selected_substances),
        sanitize_field(&entry.question),
        sanitize_field(&entry.answer),
        join_multi(&entry.retrieved_files),
    ]
}

fn join_multi(values: &[String]) -> String {
    values.join(&MULTI_SEPARATOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sanitize_flattens_breaks_commas_and_runs() {
        assert_eq!(
            sanitize_field("Is acetone\nflammable,\r\n  or not?   "),
            "Is acetone flammable or not?"
        );
        assert_eq!(sanitize_field(""), "");
        assert_eq!(sanitize_field("   \n\r  "), "");
    }

    #[test]
    fn row_has_five_columns_in_contract_order() {
        let entry = ChatLogEntry {
            timestamp: chrono::Local.with_ymd_and_hms(2026, 8, 6, 12, 30, 0).unwrap(),
            selected_substances: vec!["ACETONE".into(), "ETHANOL".into()],
            question: "flash point,\nplease".into(),
            answer: "It is -20 °C, per the sheet.".into(),
            retrieved_files: vec!["X123.HTM".into(), "X044.HTM".into()],
        };
        let row = entry_row(&entry);
        assert_eq!(row[0], "2026-08-06 12:30:00");
        assert_eq!(row[1], "ACETONE;ETHANOL");
        assert_eq!(row[2], "flash point please");
        assert_eq!(row[3], "It is -20 °C per the sheet.");
        assert_eq!(row[4], "X123.HTM;X044.HTM");
    }

    #[test]
    fn empty_multi_fields_serialize_empty() {
        let entry = ChatLogEntry {
            timestamp: chrono::Local.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap(),
            selected_substances: vec![],
            question: "q".into(),
            answer: "a".into(),
            retrieved_files: vec![],
        };
        let row = entry_row(&entry);
        assert_eq!(row[1], "");
        assert_eq!(row[4], "");
    }
}
