use std::fmt::Write;

use crate::error::DashboardError;
use crate::model::MergedRecord;

pub const EXPORT_SEPARATOR: &str = "----------------------------------------";

/// Render the records as a plain-text block for the clipboard.
///
/// An empty set is refused with [`DashboardError::NothingToExport`] so the
/// caller can warn instead of copying a bare header.
pub fn format_export(records: &[MergedRecord]) -> Result<String, DashboardError> {
    if records.is_empty() {
        return Err(DashboardError::NothingToExport);
    }

    let mut out = String::new();
    let noun = if records.len() == 1 { "sortie" } else { "sorties" };
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Total : {} {noun}", records.len());

    for record in records {
        out.push_str(EXPORT_SEPARATOR);
        out.push('\n');
        let _ = writeln!(out, "Bateau : {}", record.boat_name);
        let _ = writeln!(out, "Immatriculation : {}", record.registration_id);
        let _ = writeln!(out, "Date : {}", record.trip_date);
    }
    out.push_str(EXPORT_SEPARATOR);
    out.push('\n');

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: usize, reg: &str, boat: &str, date: &str) -> MergedRecord {
        MergedRecord {
            id,
            boat_name: boat.into(),
            registration_id: reg.into(),
            trip_date: date.into(),
            owner_name: "Jean Dupont".into(),
            month: 1,
            year: 2024,
        }
    }

    #[test]
    fn empty_set_is_refused() {
        let err = format_export(&[]).unwrap_err();
        assert!(matches!(err, DashboardError::NothingToExport));
    }

    #[test]
    fn single_record_block() {
        let text = format_export(&[rec(0, "123-456", "Barque1", "01/01/2024")]).unwrap();
        let expected = format!(
            "Total : 1 sortie\n{EXPORT_SEPARATOR}\nBateau : Barque1\nImmatriculation : 123-456\nDate : 01/01/2024\n{EXPORT_SEPARATOR}\n"
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn blocks_follow_record_order() {
        let text = format_export(&[
            rec(0, "A", "Alpha", "01/01/2024"),
            rec(1, "B", "Bravo", "02/01/2024"),
        ])
        .unwrap();
        assert!(text.starts_with("Total : 2 sorties\n"));
        let alpha = text.find("Alpha").unwrap();
        let bravo = text.find("Bravo").unwrap();
        assert!(alpha < bravo);
        assert_eq!(text.matches(EXPORT_SEPARATOR).count(), 3);
        // Owner name is not part of the export.
        assert!(!text.contains("Jean Dupont"));
    }
}
