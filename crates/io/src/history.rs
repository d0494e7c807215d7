// Trip history import: headerless `id;dd/mm/yyyy` lines

use std::path::Path;

use tripboard_dashboard::config::HistoryFormat;
use tripboard_dashboard::TripRecord;

use crate::csv::read_file_as_utf8;
use crate::error::IngestError;

pub fn load_trips(path: &Path, format: &HistoryFormat) -> Result<Vec<TripRecord>, IngestError> {
    let content = read_file_as_utf8(path)?;
    let trips = parse_trips(&content, format);
    log::info!("{}: {} trip(s)", path.display(), trips.len());
    Ok(trips)
}

/// Every non-blank line becomes a trip. A line without a delimiter yields an
/// empty date; fields past the second are ignored. No line is ever rejected.
pub fn parse_trips(content: &str, format: &HistoryFormat) -> Vec<TripRecord> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut fields = line.split(format.delimiter);
            let id = fields.next().unwrap_or("").trim();
            let date = fields.next().unwrap_or("").trim();
            TripRecord::with_separator(id, date, format.date_separator)
        })
        .collect()
}
