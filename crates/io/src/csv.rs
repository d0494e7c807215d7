// Owner registry import (header-aware CSV)

use std::io::Read;
use std::path::Path;

use tripboard_dashboard::config::OwnerColumns;
use tripboard_dashboard::OwnerRecord;

use crate::error::IngestError;
use crate::Ingested;

pub fn load_owners(path: &Path, columns: &OwnerColumns) -> Result<Ingested<OwnerRecord>, IngestError> {
    let content = read_file_as_utf8(path)?;
    let owners = parse_owners(&content, columns)?;
    log::info!("{}: {} owner row(s)", path.display(), owners.len());
    Ok(owners)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, IngestError> {
    let read_err = |source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            log::debug!("{}: not UTF-8, decoded as Windows-1252", path.display());
            Ok(decoded.into_owned())
        }
    }
}

/// Parse owner rows. The first line names the columns; blank lines are
/// skipped. Ragged rows are kept with whatever fields they have.
pub fn parse_owners(content: &str, columns: &OwnerColumns) -> Result<Ingested<OwnerRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(columns.delimiter as u8)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| IngestError::Header(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("owner row {}: skipped ({e})", line + 2);
                skipped += 1;
                continue;
            }
        };

        // The reader drops empty lines itself; a whitespace-only line is one blank field.
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }
        if record.len() > headers.len() {
            log::debug!(
                "owner row {}: {} field(s) beyond the header ignored",
                line + 2,
                record.len() - headers.len()
            );
        }

        let mut owner = OwnerRecord::default();
        for (header, value) in headers.iter().zip(record.iter()) {
            let slot = if *header == columns.registration_column {
                &mut owner.registration_id
            } else if *header == columns.boat_name_column {
                &mut owner.boat_name
            } else if *header == columns.owner_name_column {
                &mut owner.owner_name
            } else {
                owner
                    .extra
                    .entry(header.clone())
                    .or_insert_with(|| value.to_string());
                continue;
            };
            // A repeated header keeps its first value.
            if slot.is_none() {
                *slot = Some(value.to_string());
            }
        }
        rows.push(owner);
    }

    Ok(Ingested { rows, skipped })
}
