// File I/O operations

pub mod csv;
pub mod error;
pub mod history;

pub use crate::csv::load_owners;
pub use error::IngestError;
pub use history::load_trips;

/// Parsed owner rows plus how many the reader could not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested<T> {
    pub rows: Vec<T>,
    /// Rows the reader could not decode and dropped.
    pub skipped: usize,
}

impl<T> Ingested<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
