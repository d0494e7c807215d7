use std::collections::BTreeSet;

use crate::config::BoardConfig;
use crate::error::DashboardError;
use crate::export::format_export;
use crate::filter::filter;
use crate::join::{duplicate_registrations, merge};
use crate::model::{FilterState, MergedRecord, OwnerRecord, PageState, TripRecord};
use crate::paginate::{clamp_page, paginate, total_pages};

/// In-memory dashboard state: both sources, the merged set derived from
/// them, and the current filter and page.
///
/// Loading a source replaces it wholesale. The merged set is recomputed, and
/// the page reset, only once both sources are non-empty; otherwise the last
/// merge and page are kept.
#[derive(Debug, Clone)]
pub struct Dashboard {
    owners: Vec<OwnerRecord>,
    trips: Vec<TripRecord>,
    merged: Vec<MergedRecord>,
    filter: FilterState,
    page: PageState,
    placeholder: String,
}

/// One rendered page of the filtered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub records: &'a [MergedRecord],
    /// 1-indexed, already clamped.
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

impl Dashboard {
    pub fn new(config: &BoardConfig) -> Self {
        Self {
            owners: Vec::new(),
            trips: Vec::new(),
            merged: Vec::new(),
            filter: FilterState::default(),
            page: PageState::new(config.display.page_size),
            placeholder: config.display.placeholder.clone(),
        }
    }

    /// Replace the owner registry. Returns the number of rows loaded.
    pub fn load_owners(&mut self, owners: Vec<OwnerRecord>) -> usize {
        for (id, count) in duplicate_registrations(&owners) {
            log::warn!("registration '{id}' appears on {count} owner rows; using the first");
        }
        self.owners = owners;
        self.recompute();
        self.owners.len()
    }

    /// Replace the trip history. Returns the number of rows loaded.
    pub fn load_trips(&mut self, trips: Vec<TripRecord>) -> usize {
        self.trips = trips;
        self.recompute();
        self.trips.len()
    }

    fn recompute(&mut self) {
        if self.owners.is_empty() || self.trips.is_empty() {
            log::debug!("merge deferred: a source is empty");
            return;
        }
        self.merged = merge(&self.owners, &self.trips, &self.placeholder);
        self.page.reset();
        log::info!(
            "merged {} trip(s) against {} owner(s): {} record(s)",
            self.trips.len(),
            self.owners.len(),
            self.merged.len()
        );
    }

    pub fn owners(&self) -> &[OwnerRecord] {
        &self.owners
    }

    pub fn trips(&self) -> &[TripRecord] {
        &self.trips
    }

    pub fn merged(&self) -> &[MergedRecord] {
        &self.merged
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.current_page = page;
    }

    /// Distinct owner names of the merged set, sorted. These are the choices
    /// offered by the owner filter.
    pub fn owner_names(&self) -> Vec<String> {
        self.merged
            .iter()
            .map(|r| r.owner_name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The merged set narrowed by the current filter state.
    pub fn filtered(&self) -> Vec<MergedRecord> {
        filter(&self.merged, &self.filter)
    }

    /// Page `current_page` of `filtered`, clamped into range.
    pub fn page_of<'a>(&self, filtered: &'a [MergedRecord]) -> PageView<'a> {
        let size = self.page.page_size;
        let total = total_pages(filtered.len(), size);
        let page = clamp_page(self.page.current_page, total);
        PageView {
            records: paginate(filtered, page, size),
            page,
            total_pages: total,
            total_records: filtered.len(),
        }
    }

    /// Clipboard text for the current filtered set.
    pub fn export(&self) -> Result<String, DashboardError> {
        format_export(&self.filtered())
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(&BoardConfig::default())
    }
}
