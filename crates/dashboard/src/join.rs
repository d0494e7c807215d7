use std::collections::{BTreeMap, HashMap};

use crate::model::{MergedRecord, OwnerRecord, TripRecord};

/// Join trips with their owners on registration id.
///
/// Output follows trip order. Trips without an owner are dropped. When the
/// registry repeats an id, the first owner row wins.
pub fn merge(owners: &[OwnerRecord], trips: &[TripRecord], placeholder: &str) -> Vec<MergedRecord> {
    let index = index_owners(owners);

    trips
        .iter()
        .filter_map(|trip| {
            index
                .get(trip.registration_id.as_str())
                .map(|owner| (trip, *owner))
        })
        .enumerate()
        .map(|(id, (trip, owner))| MergedRecord {
            id,
            boat_name: or_placeholder(owner.boat_name.as_deref(), placeholder),
            registration_id: trip.registration_id.clone(),
            trip_date: trip.trip_date.clone(),
            owner_name: or_placeholder(owner.owner_name.as_deref(), placeholder),
            month: trip.month,
            year: trip.year,
        })
        .collect()
}

/// Registration id -> first owner carrying it.
fn index_owners(owners: &[OwnerRecord]) -> HashMap<&str, &OwnerRecord> {
    let mut index = HashMap::with_capacity(owners.len());
    for owner in owners {
        if let Some(ref id) = owner.registration_id {
            index.entry(id.as_str()).or_insert(owner);
        }
    }
    index
}

fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Registration ids that appear on more than one owner row, with their count.
pub fn duplicate_registrations(owners: &[OwnerRecord]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for owner in owners {
        if let Some(ref id) = owner.registration_id {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
    }
    counts.retain(|_, n| *n > 1);
    counts
}
