use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{FilterState, MergedRecord, OwnerFilter};

/// Keep the records that satisfy every active predicate of `state`.
/// Input order is preserved.
pub fn filter(records: &[MergedRecord], state: &FilterState) -> Vec<MergedRecord> {
    let needle = state.text.to_lowercase();
    let range = DateRange::from_state(state);

    records
        .iter()
        .filter(|r| matches_owner(r, &state.owner))
        .filter(|r| needle.is_empty() || matches_text(r, &needle))
        .filter(|r| range.as_ref().map_or(true, |range| range.contains(r)))
        .cloned()
        .collect()
}

fn matches_owner(record: &MergedRecord, owner: &OwnerFilter) -> bool {
    match owner {
        OwnerFilter::All => true,
        OwnerFilter::Named(name) => record.owner_name == *name,
    }
}

/// `needle` must already be lowercased.
fn matches_text(record: &MergedRecord, needle: &str) -> bool {
    record.registration_id.to_lowercase().contains(needle)
        || record.boat_name.to_lowercase().contains(needle)
}

/// Inclusive bounds, start at the first instant of its day and end at the
/// last millisecond of its day.
struct DateRange {
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl DateRange {
    fn from_state(state: &FilterState) -> Option<Self> {
        if !state.has_date_range() {
            return None;
        }
        Some(Self {
            start: state.start_date.map(start_of_day),
            end: state.end_date.map(end_of_day),
        })
    }

    fn contains(&self, record: &MergedRecord) -> bool {
        // Trips whose month/year defaulted to 0 have no place on the calendar.
        let Some(date) = record.comparison_date() else {
            return false;
        };
        let at = start_of_day(date);
        self.start.map_or(true, |s| at >= s) && self.end.map_or(true, |e| at <= e)
    }
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: usize, reg: &str, boat: &str, owner: &str, month: u32, year: i32) -> MergedRecord {
        MergedRecord {
            id,
            boat_name: boat.into(),
            registration_id: reg.into(),
            trip_date: format!("01/{month:02}/{year}"),
            owner_name: owner.into(),
            month,
            year,
        }
    }

    fn sample() -> Vec<MergedRecord> {
        vec![
            rec(0, "123-456", "Barque1", "Jean Dupont", 1, 2024),
            rec(1, "777-001", "La Mouette", "Marie Curie", 3, 2024),
            rec(2, "777-002", "Goéland", "Jean Dupont", 12, 2023),
            rec(3, "888-000", "Sans Date", "Marie Curie", 0, 0),
        ]
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ids(records: &[MergedRecord]) -> Vec<usize> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn default_state_keeps_everything() {
        let records = sample();
        assert_eq!(filter(&records, &FilterState::default()), records);
    }

    #[test]
    fn owner_filter_is_exact_and_case_sensitive() {
        let records = sample();
        let state = FilterState {
            owner: OwnerFilter::Named("Jean Dupont".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &state)), vec![0, 2]);

        let state = FilterState {
            owner: OwnerFilter::Named("jean dupont".into()),
            ..Default::default()
        };
        assert!(filter(&records, &state).is_empty());
    }

    #[test]
    fn text_matches_registration_substring() {
        let records = sample();
        let state = FilterState { text: "123".into(), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![0]);

        let state = FilterState { text: "zzz".into(), ..Default::default() };
        assert!(filter(&records, &state).is_empty());
    }

    #[test]
    fn text_matches_boat_name_case_insensitively() {
        let records = sample();
        let state = FilterState { text: "mOUETTE".into(), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![1]);

        let state = FilterState { text: "GOÉLAND".into(), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![2]);
    }

    #[test]
    fn text_does_not_search_owner_name() {
        let records = sample();
        let state = FilterState { text: "curie".into(), ..Default::default() };
        assert!(filter(&records, &state).is_empty());
    }

    #[test]
    fn closed_date_range() {
        let records = sample();
        let state = FilterState {
            start_date: Some(date("2024-01-01")),
            end_date: Some(date("2024-01-31")),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&records, &state)), vec![0]);

        let state = FilterState {
            start_date: Some(date("2024-02-01")),
            end_date: Some(date("2024-02-29")),
            ..Default::default()
        };
        assert!(filter(&records, &state).is_empty());
    }

    #[test]
    fn open_ended_ranges() {
        let records = sample();
        let state = FilterState { start_date: Some(date("2024-02-01")), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![1]);

        let state = FilterState { end_date: Some(date("2023-12-31")), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![2]);
    }

    #[test]
    fn range_uses_first_of_month() {
        // A trip on 20/03/2024 compares as 2024-03-01.
        let records = sample();
        let state = FilterState { start_date: Some(date("2024-03-02")), ..Default::default() };
        assert!(filter(&records, &state).is_empty());

        let state = FilterState { end_date: Some(date("2024-03-01")), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![0, 1, 2]);
    }

    #[test]
    fn undated_records_drop_out_only_when_range_active() {
        let records = sample();
        assert_eq!(filter(&records, &FilterState::default()).len(), 4);

        let state = FilterState { end_date: Some(date("2100-01-01")), ..Default::default() };
        assert_eq!(ids(&filter(&records, &state)), vec![0, 1, 2]);
    }

    #[test]
    fn predicates_combine_as_conjunction() {
        let records = sample();
        let state = FilterState {
            owner: OwnerFilter::Named("Jean Dupont".into()),
            text: "777".into(),
            start_date: Some(date("2023-01-01")),
            end_date: None,
        };
        assert_eq!(ids(&filter(&records, &state)), vec![2]);
    }
}
