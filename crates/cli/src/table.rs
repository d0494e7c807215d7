use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use tripboard_dashboard::MergedRecord;

/// Widest a column may grow before cells are cut with "..".
pub(crate) const MAX_COLUMN_WIDTH: usize = 32;

const HEADERS: [&str; 4] = ["Bateau", "Immatriculation", "Date", "Propriétaire"];

/// Display width of a string, accounting for accents, CJK double-width, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Cut `s` to at most `width` display columns, ending in ".." when cut.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .scan(0, |used, ch| {
                *used += ch.width().unwrap_or(0);
                (*used <= width).then_some(ch)
            })
            .collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = ch.width().unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str("..");
    out
}

/// Pad or truncate to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate_display(s, width);
    let pad = width.saturating_sub(display_width(&cut));
    format!("{cut}{}", " ".repeat(pad))
}

fn cells(record: &MergedRecord) -> [&str; 4] {
    [
        &record.boat_name,
        &record.registration_id,
        &record.trip_date,
        &record.owner_name,
    ]
}

/// Render records as an aligned text table with a header and rule line.
pub(crate) fn render(records: &[MergedRecord]) -> String {
    let mut widths = HEADERS.map(display_width);
    for record in records {
        for (w, cell) in widths.iter_mut().zip(cells(record)) {
            *w = (*w).max(display_width(cell)).min(MAX_COLUMN_WIDTH);
        }
    }

    let line = |row: [&str; 4]| -> String {
        let padded: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| pad_right(cell, w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(HEADERS));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for record in records {
        out.push_str(&line(cells(record)));
        out.push('\n');
    }
    out
}
