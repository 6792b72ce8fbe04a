use crate::csv_processor::OutputRow;

/// Rows whose original or translated name contains `query`, ignoring case.
/// The query is used as given, surrounding whitespace included; an empty
/// query matches everything.
pub fn filter_rows<'a>(rows: &'a [OutputRow], query: &str) -> Vec<&'a OutputRow> {
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            row.name.to_lowercase().contains(&needle)
                || row.translated_name.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Row with the smallest price gap. Rows without a gap are ignored; the first
/// row wins a tie.
pub fn best_deal<'a>(rows: &[&'a OutputRow]) -> Option<&'a OutputRow> {
    let mut best: Option<(&'a OutputRow, f64)> = None;

    for row in rows {
        let Some(gap) = row.price_gap else { continue };
        match best {
            Some((_, best_gap)) if gap >= best_gap => {}
            _ => best = Some((*row, gap)),
        }
    }

    best.map(|(row, _)| row)
}
