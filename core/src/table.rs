//! Search and CSV export over table rows.

use crate::error::ExportError;

/// Indices of rows with at least one cell containing `term`, ignoring case.
/// An empty term matches every row.
///
/// Each cell is matched on its own, so a term spanning two cells does not
/// match; see `search_rows` for whole-row matching.
pub fn filter_rows<R, C>(rows: &[R], term: &str) -> Vec<usize>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.as_ref()
                .iter()
                .any(|cell| cell.as_ref().to_lowercase().contains(&needle))
        })
        .map(|(index, _)| index)
        .collect()
}

/// Like `filter_rows`, but matches `term` against the row's cells joined by
/// a single space, so a term may span neighbouring cells.
pub fn search_rows<R, C>(rows: &[R], term: &str) -> Vec<usize>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            let text = row
                .as_ref()
                .iter()
                .map(|cell| cell.as_ref())
                .collect::<Vec<_>>()
                .join(" ");
            text.to_lowercase().contains(&needle)
        })
        .map(|(index, _)| index)
        .collect()
}

/// Cells are trimmed; each record ends with `\n`. Rows may differ in length.
pub fn to_csv<R, C>(rows: &[R]) -> Result<String, ExportError>
where
    R: AsRef<[C]>,
    C: AsRef<str>,
{
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row.as_ref().iter().map(|cell| cell.as_ref().trim()))?;
    }

    let bytes = writer.into_inner().map_err(|e| ExportError::Flush(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
