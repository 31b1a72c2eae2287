//! Column width measurement.
//!
//! Widths are measured against the full data set when data is loaded, never against a filtered
//! view, so filtering and sorting do not make columns jump.

use crate::table::sort::SORT_ASC_GLYPH;
use unicode_width::UnicodeWidthStr;

/// Computes display widths (in terminal columns) for every column.
///
/// A `fixed` width of 0 auto-sizes the column to its widest cell. Every column is at least as
/// wide as its title plus a sort glyph, so a fixed width is widened to fit the header.
pub fn measure_column_widths<'a, I>(headers: &[String], fixed: &[u16], rows: I) -> Vec<u16>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut widths: Vec<u16> = headers
        .iter()
        .enumerate()
        .map(|(i, title)| {
            let caption = title.width() + SORT_ASC_GLYPH.width();
            let fixed = fixed.get(i).copied().unwrap_or(0);
            clamp_u16(caption).max(fixed)
        })
        .collect();

    let auto: Vec<usize> = (0..headers.len())
        .filter(|&i| fixed.get(i).copied().unwrap_or(0) == 0)
        .collect();
    if auto.is_empty() {
        return widths;
    }

    for row in rows {
        for &i in &auto {
            if let Some(cell) = row.get(i) {
                widths[i] = widths[i].max(clamp_u16(cell.width()));
            }
        }
    }
    widths
}

fn clamp_u16(w: usize) -> u16 {
    w.min(u16::MAX as usize) as u16
}
