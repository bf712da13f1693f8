//! Spreadsheet export projection.
//!
//! Projects a history snapshot into an in-memory xlsx workbook: one sheet,
//! a header row, one row per record, wrapped cells with capped column
//! widths and row heights scaled to the tallest cell.

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, FormatAlign, Workbook, XlsxError};

use scribe_core::content::ContentRecord;
use scribe_core::error::{Result, ScribeError};

const SHEET_NAME: &str = "Content";
const COLUMNS: [&str; 6] = [
    "Campaign",
    "Content Subject",
    "Target Audience",
    "LinkedIn",
    "X",
    "Blog",
];
const MAX_COLUMN_WIDTH: usize = 50;
const HEADER_ROW_HEIGHT: f64 = 20.0;
const POINTS_PER_LINE: f64 = 15.0;

/// Projects `records` into xlsx bytes plus a timestamped filename.
///
/// Pure with respect to the collection; nothing is mutated. An empty
/// history is an error, never an empty workbook.
pub fn to_table(records: &[ContentRecord]) -> Result<(Vec<u8>, String)> {
    if records.is_empty() {
        return Err(ScribeError::export("no content to export"));
    }

    let rows = build_rows(records);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(workbook_error)?;

    let cell_format = Format::new()
        .set_align(FormatAlign::Left)
        .set_align(FormatAlign::Top)
        .set_text_wrap();

    for (col, header) in COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &cell_format)
            .map_err(workbook_error)?;
    }
    worksheet
        .set_row_height(0, HEADER_ROW_HEIGHT)
        .map_err(workbook_error)?;

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_string_with_format(row_num, col as u16, value, &cell_format)
                .map_err(workbook_error)?;
        }
        worksheet
            .set_row_height(row_num, row_height(row))
            .map_err(workbook_error)?;
    }

    for (col, width) in column_widths(&rows).into_iter().enumerate() {
        worksheet
            .set_column_width(col as u16, width as f64)
            .map_err(workbook_error)?;
    }

    let bytes = workbook.save_to_buffer().map_err(workbook_error)?;
    tracing::info!(records = records.len(), "built export workbook");
    Ok((bytes, export_filename(Local::now())))
}

fn build_rows(records: &[ContentRecord]) -> Vec<[String; 6]> {
    records
        .iter()
        .map(|record| {
            [
                record.campaign.clone(),
                record.content_subject.clone(),
                record.target_audience.clone(),
                record.linkedin_content.clone(),
                record.x_content.clone(),
                record.blog_content.clone(),
            ]
        })
        .collect()
}

/// Row height scaled to the tallest cell in the row.
fn row_height(row: &[String; 6]) -> f64 {
    let max_lines = row.iter().map(|cell| line_count(cell)).max().unwrap_or(1);
    max_lines as f64 * POINTS_PER_LINE
}

fn line_count(text: &str) -> usize {
    text.matches('\n').count() + 1
}

/// Column widths sized to the longest cell, padded, capped at
/// [`MAX_COLUMN_WIDTH`] characters.
fn column_widths(rows: &[[String; 6]]) -> [usize; 6] {
    let mut widths = [0usize; 6];
    for (col, header) in COLUMNS.iter().enumerate() {
        let longest_cell = rows.iter().map(|row| row[col].len()).max().unwrap_or(0);
        widths[col] = (longest_cell.max(header.len()) + 2).min(MAX_COLUMN_WIDTH);
    }
    widths
}

fn export_filename(now: DateTime<Local>) -> String {
    format!("content_export_{}.xlsx", now.format("%Y%m%d_%H%M%S"))
}

fn workbook_error(err: XlsxError) -> ScribeError {
    ScribeError::export(format!("failed to build workbook: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: &str) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            timestamp: "2025-01-01 12:00:00".to_string(),
            campaign: "Launch".to_string(),
            content_subject: "electric bikes".to_string(),
            target_audience: "urban commuters".to_string(),
            blog_content: "first paragraph\n\nsecond paragraph".to_string(),
            linkedin_content: "post".to_string(),
            x_content: "tweet".to_string(),
        }
    }

    #[test]
    fn empty_history_is_an_export_error() {
        let err = to_table(&[]).unwrap_err();
        assert!(err.is_export());
        assert!(err.to_string().contains("no content to export"));
    }

    #[test]
    fn one_row_per_record_in_column_order() {
        let rows = build_rows(&[record("1"), record("2"), record("3")]);
        assert_eq!(rows.len(), 3);
        // Column order is Campaign, Content Subject, Target Audience,
        // LinkedIn, X, Blog.
        assert_eq!(rows[0][0], "Launch");
        assert_eq!(rows[0][1], "electric bikes");
        assert_eq!(rows[0][2], "urban commuters");
        assert_eq!(rows[0][3], "post");
        assert_eq!(rows[0][4], "tweet");
        assert_eq!(rows[0][5], "first paragraph\n\nsecond paragraph");
    }

    #[test]
    fn row_height_scales_with_line_count() {
        let rows = build_rows(&[record("1")]);
        // The blog cell has three lines.
        assert_eq!(row_height(&rows[0]), 3.0 * POINTS_PER_LINE);
    }

    #[test]
    fn column_widths_are_capped() {
        let mut long = record("1");
        long.blog_content = "x".repeat(400);
        let widths = column_widths(&build_rows(&[long]));
        assert_eq!(widths[5], MAX_COLUMN_WIDTH);
        // Short columns stay sized to the wider of header and content,
        // plus padding.
        assert_eq!(widths[3], "LinkedIn".len() + 2);
    }

    #[test]
    fn filename_carries_the_export_timestamp() {
        let now = Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(export_filename(now), "content_export_20250304_050607.xlsx");
    }

    #[test]
    fn workbook_bytes_are_produced_for_populated_history() {
        let (bytes, filename) = to_table(&[record("1"), record("2")]).unwrap();
        // xlsx is a zip container.
        assert_eq!(&bytes[..2], b"PK");
        assert!(filename.starts_with("content_export_"));
        assert!(filename.ends_with(".xlsx"));
    }
}
