//! One-sheet XLSX encoder.

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook, XlsxError};

use super::{EncodeError, ExportTable};

/// Encode `table` as a workbook with a single sheet named after the form.
///
/// Row 1 holds the bold headers; every data cell is written as a string
/// exactly as formatted, so the sheet carries the same values as the TXT
/// export. The document creation time is pinned to keep the output
/// byte-identical for identical input.
pub fn to_xlsx(table: &ExportTable) -> Result<Vec<u8>, EncodeError> {
    write_workbook(table).map_err(|e| EncodeError::Xlsx(e.to_string()))
}

fn write_workbook(table: &ExportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new()
        .set_title(table.sheet_name())
        .set_creation_datetime(&created);
    workbook.set_properties(&properties);

    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(table.sheet_name())?;

    for (col, header) in table.headers.iter().enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *header, &bold)?;
        sheet.set_column_width(col, column_width(table, col as usize))?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let excel_row = r as u32 + 1;
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet.write_string(excel_row, c as u16, value)?;
        }
    }

    workbook.save_to_buffer()
}

/// Widest value in the column (header included), plus padding.
fn column_width(table: &ExportTable, col: usize) -> f64 {
    let widest = table
        .rows
        .iter()
        .filter_map(|row| row.get(col))
        .map(|v| v.chars().count())
        .chain(table.headers.get(col).map(|h| h.chars().count()))
        .max()
        .unwrap_or(8);
    (widest + 2) as f64
}
