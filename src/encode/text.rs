//! Delimited text encoder.
//!
//! Layout: header line, then one line per row, fields joined by the
//! separator, every line terminated by `\n`. No quoting: a field that would
//! need it is rejected instead.

use super::{EncodeError, ExportTable};

/// Encode `table` as separator-joined lines.
pub fn to_text(table: &ExportTable, separator: char) -> Result<String, EncodeError> {
    let mut out = String::new();

    write_line(&mut out, table.headers.iter().copied(), separator);

    for (i, row) in table.rows.iter().enumerate() {
        for (value, &column) in row.iter().zip(table.headers.iter()) {
            if value.contains(separator) || value.contains(['\r', '\n']) {
                return Err(EncodeError::UnencodableField { row: i, column });
            }
        }
        write_line(&mut out, row.iter().map(String::as_str), separator);
    }

    Ok(out)
}

fn write_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>, separator: char) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(field);
    }
    out.push('\n');
}

/// Split text produced by [`to_text`] back into lines of fields.
///
/// The header line is included as the first entry. A missing final newline
/// is accepted.
pub fn split_text(text: &str, separator: char) -> Vec<Vec<String>> {
    text.lines()
        .map(|line| line.split(separator).map(str::to_string).collect())
        .collect()
}
