//! CSV encoding of the input table and the two output tables. No header rows.

use crate::domain::model::InputRow;
use crate::utils::error::Result;
use serde::Serialize;

/// Splits CSV bytes into rows numbered from 1. Ragged rows are kept as-is for
/// the driver to judge, and invalid UTF-8 is replaced rather than rejected.
///
/// The csv reader skips blank lines; each one is returned here as a row with no
/// fields so it is counted and reported like any other malformed row.
pub fn read_rows(data: &[u8]) -> Result<Vec<InputRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = Vec::new();
    let mut record = csv::ByteRecord::new();
    loop {
        let offset = reader.position().byte() as usize;
        for _ in 0..blank_lines_at(data, offset) {
            rows.push(InputRow::new(rows.len() + 1, Vec::new()));
        }

        if !reader.read_byte_record(&mut record)? {
            break;
        }
        let fields = record
            .iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        rows.push(InputRow::new(rows.len() + 1, fields));
    }
    Ok(rows)
}

/// Counts the empty lines starting at `offset`, the end of the previous record.
fn blank_lines_at(data: &[u8], mut offset: usize) -> usize {
    // a record ended by "\r\n" stops after the '\r'
    if offset > 0 && data.get(offset - 1) == Some(&b'\r') && data.get(offset) == Some(&b'\n') {
        offset += 1;
    }

    let mut count = 0;
    while let Some(rest) = data.get(offset..) {
        if rest.starts_with(b"\r\n") {
            offset += 2;
        } else if rest.starts_with(b"\n") || rest.starts_with(b"\r") {
            offset += 1;
        } else {
            break;
        }
        count += 1;
    }
    count
}

pub fn write_rows<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    for record in records {
        writer.serialize(record)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}
