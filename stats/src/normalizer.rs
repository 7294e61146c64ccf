//! Turns HAProxy's `;csv` stats report into [`StatRecord`]s.
//!
//! The report looks like this (columns vary between HAProxy versions, only the
//! ones [`StatRecord`] knows about are picked up):
//!
//! ```text
//! # pxname,svname,qcur,qmax,scur,smax,slim,stot,...,status,weight,act,bck,...,type,rate,...
//! example-stats,FRONTEND,,,1,6,50000,1836,...,OPEN,,,,...,0,1,...
//! example-backend-default,198.51.100.196:443,0,0,0,1,,53,...,UP,1,1,0,...,2,0,...
//! ```

use crate::{
    error::{
        ParseError,
        TableError,
    },
    record::StatRecord,
};
use csv::StringRecord;
use std::collections::HashMap;

/// Marks the header row of the report.
pub const COMMENT_PREFIX: char = '#';

/// Parses a full report. Rows come back in report order.
///
/// A report with only a header is a valid, empty snapshot.
pub fn parse(data: &[u8]) -> Result<Vec<StatRecord>, ParseError> {
    let rows = read_rows(data)?;

    let Some((header, body)) = rows.split_first() else {
        return Err(ParseError::EmptyInput);
    };
    if body.is_empty() {
        debug!("Stats report has a header but no rows");
        return Ok(Vec::new());
    }

    let header = header_columns(header)?;
    debug!(columns = header.len(), rows = body.len(), "Parsing stats report");

    body.iter()
        .enumerate()
        .map(|(index, row)| {
            // The header is row 0.
            let row_number = index + 1;
            if row.len() != header.len() {
                return Err(ParseError::ColumnCountMismatch {
                    row: row_number,
                    expected: header.len(),
                    found: row.len(),
                });
            }
            Ok(StatRecord::from_row(&zip_row(&header, row)))
        })
        .collect()
}

fn read_rows(data: &[u8]) -> Result<Vec<StringRecord>, ParseError> {
    check_quoting(data).map_err(ParseError::MalformedTable)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ParseError::MalformedTable(e.into()))
}

#[derive(Clone, Copy)]
enum Quoting {
    FieldStart,
    Unquoted,
    Quoted { opened_on: usize },
    /// A `"` inside a quoted field: either the closing quote or the first half of `""`.
    QuoteInQuoted { opened_on: usize },
    /// `\r` right after a closing quote, only `\n` may follow.
    ClosedCr,
}

/// Strict RFC 4180 quoting, which the `csv` reader does not enforce on its own:
/// a `"` may only open a field, close it, or be doubled inside it.
fn check_quoting(data: &[u8]) -> Result<(), TableError> {
    let mut state = Quoting::FieldStart;
    let mut line = 1;

    for &byte in data {
        state = match (state, byte) {
            (Quoting::FieldStart, b'"') => Quoting::Quoted { opened_on: line },
            (Quoting::FieldStart | Quoting::Unquoted, b',' | b'\n') => Quoting::FieldStart,
            (Quoting::Unquoted, b'"') => return Err(TableError::BareQuote { line }),
            (Quoting::FieldStart | Quoting::Unquoted, _) => Quoting::Unquoted,
            (Quoting::Quoted { opened_on }, b'"') => Quoting::QuoteInQuoted { opened_on },
            (Quoting::Quoted { .. }, _) => state,
            (Quoting::QuoteInQuoted { opened_on }, b'"') => Quoting::Quoted { opened_on },
            (Quoting::QuoteInQuoted { .. }, b',' | b'\n') => Quoting::FieldStart,
            (Quoting::QuoteInQuoted { .. }, b'\r') => Quoting::ClosedCr,
            (Quoting::ClosedCr, b'\n') => Quoting::FieldStart,
            (Quoting::QuoteInQuoted { .. } | Quoting::ClosedCr, _) => {
                return Err(TableError::StrayAfterQuote { line })
            }
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    match state {
        Quoting::Quoted { opened_on } => Err(TableError::UnterminatedQuote { line: opened_on }),
        _ => Ok(()),
    }
}

/// Column names from the first row, with the comment marker removed from the first cell.
fn header_columns(row: &StringRecord) -> Result<Vec<String>, ParseError> {
    let columns: Vec<String> = row
        .iter()
        .enumerate()
        .map(|(index, cell)| match cell.strip_prefix(COMMENT_PREFIX) {
            Some(stripped) if index == 0 => stripped.trim().to_string(),
            _ => cell.to_string(),
        })
        .collect();

    if columns.iter().all(String::is_empty) {
        return Err(ParseError::HeaderMissing);
    }
    Ok(columns)
}

/// Later columns win if the header repeats a name.
fn zip_row(header: &[String], row: &StringRecord) -> HashMap<String, String> {
    header
        .iter()
        .zip(row.iter())
        .map(|(column, value)| (column.clone(), value.to_string()))
        .collect()
}
