//! Fidelity account statement parser (CSV export).
//!
//! Expected layout (positional columns, no header-name lookup):
//!   Account Positions Export - Fidelity Brokerage Services,,,,,,,
//!   Individual,X12345678,25600.00,,26450.00,,,125.50
//!   Stocks,,,,,,,
//!   AAPL,APPLE INC,10,185.50,1800.00,1855.00,1500.00
//!   Subtotal,,,,1800.00,1855.00,
//!   Core Account,,,,,,,
//!   SPAXX,FIDELITY GOVERNMENT MONEY MARKET,5020,1.00,4800.00,5020.00,not applicable
//!   X12345678,,,,,,,
//!
//! Section banners ("Stocks", "Mutual Funds", "Core Account") classify the
//! rows after them until the next banner. Subtotal lines, the repeated
//! account-id footer, and anything before the first banner carry no holding
//! data. The only discriminator the format offers is the literal text of
//! column 0, so rows are classified by a small ordered-rule check over that
//! cell rather than by field counts or a schema.

use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::error::{Result, StatementError};
use crate::statement_date::statement_date_from_path;
use crate::types::{Holding, HoldingKind, StatementHeader};

/// Minimum column count for a row to be read as a holding while a section
/// is active.
const MIN_HOLDING_COLUMNS: usize = 6;

/// Cost-basis cell text the export writes for positions without one.
const NO_COST_BASIS: &str = "not applicable";

/// What a body row is, decided from column 0 (trimmed) and the active
/// section. The rules run in this order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    /// Blank cell, subtotal line, repeated account id, or a row outside
    /// any active section.
    Noise,
    /// Section banner; carries no holding data itself.
    SectionMarker(HoldingKind),
    /// Position line, tagged with the section it appeared under.
    Holding(HoldingKind),
}

fn classify(record: &StringRecord, account_id: &str, section: Option<HoldingKind>) -> RowKind {
    let first = record.get(0).map(str::trim).unwrap_or("");

    if first.is_empty() || first.starts_with("Subtotal") || first == account_id {
        return RowKind::Noise;
    }

    if let Some(kind) = HoldingKind::from_section_label(first) {
        return RowKind::SectionMarker(kind);
    }

    if let Some(kind) = section {
        if record.len() >= MIN_HOLDING_COLUMNS {
            return RowKind::Holding(kind);
        }
    }

    RowKind::Noise
}

/// Parse one Fidelity statement export.
///
/// Returns the account header and every holding in source order. The
/// statement date comes from the filename (see [`statement_date_from_path`]).
/// Any malformed numeric cell, missing header column, or unrecognized
/// filename fails the whole parse; there is no per-row recovery.
pub fn parse_fidelity_statement(
    path: impl AsRef<Path>,
) -> Result<(StatementHeader, Vec<Holding>)> {
    let path = path.as_ref();
    let statement_date = statement_date_from_path(path)?;

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_path(path)
        .map_err(|e| StatementError::io(path, e))?;
    let mut rows = rdr.records();

    // Row 1 is the export banner; only its presence matters.
    rows.next()
        .transpose()
        .map_err(|e| StatementError::io(path, e))?
        .ok_or_else(|| StatementError::MalformedHeader("file is empty".into()))?;

    let header_row = rows
        .next()
        .transpose()
        .map_err(|e| StatementError::io(path, e))?
        .ok_or_else(|| StatementError::MalformedHeader("missing account header row".into()))?;
    let header = parse_header(&header_row, statement_date)?;

    let mut holdings = Vec::new();
    let mut section: Option<HoldingKind> = None;

    for (i, row) in rows.enumerate() {
        let record = row.map_err(|e| StatementError::io(path, e))?;
        // Physical 1-based line; the reader skips blank lines, so the
        // record index (banner and header first) is only a fallback.
        let row_number = record.position().map_or(i + 3, |p| p.line() as usize);

        match classify(&record, &header.account_id, section) {
            RowKind::Noise => {}
            RowKind::SectionMarker(kind) => section = Some(kind),
            RowKind::Holding(kind) => holdings.push(parse_holding(&record, kind, row_number)?),
        }
    }

    Ok((header, holdings))
}

/// Parse a decimal cell. The export writes plain decimals; anything
/// `f64` rejects, and the non-finite spellings it accepts, is malformed.
fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn header_field<'r>(record: &'r StringRecord, index: usize, name: &str) -> Result<&'r str> {
    record.get(index).ok_or_else(|| {
        StatementError::MalformedHeader(format!("missing {name} (column {index})"))
    })
}

fn header_amount(record: &StringRecord, index: usize, name: &str) -> Result<f64> {
    let raw = header_field(record, index, name)?;
    parse_amount(raw)
        .ok_or_else(|| StatementError::MalformedHeader(format!("{name} {raw:?} is not a number")))
}

fn parse_header(record: &StringRecord, statement_date: NaiveDate) -> Result<StatementHeader> {
    let account_type = header_field(record, 0, "account type")?;
    let account_id = header_field(record, 1, "account id")?;
    if account_type.is_empty() {
        return Err(StatementError::MalformedHeader("account type is empty".into()));
    }
    if account_id.is_empty() {
        return Err(StatementError::MalformedHeader("account id is empty".into()));
    }

    // Column 7 is populated only for periods that paid dividends; absent
    // and blank both mean none were reported.
    let dividends = match record.get(7).map(str::trim) {
        None | Some("") => 0.0,
        Some(raw) => parse_amount(raw).ok_or_else(|| {
            StatementError::MalformedHeader(format!("dividends {raw:?} is not a number"))
        })?,
    };

    Ok(StatementHeader {
        account_id: account_id.to_string(),
        account_type: account_type.to_string(),
        beginning_value: header_amount(record, 2, "beginning value")?,
        ending_value: header_amount(record, 4, "ending value")?,
        dividends,
        statement_date,
    })
}

fn holding_field<'r>(
    record: &'r StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<&'r str> {
    record.get(index).ok_or_else(|| StatementError::MalformedHoldingRow {
        row,
        reason: format!("missing {name} (column {index})"),
    })
}

fn parse_holding(record: &StringRecord, kind: HoldingKind, row: usize) -> Result<Holding> {
    let amount = |index: usize, name: &str| -> Result<f64> {
        let raw = holding_field(record, index, name, row)?;
        parse_amount(raw).ok_or_else(|| StatementError::MalformedHoldingRow {
            row,
            reason: format!("{name} {raw:?} is not a number"),
        })
    };

    let cost_basis_raw = holding_field(record, 6, "cost basis", row)?;
    let cost_basis = if cost_basis_raw.trim() == NO_COST_BASIS {
        0.0
    } else {
        parse_amount(cost_basis_raw).ok_or_else(|| StatementError::MalformedHoldingRow {
            row,
            reason: format!("cost basis {cost_basis_raw:?} is not a number"),
        })?
    };

    Ok(Holding {
        ticker: holding_field(record, 0, "ticker", row)?.trim().to_string(),
        kind,
        description: holding_field(record, 1, "description", row)?.trim().to_string(),
        quantity: amount(2, "quantity")?,
        price: amount(3, "price")?,
        beginning_value: amount(4, "beginning value")?,
        ending_value: amount(5, "ending value")?,
        cost_basis,
    })
}
