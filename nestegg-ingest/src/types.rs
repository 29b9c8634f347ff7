//! Normalized statement records produced by the parsers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Section classification for a holding.
///
/// Assigned from the enclosing section banner, never from the row itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldingKind {
    Stock,
    #[serde(rename = "Mutual Fund")]
    MutualFund,
    #[serde(rename = "Money Market")]
    MoneyMarket,
}

impl HoldingKind {
    /// Map a section banner ("Stocks", "Mutual Funds", "Core Account") to
    /// the kind it introduces. Anything else is not a banner; exact match
    /// only, so near-misses fall through to the other row rules.
    pub fn from_section_label(label: &str) -> Option<HoldingKind> {
        match label {
            "Stocks" => Some(HoldingKind::Stock),
            "Mutual Funds" => Some(HoldingKind::MutualFund),
            "Core Account" => Some(HoldingKind::MoneyMarket),
            _ => None,
        }
    }

    /// Label carried on the holding records themselves (also the
    /// serialized form).
    pub fn label(&self) -> &'static str {
        match self {
            HoldingKind::Stock => "Stock",
            HoldingKind::MutualFund => "Mutual Fund",
            HoldingKind::MoneyMarket => "Money Market",
        }
    }
}

/// Account summary from the statement header row, one per file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementHeader {
    pub account_id: String,
    /// Free-form as exported ("Individual", "Roth IRA", ...).
    pub account_type: String,
    pub beginning_value: f64,
    pub ending_value: f64,
    /// Dividends paid over the period; 0.0 when the export leaves the
    /// column blank.
    pub dividends: f64,
    /// As-of date, recovered from the export filename; the file body
    /// carries no parsed date.
    pub statement_date: NaiveDate,
}

impl StatementHeader {
    /// Change in account value over the statement period.
    pub fn period_change(&self) -> f64 {
        self.ending_value - self.beginning_value
    }
}

/// A single position (ticker/fund/cash line) within an account for the
/// statement period.
///
/// Holdings keep their source presentation order; it is not a canonical
/// sort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    /// Section the row appeared under.
    #[serde(rename = "type")]
    pub kind: HoldingKind,
    pub description: String,
    pub quantity: f64,
    pub price: f64,
    pub beginning_value: f64,
    pub ending_value: f64,
    /// 0.0 when the export marks the position "not applicable".
    pub cost_basis: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_label_mapping() {
        assert_eq!(
            HoldingKind::from_section_label("Stocks"),
            Some(HoldingKind::Stock)
        );
        assert_eq!(
            HoldingKind::from_section_label("Mutual Funds"),
            Some(HoldingKind::MutualFund)
        );
        assert_eq!(
            HoldingKind::from_section_label("Core Account"),
            Some(HoldingKind::MoneyMarket)
        );
    }

    #[test]
    fn test_section_label_is_exact_match() {
        assert_eq!(HoldingKind::from_section_label("Stock"), None);
        assert_eq!(HoldingKind::from_section_label("stocks"), None);
        assert_eq!(HoldingKind::from_section_label("Core Account "), None);
        assert_eq!(HoldingKind::from_section_label("Bonds"), None);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(HoldingKind::Stock.label(), "Stock");
        assert_eq!(HoldingKind::MutualFund.label(), "Mutual Fund");
        assert_eq!(HoldingKind::MoneyMarket.label(), "Money Market");
    }

    #[test]
    fn test_holding_serializes_with_source_vocabulary() {
        let holding = Holding {
            ticker: "FXAIX".to_string(),
            kind: HoldingKind::MutualFund,
            description: "FIDELITY 500 INDEX FUND".to_string(),
            quantity: 100.0,
            price: 175.25,
            beginning_value: 17000.0,
            ending_value: 17525.0,
            cost_basis: 15000.0,
        };

        let value = serde_json::to_value(&holding).unwrap();
        assert_eq!(value["type"], "Mutual Fund");
        assert_eq!(value["ticker"], "FXAIX");
        assert_eq!(value["cost_basis"], 15000.0);
    }

    #[test]
    fn test_header_period_change() {
        let header = StatementHeader {
            account_id: "X12345678".to_string(),
            account_type: "Individual".to_string(),
            beginning_value: 25600.0,
            ending_value: 26450.0,
            dividends: 125.5,
            statement_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        };
        assert_eq!(header.period_change(), 850.0);
    }
}
