//! Conversion of raw fixture records into typed holdings.
//!
//! Fixture files carry numbers either as JSON numbers or as display strings
//! such as `"20%"` or `"1,25,000.50"`. Everything is parsed here once; the
//! computation layer only ever sees `f64`.

use serde::Deserialize;

use crate::domain::models::{Holding, MarketCap};
use crate::errors::AnalyticsError;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl From<f64> for NumericField {
    fn from(n: f64) -> Self {
        NumericField::Number(n)
    }
}

impl From<&str> for NumericField {
    fn from(s: &str) -> Self {
        NumericField::Text(s.to_string())
    }
}

// Holding as it appears in a JSON or CSV fixture
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawHolding {
    pub symbol: String,
    pub company_name: String,
    pub sector: String,
    pub market_cap: String,
    pub quantity: NumericField,
    pub avg_price: NumericField,
    pub current_price: NumericField,
    pub value: NumericField,
    pub gain_loss: NumericField,
    pub gain_loss_percent: NumericField,
}

pub fn parse_number(symbol: &str, field: &str, raw: &NumericField) -> Result<f64, AnalyticsError> {
    let parsed = match raw {
        NumericField::Number(n) => Some(*n),
        NumericField::Text(s) => {
            let trimmed = s.trim();
            let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
            let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
            cleaned.parse::<f64>().ok()
        }
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(AnalyticsError::malformed(symbol, field, display(raw))),
    }
}

fn display(raw: &NumericField) -> String {
    match raw {
        NumericField::Number(n) => n.to_string(),
        NumericField::Text(s) => s.clone(),
    }
}

impl TryFrom<RawHolding> for Holding {
    type Error = AnalyticsError;

    fn try_from(raw: RawHolding) -> Result<Self, Self::Error> {
        let symbol = raw.symbol.trim().to_string();
        if symbol.is_empty() {
            return Err(AnalyticsError::malformed("", "symbol", raw.symbol));
        }
        let sector = raw.sector.trim().to_string();
        if sector.is_empty() {
            return Err(AnalyticsError::malformed(&symbol, "sector", raw.sector));
        }
        let market_cap = MarketCap::parse(&raw.market_cap)
            .ok_or_else(|| AnalyticsError::malformed(&symbol, "marketCap", raw.market_cap.clone()))?;

        let quantity = parse_number(&symbol, "quantity", &raw.quantity)?;
        if quantity < 0.0 {
            return Err(AnalyticsError::malformed(&symbol, "quantity", display(&raw.quantity)));
        }
        let avg_price = parse_number(&symbol, "avgPrice", &raw.avg_price)?;
        if avg_price <= 0.0 {
            return Err(AnalyticsError::malformed(&symbol, "avgPrice", display(&raw.avg_price)));
        }
        let current_price = parse_number(&symbol, "currentPrice", &raw.current_price)?;
        if current_price <= 0.0 {
            return Err(AnalyticsError::malformed(
                &symbol,
                "currentPrice",
                display(&raw.current_price),
            ));
        }

        let value = parse_number(&symbol, "value", &raw.value)?;
        if value < 0.0 {
            return Err(AnalyticsError::malformed(&symbol, "value", display(&raw.value)));
        }

        Ok(Holding {
            value,
            gain_loss: parse_number(&symbol, "gainLoss", &raw.gain_loss)?,
            gain_loss_percent: parse_number(&symbol, "gainLossPercent", &raw.gain_loss_percent)?,
            company_name: raw.company_name.trim().to_string(),
            symbol,
            sector,
            market_cap,
            quantity,
            avg_price,
            current_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(gain_pct: NumericField) -> RawHolding {
        RawHolding {
            symbol: "TCS".into(),
            company_name: "Tata Consultancy Services".into(),
            sector: "Technology".into(),
            market_cap: "Large Cap".into(),
            quantity: 100.0.into(),
            avg_price: "5,000".into(),
            current_price: 6000.0.into(),
            value: "600000".into(),
            gain_loss: 100000.0.into(),
            gain_loss_percent: gain_pct,
        }
    }

    #[test]
    fn parses_percent_and_separators() {
        assert_eq!(parse_number("X", "f", &"20%".into()).unwrap(), 20.0);
        assert_eq!(parse_number("X", "f", &" -10.5 % ".into()).unwrap(), -10.5);
        assert_eq!(parse_number("X", "f", &"1,25,000.50".into()).unwrap(), 125000.5);
        assert_eq!(parse_number("X", "f", &NumericField::Number(3.0)).unwrap(), 3.0);
    }

    #[test]
    fn rejects_non_numeric_text() {
        let err = parse_number("TCS", "gainLossPercent", &"n/a%".into()).unwrap_err();
        assert_eq!(err, AnalyticsError::malformed("TCS", "gainLossPercent", "n/a%"));
        assert!(parse_number("TCS", "value", &"".into()).is_err());
        assert!(parse_number("TCS", "value", &"NaN".into()).is_err());
    }

    #[test]
    fn converts_raw_record() {
        let h = Holding::try_from(raw("20%".into())).unwrap();
        assert_eq!(h.avg_price, 5000.0);
        assert_eq!(h.value, 600000.0);
        assert_eq!(h.gain_loss_percent, 20.0);
        assert_eq!(h.market_cap, MarketCap::Large);
    }

    #[test]
    fn malformed_percentage_names_symbol() {
        let err = Holding::try_from(raw("twenty%".into())).unwrap_err();
        match err {
            AnalyticsError::MalformedRecord { symbol, field, .. } => {
                assert_eq!(symbol, "TCS");
                assert_eq!(field, "gainLossPercent");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_market_cap_and_bad_prices() {
        let mut r = raw("1%".into());
        r.market_cap = "Mega Cap".into();
        assert!(matches!(
            Holding::try_from(r),
            Err(AnalyticsError::MalformedRecord { ref field, .. }) if field == "marketCap"
        ));

        let mut r = raw("1%".into());
        r.avg_price = 0.0.into();
        assert!(Holding::try_from(r).is_err());

        let mut r = raw("1%".into());
        r.quantity = (-1.0).into();
        assert!(Holding::try_from(r).is_err());
    }

    #[test]
    fn rejects_negative_value() {
        let mut r = raw("1%".into());
        r.value = "-6,00,000".into();
        assert_eq!(
            Holding::try_from(r).unwrap_err(),
            AnalyticsError::malformed("TCS", "value", "-6,00,000")
        );
    }

    #[test]
    fn deserializes_mixed_json_fields() {
        let json = r#"{
            "symbol": "HDFCBANK", "companyName": "HDFC Bank", "sector": "Banking",
            "marketCap": "Large Cap", "quantity": 50, "avgPrice": "1500",
            "currentPrice": 1650, "value": "82500", "gainLoss": 7500,
            "gainLossPercent": "10%"
        }"#;
        let raw: RawHolding = serde_json::from_str(json).unwrap();
        let h = Holding::try_from(raw).unwrap();
        assert_eq!(h.quantity, 50.0);
        assert_eq!(h.value, 82500.0);
        assert_eq!(h.gain_loss_percent, 10.0);
    }
}
