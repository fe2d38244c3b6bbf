use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Whether a trade made or lost money.
/// Serialized as `"profit"` / `"loss"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Amount counts positively toward totals
    Profit,
    /// Amount counts negatively toward totals
    Loss,
}

impl TradeType {
    /// Apply this type's sign to a non-negative magnitude.
    pub fn signed(&self, amount: f64) -> f64 {
        match self {
            TradeType::Profit => amount,
            TradeType::Loss => -amount,
        }
    }
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeType::Profit => write!(f, "profit"),
            TradeType::Loss => write!(f, "loss"),
        }
    }
}

impl FromStr for TradeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "profit" => Ok(TradeType::Profit),
            "loss" => Ok(TradeType::Loss),
            other => Err(CoreError::InvalidInput(format!(
                "Unknown trade type '{other}': expected 'profit' or 'loss'"
            ))),
        }
    }
}

/// A single journal entry.
///
/// Records are immutable-by-replacement: editing a trade means writing a
/// complete new record with the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Opaque unique identifier, stable for the life of the record
    pub id: String,

    /// Calendar day the trade belongs to (`yyyy-MM-dd`)
    pub date: NaiveDate,

    /// Time of day (`HH:mm`), informational only
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,

    /// Magnitude of the result (always non-negative)
    pub amount: f64,

    /// Profit or loss — carries the sign of `amount`
    #[serde(rename = "type")]
    pub trade_type: TradeType,

    /// Free-text notes
    pub summary: String,
}

impl Trade {
    /// Build a trade from validated input and a freshly issued id.
    pub fn from_draft(id: impl Into<String>, draft: TradeDraft) -> Self {
        Self {
            id: id.into(),
            date: draft.date,
            time: hour_minute::truncate(draft.time),
            amount: draft.amount,
            trade_type: draft.trade_type,
            summary: draft.summary,
        }
    }

    /// Contribution of this trade to any total: `+amount` or `-amount`.
    pub fn signed_amount(&self) -> f64 {
        self.trade_type.signed(self.amount)
    }

    /// Check the same field rules that apply to a new entry.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.is_empty() {
            return Err(CoreError::InvalidInput("Trade id must not be empty".into()));
        }
        validate_fields(self.amount, &self.summary)
    }
}

/// Everything needed to create a trade, minus the id.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeDraft {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub amount: f64,
    pub trade_type: TradeType,
    pub summary: String,
}

impl TradeDraft {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        amount: f64,
        trade_type: TradeType,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            date,
            time,
            amount,
            trade_type,
            summary: summary.into(),
        }
    }

    pub fn profit(date: NaiveDate, time: NaiveTime, amount: f64, summary: impl Into<String>) -> Self {
        Self::new(date, time, amount, TradeType::Profit, summary)
    }

    pub fn loss(date: NaiveDate, time: NaiveTime, amount: f64, summary: impl Into<String>) -> Self {
        Self::new(date, time, amount, TradeType::Loss, summary)
    }

    /// Parse raw form input into a validated draft.
    ///
    /// `date` is `yyyy-MM-dd`, `time` is `HH:mm`, `amount` is decimal text.
    pub fn parse(
        date: &str,
        time: &str,
        amount: &str,
        trade_type: &str,
        summary: &str,
    ) -> Result<Self, CoreError> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|e| {
            CoreError::InvalidInput(format!("Invalid date '{date}': {e}"))
        })?;
        let time = hour_minute::parse(time.trim())
            .map(hour_minute::truncate)
            .map_err(|e| CoreError::InvalidInput(format!("Invalid time '{time}': {e}")))?;
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidInput(format!("Amount '{amount}' is not a number")))?;
        let trade_type = trade_type.parse::<TradeType>()?;

        let draft = Self::new(date, time, amount, trade_type, summary);
        draft.validate()?;
        Ok(draft)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_fields(self.amount, &self.summary)
    }
}

fn validate_fields(amount: f64, summary: &str) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "Trade amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "Trade amount must not be negative (got {amount}); use the loss type instead"
        )));
    }
    if summary.trim().is_empty() {
        return Err(CoreError::InvalidInput("Trade summary must not be empty".into()));
    }
    Ok(())
}

/// Serde adapter storing a `NaiveTime` as `HH:mm`.
/// Reading also accepts `HH:mm:ss`; seconds are discarded either way.
pub mod hour_minute {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    /// Drop seconds and sub-seconds, the precision the stored form keeps.
    pub fn truncate(time: NaiveTime) -> NaiveTime {
        NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
    }

    pub fn parse(s: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(s, FORMAT).or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map(truncate).map_err(serde::de::Error::custom)
    }
}
