//! Presentation ordering of price records

use crate::feed::PriceRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field the price list is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Current price
    Price,
    /// 24h percentage change
    Change24h,
    /// Market capitalization
    #[default]
    MarketCap,
}

impl SortKey {
    /// Value of this field on `record`
    pub fn value(self, record: &PriceRecord) -> Option<Decimal> {
        match self {
            SortKey::Price => record.current_price,
            SortKey::Change24h => record.price_change_percentage_24h,
            SortKey::MarketCap => record.market_cap,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Price => "price",
            SortKey::Change24h => "change",
            SortKey::MarketCap => "market-cap",
        };
        f.write_str(name)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(SortKey::Price),
            "change" | "change24h" | "change_24h" | "24h" => Ok(SortKey::Change24h),
            "market-cap" | "market_cap" | "marketcap" | "cap" => Ok(SortKey::MarketCap),
            other => Err(format!(
                "unknown sort key '{}' (expected price, change or market-cap)",
                other
            )),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Active sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Select `key`: the active key flips direction, a new key starts descending
    pub fn select(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.toggled();
        } else {
            self.key = key;
            self.direction = SortDirection::default();
        }
    }

    /// Stable in-place sort; missing values go last in either direction
    pub fn apply(&self, records: &mut [PriceRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &PriceRecord, b: &PriceRecord) -> Ordering {
        match (self.key.value(a), self.key.value(b)) {
            (Some(x), Some(y)) => match self.direction {
                SortDirection::Asc => x.cmp(&y),
                SortDirection::Desc => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
