//! Plain-text price table

use crate::feed::PriceRecord;
use crate::format::{format_large_number, format_percent, format_price};
use crate::ticker::{SortDirection, TickerState};
use std::fmt::Write;

/// Render `rows` with a footer describing `state`
pub fn price_table(state: &TickerState, rows: &[PriceRecord]) -> String {
    let currency = state.currency.as_str();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:>4}  {:<24} {:>16} {:>9} {:>12} {:>12}",
        "#", "Name", "Price", "24h", "Market Cap", "Volume"
    );
    let _ = writeln!(out, "{}", "─".repeat(82));

    for (i, record) in rows.iter().enumerate() {
        let name = format!("{} ({})", record.name, record.symbol.to_uppercase());
        let rank = record
            .market_cap_rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| (i + 1).to_string());
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>16} {:>9} {:>12} {:>12}",
            rank,
            truncate(&name, 24),
            or_na(record.current_price.map(|p| format_price(p, currency))),
            format_percent(record.price_change_percentage_24h),
            or_na(record.market_cap.map(|v| format_large_number(v, currency))),
            or_na(record.total_volume.map(|v| format_large_number(v, currency))),
        );
    }

    let direction = match state.sort.direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };
    let _ = write!(
        out,
        "\n{} of {} assets · sorted by {} ({}) · {}",
        rows.len(),
        state.prices.len(),
        state.sort.key,
        direction,
        currency.to_uppercase()
    );
    if let Some(updated) = state.last_updated {
        let _ = write!(out, " · updated {}", updated.format("%H:%M:%S UTC"));
    }
    if state.using_cache {
        let _ = write!(out, " · cached data");
    }

    out
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| "N/A".to_string())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}
