//! Display helpers for amounts and dates

use chrono::NaiveDate;

/// Cents as US dollars: `199900` → `$1,999.00`
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// `2024-06-05` → `Jun 5, 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Cents to the plain dollar string used as an `<input>` value: `1999` → `19.99`
pub fn cents_to_input(cents: i64) -> String {
    format!("{:.2}", cents as f64 / 100.0)
}
