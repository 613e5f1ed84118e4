//! Printable dispute letter.
//!
//! Renders one [`Dispute`] into plain text. Empty fields fall back to
//! bracketed placeholders so a half-filled draft still reads as a letter.

use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{Dispute, TimestampMillis};
use std::fmt::Write;

const STATUTE_FALLBACK: &str = "applicable federal and state statutes";
const LABEL_WIDTH: usize = 36;
const AMOUNT_WIDTH: usize = 14;

/// Render the dispute letter dated `today`.
pub fn render_letter(dispute: &Dispute, today: TimestampMillis) -> String {
    let date_of_service = if dispute.date_of_service.trim().is_empty() {
        "[Date]".to_string()
    } else {
        format_date(&dispute.date_of_service)
    };

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_letter(&mut out, dispute, &format_millis(today), &date_of_service);
    out
}

fn write_letter(
    out: &mut String,
    d: &Dispute,
    today: &str,
    date_of_service: &str,
) -> std::fmt::Result {
    writeln!(out, "{today}")?;
    writeln!(out)?;
    writeln!(out, "Billing Department")?;
    writeln!(out, "{}", or_placeholder(&d.provider_name, "[Provider Name]"))?;
    writeln!(out, "Re: Formal Billing Dispute")?;
    writeln!(out, "Patient: {}", or_placeholder(&d.patient_name, "[Patient Name]"))?;
    writeln!(out, "Case Ref: {}", or_placeholder(&d.patient_hash, "[Reference ID]"))?;
    writeln!(out)?;
    writeln!(out, "To Whom It May Concern,")?;
    writeln!(out)?;
    writeln!(
        out,
        "This letter serves as a formal dispute regarding the invoice received for services \
         rendered on {date_of_service}. Specifically, I am disputing the billed amount for \
         CPT Code: {}.",
        or_placeholder(&d.cpt_code, "[CPT]")
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "Under {}, providers are required to provide billing that is consistent with Fair \
         Market Value (FMV) and reasonable benchmarks. Upon forensic review, the following \
         variance was identified:",
        or_placeholder(&d.statute, STATUTE_FALLBACK)
    )?;
    writeln!(out)?;
    table_row(out, "Description", "Amount")?;
    table_row(out, "Billed Amount", &format_currency(d.billed_amount))?;
    table_row(
        out,
        "Fair Market Value (FMV) Benchmark",
        &format_currency(d.fmv_amount),
    )?;
    table_row(
        out,
        "Forensic Variance",
        &format!("({})", format_currency(d.variance)),
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "The billed amount represents a {:.1}% increase above the standard FMV for this \
         region and service type. This discrepancy exceeds reasonable valuation limits.",
        d.variance_percent
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "I request a revised statement reflecting the FMV benchmark within 30 days. Please \
         provide an itemized ledger and verification of the pricing methodology used for \
         this claim."
    )?;
    writeln!(out)?;
    writeln!(out, "Sincerely,")?;
    writeln!(out)?;
    writeln!(out, "{}", "_".repeat(24))?;
    writeln!(out, "{}", or_placeholder(&d.patient_name, "[Signature Name]"))
}

fn table_row(out: &mut String, label: &str, amount: &str) -> std::fmt::Result {
    writeln!(out, "  {label:<LABEL_WIDTH$}{amount:>AMOUNT_WIDTH$}")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

/// US dollar amount, e.g. `$1,200.00` or `-$35.10`.
///
/// Magnitudes beyond `u64::MAX` cents clamp to that value; NaN renders as zero.
pub fn format_currency(amount: f64) -> String {
    let cents = to_cents(amount);
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, digit) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

fn to_cents(amount: f64) -> u64 {
    let scaled = (amount.abs() * 100.0).round();
    if scaled.is_nan() {
        0
    } else if scaled >= u64::MAX as f64 {
        u64::MAX
    } else {
        scaled as u64
    }
}

/// Long US date, e.g. `March 15, 2024`.
///
/// Accepts `YYYY-MM-DD` or RFC 3339; anything else is returned verbatim.
pub fn format_date(value: &str) -> String {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return long_date(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return long_date(datetime.date_naive());
    }
    value.to_string()
}

fn format_millis(millis: TimestampMillis) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| long_date(dt.date_naive()))
        .unwrap_or_default()
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
