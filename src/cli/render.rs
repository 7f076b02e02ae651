use std::io::Write;
use std::str::FromStr;

use anyhow::Result;

use crate::application::{AppError, HistoryView, Session, SplitFormView};
use crate::domain::{format_amount, format_cents};

/// How list-like output is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(AppError::UnknownFormat(other.to_string())),
        }
    }
}

pub fn write_title<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Eat N' Split")?;
    writeln!(out, "{}", "=".repeat(12))?;
    Ok(())
}

pub fn write_friend_list<W: Write>(
    session: &Session,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    let rows = session.friend_rows();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *out);
            csv_writer.write_record(["position", "id", "name", "balance", "status", "selected"])?;
            for row in &rows {
                csv_writer.write_record([
                    row.position.to_string(),
                    row.id.to_string(),
                    row.name.clone(),
                    format_cents(row.balance),
                    row.status.to_string(),
                    row.selected.to_string(),
                ])?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                writeln!(out, "No friends yet.")?;
            }
            for row in &rows {
                let marker = if row.selected { '>' } else { ' ' };
                writeln!(out, "{} {:>2}  {}", marker, row.position, row.name)?;
                match &row.profile {
                    Some(profile) => {
                        writeln!(out, "      Email: {}", profile.email)?;
                        writeln!(out, "      Phone: {}", profile.phone)?;
                        writeln!(out, "      Address: {}", profile.address)?;
                    }
                    None => {
                        writeln!(
                            out,
                            "      {}",
                            row.status.describe(&row.name, session.currency())
                        )?;
                    }
                }
            }
            writeln!(out, "[{}]", session.add_friend_label())?;
        }
    }
    Ok(())
}

pub fn write_history<W: Write>(
    history: &HistoryView,
    currency: &str,
    format: OutputFormat,
    out: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(history)?)?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(&mut *out);
            csv_writer.write_record(["date", "expense", "amount"])?;
            for tx in &history.transactions {
                csv_writer.write_record([
                    tx.date.format("%Y-%m-%d").to_string(),
                    tx.expense.clone(),
                    format_cents(tx.amount),
                ])?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Table => {
            writeln!(out, "Transaction History: {}", history.name)?;
            if history.transactions.is_empty() {
                writeln!(out, "  No transactions yet.")?;
            }
            for tx in &history.transactions {
                writeln!(
                    out,
                    "  {}'s expense was {}{} on {}",
                    tx.expense,
                    format_amount(tx.amount),
                    currency,
                    tx.date.format("%Y-%m-%d")
                )?;
            }
        }
    }
    Ok(())
}

pub fn write_split_form<W: Write>(view: &SplitFormView, currency: &str, out: &mut W) -> Result<()> {
    let friend_share = view
        .paid_by_friend
        .map(|cents| format!("{}{}", format_amount(cents), currency))
        .unwrap_or_default();

    writeln!(out, "Split a bill with {}", view.friend)?;
    writeln!(out, "  Bill value:          {}{}", format_amount(view.bill), currency)?;
    writeln!(
        out,
        "  Your expense:        {}{}",
        format_amount(view.paid_by_user),
        currency
    )?;
    writeln!(
        out,
        "  {:<20} {}",
        format!("{}'s expense:", truncate(&view.friend, 10)),
        friend_share
    )?;
    writeln!(out, "  Who is paying:       {}", view.who_is_paying)?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
