// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use eatnsplit::cli::Cli;
use eatnsplit::domain::{Friend, FriendId, FriendLedger, Profile};

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Friend with the given seeded id and a zero balance
pub fn make_friend(id: u64, name: &str) -> Friend {
    Friend::new(
        FriendId::Seeded(id),
        name.to_string(),
        format!("https://i.pravatar.cc/48?u={}", id),
        Profile::new(
            format!("{}@example.com", name.to_lowercase()),
            "555-0100",
            "1 Test Street",
        ),
    )
}

/// Ledger with friends A, B and C, all even
pub fn abc_ledger() -> FriendLedger {
    FriendLedger::from_friends(vec![
        make_friend(1, "A"),
        make_friend(2, "B"),
        make_friend(3, "C"),
    ])
}

/// Output of one scripted shell run
pub struct ShellRun {
    pub stdout: String,
    pub stderr: String,
}

/// Run the shell over `script` with the given extra process flags
pub fn run_shell(flags: &[&str], script: &str) -> Result<ShellRun> {
    let mut args = vec!["eatnsplit", "--no-prompt"];
    args.extend_from_slice(flags);
    let cli = Cli::try_parse_from(args)?;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    cli.run_with(script.as_bytes(), &mut stdout, &mut stderr)?;

    Ok(ShellRun {
        stdout: String::from_utf8(stdout)?,
        stderr: String::from_utf8(stderr)?,
    })
}
